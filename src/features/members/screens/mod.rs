mod edit;
mod list;
mod new;

pub use edit::MemberEditScreen;
pub use list::MemberListScreen;
pub use new::MemberNewScreen;
