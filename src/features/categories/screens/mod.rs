mod edit;
mod list;
mod new;

pub use edit::CategoryEditScreen;
pub use list::CategoryListScreen;
pub use new::CategoryNewScreen;
