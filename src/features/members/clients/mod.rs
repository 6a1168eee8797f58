mod member_api;
#[cfg(test)]
pub mod testing;

pub use member_api::{HttpMemberApi, MemberApi};
