mod member;

pub use member::{
    CreateMemberInput, Member, MemberGrade, MemberPage, MemberRole, MemberStatus, Pagination,
    UpdateMemberInput,
};
