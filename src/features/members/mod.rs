//! Member account administration.
//!
//! | Method | Path                                  | Screen action      |
//! |--------|---------------------------------------|--------------------|
//! | GET    | `/api/admin/members?page&limit`       | list               |
//! | DELETE | `/api/admin/members/{id}?page&limit`  | list: delete row   |
//! | GET    | `/api/admin/members/new`              | new: open          |
//! | POST   | `/api/admin/members/new`              | new: submit        |
//! | GET    | `/api/admin/members/{id}`             | edit: open         |
//! | PUT    | `/api/admin/members/{id}`             | edit: submit       |
//! | POST   | `/api/admin/members/{id}/delete`      | edit: delete       |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod screens;

pub use clients::{HttpMemberApi, MemberApi};
