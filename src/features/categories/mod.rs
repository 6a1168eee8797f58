//! Category tree administration.
//!
//! | Method | Path                                   | Screen action        |
//! |--------|----------------------------------------|----------------------|
//! | GET    | `/api/admin/categories`                | list                 |
//! | DELETE | `/api/admin/categories/{id}`           | list: delete row     |
//! | GET    | `/api/admin/categories/new`            | new: open            |
//! | POST   | `/api/admin/categories/new`            | new: submit          |
//! | GET    | `/api/admin/categories/{id}`           | edit: open           |
//! | PUT    | `/api/admin/categories/{id}`           | edit: submit         |
//! | POST   | `/api/admin/categories/{id}/delete`    | edit: delete         |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod screens;
pub mod tree;

pub use clients::{CategoryApi, HttpCategoryApi};
