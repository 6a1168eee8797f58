pub mod categories;
pub mod members;
