mod category_api;
#[cfg(test)]
pub mod testing;

pub use category_api::{CategoryApi, HttpCategoryApi};
