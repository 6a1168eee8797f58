mod category;

pub use category::{Category, CreateCategoryInput, UpdateCategoryInput};
