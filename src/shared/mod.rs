pub mod constants;
pub mod screen;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
