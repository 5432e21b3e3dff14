pub mod validate;

pub use validate::{validate_group, validate_group_name, validate_minimum_score};
