pub mod common;
pub mod config_validation;
pub mod error_mapping;
