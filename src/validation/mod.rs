//! Syntactic checks for Brazilian taxpayer ids and court process numbers.

pub mod document;

pub use document::{digits_only, is_valid_cnpj, is_valid_cpf, is_valid_process_number};
