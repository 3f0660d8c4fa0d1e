use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::validation::{is_valid_cnpj, is_valid_cpf, is_valid_process_number};

/// What the query value identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    #[serde(rename = "cpf")]
    Cpf,
    #[serde(rename = "cnpj")]
    Cnpj,
    #[serde(rename = "processo", alias = "processNumber")]
    ProcessNumber,
}

impl QueryKind {
    /// Name used on the wire and in the response echo.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Cpf => "cpf",
            QueryKind::Cnpj => "cnpj",
            QueryKind::ProcessNumber => "processo",
        }
    }

    /// Reject empty values and values failing the kind's document check.
    pub fn validate(&self, raw_value: &str) -> Result<(), ValidationError> {
        if raw_value.trim().is_empty() {
            return Err(ValidationError::MissingInput);
        }
        match self {
            QueryKind::Cpf if !is_valid_cpf(raw_value) => Err(ValidationError::InvalidCpf),
            QueryKind::Cnpj if !is_valid_cnpj(raw_value) => Err(ValidationError::InvalidCnpj),
            QueryKind::ProcessNumber if !is_valid_process_number(raw_value) => {
                Err(ValidationError::InvalidProcessNumber)
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpf" => Ok(QueryKind::Cpf),
            "cnpj" => Ok(QueryKind::Cnpj),
            "processo" | "processNumber" => Ok(QueryKind::ProcessNumber),
            "" => Err(ValidationError::MissingInput),
            other => Err(ValidationError::UnsupportedKind(other.to_owned())),
        }
    }
}
