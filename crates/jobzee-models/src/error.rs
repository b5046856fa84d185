//! Model conversion errors.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Invalid salary: {0}")]
    InvalidSalary(String),
}
