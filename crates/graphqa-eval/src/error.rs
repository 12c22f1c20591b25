//! Error types for the graphqa-eval crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Failed to read reference dataset: {0}")]
    Dataset(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EvalError>;
