use thiserror::Error;

/// Errors shared by every crate in the workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid score {0}: expected an integer between 1 and 5")]
    InvalidScore(i64),
}
