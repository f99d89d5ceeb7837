use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttentionError {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),
}
