use thiserror::Error;

pub type Result<T> = std::result::Result<T, DragError>;

#[derive(Debug, Error)]
pub enum DragError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Index {index} out of range for column of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
