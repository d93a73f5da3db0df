use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no symptom text provided")]
    EmptyInput,

    #[error("{0} is not available")]
    Unavailable(String),

    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("unknown disease label: {0}")]
    UnknownLabel(String),

    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("classification failed: {0}")]
    Internal(String),
}
