use thiserror::Error;

#[derive(Error, Debug)]
pub enum GemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("invalid value for parameter {key}: {reason}")]
    InvalidParameter { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GemError>;
