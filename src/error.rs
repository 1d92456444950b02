use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Field error: {message}")]
    Field { message: String },
}

pub type Result<T> = std::result::Result<T, EtlError>;
