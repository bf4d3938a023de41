//! Error handling for the resume crafter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeCrafterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("PDF rasterization error: {0}")]
    PdfRasterization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ResumeCrafterError>;

/// Convert anyhow errors (storage context chains) to our custom error type
impl From<anyhow::Error> for ResumeCrafterError {
    fn from(err: anyhow::Error) -> Self {
        ResumeCrafterError::Storage(format!("{:#}", err))
    }
}

impl From<askama::Error> for ResumeCrafterError {
    fn from(err: askama::Error) -> Self {
        ResumeCrafterError::Rendering(err.to_string())
    }
}
