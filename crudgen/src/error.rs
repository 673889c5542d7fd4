//! Error types for crudgen

use thiserror::Error;

/// Result type alias for crudgen operations
pub type Result<T> = std::result::Result<T, CrudgenError>;

/// Errors that can occur while inspecting a table or emitting a project
#[derive(Error, Debug)]
pub enum CrudgenError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Unsupported column: {0}")]
    UnsupportedColumn(String),

    #[error("Archive not found: {0}")]
    ArchiveNotFound(String),

    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlparser::parser::ParserError> for CrudgenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        CrudgenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CrudgenError {
    fn from(err: config::ConfigError) -> Self {
        CrudgenError::ConfigError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CrudgenError {
    fn from(err: tokio::task::JoinError) -> Self {
        CrudgenError::Internal(err.to_string())
    }
}
