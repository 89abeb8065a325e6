/// Error types for Entity Service
use pg_array::MappingError;
use thiserror::Error;

/// Result type for entity-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Array column registration or NULL handling failed
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
}
