/// Entity Service Library
///
/// Persists entities whose repeated `tags` field is stored in a PostgreSQL
/// `text[]` column through the `pg-array` element converter.
///
/// # Modules
///
/// - `config`: Configuration management
/// - `db`: Schema lifecycle and entity repository
/// - `error`: Error types
/// - `models`: Entity and array property registration
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, Result};
