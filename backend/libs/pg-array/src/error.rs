use thiserror::Error;

/// Errors raised while registering or verifying an array-mapped property.
///
/// Element conversion failures are not represented here: they propagate
/// unchanged from the element functions.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error(
        "column {table}.{column} is declared as '{declared}' but its elements map to '{expected}'"
    )]
    ColumnTypeMismatch {
        table: String,
        column: String,
        declared: String,
        expected: String,
    },

    #[error("unrecognized array column type '{declared}' for {table}.{column}")]
    UnsupportedColumnType {
        table: String,
        column: String,
        declared: String,
    },

    #[error("column {column} is NULL and the null policy rejects absent arrays")]
    UnexpectedNull { column: String },

    #[error("column {table}.{column} does not exist")]
    MissingColumn { table: String, column: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
