//! Repeated fields persisted as PostgreSQL arrays
//!
//! Provides the element converter adapter that lifts a per-element
//! conversion pair to whole collections, and its sqlx binding:
//!
//! ```rust,ignore
//! use pg_array::{ArrayProperty, PgArray, TextElements};
//!
//! let tags = ArrayProperty::<TextElements>::new("my_entities", "tags")
//!     .has_column_type("text[]")?;
//!
//! sqlx::query("INSERT INTO my_entities (tags) VALUES ($1)")
//!     .bind(PgArray::<TextElements>::new(entity.tags.clone()))
//!     .execute(&pool)
//!     .await?;
//! ```

pub mod converter;
pub mod error;
pub mod mapping;
pub mod property;
pub mod repeated;

pub use converter::{
    adapt, ArrayConverter, ElementConverter, FnElementConverter, IdentityConverter,
    ValueConversion,
};
pub use error::MappingError;
pub use mapping::{ElementMapping, NullArrayPolicy, PgArray, TextElements};
pub use property::{normalize_array_type, ArrayProperty};
pub use repeated::RepeatedField;
