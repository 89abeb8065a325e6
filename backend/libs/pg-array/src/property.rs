//! Per-property registration of an array mapping
//!
//! Binds an [`ElementMapping`] to one `table.column` and checks, at setup
//! time, that the declared column type matches the element storage type.

use crate::converter::{ArrayConverter, FnElementConverter};
use crate::error::MappingError;
use crate::mapping::ElementMapping;
use sqlx::postgres::{PgHasArrayType, PgPool};
use sqlx::{Row, TypeInfo};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Registration of `M` against a single array column.
pub struct ArrayProperty<M> {
    table: String,
    column: String,
    column_type: String,
    _mapping: PhantomData<fn() -> M>,
}

impl<M: ElementMapping> ArrayProperty<M> {
    /// Register `M` for `table.column`, declared with `M::COLUMN_TYPE`.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            column_type: M::COLUMN_TYPE.to_string(),
            _mapping: PhantomData,
        }
    }

    /// Override the declared column type.
    ///
    /// Fails when the declaration does not describe an array of the
    /// mapping's storage element type.
    pub fn has_column_type(mut self, declared: &str) -> Result<Self, MappingError> {
        let normalized =
            normalize_array_type(declared).ok_or_else(|| MappingError::UnsupportedColumnType {
                table: self.table.clone(),
                column: self.column.clone(),
                declared: declared.to_string(),
            })?;

        let expected = Self::expected_type();
        if normalized != expected {
            return Err(MappingError::ColumnTypeMismatch {
                table: self.table,
                column: self.column,
                declared: declared.to_string(),
                expected,
            });
        }

        self.column_type = declared.trim().to_string();
        Ok(self)
    }

    /// Normalized array type produced by `M::Storage`, e.g. `text[]`.
    pub fn expected_type() -> String {
        let info = <M::Storage as PgHasArrayType>::array_type_info();
        normalize_array_type(info.name()).unwrap_or_else(|| info.name().to_ascii_lowercase())
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn column_type(&self) -> &str {
        &self.column_type
    }

    pub fn converter(
        &self,
    ) -> ArrayConverter<FnElementConverter<M::Domain, M::Storage, M::Error>> {
        M::converter()
    }

    /// DDL fragment for the column. Empty collections are stored as `'{}'`,
    /// so the column never needs to hold NULL.
    pub fn column_definition(&self) -> String {
        format!("{} {} NOT NULL DEFAULT '{{}}'", self.column, self.column_type)
    }

    /// Check the live column in the current schema against this registration.
    pub async fn verify_column(&self, pool: &PgPool) -> Result<(), MappingError> {
        debug!(
            table = %self.table,
            column = %self.column,
            "Verifying array column type"
        );

        let row = sqlx::query(
            r#"
            SELECT udt_name::text AS udt_name
            FROM information_schema.columns
            WHERE table_schema = current_schema()
              AND table_name = $1
              AND column_name = $2
            "#,
        )
        .bind(&self.table)
        .bind(&self.column)
        .fetch_optional(pool)
        .await?;

        let Some(row) = row else {
            warn!(table = %self.table, column = %self.column, "Array column not found");
            return Err(MappingError::MissingColumn {
                table: self.table.clone(),
                column: self.column.clone(),
            });
        };

        let udt_name: String = row.try_get("udt_name")?;
        let actual = normalize_array_type(&udt_name);
        let expected = Self::expected_type();

        if actual.as_deref() != Some(expected.as_str()) {
            return Err(MappingError::ColumnTypeMismatch {
                table: self.table.clone(),
                column: self.column.clone(),
                declared: udt_name,
                expected,
            });
        }

        info!(
            table = %self.table,
            column = %self.column,
            column_type = %expected,
            "Array column verified"
        );
        Ok(())
    }
}

impl<M> Clone for ArrayProperty<M> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            column: self.column.clone(),
            column_type: self.column_type.clone(),
            _mapping: PhantomData,
        }
    }
}

impl<M> fmt::Debug for ArrayProperty<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayProperty")
            .field("table", &self.table)
            .field("column", &self.column)
            .field("column_type", &self.column_type)
            .field("mapping", &std::any::type_name::<M>())
            .finish()
    }
}

/// Canonical `base[]` spelling of a PostgreSQL array type.
///
/// Accepts SQL declarations (`integer[]`, `VARCHAR(20)[]`), sqlx display
/// names (`TEXT[]`) and catalog names (`_text`). Returns `None` for
/// non-array types.
pub fn normalize_array_type(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_ascii_lowercase();

    let base = if let Some(base) = lowered.strip_suffix("[]") {
        base.trim_end().to_string()
    } else if let Some(base) = lowered.strip_prefix('_') {
        base.to_string()
    } else {
        return None;
    };

    let base = strip_type_modifiers(&base);
    if base.is_empty() {
        return None;
    }

    let canonical = match base.as_str() {
        "int" | "integer" => "int4",
        "bigint" => "int8",
        "smallint" => "int2",
        "boolean" => "bool",
        "real" => "float4",
        "double precision" => "float8",
        "decimal" => "numeric",
        "character varying" => "varchar",
        "character" | "char" => "bpchar",
        "timestamp with time zone" => "timestamptz",
        "timestamp without time zone" => "timestamp",
        "time without time zone" => "time",
        other => other,
    };

    Some(format!("{}[]", canonical))
}

/// Remove every `(...)` modifier, e.g. varchar(20) or timestamp(3) with time zone,
/// and collapse the remaining words to single spaces.
fn strip_type_modifiers(base: &str) -> String {
    let mut out = String::with_capacity(base.len());
    let mut depth = 0usize;
    for ch in base.chars() {
        match ch {
            '(' => {
                depth += 1;
                out.push(' ');
            }
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
