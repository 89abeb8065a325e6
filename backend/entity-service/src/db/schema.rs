use pg_array::{ArrayProperty, TextElements};
use sqlx::{PgPool, Row};
use tracing::info;

use crate::error::Result;

/// Drop the table holding the tags column if it exists.
///
/// Returns `true` when a table was dropped.
pub async fn ensure_deleted(pool: &PgPool, tags: &ArrayProperty<TextElements>) -> Result<bool> {
    if !table_exists(pool, tags.table()).await? {
        info!(table = tags.table(), "Schema already absent, nothing to delete");
        return Ok(false);
    }

    sqlx::query(&drop_table_sql(tags)).execute(pool).await?;

    info!(table = tags.table(), "Schema deleted");
    Ok(true)
}

/// Create the entity table if it does not exist, declaring the tags column
/// from its array registration.
///
/// Returns `true` when the table was created.
pub async fn ensure_created(pool: &PgPool, tags: &ArrayProperty<TextElements>) -> Result<bool> {
    if table_exists(pool, tags.table()).await? {
        info!(table = tags.table(), "Schema already present");
        return Ok(false);
    }

    sqlx::query(&create_table_sql(tags)).execute(pool).await?;

    info!(
        table = tags.table(),
        column = tags.column(),
        column_type = tags.column_type(),
        "Schema created"
    );
    Ok(true)
}

/// Drop and recreate the schema.
pub async fn recreate(pool: &PgPool, tags: &ArrayProperty<TextElements>) -> Result<()> {
    ensure_deleted(pool, tags).await?;
    ensure_created(pool, tags).await?;
    Ok(())
}

fn drop_table_sql(tags: &ArrayProperty<TextElements>) -> String {
    format!("DROP TABLE {}", tags.table())
}

fn create_table_sql(tags: &ArrayProperty<TextElements>) -> String {
    format!(
        "CREATE TABLE {} (id SERIAL PRIMARY KEY, {})",
        tags.table(),
        tags.column_definition()
    )
}

async fn table_exists(pool: &PgPool, table: &str) -> Result<bool> {
    let row = sqlx::query("SELECT to_regclass($1) IS NOT NULL AS present")
        .bind(table)
        .fetch_one(pool)
        .await?;

    Ok(row.try_get::<bool, _>("present")?)
}
