use pg_array::{ArrayProperty, NullArrayPolicy, PgArray, RepeatedField, TextElements};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::TaggedEntity;

/// SQL for one registered table/column pair
#[derive(Debug, Clone)]
struct Statements {
    insert: String,
    list: String,
    find: String,
    replace: String,
    delete: String,
}

impl Statements {
    fn for_property(tags: &ArrayProperty<TextElements>) -> Self {
        let table = tags.table();
        let column = tags.column();
        Self {
            insert: format!("INSERT INTO {table} ({column}) VALUES ($1) RETURNING id, {column}"),
            list: format!("SELECT id, {column} FROM {table} ORDER BY id"),
            find: format!("SELECT id, {column} FROM {table} WHERE id = $1"),
            replace: format!(
                "UPDATE {table} SET {column} = $2 WHERE id = $1 RETURNING id, {column}"
            ),
            delete: format!("DELETE FROM {table} WHERE id = $1"),
        }
    }
}

/// Repository for entities whose tags live in a registered array column.
///
/// Reads resolve a NULL tags column through `null_policy`. With
/// `sensitive_data` enabled, debug logs carry tag values instead of counts.
#[derive(Debug, Clone)]
pub struct EntityRepository {
    pool: PgPool,
    tags: ArrayProperty<TextElements>,
    statements: Statements,
    null_policy: NullArrayPolicy,
    sensitive_data: bool,
}

impl EntityRepository {
    pub fn new(
        pool: PgPool,
        tags: ArrayProperty<TextElements>,
        null_policy: NullArrayPolicy,
        sensitive_data: bool,
    ) -> Self {
        let statements = Statements::for_property(&tags);
        Self {
            pool,
            tags,
            statements,
            null_policy,
            sensitive_data,
        }
    }

    /// Insert a new entity and return it with its assigned id
    pub async fn insert_entity(&self, tags: &RepeatedField<String>) -> Result<TaggedEntity> {
        let row = sqlx::query(&self.statements.insert)
            .bind(PgArray::<TextElements>::new(tags.clone()))
            .fetch_one(&self.pool)
            .await?;

        let entity = self.entity_from_row(&row)?;
        self.log_tags("Inserted entity", entity.id, &entity.tags);
        Ok(entity)
    }

    /// Load every entity, ordered by id
    pub async fn list_entities(&self) -> Result<Vec<TaggedEntity>> {
        let rows = sqlx::query(&self.statements.list)
            .fetch_all(&self.pool)
            .await?;

        let entities = rows
            .iter()
            .map(|row| self.entity_from_row(row))
            .collect::<Result<Vec<_>>>()?;

        debug!(table = self.tags.table(), count = entities.len(), "Loaded entities");
        Ok(entities)
    }

    /// Find an entity by id
    pub async fn find_entity(&self, id: i32) -> Result<Option<TaggedEntity>> {
        let row = sqlx::query(&self.statements.find)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| self.entity_from_row(&row)).transpose()
    }

    /// Overwrite the tags of an existing entity
    pub async fn replace_tags(&self, id: i32, tags: &RepeatedField<String>) -> Result<TaggedEntity> {
        let row = sqlx::query(&self.statements.replace)
            .bind(id)
            .bind(PgArray::<TextElements>::new(tags.clone()))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("entity {}", id)))?;

        let entity = self.entity_from_row(&row)?;
        self.log_tags("Replaced entity tags", entity.id, &entity.tags);
        Ok(entity)
    }

    /// Delete an entity, returning whether it existed
    pub async fn delete_entity(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(&self.statements.delete)
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(entity_id = id, deleted = result.rows_affected() > 0, "Delete entity");
        Ok(result.rows_affected() > 0)
    }

    fn entity_from_row(&self, row: &PgRow) -> Result<TaggedEntity> {
        let column = self.tags.column();
        let tags: Option<PgArray<TextElements>> = row.try_get(column)?;

        Ok(TaggedEntity {
            id: row.try_get("id")?,
            tags: PgArray::from_nullable(tags, self.null_policy, column)?,
        })
    }

    fn log_tags(&self, message: &str, id: i32, tags: &RepeatedField<String>) {
        if self.sensitive_data {
            debug!(entity_id = id, tags = ?tags.as_slice(), "{}", message);
        } else {
            debug!(entity_id = id, tag_count = tags.len(), "{}", message);
        }
    }
}
