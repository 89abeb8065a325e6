/// Data structures persisted by the entity service
use pg_array::{ArrayProperty, MappingError, RepeatedField, TextElements};
use serde::{Deserialize, Serialize};

pub const ENTITIES_TABLE: &str = "my_entities";
pub const TAGS_COLUMN: &str = "tags";

/// Entity whose `tags` repeated field lives in a `text[]` column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedEntity {
    pub id: i32,
    pub tags: RepeatedField<String>,
}

/// Registration of the `tags` property against its array column.
pub fn tags_property() -> Result<ArrayProperty<TextElements>, MappingError> {
    ArrayProperty::new(ENTITIES_TABLE, TAGS_COLUMN).has_column_type("text[]")
}
