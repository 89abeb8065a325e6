/// Database access layer
///
/// - `schema`: ensure-deleted / ensure-created for the entity table
/// - `entity_repo`: reads and writes of tagged entities
pub mod entity_repo;
pub mod schema;

pub use entity_repo::EntityRepository;
