use sea_orm_migration::prelude::*;

mod m20240101_catalog_schema;
mod m20240102_film_search_indexes;

/// Creates the catalog schema on an empty database.
///
/// Production catalogs are provisioned externally and only read; this exists
/// for local SQLite catalogs and the test suite.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_catalog_schema::Migration),
            Box::new(m20240102_film_search_indexes::Migration),
        ]
    }
}
