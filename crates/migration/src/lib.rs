//! Migrator registering entity-specific migrations in dependency order.
//! Indexes come after the tables, seed data last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_venue;
mod m20240101_000002_create_artist;
mod m20240101_000003_create_show;
mod m20240101_000004_create_category;
mod m20240101_000005_create_question;
mod m20240101_000006_add_indexes;
mod m20240101_000007_seed_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_venue::Migration),
            Box::new(m20240101_000002_create_artist::Migration),
            Box::new(m20240101_000003_create_show::Migration),
            Box::new(m20240101_000004_create_category::Migration),
            Box::new(m20240101_000005_create_question::Migration),
            // Indexes are applied once all tables exist
            Box::new(m20240101_000006_add_indexes::Migration),
            Box::new(m20240101_000007_seed_categories::Migration),
        ]
    }
}
