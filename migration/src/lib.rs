pub use sea_orm_migration::prelude::*;

mod m20250712_000001_create_identity_tables;
mod m20250712_000002_create_catalog_tables;
mod m20250712_000003_create_operations_tables;
mod m20250712_000004_seed_roles;

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250712_000001_create_identity_tables::Migration),
            Box::new(m20250712_000002_create_catalog_tables::Migration),
            Box::new(m20250712_000003_create_operations_tables::Migration),
            Box::new(m20250712_000004_seed_roles::Migration),
        ]
    }
}
