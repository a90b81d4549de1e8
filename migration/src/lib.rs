pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::MigrationStatus;

pub mod m20230918_000001_persona_baseline;
pub mod m20230918_151837_add_retrieval_enabled;
mod revision;

pub use revision::{Revision, RevisionError, RevisionGraph, Revisioned, Step};

pub struct Migrator;

fn steps() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(m20230918_000001_persona_baseline::Migration),
        Box::new(m20230918_151837_add_retrieval_enabled::Migration),
    ]
}

/// Resolves the registered steps into apply order.
pub fn resolve() -> Result<RevisionGraph, RevisionError> {
    RevisionGraph::resolve(steps())
}

fn ordered(steps: Vec<Box<dyn Step>>) -> Vec<Box<dyn MigrationTrait>> {
    RevisionGraph::resolve(steps)
        .unwrap_or_else(|e| panic!("invalid revision chain: {e}"))
        .into_migrations()
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        ordered(steps())
    }
}
