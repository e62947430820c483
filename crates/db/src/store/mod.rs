//! Storage backends.
//!
//! - [`postgres::PgStore`] -- PostgreSQL through a `sqlx` pool.
//! - [`memory::MemoryStore`] -- process-local tables for development and tests.
//!
//! [`Store`] dispatches to whichever backend was selected at startup.

pub mod memory;
pub mod postgres;

use buildtrack_core::types::DbId;

use crate::entity::{Entity, Reference};
use crate::DbPool;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failure of an insert or replace.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A row the entity references was gone when the write took its lock.
    #[error("{} with id {} not found", .0.key.entity, .0.id)]
    MissingReference(Reference),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Store {
    pub fn postgres(pool: DbPool) -> Self {
        Self::Postgres(PgStore::new(pool))
    }

    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Short backend name for logs and the health endpoint.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        match self {
            Self::Postgres(s) => crate::health_check(s.pool()).await,
            Self::Memory(_) => Ok(()),
        }
    }

    pub async fn list<E: Entity>(&self, scope: Option<Reference>) -> Result<Vec<E>, sqlx::Error> {
        match self {
            Self::Postgres(s) => s.list(scope).await,
            Self::Memory(s) => s.list(scope).await,
        }
    }

    pub async fn find_by_id<E: Entity>(&self, id: DbId) -> Result<Option<E>, sqlx::Error> {
        match self {
            Self::Postgres(s) => s.find_by_id(id).await,
            Self::Memory(s) => s.find_by_id(id).await,
        }
    }

    pub async fn insert<E: Entity>(&self, entity: &E) -> Result<E, StoreError> {
        match self {
            Self::Postgres(s) => Ok(s.insert(entity).await?),
            Self::Memory(s) => s.insert(entity).await,
        }
    }

    pub async fn replace<E: Entity>(&self, entity: &E) -> Result<bool, StoreError> {
        match self {
            Self::Postgres(s) => Ok(s.replace(entity).await?),
            Self::Memory(s) => s.replace(entity).await,
        }
    }

    pub async fn delete<E: Entity>(&self, id: DbId) -> Result<bool, sqlx::Error> {
        match self {
            Self::Postgres(s) => s.delete::<E>(id).await,
            Self::Memory(s) => s.delete::<E>(id).await,
        }
    }

    pub async fn exists(&self, table: &'static str, id: DbId) -> Result<bool, sqlx::Error> {
        match self {
            Self::Postgres(s) => s.exists(table, id).await,
            Self::Memory(s) => s.exists(table, id).await,
        }
    }
}
