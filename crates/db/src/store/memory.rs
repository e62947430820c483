//! Process-local store for development and tests.
//!
//! Rows are kept per table behind one async `RwLock`, which serializes
//! writes. Ids come from a per-table counter starting at 1. Inserts and
//! replaces check the rows they reference under the write lock, and deleting
//! a row removes every row that references it, recursively, the same way
//! the PostgreSQL schema enforces and cascades its foreign keys.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use buildtrack_core::types::DbId;
use tokio::sync::RwLock;

use crate::entity::{Entity, Reference};
use crate::store::StoreError;

trait StoredRow: Any + Send + Sync {
    fn references(&self) -> Vec<Reference>;
    fn as_any(&self) -> &dyn Any;
}

impl<E: Entity> StoredRow for E {
    fn references(&self) -> Vec<Reference> {
        Entity::references(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Default)]
struct Table {
    next_id: DbId,
    rows: BTreeMap<DbId, Box<dyn StoredRow>>,
}

type Tables = HashMap<&'static str, Table>;

/// In-memory entity store. Cloning shares the underlying tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list<E: Entity>(&self, scope: Option<Reference>) -> Result<Vec<E>, sqlx::Error> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(E::TABLE) else {
            return Ok(Vec::new());
        };
        Ok(table
            .rows
            .values()
            .filter(|row| scope.is_none_or(|s| row.references().contains(&s)))
            .filter_map(|row| row.as_any().downcast_ref::<E>())
            .cloned()
            .collect())
    }

    pub async fn find_by_id<E: Entity>(&self, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(E::TABLE)
            .and_then(|table| table.rows.get(&id))
            .and_then(|row| row.as_any().downcast_ref::<E>())
            .cloned())
    }

    pub async fn insert<E: Entity>(&self, entity: &E) -> Result<E, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_references(&tables, entity)?;
        let table = tables.entry(E::TABLE).or_default();
        table.next_id += 1;

        let mut row = entity.clone();
        row.set_id(table.next_id);
        table.rows.insert(row.id(), Box::new(row.clone()));
        Ok(row)
    }

    pub async fn replace<E: Entity>(&self, entity: &E) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_references(&tables, entity)?;
        let Some(slot) = tables
            .get_mut(E::TABLE)
            .and_then(|table| table.rows.get_mut(&entity.id()))
        else {
            return Ok(false);
        };
        *slot = Box::new(entity.clone());
        Ok(true)
    }

    pub async fn delete<E: Entity>(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.write().await;
        Ok(delete_cascade(&mut tables, E::TABLE, id))
    }

    pub async fn exists(&self, table: &'static str, id: DbId) -> Result<bool, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .is_some_and(|t| t.rows.contains_key(&id)))
    }
}

fn ensure_references<E: Entity>(tables: &Tables, entity: &E) -> Result<(), StoreError> {
    let missing = Entity::references(entity).into_iter().find(|r| {
        !tables
            .get(r.key.table)
            .is_some_and(|t| t.rows.contains_key(&r.id))
    });
    match missing {
        Some(reference) => Err(StoreError::MissingReference(reference)),
        None => Ok(()),
    }
}

fn delete_cascade(tables: &mut Tables, table: &'static str, id: DbId) -> bool {
    let removed = tables
        .get_mut(table)
        .and_then(|t| t.rows.remove(&id))
        .is_some();
    if !removed {
        return false;
    }

    let dependents: Vec<(&'static str, DbId)> = tables
        .iter()
        .flat_map(|(name, t)| {
            t.rows
                .iter()
                .filter(move |(_, row)| {
                    row.references()
                        .iter()
                        .any(|r| r.key.table == table && r.id == id)
                })
                .map(move |(row_id, _)| (*name, *row_id))
        })
        .collect();

    for (name, row_id) in dependents {
        tracing::debug!(table = name, id = row_id, "Cascading delete");
        delete_cascade(tables, name, row_id);
    }
    true
}
