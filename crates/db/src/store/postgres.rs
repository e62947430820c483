//! PostgreSQL store.
//!
//! SQL is assembled from the entity's static table and column metadata, so
//! every statement is a single atomic round trip.

use buildtrack_core::types::DbId;

use crate::entity::{Entity, Reference};
use crate::DbPool;

/// `id` followed by the entity's writable columns.
fn select_columns<E: Entity>() -> String {
    let mut columns = Vec::with_capacity(E::COLUMNS.len() + 1);
    columns.push("id");
    columns.extend_from_slice(E::COLUMNS);
    columns.join(", ")
}

/// Entity store backed by a `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// List rows ordered by id, optionally restricted to one parent.
    pub async fn list<E: Entity>(&self, scope: Option<Reference>) -> Result<Vec<E>, sqlx::Error> {
        let columns = select_columns::<E>();
        match scope {
            Some(scope) => {
                let query = format!(
                    "SELECT {columns} FROM {} WHERE {} = $1 ORDER BY id",
                    E::TABLE,
                    scope.key.column
                );
                sqlx::query_as::<_, E>(&query)
                    .bind(scope.id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let query = format!("SELECT {columns} FROM {} ORDER BY id", E::TABLE);
                sqlx::query_as::<_, E>(&query).fetch_all(&self.pool).await
            }
        }
    }

    pub async fn find_by_id<E: Entity>(&self, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            select_columns::<E>(),
            E::TABLE
        );
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a row, returning it with the id assigned by the database.
    pub async fn insert<E: Entity>(&self, entity: &E) -> Result<E, sqlx::Error> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders}) RETURNING {}",
            E::TABLE,
            E::COLUMNS.join(", "),
            select_columns::<E>()
        );
        entity
            .bind_columns(sqlx::query_as::<_, E>(&query))
            .fetch_one(&self.pool)
            .await
    }

    /// Overwrite every writable column of the row with `entity.id()`.
    ///
    /// Returns `false` if no such row exists.
    pub async fn replace<E: Entity>(&self, entity: &E) -> Result<bool, sqlx::Error> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "UPDATE {} SET {assignments} WHERE id = ${} RETURNING {}",
            E::TABLE,
            E::COLUMNS.len() + 1,
            select_columns::<E>()
        );
        let updated = entity
            .bind_columns(sqlx::query_as::<_, E>(&query))
            .bind(entity.id())
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated.is_some())
    }

    /// Delete a row by id. Dependent rows go with it via `ON DELETE CASCADE`.
    pub async fn delete<E: Entity>(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(&self, table: &'static str, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)");
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }
}
