//! The entity-capability trait implemented by every persisted record type.
//!
//! [`Entity`] carries what the generic repository and both stores need to
//! handle a record type without knowing it: its table and writable columns,
//! the foreign keys it holds, how to bind its columns to a query, and how to
//! convert to and from its transfer shape.

use buildtrack_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

/// A `query_as` builder over PostgreSQL returning rows of `E`.
pub type PgQueryAs<'q, E> = QueryAs<'q, Postgres, E, PgArguments>;

/// A foreign-key column and the table it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Column on the referencing table, e.g. `project_id`.
    pub column: &'static str,
    /// Referenced table, e.g. `projects`.
    pub table: &'static str,
    /// Display name of the referenced entity, used in not-found errors.
    pub entity: &'static str,
}

/// A concrete foreign-key value held by a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub key: ForeignKey,
    pub id: DbId,
}

impl ForeignKey {
    pub const fn to(self, id: DbId) -> Reference {
        Reference { key: self, id }
    }
}

/// The externally visible representation of an entity.
pub trait Transfer: Serialize + DeserializeOwned + Send + 'static {
    /// Identifier carried in the payload (0 when the client omitted it).
    fn id(&self) -> DbId;
}

/// A persisted record type.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static
{
    /// Display name used in error messages and logs.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// Writable columns in the order [`Entity::bind_columns`] binds them.
    /// Excludes `id`.
    const COLUMNS: &'static [&'static str];
    /// The foreign key to the parent this entity is nested under in routes.
    const PARENT: Option<ForeignKey> = None;

    type Dto: Transfer + From<Self> + Into<Self>;

    fn id(&self) -> DbId;

    fn set_id(&mut self, id: DbId);

    /// Foreign-key values held by this row, route parent first.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Point this row at a different route parent.
    fn set_parent_id(&mut self, _parent_id: DbId) {}

    /// Overlay every field of `dto` onto `self`, keeping the stored identity.
    fn apply(&mut self, dto: Self::Dto);

    /// Bind [`Entity::COLUMNS`] in order.
    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self>;

    /// Id of the route parent, if this entity has one.
    fn parent_id(&self) -> Option<DbId> {
        let parent = Self::PARENT?;
        self.references()
            .into_iter()
            .find(|r| r.key == parent)
            .map(|r| r.id)
    }
}
