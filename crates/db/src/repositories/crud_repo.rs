//! Generic CRUD repository over any [`Entity`].
//!
//! `parent_id` is the id of the route parent for nested entities
//! (`/projects/{project_id}/tasks`, `/tasks/{task_id}/usages`) and `None`
//! for flat routes. When present, the parent is checked before anything
//! else is read or written, and a child stored under a different parent is
//! reported as not found.

use std::marker::PhantomData;

use buildtrack_core::error::CoreError;
use buildtrack_core::types::DbId;

use crate::entity::{Entity, Reference, Transfer};
use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingReference(reference) => CoreError::NotFound {
                entity: reference.key.entity,
                id: reference.id,
            }
            .into(),
            StoreError::Database(db) => RepoError::Database(db),
        }
    }
}

/// Provides list/get/create/replace/delete for entity type `E`.
pub struct CrudRepo<E>(PhantomData<E>);

impl<E: Entity> CrudRepo<E> {
    pub async fn list(store: &Store, parent_id: Option<DbId>) -> RepoResult<Vec<E>> {
        let scope = Self::ensure_parent(store, parent_id).await?;
        Ok(store.list::<E>(scope).await?)
    }

    pub async fn find_by_id(store: &Store, parent_id: Option<DbId>, id: DbId) -> RepoResult<E> {
        Self::ensure_parent(store, parent_id).await?;
        Self::find_scoped(store, parent_id, id).await
    }

    /// Insert `entity` under `parent_id`, returning it with its assigned id.
    ///
    /// The route parent overrides whatever parent the entity carried.
    pub async fn create(store: &Store, parent_id: Option<DbId>, mut entity: E) -> RepoResult<E> {
        Self::ensure_parent(store, parent_id).await?;
        if let Some(parent_id) = parent_id {
            entity.set_parent_id(parent_id);
        }
        Self::ensure_references(store, &entity, parent_id).await?;
        Ok(store.insert(&entity).await?)
    }

    /// Replace every field of row `id` with the values in `dto`.
    ///
    /// `dto` must carry the same id as the path; a mismatch is rejected
    /// before any lookup.
    pub async fn replace(
        store: &Store,
        parent_id: Option<DbId>,
        id: DbId,
        dto: E::Dto,
    ) -> RepoResult<E> {
        if dto.id() != id {
            return Err(CoreError::Validation(format!(
                "{} id in path ({id}) does not match id in body ({})",
                E::NAME,
                dto.id()
            ))
            .into());
        }
        Self::ensure_parent(store, parent_id).await?;

        let mut entity = Self::find_scoped(store, parent_id, id).await?;
        entity.apply(dto);
        if let Some(parent_id) = parent_id {
            entity.set_parent_id(parent_id);
        }
        Self::ensure_references(store, &entity, parent_id).await?;

        if !store.replace(&entity).await? {
            return Err(Self::not_found(id));
        }
        Ok(entity)
    }

    pub async fn delete(store: &Store, parent_id: Option<DbId>, id: DbId) -> RepoResult<()> {
        Self::ensure_parent(store, parent_id).await?;
        Self::find_scoped(store, parent_id, id).await?;
        if !store.delete::<E>(id).await? {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    /// Check the route parent exists and return the scope it implies.
    async fn ensure_parent(
        store: &Store,
        parent_id: Option<DbId>,
    ) -> RepoResult<Option<Reference>> {
        let (Some(key), Some(parent_id)) = (E::PARENT, parent_id) else {
            return Ok(None);
        };
        if !store.exists(key.table, parent_id).await? {
            return Err(CoreError::NotFound {
                entity: key.entity,
                id: parent_id,
            }
            .into());
        }
        Ok(Some(key.to(parent_id)))
    }

    /// Check every row `entity` references exists, skipping the route parent
    /// that [`Self::ensure_parent`] already verified.
    async fn ensure_references(
        store: &Store,
        entity: &E,
        parent_id: Option<DbId>,
    ) -> RepoResult<()> {
        for reference in entity.references() {
            let is_route_parent =
                Some(reference.key) == E::PARENT && Some(reference.id) == parent_id;
            if is_route_parent {
                continue;
            }
            if !store.exists(reference.key.table, reference.id).await? {
                tracing::debug!(
                    entity = E::NAME,
                    column = reference.key.column,
                    id = reference.id,
                    "Referenced row missing"
                );
                return Err(CoreError::NotFound {
                    entity: reference.key.entity,
                    id: reference.id,
                }
                .into());
            }
        }
        Ok(())
    }

    async fn find_scoped(store: &Store, parent_id: Option<DbId>, id: DbId) -> RepoResult<E> {
        let entity = store
            .find_by_id::<E>(id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        if parent_id.is_some() && E::PARENT.is_some() && entity.parent_id() != parent_id {
            return Err(Self::not_found(id));
        }
        Ok(entity)
    }

    fn not_found(id: DbId) -> RepoError {
        CoreError::NotFound {
            entity: E::NAME,
            id,
        }
        .into()
    }
}
