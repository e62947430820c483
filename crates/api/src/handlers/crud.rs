//! Generic CRUD handlers, instantiated once per entity type in `routes`.
//!
//! Flat resources (`/projects`, `/employees`, `/resources`) use the plain
//! handlers. Resources nested under a parent (`/projects/{id}/tasks`,
//! `/tasks/{task_id}/usages`) use the `*_nested` variants, which take the
//! parent id from the path and have it checked before anything else.
//!
//! Reads are public. Writes take [`RequireAdmin`] first.

use axum::extract::{OriginalUri, Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use buildtrack_core::types::DbId;
use buildtrack_db::entity::Entity;
use buildtrack_db::repositories::CrudRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

// ---------------------------------------------------------------------------
// Flat resources
// ---------------------------------------------------------------------------

/// GET /api/v1/{resource}
pub async fn list<E: Entity>(State(state): State<AppState>) -> AppResult<Json<Vec<E::Dto>>> {
    list_under::<E>(&state, None).await
}

/// GET /api/v1/{resource}/{id}
pub async fn get_by_id<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<E::Dto>> {
    get_under::<E>(&state, None, id).await
}

/// POST /api/v1/{resource}
pub async fn create<E: Entity>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(input): Json<E::Dto>,
) -> AppResult<Created<E::Dto>> {
    create_under::<E>(&state, None, uri.path(), &admin.username, input).await
}

/// PUT /api/v1/{resource}/{id}
pub async fn update<E: Entity>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<E::Dto>,
) -> AppResult<StatusCode> {
    update_under::<E>(&state, None, id, &admin.username, input).await
}

/// DELETE /api/v1/{resource}/{id}
pub async fn delete<E: Entity>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_under::<E>(&state, None, id, &admin.username).await
}

// ---------------------------------------------------------------------------
// Nested resources
// ---------------------------------------------------------------------------

/// GET /api/v1/{parent}/{parent_id}/{resource}
pub async fn list_nested<E: Entity>(
    State(state): State<AppState>,
    Path(parent_id): Path<DbId>,
) -> AppResult<Json<Vec<E::Dto>>> {
    list_under::<E>(&state, Some(parent_id)).await
}

/// GET /api/v1/{parent}/{parent_id}/{resource}/{id}
pub async fn get_nested<E: Entity>(
    State(state): State<AppState>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<E::Dto>> {
    get_under::<E>(&state, Some(parent_id), id).await
}

/// POST /api/v1/{parent}/{parent_id}/{resource}
///
/// The parent id from the path overrides any parent id in the body.
pub async fn create_nested<E: Entity>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(parent_id): Path<DbId>,
    OriginalUri(uri): OriginalUri,
    Json(input): Json<E::Dto>,
) -> AppResult<Created<E::Dto>> {
    create_under::<E>(&state, Some(parent_id), uri.path(), &admin.username, input).await
}

/// PUT /api/v1/{parent}/{parent_id}/{resource}/{id}
pub async fn update_nested<E: Entity>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<E::Dto>,
) -> AppResult<StatusCode> {
    update_under::<E>(&state, Some(parent_id), id, &admin.username, input).await
}

/// DELETE /api/v1/{parent}/{parent_id}/{resource}/{id}
pub async fn delete_nested<E: Entity>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    delete_under::<E>(&state, Some(parent_id), id, &admin.username).await
}

// ---------------------------------------------------------------------------
// Shared bodies
// ---------------------------------------------------------------------------

async fn list_under<E: Entity>(
    state: &AppState,
    parent_id: Option<DbId>,
) -> AppResult<Json<Vec<E::Dto>>> {
    let rows = CrudRepo::<E>::list(&state.store, parent_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

async fn get_under<E: Entity>(
    state: &AppState,
    parent_id: Option<DbId>,
    id: DbId,
) -> AppResult<Json<E::Dto>> {
    let row = CrudRepo::<E>::find_by_id(&state.store, parent_id, id).await?;
    Ok(Json(row.into()))
}

async fn create_under<E: Entity>(
    state: &AppState,
    parent_id: Option<DbId>,
    collection_path: &str,
    username: &str,
    input: E::Dto,
) -> AppResult<Created<E::Dto>> {
    let created = CrudRepo::<E>::create(&state.store, parent_id, input.into()).await?;
    let id = created.id();
    tracing::info!(entity = E::NAME, id, user = %username, "Entity created");

    let location = format!("{}/{id}", collection_path.trim_end_matches('/'));
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(created.into()),
    ))
}

async fn update_under<E: Entity>(
    state: &AppState,
    parent_id: Option<DbId>,
    id: DbId,
    username: &str,
    input: E::Dto,
) -> AppResult<StatusCode> {
    CrudRepo::<E>::replace(&state.store, parent_id, id, input).await?;
    tracing::info!(entity = E::NAME, id, user = %username, "Entity updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_under<E: Entity>(
    state: &AppState,
    parent_id: Option<DbId>,
    id: DbId,
    username: &str,
) -> AppResult<StatusCode> {
    CrudRepo::<E>::delete(&state.store, parent_id, id).await?;
    tracing::info!(entity = E::NAME, id, user = %username, "Entity deleted");
    Ok(StatusCode::NO_CONTENT)
}
