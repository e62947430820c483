//! Route definitions for the `/resources` resource.

use axum::routing::get;
use axum::Router;
use buildtrack_db::models::resource::Resource;

use crate::handlers::crud;
use crate::state::AppState;

/// Routes mounted at `/resources`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<Resource>).post(crud::create::<Resource>))
        .route(
            "/{id}",
            get(crud::get_by_id::<Resource>)
                .put(crud::update::<Resource>)
                .delete(crud::delete::<Resource>),
        )
}
