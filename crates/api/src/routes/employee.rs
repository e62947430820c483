//! Route definitions for the `/employees` resource.

use axum::routing::get;
use axum::Router;
use buildtrack_db::models::employee::Employee;

use crate::handlers::crud;
use crate::state::AppState;

/// Routes mounted at `/employees`.
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
        .route("/", get(crud::list::<Employee>).post(crud::create::<Employee>))
        .route(
            "/{id}",
            get(crud::get_by_id::<Employee>)
                .put(crud::update::<Employee>)
                .delete(crud::delete::<Employee>),
        )
}
