//! Route definitions for resource usages, nested under `/tasks`.

use axum::routing::get;
use axum::Router;
use buildtrack_db::models::resource_usage::ResourceUsage;

use crate::handlers::crud;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// Tasks themselves are addressed through `/projects/{id}/tasks`; this tree
/// only carries the usages recorded against a task.
///
/// ```text
/// GET    /{task_id}/usages          -> list usages of task
/// POST   /{task_id}/usages          -> create usage
/// GET    /{task_id}/usages/{id}     -> get usage
/// PUT    /{task_id}/usages/{id}     -> update usage
/// DELETE /{task_id}/usages/{id}     -> delete usage
/// ```
pub fn router() -> Router<AppState> {
    let usage_routes = Router::new()
        .route(
            "/",
            get(crud::list_nested::<ResourceUsage>).post(crud::create_nested::<ResourceUsage>),
        )
        .route(
            "/{id}",
            get(crud::get_nested::<ResourceUsage>)
                .put(crud::update_nested::<ResourceUsage>)
                .delete(crud::delete_nested::<ResourceUsage>),
        );

    Router::new().nest("/{task_id}/usages", usage_routes)
}
