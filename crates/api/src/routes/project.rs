//! Route definitions for the `/projects` resource and its tasks.

use axum::routing::get;
use axum::Router;
use buildtrack_db::models::project::Project;
use buildtrack_db::models::task::Task;

use crate::handlers::crud;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
///
/// GET    /{id}/tasks            -> list tasks of project
/// POST   /{id}/tasks            -> create task in project
/// GET    /{id}/tasks/{task_id}  -> get task
/// PUT    /{id}/tasks/{task_id}  -> update task
/// DELETE /{id}/tasks/{task_id}  -> delete task
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route(
            "/",
            get(crud::list_nested::<Task>).post(crud::create_nested::<Task>),
        )
        .route(
            "/{task_id}",
            get(crud::get_nested::<Task>)
                .put(crud::update_nested::<Task>)
                .delete(crud::delete_nested::<Task>),
        );

    Router::new()
        .route("/", get(crud::list::<Project>).post(crud::create::<Project>))
        .route(
            "/{id}",
            get(crud::get_by_id::<Project>)
                .put(crud::update::<Project>)
                .delete(crud::delete::<Project>),
        )
        .nest("/{id}/tasks", task_routes)
}
