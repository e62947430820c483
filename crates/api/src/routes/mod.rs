pub mod authentication;
pub mod employee;
pub mod health;
pub mod project;
pub mod resource;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /authentication/authenticate                     login (public)
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/tasks                             list, create
/// /projects/{id}/tasks/{task_id}                   get, update, delete
///
/// /tasks/{task_id}/usages                          list, create
/// /tasks/{task_id}/usages/{id}                     get, update, delete
///
/// /employees                                       list, create
/// /employees/{id}                                  get, update, delete
///
/// /resources                                       list, create
/// /resources/{id}                                  get, update, delete
/// ```
///
/// Reads are public. Creates, updates and deletes require an `Admin` token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/authentication", authentication::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/employees", employee::router())
        .nest("/resources", resource::router())
}
