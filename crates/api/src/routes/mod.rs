pub mod auth;
pub mod catalogs;
pub mod health;
pub mod projects;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                    login (public)
/// /login/refresh                            refresh (public)
///
/// /catalogs                                 combined listing (public)
/// /catalogs/{kind}                          list one kind (public)
/// /catalogs/{kind}/{id}                     retrieve entry (public)
///
/// /projects                                 list, create
/// /projects/{id}                            get, update, delete
/// /projects/{id}/planning                   list, record
/// /projects/{id}/estimations                list, record
/// /projects/{id}/design-cp                  list, record
/// /projects/{id}/executions                 list, record
///
/// /users                                    list, create
/// /users/{id}                               get, update, delete
/// /users/{id}/password                      change password
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/catalogs", catalogs::router())
        .nest("/projects", projects::router())
        .nest("/users", users::router())
}
