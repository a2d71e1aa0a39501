pub mod health;
pub mod views;

use axum::routing::get;
use axum::Router;
use backoffice_core::role::Role;
use backoffice_core::user::User;

use crate::handlers::catalog;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /views                                  navigable views
/// /views/{name}                           one view descriptor
///
/// /users/views/...                        users view instances (see views::router)
/// /roles/views/...                        roles view instances (see views::router)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/views", get(catalog::list_views))
        .route("/views/{name}", get(catalog::get_view_descriptor))
        .nest("/users", views::router::<User>())
        .nest("/roles", views::router::<Role>())
}

/// Routes outside `/api/v1`: health, the navigable view paths (`/` lands on
/// users), and the not-found fallback.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .route("/", get(catalog::page::<User>))
        .route("/users", get(catalog::page::<User>))
        .route("/roles", get(catalog::page::<Role>))
        .nest("/api/v1", api_routes())
        .fallback(catalog::not_found)
}
