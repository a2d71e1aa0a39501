//! Handlers for the navigable view catalogue and unknown paths.

use axum::extract::{Path, State};
use axum::Json;
use backoffice_core::entity::Entity;
use backoffice_core::role::Role;
use backoffice_core::user::User;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::{AppState, ManagedEntity};

/// A view a client can navigate to.
#[derive(Debug, Clone, Serialize)]
pub struct ViewDescriptor {
    /// Route segment, e.g. `"users"`.
    pub name: &'static str,
    /// Caption, e.g. `"User Management"`.
    pub title: String,
    /// Where to mount a new instance of the view.
    pub mount_path: String,
    /// Field used by the edit and delete searches.
    pub key_field: &'static str,
    /// Instances currently mounted.
    pub open_views: usize,
    /// Mount limit for this view.
    pub max_open_views: usize,
}

async fn describe<E: ManagedEntity>(state: &AppState) -> ViewDescriptor {
    ViewDescriptor {
        name: E::COLLECTION,
        title: format!("{} Management", E::LABEL),
        mount_path: format!("/api/v1/{}/views", E::COLLECTION),
        key_field: E::KEY_FIELD,
        open_views: E::registry(state).count().await,
        max_open_views: state.config.max_open_views,
    }
}

/// GET /api/v1/views
pub async fn list_views(State(state): State<AppState>) -> Json<DataResponse<Vec<ViewDescriptor>>> {
    let views = vec![describe::<User>(&state).await, describe::<Role>(&state).await];
    Json(DataResponse { data: views })
}

/// GET /api/v1/views/{name}
pub async fn get_view_descriptor(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<ViewDescriptor>>> {
    let descriptor = match name.as_str() {
        n if n == User::COLLECTION => describe::<User>(&state).await,
        n if n == Role::COLLECTION => describe::<Role>(&state).await,
        _ => return Err(AppError::RouteNotFound),
    };
    Ok(Json(DataResponse { data: descriptor }))
}

/// GET /, GET /users, GET /roles
///
/// The root path lands on the users view.
pub async fn page<E: ManagedEntity>(
    State(state): State<AppState>,
) -> Json<DataResponse<ViewDescriptor>> {
    Json(DataResponse {
        data: describe::<E>(&state).await,
    })
}

/// Fallback for every undefined path.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
