//! Handlers for the `/{users|roles}/views` resource.
//!
//! Every handler is generic over the managed entity, so the users and roles
//! views share one implementation. Mutating handlers apply a single
//! interaction to the view and answer with the resulting snapshot.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use backoffice_core::error::CoreError;
use backoffice_core::form::{LookupOutcome, SubmitOutcome};
use backoffice_core::manager::{EntityManager, ViewSnapshot};
use backoffice_core::pane::Pane;
use backoffice_core::role::{is_available_permission, FIELD_PERMISSIONS};
use backoffice_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::{AppState, ManagedEntity};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT .../pane`.
#[derive(Debug, Deserialize)]
pub struct SelectPaneRequest {
    pub pane: String,
}

/// Request body for `PUT .../query`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Request body for `PUT .../draft`.
#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub field: String,
    pub value: String,
}

/// Request body for `PUT .../draft/members`.
#[derive(Debug, Deserialize)]
pub struct ToggleMemberRequest {
    pub field: String,
    pub value: String,
    pub present: bool,
}

/// Request body for `POST .../edit/search` and `POST .../delete/search`.
#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A view snapshot tagged with the view's id.
#[derive(Debug, Serialize)]
pub struct ViewResponse<E> {
    pub view_id: Uuid,
    pub mounted_at: Option<Timestamp>,
    #[serde(flatten)]
    pub view: ViewSnapshot<E>,
}

type ViewResult<E> = AppResult<Json<DataResponse<ViewResponse<E>>>>;

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/{entity}/views
///
/// Mount a new view over freshly seeded records. Returns 201 Created.
pub async fn mount_view<E: ManagedEntity>(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<DataResponse<ViewResponse<E>>>)> {
    let registry = E::registry(&state);
    let view_id = registry.mount().await?;
    tracing::info!(entity = E::COLLECTION, %view_id, "View mounted");

    let Json(body) = respond::<E>(&state, view_id, |view| Ok(view.snapshot())).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/v1/{entity}/views/{view_id}
pub async fn get_view<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, |view| Ok(view.snapshot())).await
}

/// DELETE /api/v1/{entity}/views/{view_id}
///
/// Unmount a view, discarding its records. Returns 204 No Content.
pub async fn unmount_view<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if E::registry(&state).unmount(view_id).await {
        tracing::info!(entity = E::COLLECTION, %view_id, "View unmounted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(view_not_found(view_id))
    }
}

// ---------------------------------------------------------------------------
// List pane
// ---------------------------------------------------------------------------

/// PUT /api/v1/{entity}/views/{view_id}/pane
pub async fn select_pane<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(input): Json<SelectPaneRequest>,
) -> ViewResult<E> {
    let pane = Pane::parse(&input.pane)?;
    respond::<E>(&state, view_id, move |view| {
        view.select_pane(pane);
        Ok(view.snapshot())
    })
    .await
}

/// PUT /api/v1/{entity}/views/{view_id}/query
pub async fn set_query<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(input): Json<QueryRequest>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, move |view| {
        view.set_query(input.query);
        Ok(view.snapshot())
    })
    .await
}

/// GET /api/v1/{entity}/views/{view_id}/records
///
/// The list pane rows: the view's records filtered by its current query.
pub async fn list_records<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Vec<E>>>> {
    let records = E::registry(&state)
        .with_view(view_id, |view| Ok(view.visible_records()))
        .await?;
    Ok(Json(DataResponse { data: records }))
}

// ---------------------------------------------------------------------------
// Draft (create / edit panes)
// ---------------------------------------------------------------------------

/// PUT /api/v1/{entity}/views/{view_id}/draft
pub async fn set_draft_field<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(input): Json<SetFieldRequest>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, move |view| {
        view.set_field(&input.field, &input.value)?;
        Ok(view.snapshot())
    })
    .await
}

/// PUT /api/v1/{entity}/views/{view_id}/draft/members
pub async fn toggle_draft_member<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(input): Json<ToggleMemberRequest>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, move |view| {
        view.toggle_member(&input.field, &input.value, input.present)?;
        if input.field == FIELD_PERMISSIONS
            && input.present
            && !is_available_permission(&input.value)
        {
            tracing::warn!(
                entity = E::COLLECTION,
                %view_id,
                permission = %input.value,
                "Accepted permission outside the offered set"
            );
        }
        Ok(view.snapshot())
    })
    .await
}

/// POST /api/v1/{entity}/views/{view_id}/edit/search
///
/// A miss is not an error: the snapshot reports `edit_lookup: "not_found"`.
pub async fn search_edit<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(input): Json<KeyRequest>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, move |view| {
        let outcome = view.search_edit(&input.key)?;
        log_lookup::<E>(view_id, "edit", &input.key, outcome);
        Ok(view.snapshot())
    })
    .await
}

/// POST /api/v1/{entity}/views/{view_id}/submit
///
/// Store the draft (create or update) and return to the list pane.
pub async fn submit<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, move |view| {
        match view.submit()? {
            SubmitOutcome::Created { id } => {
                tracing::info!(entity = E::COLLECTION, %view_id, record_id = id, "Record created");
            }
            SubmitOutcome::Updated { id, replaced } => {
                tracing::info!(
                    entity = E::COLLECTION,
                    %view_id,
                    record_id = id,
                    replaced,
                    "Record updated"
                );
            }
        }
        Ok(view.snapshot())
    })
    .await
}

// ---------------------------------------------------------------------------
// Delete pane
// ---------------------------------------------------------------------------

/// POST /api/v1/{entity}/views/{view_id}/delete/search
pub async fn search_delete<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(input): Json<KeyRequest>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, move |view| {
        let outcome = view.search_delete(&input.key)?;
        log_lookup::<E>(view_id, "delete", &input.key, outcome);
        Ok(view.snapshot())
    })
    .await
}

/// POST /api/v1/{entity}/views/{view_id}/delete/request
pub async fn request_delete<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, |view| {
        view.request_delete()?;
        Ok(view.snapshot())
    })
    .await
}

/// POST /api/v1/{entity}/views/{view_id}/delete/confirm
pub async fn confirm_delete<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, move |view| {
        let (record, removed) = view.confirm_delete()?;
        tracing::info!(
            entity = E::COLLECTION,
            %view_id,
            key = record.secondary_key(),
            removed,
            "Record deleted"
        );
        Ok(view.snapshot())
    })
    .await
}

/// POST /api/v1/{entity}/views/{view_id}/delete/cancel
pub async fn cancel_delete<E: ManagedEntity>(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> ViewResult<E> {
    respond::<E>(&state, view_id, |view| {
        view.cancel_delete()?;
        Ok(view.snapshot())
    })
    .await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply `f` to a mounted view and wrap the snapshot it returns.
async fn respond<E: ManagedEntity>(
    state: &AppState,
    view_id: Uuid,
    f: impl FnOnce(&mut EntityManager<E>) -> Result<ViewSnapshot<E>, CoreError> + Send,
) -> ViewResult<E> {
    let registry = E::registry(state);
    let view = registry.with_view(view_id, f).await?;
    let mounted_at = registry.mounted_at(view_id).await;

    Ok(Json(DataResponse {
        data: ViewResponse {
            view_id,
            mounted_at,
            view,
        },
    }))
}

fn view_not_found(view_id: Uuid) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "View",
        id: view_id.to_string(),
    })
}

fn log_lookup<E: ManagedEntity>(view_id: Uuid, pane: &str, key: &str, outcome: LookupOutcome) {
    if outcome == LookupOutcome::NotFound {
        tracing::debug!(entity = E::COLLECTION, %view_id, pane, key, "Lookup missed");
    }
}
