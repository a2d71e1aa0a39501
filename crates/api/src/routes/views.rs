//! Route definitions for an entity's `/views` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::views;
use crate::state::{AppState, ManagedEntity};

/// Routes mounted at `/{entity}` for one managed entity.
///
/// ```text
/// POST   /views                                -> mount_view
/// GET    /views/{view_id}                      -> get_view
/// DELETE /views/{view_id}                      -> unmount_view
/// PUT    /views/{view_id}/pane                 -> select_pane
/// PUT    /views/{view_id}/query                -> set_query
/// GET    /views/{view_id}/records              -> list_records
/// PUT    /views/{view_id}/draft                -> set_draft_field
/// PUT    /views/{view_id}/draft/members        -> toggle_draft_member
/// POST   /views/{view_id}/edit/search          -> search_edit
/// POST   /views/{view_id}/submit               -> submit
/// POST   /views/{view_id}/delete/search        -> search_delete
/// POST   /views/{view_id}/delete/request       -> request_delete
/// POST   /views/{view_id}/delete/confirm       -> confirm_delete
/// POST   /views/{view_id}/delete/cancel        -> cancel_delete
/// ```
pub fn router<E: ManagedEntity>() -> Router<AppState> {
    Router::new()
        .route("/views", post(views::mount_view::<E>))
        .route(
            "/views/{view_id}",
            get(views::get_view::<E>).delete(views::unmount_view::<E>),
        )
        .route("/views/{view_id}/pane", put(views::select_pane::<E>))
        .route("/views/{view_id}/query", put(views::set_query::<E>))
        .route("/views/{view_id}/records", get(views::list_records::<E>))
        .route("/views/{view_id}/draft", put(views::set_draft_field::<E>))
        .route(
            "/views/{view_id}/draft/members",
            put(views::toggle_draft_member::<E>),
        )
        .route("/views/{view_id}/edit/search", post(views::search_edit::<E>))
        .route("/views/{view_id}/submit", post(views::submit::<E>))
        .route("/views/{view_id}/delete/search", post(views::search_delete::<E>))
        .route("/views/{view_id}/delete/request", post(views::request_delete::<E>))
        .route("/views/{view_id}/delete/confirm", post(views::confirm_delete::<E>))
        .route("/views/{view_id}/delete/cancel", post(views::cancel_delete::<E>))
}
