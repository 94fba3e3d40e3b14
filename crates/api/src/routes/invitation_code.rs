use axum::routing::get;
use axum::Router;

use crate::handlers::invitation_code;
use crate::state::AppState;

/// Mount `/invitation-codes` routes. Every endpoint requires the admin role.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(invitation_code::list_codes).post(invitation_code::create_code),
        )
        .route("/stats", get(invitation_code::code_stats))
        .route(
            "/{id}",
            axum::routing::delete(invitation_code::delete_code),
        )
}
