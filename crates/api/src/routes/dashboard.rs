use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Mount `/dashboard` routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(dashboard::summary))
}
