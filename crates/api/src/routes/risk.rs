use axum::routing::{get, post};
use axum::Router;

use crate::handlers::risk;
use crate::state::AppState;

/// Mount `/risks` routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(risk::list_risks).post(risk::create_risk))
        .route("/bulk-delete", post(risk::bulk_delete_risks))
        .route(
            "/{id}",
            get(risk::get_risk)
                .put(risk::update_risk)
                .delete(risk::delete_risk),
        )
}
