use axum::routing::get;
use axum::Router;

use crate::handlers::department;
use crate::state::AppState;

/// Mount `/departments` routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(department::list_departments).post(department::create_department),
        )
        .route(
            "/{id}",
            get(department::get_department)
                .put(department::update_department)
                .delete(department::delete_department),
        )
        .route("/{id}/risks", get(department::list_department_risks))
        .route("/{id}/stats", get(department::department_stats))
}
