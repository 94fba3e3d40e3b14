pub mod auth;
pub mod dashboard;
pub mod department;
pub mod health;
pub mod invitation_code;
pub mod risk;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/register                   invitation-gated registration (public)
/// /auth/refresh                    refresh tokens (public)
/// /auth/logout                     revoke sessions (requires auth)
/// /auth/change-password            rotate password, revoke sessions (requires auth)
/// /auth/me                         current user profile (requires auth)
///
/// /departments                     list, create
/// /departments/{id}                get, update, delete
/// /departments/{id}/risks          list risks in one department
/// /departments/{id}/stats          risk counts for one department
///
/// /risks                           list (?department_id, threat_type, search, level), create
/// /risks/{id}                      get, update, delete
/// /risks/bulk-delete               delete several risks (POST)
///
/// /dashboard/summary               organization-wide aggregation (?locale)
///
/// /invitation-codes                list, create (admin only)
/// /invitation-codes/stats          aggregate counts (admin only)
/// /invitation-codes/{id}           delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and account management.
        .nest("/auth", auth::router())
        // Department CRUD plus per-department risk views.
        .nest("/departments", department::router())
        // Risk CRUD, filtered listing, and bulk delete.
        .nest("/risks", risk::router())
        // Dashboard aggregation.
        .nest("/dashboard", dashboard::router())
        // Invitation code management (admin only).
        .nest("/invitation-codes", invitation_code::router())
}
