//! Handlers for the admin-only `/invitation-codes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use riskmatrix_core::error::CoreError;
use riskmatrix_core::types::DbId;

use riskmatrix_db::models::invitation_code::{
    CreateInvitationCode, InvitationCode, InvitationCodeStats,
};
use riskmatrix_db::repositories::InvitationCodeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// POST /api/v1/invitation-codes
///
/// Create a code. When `code` is omitted a random one is generated; a
/// caller-supplied code that already exists yields 409.
pub async fn create_code(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<CreateInvitationCode>,
) -> AppResult<(StatusCode, Json<InvitationCode>)> {
    if let Some(code) = &input.code {
        if code.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "invitation code must not be empty".into(),
            )));
        }
    }

    let created = InvitationCodeRepo::create(&state.pool, &input, admin.user_id).await?;
    tracing::info!(code_id = created.id, "invitation code created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/invitation-codes
pub async fn list_codes(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<InvitationCode>>> {
    let codes = InvitationCodeRepo::list(&state.pool).await?;
    Ok(Json(codes))
}

/// GET /api/v1/invitation-codes/stats
pub async fn code_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<InvitationCodeStats>> {
    let stats = InvitationCodeRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}

/// DELETE /api/v1/invitation-codes/{id}
pub async fn delete_code(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = InvitationCodeRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "invitation code",
            id,
        }));
    }
    tracing::info!(code_id = id, "invitation code deleted");
    Ok(StatusCode::NO_CONTENT)
}
