//! Handlers for the `/risks` resource.
//!
//! The server owns the two level columns: every write recomputes
//! `inherent_level` and `residual_level` from their probability+impact pairs
//! via the scorer, in the locale named by the payload. Any levels a client
//! sends are ignored.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use riskmatrix_core::error::CoreError;
use riskmatrix_core::level::{self, normalize};
use riskmatrix_core::scoring;
use riskmatrix_core::types::DbId;
use riskmatrix_core::Locale;
use serde::{Deserialize, Serialize};

use riskmatrix_db::models::risk::{Risk, RiskData, RiskFilter};
use riskmatrix_db::repositories::{DepartmentRepo, RiskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for risk create and full update.
///
/// All assessment fields default to the empty string, which the scorer treats
/// as "not assessed". The `locale` field selects the language of the computed
/// level labels, nothing else.
#[derive(Debug, Deserialize)]
pub struct RiskPayload {
    pub department_id: DbId,
    #[serde(default)]
    pub threat_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inherent_probability: String,
    #[serde(default)]
    pub inherent_impact: String,
    #[serde(default)]
    pub risk_strategy: String,
    #[serde(default)]
    pub mitigant_1: String,
    #[serde(default)]
    pub mitigant_impact_1: String,
    #[serde(default)]
    pub mitigant_2: String,
    #[serde(default)]
    pub mitigant_impact_2: String,
    #[serde(default)]
    pub mitigant_3: String,
    #[serde(default)]
    pub mitigant_impact_3: String,
    #[serde(default)]
    pub residual_probability: String,
    #[serde(default)]
    pub residual_impact: String,
    #[serde(default)]
    pub locale: Locale,
}

impl RiskPayload {
    /// Build the full write column set, computing both level labels.
    fn into_data(self) -> RiskData {
        let inherent_level =
            scoring::score_label(&self.inherent_probability, &self.inherent_impact, self.locale);
        let residual_level =
            scoring::score_label(&self.residual_probability, &self.residual_impact, self.locale);
        RiskData {
            department_id: self.department_id,
            threat_type: self.threat_type,
            description: self.description,
            inherent_probability: self.inherent_probability,
            inherent_impact: self.inherent_impact,
            inherent_level,
            risk_strategy: self.risk_strategy,
            mitigant_1: self.mitigant_1,
            mitigant_impact_1: self.mitigant_impact_1,
            mitigant_2: self.mitigant_2,
            mitigant_impact_2: self.mitigant_impact_2,
            mitigant_3: self.mitigant_3,
            mitigant_impact_3: self.mitigant_impact_3,
            residual_probability: self.residual_probability,
            residual_impact: self.residual_impact,
            residual_level,
        }
    }
}

/// Query parameters for `GET /risks`.
#[derive(Debug, Default, Deserialize)]
pub struct RiskQuery {
    pub department_id: Option<DbId>,
    pub threat_type: Option<String>,
    /// Case-insensitive substring match on the description.
    pub search: Option<String>,
    /// Level label in any supported locale; matched against each risk's
    /// effective level after normalization.
    pub level: Option<String>,
}

/// Request body for `POST /risks/bulk-delete`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<DbId>,
}

/// Response body for `POST /risks/bulk-delete`.
#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/risks
pub async fn create_risk(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<RiskPayload>,
) -> AppResult<(StatusCode, Json<Risk>)> {
    ensure_department_exists(&state, input.department_id).await?;

    let data = input.into_data();
    let risk = RiskRepo::create(&state.pool, &data, auth_user.user_id).await?;

    tracing::info!(risk_id = risk.id, department_id = risk.department_id, "risk created");
    Ok((StatusCode::CREATED, Json(risk)))
}

/// GET /api/v1/risks
///
/// List risks with optional filters. Department, threat type, and search
/// filters run in SQL; the level filter compares canonical levels in Rust so
/// that "Alto" and "High" select the same rows.
pub async fn list_risks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<RiskQuery>,
) -> AppResult<Json<Vec<Risk>>> {
    let filter = RiskFilter {
        department_id: params.department_id,
        threat_type: params.threat_type,
        search: params.search,
    };
    let mut risks = RiskRepo::list(&state.pool, &filter).await?;

    if let Some(level_param) = params.level {
        let wanted = normalize(&level_param);
        risks.retain(|r| level::effective_level(&r.residual_level, &r.inherent_level) == wanted);
    }

    Ok(Json(risks))
}

/// GET /api/v1/risks/{id}
pub async fn get_risk(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Risk>> {
    let risk = RiskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "risk", id }))?;
    Ok(Json(risk))
}

/// PUT /api/v1/risks/{id}
///
/// Full replacement. Levels are recomputed from the submitted pairs.
pub async fn update_risk(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<RiskPayload>,
) -> AppResult<Json<Risk>> {
    ensure_department_exists(&state, input.department_id).await?;

    let data = input.into_data();
    let risk = RiskRepo::update(&state.pool, id, &data)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "risk", id }))?;

    tracing::info!(risk_id = risk.id, "risk updated");
    Ok(Json(risk))
}

/// DELETE /api/v1/risks/{id}
pub async fn delete_risk(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RiskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "risk", id }));
    }
    tracing::info!(risk_id = id, "risk deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/risks/bulk-delete
///
/// Delete a set of risks in one statement. IDs that do not exist are skipped;
/// the response reports how many rows were actually removed.
pub async fn bulk_delete_risks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<BulkDeleteResponse>> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }
    let deleted = RiskRepo::delete_many(&state.pool, &input.ids).await?;
    tracing::info!(requested = input.ids.len(), deleted, "bulk risk delete");
    Ok(Json(BulkDeleteResponse { deleted }))
}

/// Reject writes pointing at a department that does not exist.
///
/// The FK would catch this too, but a 404 with the department id is a better
/// answer than a generic constraint violation.
async fn ensure_department_exists(state: &AppState, department_id: DbId) -> AppResult<()> {
    DepartmentRepo::find_by_id(&state.pool, department_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id: department_id,
        }))?;
    Ok(())
}
