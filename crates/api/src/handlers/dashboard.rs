//! Handler for the dashboard summary.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use riskmatrix_core::level::{self, RiskLevel};
use riskmatrix_core::Locale;
use serde::{Deserialize, Serialize};

use riskmatrix_db::models::risk::RiskFilter;
use riskmatrix_db::repositories::{DepartmentRepo, RiskRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /dashboard/summary`.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Locale for the level labels in the distribution. Defaults to Spanish.
    #[serde(default)]
    pub locale: Locale,
}

/// One bucket of the level distribution.
#[derive(Debug, Serialize)]
pub struct LevelBucket {
    /// Canonical level identifier (`"high"`, `"unclassified"`, ...).
    pub level: RiskLevel,
    /// Display label in the requested locale.
    pub label: &'static str,
    pub count: i64,
}

/// Response body for `GET /dashboard/summary`.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_departments: i64,
    pub total_risks: i64,
    /// Risks whose effective level is High or Intolerable.
    pub high_risks: i64,
    /// Risks whose effective level is Low or Tolerable.
    pub low_risks: i64,
    /// Counts per canonical level, most to least severe. Every level appears
    /// even when its count is zero.
    pub distribution: Vec<LevelBucket>,
}

/// GET /api/v1/dashboard/summary
///
/// Organization-wide aggregation over all risks. Counting runs on canonical
/// levels, so rows labelled "Alto" and "High" land in the same bucket
/// regardless of the requested display locale.
pub async fn summary(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<SummaryQuery>,
) -> AppResult<Json<DashboardSummary>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    let risks = RiskRepo::list(&state.pool, &RiskFilter::default()).await?;

    let mut counts: HashMap<RiskLevel, i64> = HashMap::new();
    for risk in &risks {
        let effective = level::effective_level(&risk.residual_level, &risk.inherent_level);
        *counts.entry(effective).or_insert(0) += 1;
    }

    let distribution: Vec<LevelBucket> = RiskLevel::ALL
        .into_iter()
        .map(|lvl| LevelBucket {
            level: lvl,
            label: lvl.label(params.locale),
            count: counts.get(&lvl).copied().unwrap_or(0),
        })
        .collect();

    let high_risks = counts.get(&RiskLevel::High).copied().unwrap_or(0)
        + counts.get(&RiskLevel::Intolerable).copied().unwrap_or(0);
    let low_risks = counts.get(&RiskLevel::Low).copied().unwrap_or(0)
        + counts.get(&RiskLevel::Tolerable).copied().unwrap_or(0);

    Ok(Json(DashboardSummary {
        total_departments: departments.len() as i64,
        total_risks: risks.len() as i64,
        high_risks,
        low_risks,
        distribution,
    }))
}
