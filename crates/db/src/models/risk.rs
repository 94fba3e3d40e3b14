//! Risk entity model and DTOs.

use riskmatrix_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A risk row from the `risks` table.
///
/// The `inherent_level` and `residual_level` columns hold localized display
/// labels and are always the scorer's output for the paired probability and
/// impact at the time of the write.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Risk {
    pub id: DbId,
    pub department_id: DbId,
    pub threat_type: String,
    pub description: String,
    pub inherent_probability: String,
    pub inherent_impact: String,
    pub inherent_level: String,
    pub risk_strategy: String,
    pub mitigant_1: String,
    pub mitigant_impact_1: String,
    pub mitigant_2: String,
    pub mitigant_impact_2: String,
    pub mitigant_3: String,
    pub mitigant_impact_3: String,
    pub residual_probability: String,
    pub residual_impact: String,
    pub residual_level: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full column set for a risk write (create or full update).
///
/// Built by the API layer, which computes the two level fields from their
/// probability+impact pairs; the repository stores what it is given.
#[derive(Debug, Clone, Default)]
pub struct RiskData {
    pub department_id: DbId,
    pub threat_type: String,
    pub description: String,
    pub inherent_probability: String,
    pub inherent_impact: String,
    pub inherent_level: String,
    pub risk_strategy: String,
    pub mitigant_1: String,
    pub mitigant_impact_1: String,
    pub mitigant_2: String,
    pub mitigant_impact_2: String,
    pub mitigant_3: String,
    pub mitigant_impact_3: String,
    pub residual_probability: String,
    pub residual_impact: String,
    pub residual_level: String,
}

/// Optional SQL-side filters for risk listing.
///
/// Level filtering happens above the repository (it requires label
/// normalization), so it is deliberately absent here.
#[derive(Debug, Clone, Default)]
pub struct RiskFilter {
    pub department_id: Option<DbId>,
    pub threat_type: Option<String>,
    /// Case-insensitive substring match on the description.
    pub search: Option<String>,
}
