//! Handlers for the `/departments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use riskmatrix_core::error::CoreError;
use riskmatrix_core::level;
use riskmatrix_core::types::DbId;
use serde::{Deserialize, Serialize};

use riskmatrix_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use riskmatrix_db::models::risk::Risk;
use riskmatrix_db::repositories::{DepartmentRepo, RiskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /departments`.
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for `PUT /departments/{id}`. Omitted fields are unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Response body for `GET /departments/{id}/stats`.
#[derive(Debug, Serialize)]
pub struct DepartmentStats {
    pub department_id: DbId,
    /// Total number of risks registered to the department.
    pub total_risks: i64,
    /// Risks whose effective level is High or Intolerable.
    pub high_risks: i64,
}

/// POST /api/v1/departments
pub async fn create_department(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateDepartmentRequest>,
) -> AppResult<(StatusCode, Json<Department>)> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "department name must not be empty".into(),
        )));
    }

    let create = CreateDepartment {
        name,
        description: input.description,
    };
    let department = DepartmentRepo::create(&state.pool, &create, auth_user.user_id).await?;

    tracing::info!(department_id = department.id, "department created");
    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/v1/departments
pub async fn list_departments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(departments))
}

/// GET /api/v1/departments/{id}
pub async fn get_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Department>> {
    let department = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }))?;
    Ok(Json(department))
}

/// PUT /api/v1/departments/{id}
pub async fn update_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartmentRequest>,
) -> AppResult<Json<Department>> {
    let name = match input.name {
        Some(n) => {
            let trimmed = n.trim().to_string();
            if trimmed.is_empty() {
                return Err(AppError::Core(CoreError::Validation(
                    "department name must not be empty".into(),
                )));
            }
            Some(trimmed)
        }
        None => None,
    };

    let update = UpdateDepartment {
        name,
        description: input.description,
    };
    let department = DepartmentRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }))?;

    tracing::info!(department_id = department.id, "department updated");
    Ok(Json(department))
}

/// DELETE /api/v1/departments/{id}
///
/// Removes the department and, via the FK cascade, all its risks.
pub async fn delete_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DepartmentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }));
    }
    tracing::info!(department_id = id, "department deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/departments/{id}/risks
pub async fn list_department_risks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Risk>>> {
    // 404 for a missing department rather than an empty list.
    DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }))?;

    let risks = RiskRepo::list_by_department(&state.pool, id).await?;
    Ok(Json(risks))
}

/// GET /api/v1/departments/{id}/stats
///
/// Counts use the effective level (residual preferred, inherent fallback), so
/// a mitigated risk no longer counts as high.
pub async fn department_stats(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DepartmentStats>> {
    DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "department",
            id,
        }))?;

    let risks = RiskRepo::list_by_department(&state.pool, id).await?;
    let total_risks = risks.len() as i64;
    let high_risks = risks
        .iter()
        .filter(|r| {
            matches!(
                level::effective_level(&r.residual_level, &r.inherent_level),
                riskmatrix_core::RiskLevel::High | riskmatrix_core::RiskLevel::Intolerable
            )
        })
        .count() as i64;

    Ok(Json(DepartmentStats {
        department_id: id,
        total_risks,
        high_risks,
    }))
}
