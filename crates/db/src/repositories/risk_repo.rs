//! Repository for the `risks` table.

use riskmatrix_core::types::DbId;
use sqlx::PgPool;

use crate::models::risk::{Risk, RiskData, RiskFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, department_id, threat_type, description, \
     inherent_probability, inherent_impact, inherent_level, risk_strategy, \
     mitigant_1, mitigant_impact_1, mitigant_2, mitigant_impact_2, \
     mitigant_3, mitigant_impact_3, \
     residual_probability, residual_impact, residual_level, \
     created_by, created_at, updated_at";

/// Provides CRUD operations for risks.
pub struct RiskRepo;

impl RiskRepo {
    /// Insert a new risk, returning the created row.
    pub async fn create(
        pool: &PgPool,
        data: &RiskData,
        created_by: DbId,
    ) -> Result<Risk, sqlx::Error> {
        let query = format!(
            "INSERT INTO risks (department_id, threat_type, description,
                inherent_probability, inherent_impact, inherent_level, risk_strategy,
                mitigant_1, mitigant_impact_1, mitigant_2, mitigant_impact_2,
                mitigant_3, mitigant_impact_3,
                residual_probability, residual_impact, residual_level, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        Self::bind_data(sqlx::query_as::<_, Risk>(&query), data)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a risk by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Risk>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM risks WHERE id = $1");
        sqlx::query_as::<_, Risk>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List risks matching the SQL-side filters, most recent first.
    pub async fn list(pool: &PgPool, filter: &RiskFilter) -> Result<Vec<Risk>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM risks
             WHERE ($1::BIGINT IS NULL OR department_id = $1)
               AND ($2::TEXT IS NULL OR threat_type = $2)
               AND ($3::TEXT IS NULL OR description ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Risk>(&query)
            .bind(filter.department_id)
            .bind(&filter.threat_type)
            .bind(&filter.search)
            .fetch_all(pool)
            .await
    }

    /// List all risks for one department, most recent first.
    pub async fn list_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<Risk>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM risks WHERE department_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Risk>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a risk's full column set (levels included).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        data: &RiskData,
    ) -> Result<Option<Risk>, sqlx::Error> {
        let query = format!(
            "UPDATE risks SET
                department_id = $2, threat_type = $3, description = $4,
                inherent_probability = $5, inherent_impact = $6, inherent_level = $7,
                risk_strategy = $8,
                mitigant_1 = $9, mitigant_impact_1 = $10,
                mitigant_2 = $11, mitigant_impact_2 = $12,
                mitigant_3 = $13, mitigant_impact_3 = $14,
                residual_probability = $15, residual_impact = $16, residual_level = $17,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        Self::bind_data(sqlx::query_as::<_, Risk>(&query).bind(id), data)
            .fetch_optional(pool)
            .await
    }

    /// Delete a risk by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM risks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete several risks at once. Returns the count removed.
    pub async fn delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM risks WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Bind the full [`RiskData`] column set in declaration order.
    fn bind_data<'q>(
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, Risk, sqlx::postgres::PgArguments>,
        data: &'q RiskData,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Risk, sqlx::postgres::PgArguments> {
        query
            .bind(data.department_id)
            .bind(&data.threat_type)
            .bind(&data.description)
            .bind(&data.inherent_probability)
            .bind(&data.inherent_impact)
            .bind(&data.inherent_level)
            .bind(&data.risk_strategy)
            .bind(&data.mitigant_1)
            .bind(&data.mitigant_impact_1)
            .bind(&data.mitigant_2)
            .bind(&data.mitigant_impact_2)
            .bind(&data.mitigant_3)
            .bind(&data.mitigant_impact_3)
            .bind(&data.residual_probability)
            .bind(&data.residual_impact)
            .bind(&data.residual_level)
    }
}
