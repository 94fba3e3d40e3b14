//! Repository for the `invitation_codes` table.
//!
//! Registration is a two-phase protocol: [`InvitationCodeRepo::validate`]
//! checks the code, the caller creates the identity, and only then does
//! [`InvitationCodeRepo::mark_as_used`] burn the code. A failed identity
//! creation between the two phases leaves the code redeemable.

use chrono::Utc;
use rand::Rng;
use riskmatrix_core::types::DbId;
use sqlx::PgPool;

use crate::models::invitation_code::{
    CodeValidation, CreateInvitationCode, InvitationCode, InvitationCodeStats,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, code, email, notes, expires_at, used, used_by, used_at, created_by, created_at";

/// Code alphabet; ambiguous glyphs (0/O, 1/I) are left out so codes survive
/// being read aloud or retyped.
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a random invitation code of the given length.
pub fn generate_random_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Provides CRUD and redemption operations for invitation codes.
pub struct InvitationCodeRepo;

impl InvitationCodeRepo {
    /// Insert a new invitation code, returning the created row.
    ///
    /// When `input.code` is absent a random 12-character code is generated.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInvitationCode,
        created_by: DbId,
    ) -> Result<InvitationCode, sqlx::Error> {
        let code = input
            .code
            .clone()
            .unwrap_or_else(|| generate_random_code(12));
        let query = format!(
            "INSERT INTO invitation_codes (code, email, notes, expires_at, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InvitationCode>(&query)
            .bind(&code)
            .bind(&input.email)
            .bind(&input.notes)
            .bind(input.expires_at)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// List all invitation codes, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<InvitationCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitation_codes ORDER BY created_at DESC");
        sqlx::query_as::<_, InvitationCode>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a code row by its code string.
    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<InvitationCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitation_codes WHERE code = $1");
        sqlx::query_as::<_, InvitationCode>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Delete an invitation code by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invitation_codes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Aggregate counts: total, used, and available (unused, unexpired).
    pub async fn stats(pool: &PgPool) -> Result<InvitationCodeStats, sqlx::Error> {
        sqlx::query_as::<_, InvitationCodeStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE used) AS used,
                    COUNT(*) FILTER (WHERE NOT used
                        AND (expires_at IS NULL OR expires_at > NOW())) AS available
             FROM invitation_codes",
        )
        .fetch_one(pool)
        .await
    }

    /// Check whether `code` can be redeemed, optionally for a given email.
    ///
    /// Rejection is a normal outcome carried in [`CodeValidation`]; only
    /// database failures surface as errors. Nothing is mutated here.
    pub async fn validate(
        pool: &PgPool,
        code: &str,
        email: Option<&str>,
    ) -> Result<CodeValidation, sqlx::Error> {
        let Some(row) = Self::find_by_code(pool, code).await? else {
            return Ok(CodeValidation::rejected("invalid invitation code"));
        };
        if row.used {
            return Ok(CodeValidation::rejected("invitation code already used"));
        }
        if let Some(expires_at) = row.expires_at {
            if expires_at < Utc::now() {
                return Ok(CodeValidation::rejected("invitation code expired"));
            }
        }
        if let (Some(reserved), Some(candidate)) = (row.email.as_deref(), email) {
            if !reserved.eq_ignore_ascii_case(candidate) {
                return Ok(CodeValidation::rejected(
                    "invitation code reserved for a different email",
                ));
            }
        }
        Ok(CodeValidation::ok())
    }

    /// Mark a code as redeemed by `user_id`. Returns `true` if the row was
    /// still unused and is now burned.
    pub async fn mark_as_used(
        pool: &PgPool,
        code: &str,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invitation_codes SET used = TRUE, used_by = $2, used_at = NOW()
             WHERE code = $1 AND used = FALSE",
        )
        .bind(code)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
