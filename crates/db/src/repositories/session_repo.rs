//! Repository for the `user_sessions` table.
//!
//! A session row backs one refresh token. The token plaintext is minted
//! here, handed to the caller once, and never stored; the row keeps only its
//! SHA-256 digest, so the table cannot be replayed if it leaks.

use chrono::{Duration, Utc};
use riskmatrix_core::types::DbId;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::session::UserSession;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at";

/// SHA-256 hex digest of a refresh token plaintext.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Mints, looks up, and revokes refresh-token sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Mint a session for `user_id` valid for `ttl_days`.
    ///
    /// Returns the token plaintext (for the client, never persisted) and the
    /// created row.
    pub async fn issue(
        pool: &PgPool,
        user_id: DbId,
        ttl_days: i64,
    ) -> Result<(String, UserSession), sqlx::Error> {
        let plaintext = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::days(ttl_days);
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(hash_refresh_token(&plaintext))
            .bind(expires_at)
            .fetch_one(pool)
            .await?;
        Ok((plaintext, session))
    }

    /// Look up the live session for a presented refresh token.
    ///
    /// Revoked and expired sessions are invisible here; a `None` means the
    /// token is no good, whatever the reason.
    pub async fn find_active(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = FALSE
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash_refresh_token(token))
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = TRUE WHERE id = $1 AND is_revoked = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all active sessions for a user. Returns the count revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = TRUE
             WHERE user_id = $1 AND is_revoked = FALSE",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
