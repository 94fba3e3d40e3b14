//! Invitation code model and DTOs.

use riskmatrix_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An invitation code row from the `invitation_codes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvitationCode {
    pub id: DbId,
    pub code: String,
    /// When set, only this email may redeem the code.
    pub email: Option<String>,
    pub notes: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub used: bool,
    pub used_by: Option<DbId>,
    pub used_at: Option<Timestamp>,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a new invitation code.
///
/// `code` is optional; when absent a random one is generated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvitationCode {
    pub code: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub expires_at: Option<Timestamp>,
}

/// Aggregate counts over all invitation codes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvitationCodeStats {
    pub total: i64,
    pub used: i64,
    /// Unused and not past their expiry.
    pub available: i64,
}

/// Outcome of checking a code during registration.
///
/// An invalid code is a normal outcome, not an error: the message explains
/// why the code cannot be redeemed.
#[derive(Debug, Clone, Serialize)]
pub struct CodeValidation {
    pub valid: bool,
    pub message: Option<String>,
}

impl CodeValidation {
    pub fn ok() -> Self {
        CodeValidation {
            valid: true,
            message: None,
        }
    }

    pub fn rejected(message: &str) -> Self {
        CodeValidation {
            valid: false,
            message: Some(message.to_string()),
        }
    }
}
