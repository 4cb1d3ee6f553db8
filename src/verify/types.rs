use std::fmt;

use serde::{Deserialize, Serialize};

use crate::probe::SmtpStatus;

/// Overall verdict for a verification request.
///
/// Syntax and MX failures are `Undeliverable` (a terminal non-error answer);
/// only SMTP transport failures and missing input are `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Valid,
    Undeliverable,
    Error,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Undeliverable => f.write_str("undeliverable"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Per-stage observations backing the verdict. Fields belonging to stages
/// that were never reached stay `false`/absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDetails {
    pub syntax_valid: bool,
    pub mx_record_found: bool,
    pub mx_record: Option<String>,
    pub smtp_status: Option<SmtpStatus>,
    pub smtp_message: Option<String>,
}

/// Aggregate answer for one verification request. Every request produces a
/// fully populated result; no failure escapes as a panic or an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub email: String,
    pub status: VerificationStatus,
    pub message: String,
    pub details: VerificationDetails,
}
