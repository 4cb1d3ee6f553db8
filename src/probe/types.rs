use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw SMTP reply, preserving the numeric status code and message text.
/// Multi-line replies keep their lines joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// 250 (OK) and 251 (user not local, will forward) both mean the server
    /// accepted the recipient.
    pub fn accepts_recipient(&self) -> bool {
        matches!(self.code, 250 | 251)
    }
}

/// Classified outcome of a single mailbox probe.
///
/// [`Undeliverable`](Self::Undeliverable) means the server answered the
/// recipient check and said no; [`Error`](Self::Error) means the
/// conversation could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpOutcome {
    /// The server accepted the recipient (reply code 250 or 251).
    Deliverable { reply: SmtpReply },
    /// The server answered the recipient check with any other reply.
    Undeliverable { reply: SmtpReply },
    /// Connect failure, disconnection, malformed reply, or timeout.
    Error { message: String },
}

impl SmtpOutcome {
    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn status(&self) -> SmtpStatus {
        match self {
            Self::Deliverable { .. } => SmtpStatus::Deliverable,
            Self::Undeliverable { .. } => SmtpStatus::Undeliverable,
            Self::Error { .. } => SmtpStatus::Error,
        }
    }

    /// Reply code observed on the wire, when the conversation got that far.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Deliverable { reply } | Self::Undeliverable { reply } => Some(reply.code),
            Self::Error { .. } => None,
        }
    }

    /// Human-readable summary recorded in the verification details.
    pub fn describe(&self) -> String {
        match self {
            Self::Deliverable { .. } => "Mailbox exists and is deliverable".to_string(),
            Self::Undeliverable { reply } => format!(
                "SMTP response code: {}, message: {}",
                reply.code, reply.message
            ),
            Self::Error { message } => message.clone(),
        }
    }
}

/// Tag carried in serialized verification details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpStatus {
    Deliverable,
    Undeliverable,
    Error,
}

impl fmt::Display for SmtpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deliverable => f.write_str("deliverable"),
            Self::Undeliverable => f.write_str("undeliverable"),
            Self::Error => f.write_str("error"),
        }
    }
}
