#![forbid(unsafe_code)]
//! mailverify — vérification de délivrabilité d'adresses e-mail (MVP)

pub mod validator;
pub use validator::{domain_of, is_valid_syntax};

pub mod mx;
pub use mx::{DnsError, LookupMx, MxRecord, SystemResolver, resolve_mx};

pub mod probe;
pub use probe::{
    ProbeError, ProbeMailbox, ProbeOptions, SmtpOutcome, SmtpProbe, SmtpReply, SmtpStatus,
    probe_mailbox,
};

pub mod verify;
pub use verify::{
    VerificationDetails, VerificationResult, VerificationStatus, Verifier,
};

/// One-shot verification against the system DNS configuration and a plain
/// TCP prober with default options.
pub fn verify_email(email: &str) -> VerificationResult {
    Verifier::from_system().verify(email)
}
