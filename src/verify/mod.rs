//! Verification pipeline.
//!
//! [`Verifier`] sequences the three stages (syntax, MX lookup, SMTP probe)
//! in strict order, short-circuiting on the first failure and folding every
//! outcome into a terminal [`VerificationResult`]. Stages after the failing
//! one are never run.

mod types;

pub use types::{VerificationDetails, VerificationResult, VerificationStatus};

use crate::mx::{DnsError, LookupMx, SystemResolver, resolve_with};
use crate::probe::{ProbeMailbox, SmtpProbe, SmtpStatus};
use crate::validator;

/// Verification pipeline over swappable DNS and SMTP capabilities.
///
/// The two network stages are injected so tests can substitute fakes; the
/// verifier itself holds no other state and is safe to share across
/// concurrent requests.
pub struct Verifier<R, P> {
    resolver: R,
    probe: P,
}

impl Verifier<SystemResolver, SmtpProbe> {
    /// Verifier backed by the system DNS configuration and a plain TCP
    /// prober with default options.
    pub fn from_system() -> Self {
        Self::new(SystemResolver::default(), SmtpProbe::default())
    }
}

impl Default for Verifier<SystemResolver, SmtpProbe> {
    fn default() -> Self {
        Self::from_system()
    }
}

impl<R: LookupMx, P: ProbeMailbox> Verifier<R, P> {
    pub fn new(resolver: R, probe: P) -> Self {
        Self { resolver, probe }
    }

    /// Run the pipeline for `email`. Total: always returns a complete
    /// result, never panics, never propagates an error.
    pub fn verify(&self, email: &str) -> VerificationResult {
        let mut details = VerificationDetails::default();

        if email.is_empty() {
            return terminal(email, VerificationStatus::Error, "Email is required", details);
        }

        details.syntax_valid = validator::is_valid_syntax(email);
        if !details.syntax_valid {
            return terminal(
                email,
                VerificationStatus::Undeliverable,
                "Invalid email syntax",
                details,
            );
        }

        // syntax guarantees an '@'; the domain is everything after the last one
        let domain = validator::domain_of(email).unwrap_or_default();
        let record = match resolve_with(&self.resolver, domain) {
            Ok(record) => record,
            Err(err) => {
                log_dns_failure(domain, &err);
                return terminal(
                    email,
                    VerificationStatus::Undeliverable,
                    "Domain does not have an MX record",
                    details,
                );
            }
        };
        details.mx_record_found = true;
        details.mx_record = Some(record.exchange.clone());

        let outcome = self.probe.probe(email, &record.exchange);
        details.smtp_status = Some(outcome.status());
        details.smtp_message = Some(outcome.describe());

        let (status, message) = match outcome.status() {
            SmtpStatus::Deliverable => (VerificationStatus::Valid, "Email is valid and deliverable"),
            SmtpStatus::Undeliverable => (
                VerificationStatus::Undeliverable,
                "Mailbox does not exist or cannot be verified",
            ),
            SmtpStatus::Error => (
                VerificationStatus::Error,
                "An error occurred during SMTP verification",
            ),
        };
        terminal(email, status, message, details)
    }
}

fn terminal(
    email: &str,
    status: VerificationStatus,
    message: &str,
    details: VerificationDetails,
) -> VerificationResult {
    VerificationResult {
        email: email.to_string(),
        status,
        message: message.to_string(),
        details,
    }
}

/// DNS diagnostics are operator-facing only; the caller sees a single
/// no-MX-record verdict whatever the underlying kind was.
fn log_dns_failure(domain: &str, err: &DnsError) {
    if err.is_negative_answer() {
        tracing::debug!(domain, error = %err, "no mail exchanger for domain");
    } else {
        tracing::warn!(domain, error = %err, "MX lookup failed");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::mx::MxRecord;
    use crate::probe::{SmtpOutcome, SmtpReply};

    struct FakeResolver {
        calls: Cell<usize>,
        on_lookup: Box<dyn Fn(&str) -> Result<Vec<MxRecord>, DnsError>>,
    }

    impl FakeResolver {
        fn new<F>(f: F) -> Self
        where
            F: Fn(&str) -> Result<Vec<MxRecord>, DnsError> + 'static,
        {
            Self {
                calls: Cell::new(0),
                on_lookup: Box::new(f),
            }
        }

        fn unreachable() -> Self {
            Self::new(|_| panic!("resolver must not be invoked"))
        }
    }

    impl LookupMx for FakeResolver {
        fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
            self.calls.set(self.calls.get() + 1);
            (self.on_lookup)(domain)
        }
    }

    struct FakeProbe {
        calls: Cell<usize>,
        session_open: Cell<bool>,
        outcome: SmtpOutcome,
    }

    impl FakeProbe {
        fn new(outcome: SmtpOutcome) -> Self {
            Self {
                calls: Cell::new(0),
                session_open: Cell::new(false),
                outcome,
            }
        }

        fn unreachable() -> Self {
            Self::new(SmtpOutcome::Error {
                message: "probe must not be invoked".to_string(),
            })
        }
    }

    impl ProbeMailbox for FakeProbe {
        fn probe(&self, _email: &str, _mx_host: &str) -> SmtpOutcome {
            self.calls.set(self.calls.get() + 1);
            self.session_open.set(true);
            let outcome = self.outcome.clone();
            // session torn down before the outcome is reported
            self.session_open.set(false);
            outcome
        }
    }

    fn reply(code: u16, message: &str) -> SmtpReply {
        SmtpReply {
            code,
            message: message.to_string(),
        }
    }

    fn example_resolver() -> FakeResolver {
        FakeResolver::new(|domain| {
            assert_eq!(domain, "example.test");
            Ok(vec![MxRecord::new(10, "mail.example.test")])
        })
    }

    #[test]
    fn empty_email_is_an_error_with_no_network_calls() {
        let resolver = FakeResolver::unreachable();
        let probe = FakeProbe::unreachable();
        let verifier = Verifier::new(resolver, probe);

        let result = verifier.verify("");
        assert_eq!(result.status, VerificationStatus::Error);
        assert_eq!(result.message, "Email is required");
        assert!(!result.details.syntax_valid);
        assert_eq!(verifier.resolver.calls.get(), 0);
        assert_eq!(verifier.probe.calls.get(), 0);
    }

    #[test]
    fn invalid_syntax_never_reaches_the_network() {
        let verifier = Verifier::new(FakeResolver::unreachable(), FakeProbe::unreachable());

        let result = verifier.verify("bad@@domain");
        assert_eq!(result.status, VerificationStatus::Undeliverable);
        assert_eq!(result.message, "Invalid email syntax");
        assert!(!result.details.syntax_valid);
        assert!(!result.details.mx_record_found);
        assert_eq!(result.details.mx_record, None);
        assert_eq!(result.details.smtp_status, None);
        assert_eq!(result.details.smtp_message, None);
        assert_eq!(verifier.resolver.calls.get(), 0);
        assert_eq!(verifier.probe.calls.get(), 0);
    }

    #[test]
    fn nxdomain_reports_missing_mx_record() {
        let resolver = FakeResolver::new(|domain| {
            assert_eq!(domain, "nodomain.test");
            Err(DnsError::NxDomain {
                detail: "NXDOMAIN".to_string(),
            })
        });
        let verifier = Verifier::new(resolver, FakeProbe::unreachable());

        let result = verifier.verify("user@nodomain.test");
        assert_eq!(result.status, VerificationStatus::Undeliverable);
        assert_eq!(result.message, "Domain does not have an MX record");
        assert!(result.details.syntax_valid);
        assert!(!result.details.mx_record_found);
        assert_eq!(result.details.mx_record, None);
        assert_eq!(verifier.probe.calls.get(), 0);
    }

    #[test]
    fn dns_timeout_also_reports_missing_mx_record() {
        let resolver = FakeResolver::new(|_| {
            Err(DnsError::Timeout {
                detail: "no response within deadline".to_string(),
            })
        });
        let verifier = Verifier::new(resolver, FakeProbe::unreachable());

        let result = verifier.verify("user@slow.test");
        assert_eq!(result.status, VerificationStatus::Undeliverable);
        assert_eq!(result.message, "Domain does not have an MX record");
    }

    #[test]
    fn accepted_recipient_is_valid() {
        let probe = FakeProbe::new(SmtpOutcome::Deliverable {
            reply: reply(250, "Ok"),
        });
        let verifier = Verifier::new(example_resolver(), probe);

        let result = verifier.verify("user@example.test");
        assert_eq!(result.status, VerificationStatus::Valid);
        assert_eq!(result.message, "Email is valid and deliverable");
        assert!(result.details.mx_record_found);
        assert_eq!(result.details.mx_record.as_deref(), Some("mail.example.test"));
        assert_eq!(result.details.smtp_status, Some(SmtpStatus::Deliverable));
        assert_eq!(
            result.details.smtp_message.as_deref(),
            Some("Mailbox exists and is deliverable")
        );
        assert_eq!(verifier.probe.calls.get(), 1);
    }

    #[test]
    fn rejected_recipient_is_undeliverable_with_code() {
        let probe = FakeProbe::new(SmtpOutcome::Undeliverable {
            reply: reply(550, "5.1.1 User unknown"),
        });
        let verifier = Verifier::new(example_resolver(), probe);

        let result = verifier.verify("user@example.test");
        assert_eq!(result.status, VerificationStatus::Undeliverable);
        assert_eq!(result.message, "Mailbox does not exist or cannot be verified");
        assert_eq!(result.details.smtp_status, Some(SmtpStatus::Undeliverable));
        let smtp_message = result.details.smtp_message.expect("smtp message");
        assert!(smtp_message.contains("550"), "{smtp_message}");
    }

    #[test]
    fn probe_failure_is_an_error_and_releases_the_session() {
        let probe = FakeProbe::new(SmtpOutcome::Error {
            message: "connection to mail.example.test failed: connection refused".to_string(),
        });
        let verifier = Verifier::new(example_resolver(), probe);

        let result = verifier.verify("user@example.test");
        assert_eq!(result.status, VerificationStatus::Error);
        assert_eq!(result.message, "An error occurred during SMTP verification");
        assert_eq!(result.details.smtp_status, Some(SmtpStatus::Error));
        assert!(!verifier.probe.session_open.get());
    }

    #[test]
    fn verify_is_idempotent_for_identical_collaborators() {
        let probe = FakeProbe::new(SmtpOutcome::Deliverable {
            reply: reply(250, "Ok"),
        });
        let verifier = Verifier::new(example_resolver(), probe);

        let first = verifier.verify("user@example.test");
        let second = verifier.verify("user@example.test");
        assert_eq!(first, second);
    }

    #[test]
    fn serialized_shape_matches_the_wire_contract() {
        let verifier = Verifier::new(FakeResolver::unreachable(), FakeProbe::unreachable());
        let result = verifier.verify("bad@@domain");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["email"], "bad@@domain");
        assert_eq!(json["status"], "undeliverable");
        assert_eq!(json["message"], "Invalid email syntax");
        assert_eq!(json["details"]["syntax_valid"], false);
        assert_eq!(json["details"]["mx_record_found"], false);
        assert!(json["details"]["mx_record"].is_null());
        assert!(json["details"]["smtp_status"].is_null());
        assert!(json["details"]["smtp_message"].is_null());
    }

    #[test]
    fn smtp_status_serializes_lowercase() {
        let probe = FakeProbe::new(SmtpOutcome::Deliverable {
            reply: reply(250, "Ok"),
        });
        let verifier = Verifier::new(example_resolver(), probe);

        let json = serde_json::to_value(verifier.verify("user@example.test")).expect("serialize");
        assert_eq!(json["status"], "valid");
        assert_eq!(json["details"]["smtp_status"], "deliverable");
    }
}
