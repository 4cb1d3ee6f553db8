use thiserror::Error;

/// Failure kinds for an MX lookup.
///
/// Callers branch on the variant only; the diagnostic text is free-form and
/// meant for operator logs, never for matching.
#[derive(Debug, Error)]
pub enum DnsError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("domain does not exist: {detail}")]
    NxDomain { detail: String },
    #[error("domain has no MX records: {detail}")]
    NoRecords { detail: String },
    #[error("MX lookup timed out: {detail}")]
    Timeout { detail: String },
    #[error("MX lookup transport failed: {detail}")]
    Transport { detail: String },
}

impl DnsError {
    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn no_records(detail: impl Into<String>) -> Self {
        Self::NoRecords {
            detail: detail.into(),
        }
    }

    /// True for the kinds that mean "the mailbox domain genuinely has no
    /// usable MX", as opposed to an infrastructure fault on our side.
    pub fn is_negative_answer(&self) -> bool {
        matches!(
            self,
            Self::EmptyDomain | Self::NxDomain { .. } | Self::NoRecords { .. }
        )
    }
}
