use thiserror::Error;

/// Transport and protocol failures during a probe session. These never
/// escape [`probe_mailbox`](crate::probe::probe_mailbox); they fold into
/// [`SmtpOutcome::Error`](crate::probe::SmtpOutcome::Error).
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no socket addresses resolved for {host}")]
    NoAddresses { host: String },
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl ProbeError {
    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
