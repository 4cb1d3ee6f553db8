//! SMTP mailbox probing.
//!
//! [`probe_mailbox`] runs a minimal, non-terminating SMTP dialogue (banner,
//! HELO, MAIL FROM, RCPT TO, QUIT) against a mail exchanger and classifies
//! the recipient reply. The session never reaches DATA; no message is sent.
//! Many servers accept every recipient (catch-all) or refuse probing
//! outright, so the outcome is a best-effort signal, not ground truth.

mod error;
mod options;
mod session;
mod types;

pub use error::ProbeError;
pub use options::ProbeOptions;
pub use types::{SmtpOutcome, SmtpReply, SmtpStatus};

use std::net::{SocketAddr, ToSocketAddrs};

use session::SmtpSession;

/// Capability to check whether a mailbox is accepted by a mail exchanger.
///
/// Production code opens a TCP session per call; tests substitute stubs.
pub trait ProbeMailbox {
    fn probe(&self, email: &str, mx_host: &str) -> SmtpOutcome;
}

/// TCP-backed prober. One fresh connection per call, torn down before the
/// outcome is returned; no pooling, no reuse.
#[derive(Debug, Clone, Default)]
pub struct SmtpProbe {
    options: ProbeOptions,
}

impl SmtpProbe {
    pub fn new(options: ProbeOptions) -> Self {
        Self { options }
    }
}

impl ProbeMailbox for SmtpProbe {
    fn probe(&self, email: &str, mx_host: &str) -> SmtpOutcome {
        probe_mailbox(email, mx_host, &self.options)
    }
}

/// Probe `mx_host` for acceptance of `email`.
///
/// Reply codes 250 and 251 on RCPT TO classify as deliverable, any other
/// well-formed reply as undeliverable. Transport or protocol failures at any
/// step classify as an error carrying a diagnostic. The connection is
/// released on every exit path.
pub fn probe_mailbox(email: &str, mx_host: &str, options: &ProbeOptions) -> SmtpOutcome {
    let addrs = match resolve_socket_addrs(mx_host, options.port) {
        Ok(addrs) => addrs,
        Err(err) => {
            tracing::debug!(host = mx_host, error = %err, "could not resolve probe target");
            return SmtpOutcome::error(err.to_string());
        }
    };

    let mut session = match SmtpSession::connect(
        mx_host,
        &addrs,
        options.connect_timeout,
        options.command_timeout,
    ) {
        Ok(session) => session,
        Err(err) => {
            tracing::debug!(host = mx_host, error = %err, "SMTP connect failed");
            return SmtpOutcome::error(err.to_string());
        }
    };

    let rcpt_reply = run_handshake(&mut session, email, options);
    // QUIT whatever happened; the stream drops with the session either way
    session.quit().ok();

    match rcpt_reply {
        Ok(reply) if reply.accepts_recipient() => SmtpOutcome::Deliverable { reply },
        Ok(reply) => SmtpOutcome::Undeliverable { reply },
        Err(err) => {
            tracing::debug!(host = mx_host, error = %err, "SMTP handshake failed");
            SmtpOutcome::error(err.to_string())
        }
    }
}

/// Greeting and envelope replies are read to keep the dialogue in sync, but
/// only the RCPT TO reply is classified.
fn run_handshake(
    session: &mut SmtpSession,
    email: &str,
    options: &ProbeOptions,
) -> Result<SmtpReply, ProbeError> {
    session.read_reply()?;
    session.send_command(&format!("HELO {}", options.helo_host))?;
    session.send_command(&format!("MAIL FROM:<{}>", options.mail_from))?;
    session.send_command(&format!("RCPT TO:<{email}>"))
}

fn resolve_socket_addrs(host: &str, port: u16) -> Result<Vec<SocketAddr>, ProbeError> {
    let addrs: Vec<SocketAddr> = format!("{host}:{port}")
        .to_socket_addrs()
        .map_err(ProbeError::io)?
        .collect();
    if addrs.is_empty() {
        return Err(ProbeError::NoAddresses {
            host: host.to_string(),
        });
    }
    Ok(addrs)
}
