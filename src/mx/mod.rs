//! DNS MX resolution.
//!
//! The public entry point is [`resolve_mx`], which queries the system
//! resolver and returns the preferred mail exchanger for a domain, or a
//! typed [`DnsError`] describing why none could be obtained.

mod error;
mod resolver;
mod types;

pub use error::DnsError;
pub use resolver::{LookupMx, SystemResolver, resolve_mx, resolve_with};
pub use types::MxRecord;
