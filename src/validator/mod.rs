//! Syntax checks for candidate addresses.
//!
//! Pure functions, no I/O, never failing: malformed input (empty string,
//! missing `@`) simply yields `false`. Plain ASCII matching only, no case
//! folding and no internationalized-domain handling.

mod domain;
mod local;

use domain::is_domain_valid;
use local::is_local_valid;

/// Check `email` against the `local@domain` grammar: local part of
/// `[A-Za-z0-9_.+-]`, domain labels of `[A-Za-z0-9-]` separated by dots,
/// at least one dot required. The address is split at the final `@`.
pub fn is_valid_syntax(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((local, domain)) => is_local_valid(local) && is_domain_valid(domain),
        None => false,
    }
}

/// Domain portion of `email`: the substring after the final `@`.
pub fn domain_of(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain)
}
