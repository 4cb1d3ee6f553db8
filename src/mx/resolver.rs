use std::time::Duration;

use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::{Resolver, system_conf};

use super::{DnsError, MxRecord};

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability to enumerate MX records for a domain.
///
/// Production code queries DNS through [`SystemResolver`]; tests substitute
/// stubs. Implementations issue at most one outbound query per call and are
/// safe to retry (retries are not performed here).
pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError>;
}

/// Lookup the preferred mail exchanger for `domain` using the system
/// resolver configuration.
pub fn resolve_mx(domain: &str) -> Result<MxRecord, DnsError> {
    resolve_with(&SystemResolver::default(), domain)
}

/// Selection policy shared by every [`LookupMx`] implementation: the record
/// with the lowest preference wins; ties keep the response order.
pub fn resolve_with<R: LookupMx>(resolver: &R, domain: &str) -> Result<MxRecord, DnsError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(DnsError::EmptyDomain);
    }

    let mut records = resolver.lookup_mx(trimmed)?;
    // sort_by_key is stable: equal preferences keep the resolver's order
    records.sort_by_key(|record| record.preference);
    records
        .into_iter()
        .next()
        .ok_or_else(|| DnsError::no_records(format!("empty MX record set for {trimmed}")))
}

/// DNS client backed by the system configuration, with a bounded query
/// timeout. The underlying resolver is built per call; requests share no
/// state.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TIMEOUT)
    }
}

impl LookupMx for SystemResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        let (config, mut options) =
            system_conf::read_system_conf().map_err(DnsError::resolver_init)?;
        options.timeout = self.timeout;
        let resolver = Resolver::new(config, options).map_err(DnsError::resolver_init)?;

        let lookup = resolver
            .mx_lookup(domain)
            .map_err(|err| classify_resolve_error(&err))?;

        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

fn classify_resolve_error(err: &ResolveError) -> DnsError {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if *response_code == ResponseCode::NXDomain =>
        {
            DnsError::NxDomain {
                detail: err.to_string(),
            }
        }
        ResolveErrorKind::NoRecordsFound { .. } => DnsError::NoRecords {
            detail: err.to_string(),
        },
        ResolveErrorKind::Timeout => DnsError::Timeout {
            detail: err.to_string(),
        },
        _ => DnsError::Transport {
            detail: err.to_string(),
        },
    }
}
