use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// A nameserver endpoint that may or may not be resolved to an IP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

/// One entry of the `-s` list, kept verbatim.
///
/// The text is only interpreted when a query is about to be sent, so a bad
/// entry costs its own attempt and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nameserver {
    raw: Arc<str>,
}

impl Nameserver {
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Interprets the entry as `IP`, `IP:port`, `[IPv6]:port`, `hostname`
    /// or `hostname:port`. Port 53 is used when none is given.
    pub fn endpoint(&self) -> Result<UpstreamAddr, DomainError> {
        parse_upstream_addr(&self.raw)
    }
}

impl fmt::Display for Nameserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let rest = &s[end + 1..];
        let port_str = rest.strip_prefix(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

fn is_hostname(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 253
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}

fn parse_upstream_addr(addr_str: &str) -> Result<UpstreamAddr, DomainError> {
    if let Ok(addr) = addr_str.parse::<SocketAddr>() {
        return Ok(UpstreamAddr::Resolved(addr));
    }

    let bare = addr_str
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(addr_str);
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
    }

    if let Some((host, port)) = parse_host_port(addr_str) {
        if is_hostname(host) {
            return Ok(UpstreamAddr::Unresolved {
                hostname: host.into(),
                port,
            });
        }
    }

    if is_hostname(addr_str) {
        return Ok(UpstreamAddr::Unresolved {
            hostname: addr_str.into(),
            port: DEFAULT_DNS_PORT,
        });
    }

    Err(DomainError::InvalidNameserver(format!(
        "'{}' is not an IP, IP:port or hostname",
        addr_str
    )))
}

/// How queries are issued: the platform resolver, or an ordered list of
/// nameservers tried one after another until one answers with data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolutionStrategy {
    #[default]
    SystemDefault,
    CustomChain(Vec<Nameserver>),
}

impl ResolutionStrategy {
    /// Parses the raw `-s` value: all whitespace is removed, then the rest is
    /// split on commas. An empty value selects the system resolver.
    ///
    /// Entries are not validated here; `a,,b` keeps its empty middle entry.
    pub fn parse(raw: &str) -> Self {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return ResolutionStrategy::SystemDefault;
        }

        ResolutionStrategy::CustomChain(compact.split(',').map(Nameserver::new).collect())
    }

    pub fn nameservers(&self) -> &[Nameserver] {
        match self {
            ResolutionStrategy::SystemDefault => &[],
            ResolutionStrategy::CustomChain(servers) => servers,
        }
    }

    pub fn is_system_default(&self) -> bool {
        matches!(self, ResolutionStrategy::SystemDefault)
    }
}
