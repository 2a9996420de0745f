use async_trait::async_trait;
use resolve_application::ports::LookupResolver;
use resolve_domain::DomainError;
use std::net::IpAddr;
use tracing::debug;

/// The platform resolver: getaddrinfo for names, getnameinfo for addresses.
///
/// No timeout is applied; a query takes as long as the platform takes.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LookupResolver for SystemResolver {
    async fn lookup_ip(&self, host: &str, include_ipv6: bool) -> Result<Vec<IpAddr>, DomainError> {
        debug!(host = %host, include_ipv6, "Resolving via getaddrinfo");

        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| DomainError::LookupFailed(format!("getaddrinfo({}) failed: {}", host, e)))?;

        let addresses: Vec<IpAddr> = addrs
            .map(|addr| addr.ip())
            .filter(|ip| keeps_family(ip, include_ipv6))
            .collect();

        debug!(host = %host, count = addresses.len(), "getaddrinfo complete");
        Ok(addresses)
    }

    async fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DomainError> {
        debug!(ip = %ip, "Resolving via getnameinfo");

        let name = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip))
            .await
            .map_err(|e| DomainError::LookupFailed(format!("getnameinfo task failed: {}", e)))?
            .map_err(|e| DomainError::LookupFailed(format!("getnameinfo({}) failed: {}", ip, e)))?;

        debug!(ip = %ip, name = %name, "getnameinfo complete");
        Ok(vec![name])
    }

    fn name(&self) -> &str {
        "system"
    }
}

/// IPv4-mapped IPv6 addresses count as IPv4.
fn keeps_family(ip: &IpAddr, include_ipv6: bool) -> bool {
    include_ipv6 || ip.to_canonical().is_ipv4()
}
