use async_trait::async_trait;
use resolve_domain::DomainError;
use std::net::IpAddr;

/// Issues forward and reverse queries against one resolution strategy.
#[async_trait]
pub trait LookupResolver: Send + Sync {
    /// Addresses for `host`, in the order the resolver returned them.
    /// IPv6 addresses are only requested when `include_ipv6` is set.
    async fn lookup_ip(&self, host: &str, include_ipv6: bool) -> Result<Vec<IpAddr>, DomainError>;

    /// Names pointing back at `ip`, as returned (trailing dot included).
    async fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DomainError>;

    fn name(&self) -> &str;
}
