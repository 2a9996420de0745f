use super::query::query_server;
use super::reverse_name::ip_to_reverse_domain;
use crate::dns::forwarding::ResponseParser;
use crate::dns::transport::resolver::resolve_all;
use async_trait::async_trait;
use resolve_application::ports::LookupResolver;
use resolve_domain::{DomainError, Nameserver, RecordType, UpstreamAddr};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Sends queries to exactly one nameserver.
///
/// Every lookup is one attempt bounded by `timeout`, including resolving a
/// nameserver given by hostname and any TCP retry.
pub struct UpstreamResolver {
    nameserver: Nameserver,
    timeout: Duration,
    label: String,
}

impl UpstreamResolver {
    pub fn new(nameserver: Nameserver, timeout: Duration) -> Self {
        let label = format!("upstream {}", nameserver);
        Self {
            nameserver,
            timeout,
            label,
        }
    }

    async fn server_addr(&self) -> Result<SocketAddr, DomainError> {
        match self.nameserver.endpoint()? {
            UpstreamAddr::Resolved(addr) => Ok(addr),
            UpstreamAddr::Unresolved { hostname, port } => {
                let addrs = resolve_all(&hostname, port, self.timeout).await?;
                Ok(addrs[0])
            }
        }
    }

    async fn query(
        &self,
        server_addr: SocketAddr,
        domain: &str,
        record_type: RecordType,
    ) -> Result<super::QueryAttemptResult, DomainError> {
        let result = query_server(server_addr, domain, &record_type, self.timeout).await?;

        debug!(
            server = %result.server_addr,
            domain = %domain,
            record_type = %record_type,
            status = ResponseParser::rcode_to_status(result.response.rcode),
            protocol = result.protocol_used,
            latency_ms = result.latency_ms,
            "Nameserver responded"
        );

        if result.response.is_server_error() {
            return Err(DomainError::LookupFailed(format!(
                "{} answered {} for {} {}",
                server_addr,
                ResponseParser::rcode_to_status(result.response.rcode),
                domain,
                record_type
            )));
        }

        if result.response.is_nxdomain() || result.response.is_nodata() {
            debug!(server = %server_addr, domain = %domain, record_type = %record_type, "No records");
        }

        Ok(result)
    }

    async fn lookup_ip_attempt(
        &self,
        host: &str,
        include_ipv6: bool,
    ) -> Result<Vec<IpAddr>, DomainError> {
        let server_addr = self.server_addr().await?;

        if !include_ipv6 {
            let result = self.query(server_addr, host, RecordType::A).await?;
            return Ok(result.response.addresses);
        }

        let (v4, v6) = tokio::join!(
            self.query(server_addr, host, RecordType::A),
            self.query(server_addr, host, RecordType::AAAA)
        );

        match (v4, v6) {
            (Err(e), Err(_)) => Err(e),
            (v4, v6) => {
                let mut addresses = Vec::new();
                for result in [v4, v6].into_iter().flatten() {
                    addresses.extend(result.response.addresses);
                }
                Ok(addresses)
            }
        }
    }

    async fn lookup_addr_attempt(&self, ip: IpAddr) -> Result<Vec<String>, DomainError> {
        let server_addr = self.server_addr().await?;
        let reverse_domain = ip_to_reverse_domain(&ip);

        let result = self
            .query(server_addr, &reverse_domain, RecordType::PTR)
            .await?;

        Ok(result.response.names)
    }

    fn attempt_timed_out(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.nameserver.to_string(),
        }
    }
}

#[async_trait]
impl LookupResolver for UpstreamResolver {
    async fn lookup_ip(&self, host: &str, include_ipv6: bool) -> Result<Vec<IpAddr>, DomainError> {
        tokio::time::timeout(self.timeout, self.lookup_ip_attempt(host, include_ipv6))
            .await
            .map_err(|_| self.attempt_timed_out())?
    }

    async fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DomainError> {
        tokio::time::timeout(self.timeout, self.lookup_addr_attempt(ip))
            .await
            .map_err(|_| self.attempt_timed_out())?
    }

    fn name(&self) -> &str {
        &self.label
    }
}
