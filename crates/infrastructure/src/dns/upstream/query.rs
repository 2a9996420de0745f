use crate::dns::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport::{create_transport, TransportKind};
use resolve_domain::{DomainError, RecordType};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of a single-server query attempt
pub struct QueryAttemptResult {
    pub response: DnsResponse,
    pub server_addr: SocketAddr,
    pub protocol_used: &'static str,
    pub latency_ms: u64,
}

/// Execute a DNS query against a single server.
///
/// Handles the full flow: build message → send over UDP → parse response.
/// If the UDP response is truncated (TC bit), the query is repeated over TCP
/// with whatever is left of `timeout`. A response carrying a different ID
/// than the query is rejected.
///
/// ## Example
///
/// ```rust,no_run
/// use resolve_infrastructure::dns::upstream::query_server;
/// use resolve_domain::RecordType;
/// use std::time::Duration;
///
/// # async fn example() {
/// let result = query_server(
///     "8.8.8.8:53".parse().unwrap(),
///     "google.com",
///     &RecordType::A,
///     Duration::from_secs(10),
/// ).await.unwrap();
/// # }
/// ```
pub async fn query_server(
    server_addr: SocketAddr,
    domain: &str,
    record_type: &RecordType,
    timeout: Duration,
) -> Result<QueryAttemptResult, DomainError> {
    let start = Instant::now();

    let (query_id, query_bytes) = MessageBuilder::build_query_with_id(domain, record_type)?;

    let udp = create_transport(TransportKind::Udp, server_addr);
    let transport_response = udp.send(&query_bytes, timeout).await?;
    let dns_response = parse_matching(&transport_response.bytes, query_id, server_addr)?;

    if !dns_response.truncated {
        return Ok(QueryAttemptResult {
            response: dns_response,
            server_addr,
            protocol_used: transport_response.protocol_used,
            latency_ms: start.elapsed().as_millis() as u64,
        });
    }

    debug!(
        server = %server_addr,
        domain = %domain,
        record_type = %record_type,
        "Response truncated (TC bit), retrying via TCP"
    );

    let remaining = timeout
        .checked_sub(start.elapsed())
        .unwrap_or(Duration::from_millis(500));

    let tcp = create_transport(TransportKind::Tcp, server_addr);
    let tcp_response = tcp.send(&query_bytes, remaining).await?;
    let tcp_dns_response = parse_matching(&tcp_response.bytes, query_id, server_addr)?;

    Ok(QueryAttemptResult {
        response: tcp_dns_response,
        server_addr,
        protocol_used: tcp_response.protocol_used,
        latency_ms: start.elapsed().as_millis() as u64,
    })
}

fn parse_matching(
    bytes: &[u8],
    query_id: u16,
    server_addr: SocketAddr,
) -> Result<DnsResponse, DomainError> {
    let response = ResponseParser::parse(bytes)?;

    if response.id != query_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "Response ID {} from {} does not match query ID {}",
            response.id, server_addr, query_id
        )));
    }

    Ok(response)
}
