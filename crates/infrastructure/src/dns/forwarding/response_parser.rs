use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use resolve_domain::DomainError;
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    /// A and AAAA answers in answer order.
    pub addresses: Vec<IpAddr>,

    /// PTR answers in answer order, as sent (absolute names keep their dot).
    pub names: Vec<String>,

    pub rcode: ResponseCode,

    pub truncated: bool,
}

impl DnsResponse {
    pub fn is_nodata(&self) -> bool {
        self.rcode == ResponseCode::NoError && self.addresses.is_empty() && self.names.is_empty()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        if response_bytes.len() < 12 {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response too short: {} bytes",
                response_bytes.len()
            )));
        }
        let id = u16::from_be_bytes([response_bytes[0], response_bytes[1]]);

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut addresses = Vec::new();
        let mut names = Vec::new();

        for record in message.answers() {
            match record.data() {
                RData::A(a) => {
                    addresses.push(IpAddr::V4(a.0));
                }
                RData::AAAA(aaaa) => {
                    addresses.push(IpAddr::V6(aaaa.0));
                }
                RData::PTR(ptr) => {
                    names.push(ptr.to_utf8());
                }
                _ => {}
            }
        }

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            names = names.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id,
            addresses,
            names,
            rcode,
            truncated,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
