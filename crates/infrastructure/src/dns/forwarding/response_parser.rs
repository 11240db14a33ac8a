use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use splitdns_application::ports::RecordSet;
use splitdns_domain::DomainError;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    /// A and AAAA data in answer order.
    pub addresses: Vec<IpAddr>,

    /// CNAME targets in answer order, without the trailing root dot.
    pub cname_chain: Vec<Arc<str>>,

    /// Every answer record rendered as text, grouped by type in first-seen order.
    pub records: RecordSet,

    pub rcode: ResponseCode,

    pub truncated: bool,
}

impl DnsResponse {
    pub fn first_ipv4(&self) -> Option<IpAddr> {
        self.addresses.iter().copied().find(IpAddr::is_ipv4)
    }

    pub fn first_ipv6(&self) -> Option<IpAddr> {
        self.addresses.iter().copied().find(IpAddr::is_ipv6)
    }

    pub fn first_cname(&self) -> Option<&Arc<str>> {
        self.cname_chain.first()
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
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.metadata.response_code;
        let truncated = message.metadata.truncation;

        let mut addresses = Vec::with_capacity(message.answers.len().min(8));
        let mut cname_chain: Vec<Arc<str>> = Vec::new();
        let mut records = RecordSet::new();

        for record in &message.answers {
            let record_type = record.record_type().to_string();

            match &record.data {
                RData::A(a) => {
                    let ip = IpAddr::V4(a.0);
                    addresses.push(ip);
                    records.push(&record_type, ip.to_string());
                }
                RData::AAAA(aaaa) => {
                    let ip = IpAddr::V6(aaaa.0);
                    addresses.push(ip);
                    records.push(&record_type, ip.to_string());
                }
                RData::CNAME(canonical) => {
                    let name = canonical.to_utf8();
                    let target: Arc<str> = Arc::from(strip_root(&name));
                    debug!(cname = %target, "CNAME record found");
                    cname_chain.push(Arc::clone(&target));
                    records.push(&record_type, target);
                }
                other => {
                    records.push(&record_type, other.to_string());
                }
            }
        }

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            cname_hops = cname_chain.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            addresses,
            cname_chain,
            records,
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

/// Names on the wire are fully qualified; callers and cache keys are not.
fn strip_root(name: &str) -> &str {
    if name.len() > 1 {
        name.strip_suffix('.').unwrap_or(name)
    } else {
        name
    }
}
