use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::transport::DnsTransport;
use async_trait::async_trait;
use splitdns_application::ports::{PrimaryAnswer, RecordSet, ResolverBackend};
use splitdns_domain::{DomainError, RecordType};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// `ResolverBackend` that sends one wire-format query per call over a
/// `DnsTransport` and reads the answer section of the reply.
pub struct DohBackend {
    transport: Arc<dyn DnsTransport>,
    query_timeout: Duration,
}

impl DohBackend {
    pub fn new(transport: Arc<dyn DnsTransport>, query_timeout: Duration) -> Self {
        Self {
            transport,
            query_timeout,
        }
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    async fn exchange(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<DnsResponse, DomainError> {
        let query_bytes = MessageBuilder::build_query(domain, &record_type)?;

        let response = self
            .transport
            .send(&query_bytes, self.query_timeout)
            .await?;

        let parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.is_server_error() {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} answered {} for {} {}",
                response.protocol_used,
                ResponseParser::rcode_to_status(parsed.rcode),
                domain,
                record_type
            )));
        }

        debug!(
            domain = %domain,
            record_type = %record_type,
            rcode = ResponseParser::rcode_to_status(parsed.rcode),
            answers = parsed.records.groups().count(),
            "Backend query answered"
        );

        Ok(parsed)
    }
}

#[async_trait]
impl ResolverBackend for DohBackend {
    #[instrument(skip(self), fields(protocol = self.transport.protocol_name()))]
    async fn query_with_cname(&self, domain: &str) -> Result<PrimaryAnswer, DomainError> {
        let response = self.exchange(domain, RecordType::A).await?;

        Ok(PrimaryAnswer {
            address: response.first_ipv4().map(|ip| Arc::from(ip.to_string())),
            cname: response.first_cname().cloned(),
        })
    }

    #[instrument(skip(self), fields(protocol = self.transport.protocol_name()))]
    async fn query_aaaa(&self, domain: &str) -> Result<Option<Arc<str>>, DomainError> {
        let response = self.exchange(domain, RecordType::AAAA).await?;

        Ok(response.first_ipv6().map(|ip| Arc::from(ip.to_string())))
    }

    #[instrument(skip(self), fields(protocol = self.transport.protocol_name()))]
    async fn query_all(&self, domain: &str) -> Result<RecordSet, DomainError> {
        let response = self.exchange(domain, RecordType::ANY).await?;

        Ok(response.records)
    }
}
