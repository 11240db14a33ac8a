use async_trait::async_trait;
use splitdns_domain::DomainError;
use splitdns_infrastructure::dns::transport::{DnsTransport, TransportResponse};
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Mutex;
use std::time::Duration;

/// Answer record appended after the echoed question. Owner is always a
/// pointer to the question name.
#[derive(Debug, Clone)]
pub enum WireRecord {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(&'static str),
    Txt(&'static str),
}

impl WireRecord {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[0xc0, 0x0c]);

        let (rtype, rdata): (u16, Vec<u8>) = match self {
            WireRecord::A(ip) => (1, ip.octets().to_vec()),
            WireRecord::Aaaa(ip) => (28, ip.octets().to_vec()),
            WireRecord::Cname(target) => (5, encode_name(target)),
            WireRecord::Txt(text) => {
                let mut data = vec![text.len() as u8];
                data.extend_from_slice(text.as_bytes());
                (16, data)
            }
        };

        out.extend_from_slice(&rtype.to_be_bytes());
        out.extend_from_slice(&[0x00, 0x01]); // Class IN
        out.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]); // TTL: 60 seconds
        out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        out.extend_from_slice(&rdata);
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.trim_end_matches('.').split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Build a response to `query` carrying `records` in the answer section.
pub fn build_response(query: &[u8], rcode: u8, records: &[WireRecord]) -> Vec<u8> {
    let mut response = Vec::with_capacity(512);

    response.extend_from_slice(&query[0..2]); // Transaction ID
    response.push(0x81); // QR=1, RD=1
    response.push(0x80 | (rcode & 0x0f)); // RA=1

    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(records.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(&query[12..]);

    for record in records {
        record.encode(&mut response);
    }

    response
}

/// Question name and type of a single-question query.
pub fn parse_question(query: &[u8]) -> (String, u16) {
    let mut labels = Vec::new();
    let mut pos = 12;

    while query[pos] != 0 {
        let len = query[pos] as usize;
        labels.push(String::from_utf8_lossy(&query[pos + 1..pos + 1 + len]).into_owned());
        pos += len + 1;
    }

    let qtype = u16::from_be_bytes([query[pos + 1], query[pos + 2]]);
    (labels.join("."), qtype)
}

#[derive(Debug, Clone)]
pub enum Reply {
    Answers(Vec<WireRecord>),
    Rcode(u8),
    Fail(DomainError),
    Garbage,
}

/// In-process transport answering from a script keyed by (name, qtype).
/// Unscripted questions get an empty NOERROR response.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<HashMap<(String, u16), Reply>>,
    seen: Mutex<Vec<(String, u16)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, name: &str, qtype: u16, reply: Reply) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert((name.to_string(), qtype), reply);
        self
    }

    pub fn seen(&self) -> Vec<(String, u16)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsTransport for MockTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let question = parse_question(message_bytes);
        self.seen.lock().unwrap().push(question.clone());

        let reply = self.script.lock().unwrap().get(&question).cloned();

        let bytes = match reply {
            None => build_response(message_bytes, 0, &[]),
            Some(Reply::Answers(records)) => build_response(message_bytes, 0, &records),
            Some(Reply::Rcode(rcode)) => build_response(message_bytes, rcode, &[]),
            Some(Reply::Fail(error)) => return Err(error),
            Some(Reply::Garbage) => vec![0xde, 0xad],
        };

        Ok(TransportResponse {
            bytes,
            protocol_used: "MOCK",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}
