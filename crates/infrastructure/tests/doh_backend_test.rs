use splitdns_application::ports::ResolverBackend;
use splitdns_domain::DomainError;
use splitdns_infrastructure::dns::DohBackend;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{MockTransport, Reply, WireRecord};

const QTYPE_A: u16 = 1;
const QTYPE_AAAA: u16 = 28;
const QTYPE_ANY: u16 = 255;

fn backend(transport: MockTransport) -> (DohBackend, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let backend = DohBackend::new(transport.clone(), Duration::from_millis(500));
    (backend, transport)
}

#[tokio::test]
async fn test_primary_returns_first_ipv4() {
    let (backend, transport) = backend(MockTransport::new().reply(
        "example.com",
        QTYPE_A,
        Reply::Answers(vec![
            WireRecord::A(Ipv4Addr::new(93, 184, 216, 34)),
            WireRecord::A(Ipv4Addr::new(93, 184, 216, 35)),
        ]),
    ));

    let answer = backend.query_with_cname("example.com").await.unwrap();
    assert_eq!(answer.address.as_deref(), Some("93.184.216.34"));
    assert!(answer.cname.is_none());
    assert_eq!(transport.seen(), vec![("example.com".to_string(), QTYPE_A)]);
}

#[tokio::test]
async fn test_primary_reports_cname_without_address() {
    let (backend, _) = backend(MockTransport::new().reply(
        "cdn.example.com",
        QTYPE_A,
        Reply::Answers(vec![WireRecord::Cname("edge.cdnprovider.net")]),
    ));

    let answer = backend.query_with_cname("cdn.example.com").await.unwrap();
    assert!(answer.address.is_none());
    assert_eq!(answer.cname.as_deref(), Some("edge.cdnprovider.net"));
}

#[tokio::test]
async fn test_primary_reports_both_when_flattened() {
    let (backend, _) = backend(MockTransport::new().reply(
        "cdn.example.com",
        QTYPE_A,
        Reply::Answers(vec![
            WireRecord::Cname("edge.cdnprovider.net"),
            WireRecord::A(Ipv4Addr::new(10, 1, 2, 3)),
        ]),
    ));

    let answer = backend.query_with_cname("cdn.example.com").await.unwrap();
    assert_eq!(answer.address.as_deref(), Some("10.1.2.3"));
    assert_eq!(answer.cname.as_deref(), Some("edge.cdnprovider.net"));
}

#[tokio::test]
async fn test_unscripted_name_is_empty() {
    let (backend, _) = backend(MockTransport::new());

    let answer = backend.query_with_cname("nothing.example").await.unwrap();
    assert!(answer.address.is_none());
    assert!(answer.cname.is_none());
    assert!(backend.query_aaaa("nothing.example").await.unwrap().is_none());
    assert!(backend.query_all("nothing.example").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_aaaa_returns_first_ipv6() {
    let (backend, _) = backend(MockTransport::new().reply(
        "v6.example.com",
        QTYPE_AAAA,
        Reply::Answers(vec![WireRecord::Aaaa(Ipv6Addr::new(
            0x2001, 0xdb8, 0, 0, 0, 0, 0, 1,
        ))]),
    ));

    let answer = backend.query_aaaa("v6.example.com").await.unwrap();
    assert_eq!(answer.as_deref(), Some("2001:db8::1"));
}

#[tokio::test]
async fn test_any_groups_records() {
    let (backend, _) = backend(MockTransport::new().reply(
        "example.com",
        QTYPE_ANY,
        Reply::Answers(vec![
            WireRecord::A(Ipv4Addr::new(1, 2, 3, 4)),
            WireRecord::Txt("v=spf1 -all"),
        ]),
    ));

    let records = backend.query_all("example.com").await.unwrap();
    assert_eq!(records.first_value().map(|v| &**v), Some("1.2.3.4"));

    let types: Vec<&str> = records.groups().map(|(rt, _)| rt).collect();
    assert_eq!(types, vec!["A", "TXT"]);
}

#[tokio::test]
async fn test_nxdomain_is_empty_answer() {
    let (backend, _) =
        backend(MockTransport::new().reply("gone.example.com", QTYPE_A, Reply::Rcode(3)));

    let answer = backend.query_with_cname("gone.example.com").await.unwrap();
    assert!(answer.address.is_none());
}

#[tokio::test]
async fn test_servfail_is_error() {
    let (backend, _) =
        backend(MockTransport::new().reply("broken.example.com", QTYPE_A, Reply::Rcode(2)));

    let result = backend.query_with_cname("broken.example.com").await;
    assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let (backend, _) = backend(MockTransport::new().reply(
        "slow.example.com",
        QTYPE_AAAA,
        Reply::Fail(DomainError::QueryTimeout("slow.example.com".into())),
    ));

    let result = backend.query_aaaa("slow.example.com").await;
    assert!(matches!(result, Err(DomainError::QueryTimeout(_))));
}

#[tokio::test]
async fn test_malformed_response_is_error() {
    let (backend, _) =
        backend(MockTransport::new().reply("junk.example.com", QTYPE_ANY, Reply::Garbage));

    let result = backend.query_all("junk.example.com").await;
    assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
}
