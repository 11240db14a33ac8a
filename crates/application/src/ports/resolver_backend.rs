use async_trait::async_trait;
use splitdns_domain::DomainError;
use std::sync::Arc;

/// Answer to the primary (address-or-alias) query.
///
/// At most one of the two fields is expected to be set, but a backend may
/// return both when the response carried the alias and its address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryAnswer {
    pub address: Option<Arc<str>>,
    pub cname: Option<Arc<str>>,
}

impl PrimaryAnswer {
    pub fn address(address: impl Into<Arc<str>>) -> Self {
        Self {
            address: Some(address.into()),
            cname: None,
        }
    }

    pub fn cname(target: impl Into<Arc<str>>) -> Self {
        Self {
            address: None,
            cname: Some(target.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Record data grouped by record type, in the order the backend produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    groups: Vec<(Arc<str>, Vec<Arc<str>>)>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `data` to the group for `record_type`, creating the group at
    /// the end if this type has not been seen yet.
    pub fn push(&mut self, record_type: &str, data: impl Into<Arc<str>>) {
        let data = data.into();
        match self.groups.iter_mut().find(|(rt, _)| &**rt == record_type) {
            Some((_, values)) => values.push(data),
            None => self.groups.push((Arc::from(record_type), vec![data])),
        }
    }

    pub fn with(mut self, record_type: &str, data: impl Into<Arc<str>>) -> Self {
        self.push(record_type, data);
        self
    }

    /// First data value across all groups: types in order, then values in order.
    pub fn first_value(&self) -> Option<&Arc<str>> {
        self.groups.iter().flat_map(|(_, values)| values.iter()).next()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Arc<str>])> {
        self.groups
            .iter()
            .map(|(rt, values)| (&**rt, values.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, values)| values.is_empty())
    }
}

/// Black-box DNS backend the resolver drives one query at a time.
///
/// Errors are reported but the resolver treats them exactly like an empty
/// answer. Per-query timeouts are the backend's responsibility.
#[async_trait]
pub trait ResolverBackend: Send + Sync {
    /// Address lookup that also reports a CNAME target when no address came back.
    async fn query_with_cname(&self, name: &str) -> Result<PrimaryAnswer, DomainError>;

    /// IPv6-only address lookup.
    async fn query_aaaa(&self, name: &str) -> Result<Option<Arc<str>>, DomainError>;

    /// Broad lookup returning every record the backend knows for `name`.
    async fn query_all(&self, name: &str) -> Result<RecordSet, DomainError>;
}
