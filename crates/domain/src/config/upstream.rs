use serde::{Deserialize, Serialize};

/// DNS-over-HTTPS backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// RFC 8484 endpoint queried with POST (default: Cloudflare)
    #[serde(default = "default_doh_url")]
    pub doh_url: String,

    /// Per-query timeout in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            doh_url: default_doh_url(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_doh_url() -> String {
    "https://cloudflare-dns.com/dns-query".to_string()
}

fn default_query_timeout_ms() -> u64 {
    2000
}
