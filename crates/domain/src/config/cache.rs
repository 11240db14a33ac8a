use serde::{Deserialize, Serialize};

/// Answer cache configuration
///
/// Entries never expire; the only bound is the entry count.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of cached names (0 = unbounded)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> usize {
    100_000
}
