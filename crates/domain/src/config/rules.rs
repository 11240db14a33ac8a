use serde::{Deserialize, Serialize};

/// Domain-suffix rule source
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Path of the rule file (`DOMAIN-SUFFIX,<suffix>` lines)
    #[serde(default = "default_rules_path")]
    pub path: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: default_rules_path(),
        }
    }
}

fn default_rules_path() -> String {
    "rules.txt".to_string()
}
