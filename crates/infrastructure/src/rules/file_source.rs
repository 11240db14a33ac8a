use async_trait::async_trait;
use splitdns_application::ports::RuleSource;
use splitdns_domain::{DomainError, RuleSet};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rule file on local disk, one `DOMAIN-SUFFIX,<suffix>` entry per line.
pub struct FileRuleSource {
    path: PathBuf,
}

impl FileRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RuleSource for FileRuleSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<RuleSet, DomainError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::IoError(format!("reading {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Rule file read");

        RuleSet::from_reader(Cursor::new(bytes))
    }
}
