use super::DomainError;
use std::io::BufRead;
use std::sync::Arc;

/// Line prefix recognised in rule files.
pub const DOMAIN_SUFFIX_PREFIX: &str = "DOMAIN-SUFFIX,";

/// Domain-suffix rule used to classify traffic.
///
/// Matching is a plain string suffix test: the rule `example.com` matches
/// `vpn.example.com` and also `notexample.com`. No case folding and no
/// trailing-dot handling is applied; callers normalise names beforehand
/// if they need to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub suffix: Arc<str>,
}

impl Rule {
    pub fn new(suffix: impl Into<Arc<str>>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    #[inline]
    pub fn matches(&self, domain: &str) -> bool {
        domain.ends_with(&*self.suffix)
    }

    /// Parse one line of a rule file.
    ///
    /// The line is trimmed first. Blank lines, `#` comments and anything not
    /// starting with `DOMAIN-SUFFIX,` yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        line.strip_prefix(DOMAIN_SUFFIX_PREFIX).map(Rule::new)
    }
}

/// Returns true if `domain` ends with the suffix of at least one rule.
pub fn matches_rules(domain: &str, rules: &[Rule]) -> bool {
    rules.iter().any(|rule| rule.matches(domain))
}

/// Ordered collection of domain-suffix rules, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build a rule set from in-memory rule file text.
    pub fn parse(text: &str) -> Self {
        Self {
            rules: text.lines().filter_map(Rule::parse_line).collect(),
        }
    }

    /// Build a rule set from a line-oriented reader.
    ///
    /// Unrecognised lines are dropped. Only a failing read is an error;
    /// invalid UTF-8 is decoded lossily so it can never reject a file.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DomainError> {
        let mut rules = Vec::new();
        for line in reader.split(b'\n') {
            let line = line?;
            if let Some(rule) = Rule::parse_line(&String::from_utf8_lossy(&line)) {
                rules.push(rule);
            }
        }
        Ok(Self { rules })
    }

    #[inline]
    pub fn matches(&self, domain: &str) -> bool {
        matches_rules(domain, &self.rules)
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
