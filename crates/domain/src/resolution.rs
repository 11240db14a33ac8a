use std::fmt;
use std::sync::Arc;

/// Hard bound on the number of chain positions visited by one resolution.
pub const MAX_CHAIN_HOPS: usize = 10;

/// Terminal state reached by one resolution call.
///
/// Only reported to the event sink. The returned [`Resolution`] is identical
/// for every negative state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    CacheHit,
    AnswerFound,
    NoAnswer,
    CycleDetected,
    DepthExceeded,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::CacheHit => "cache_hit",
            Termination::AnswerFound => "answer_found",
            Termination::NoAnswer => "no_answer",
            Termination::CycleDetected => "cycle_detected",
            Termination::DepthExceeded => "depth_exceeded",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Termination::CacheHit | Termination::AnswerFound)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one domain: whether it matched the rules, and the
/// answer string (an IPv4/IPv6 literal, or record data from the broad query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub matched: bool,
    pub answer: Option<Arc<str>>,
}

impl Resolution {
    pub fn new(matched: bool, answer: Arc<str>) -> Self {
        Self {
            matched,
            answer: Some(answer),
        }
    }

    /// The `(false, "")` result shared by every failure state.
    pub fn negative() -> Self {
        Self {
            matched: false,
            answer: None,
        }
    }

    /// Answer as a string, empty when nothing was resolved.
    pub fn answer_str(&self) -> &str {
        self.answer.as_deref().unwrap_or("")
    }
}

/// [`Resolution`] plus the CNAME carried by the terminal hop's primary answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedResolution {
    pub resolution: Resolution,
    pub last_cname: Option<Arc<str>>,
}

impl AliasedResolution {
    pub fn negative() -> Self {
        Self {
            resolution: Resolution::negative(),
            last_cname: None,
        }
    }

    pub fn last_cname_str(&self) -> &str {
        self.last_cname.as_deref().unwrap_or("")
    }
}
