use std::fmt;
use std::str::FromStr;

/// Record types the resolver asks its backend for.
///
/// The chain-following loop only ever issues three kinds of question:
/// an address-or-alias lookup (A), the IPv6 fallback (AAAA) and the
/// last-resort broad query (ANY). CNAME is kept so parsed answers can be
/// labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    ANY,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::ANY => "ANY",
        }
    }

    /// Convert from wire format number (RFC 1035)
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(RecordType::A),
            5 => Some(RecordType::CNAME),
            28 => Some(RecordType::AAAA),
            255 => Some(RecordType::ANY),
            _ => None,
        }
    }

    /// Convert to wire format number
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::CNAME => 5,
            RecordType::AAAA => 28,
            RecordType::ANY => 255,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "CNAME" => Ok(RecordType::CNAME),
            "ANY" => Ok(RecordType::ANY),
            _ => Err(format!("Unsupported record type: {}", s)),
        }
    }
}
