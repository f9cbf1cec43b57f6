//! Structured records extracted from a trace dump.

use std::fmt;
use std::str::FromStr;

/// One broadcast frame observation from the trace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceRecord {
    /// Source MAC, lowercased
    pub source_mac: String,

    /// Ingress port exactly as the device printed it (e.g. "1/12")
    pub port: String,

    /// VLAN id decoded from the hex `vid=` token
    pub vlan_id: u32,
}

impl TraceRecord {
    pub fn new(source_mac: impl AsRef<str>, port: impl Into<String>, vlan_id: u32) -> Self {
        Self {
            source_mac: source_mac.as_ref().to_ascii_lowercase(),
            port: port.into(),
            vlan_id,
        }
    }
}

/// What to do with a broadcast line whose fields cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePolicy {
    /// The first malformed line aborts the whole run
    #[default]
    Strict,

    /// Malformed lines are logged and left out of the analysis
    SkipAndWarn,
}

impl FromStr for LinePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "skip" | "skip-and-warn" | "lenient" => Ok(Self::SkipAndWarn),
            other => Err(format!("Unknown line policy: {}", other)),
        }
    }
}

impl fmt::Display for LinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::SkipAndWarn => write!(f, "skip-and-warn"),
        }
    }
}

/// Parsed trace data (internal representation)
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    pub records: Vec<TraceRecord>,

    /// Lines seen in the raw text
    pub total_lines: usize,

    /// Lines carrying both the broadcast and VLAN markers
    pub candidate_lines: usize,

    /// Candidate lines dropped under `LinePolicy::SkipAndWarn`
    pub skipped_lines: usize,
}

impl ParsedTrace {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
