//! Line-level parser for switch trace dumps.
//!
//! A broadcast line looks like:
//!
//! ```text
//! [10/16/26 10:15:02.114] RX port=1/12 src=00-1b-4f-aa-10-02 dst=ff-ff-ff-ff-ff-ff vid=0x00a etype=0x0806
//! ```
//!
//! Only lines carrying both the broadcast destination and a `vid=` field are
//! records; everything else in the dump is skipped without complaint.

use super::record::{LinePolicy, ParsedTrace, TraceRecord};
use crate::utils::config::{BROADCAST_MARKER, VLAN_MARKER};
use crate::utils::error::ParseError;
use lazy_regex::{lazy_regex, Lazy};
use log::{debug, warn};
use regex::Regex;

static RE_SOURCE: Lazy<Regex> = lazy_regex!(r"src=\s*(\S+)");
static RE_PORT: Lazy<Regex> = lazy_regex!(r"port=\s*(\S+)");
static RE_VLAN: Lazy<Regex> = lazy_regex!(r"vid=\s*(\S+)");

/// Parse a raw trace dump into broadcast records
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw_trace` - Trace text as captured from the device or read from disk
/// * `policy` - Whether a malformed broadcast line aborts or is skipped
///
/// # Errors
/// * `ParseError::MalformedVlanToken` - VLAN field is not hexadecimal (strict only)
/// * `ParseError::MissingField` - broadcast line without `src=` or `port=` (strict only)
pub fn parse_trace(raw_trace: &str, policy: LinePolicy) -> Result<ParsedTrace, ParseError> {
    let mut parsed = ParsedTrace::default();

    for (index, line) in raw_trace.lines().enumerate() {
        parsed.total_lines += 1;

        if !is_broadcast_candidate(line) {
            continue;
        }
        parsed.candidate_lines += 1;

        match parse_line(index + 1, line) {
            Ok(Some(record)) => parsed.records.push(record),
            Ok(None) => {}
            Err(e) => match policy {
                LinePolicy::Strict => return Err(e),
                LinePolicy::SkipAndWarn => {
                    warn!("Skipping line {}: {}", e.line_number(), e);
                    parsed.skipped_lines += 1;
                }
            },
        }
    }

    debug!(
        "Parsed {} records from {} lines ({} broadcast candidates, {} skipped)",
        parsed.records.len(),
        parsed.total_lines,
        parsed.candidate_lines,
        parsed.skipped_lines
    );

    Ok(parsed)
}

/// Check whether a line carries both the broadcast and the VLAN marker
pub fn is_broadcast_candidate(line: &str) -> bool {
    line.contains(VLAN_MARKER) && contains_ignore_ascii_case(line, BROADCAST_MARKER)
}

/// Parse a single trace line
///
/// # Arguments
/// * `line_number` - 1-based position, used in error reports
/// * `line` - Raw line text
///
/// # Returns
/// `Ok(None)` for lines that are not broadcast records
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<TraceRecord>, ParseError> {
    if !is_broadcast_candidate(line) {
        return Ok(None);
    }

    let source_mac = field_token(&RE_SOURCE, line).ok_or(ParseError::MissingField {
        line_number,
        field: "src",
    })?;

    let port = field_token(&RE_PORT, line).ok_or(ParseError::MissingField {
        line_number,
        field: "port",
    })?;

    let vlan_token = field_token(&RE_VLAN, line).ok_or(ParseError::MissingField {
        line_number,
        field: "vid",
    })?;

    let vlan_id = decode_vlan_token(&vlan_token).ok_or(ParseError::MalformedVlanToken {
        line_number,
        token: vlan_token,
    })?;

    Ok(Some(TraceRecord::new(source_mac, port, vlan_id)))
}

/// First whitespace-delimited token after a `name=` marker
fn field_token(pattern: &Regex, line: &str) -> Option<String> {
    pattern.captures(line).map(|c| c[1].to_string())
}

/// Decode a `vid=` token into a VLAN id
///
/// Everything except hex digits and `x` is stripped first, so tokens such as
/// `0x00a,` or `(0x14)` decode cleanly. A single leading `0x` is accepted.
///
/// # Returns
/// `None` if nothing hexadecimal is left or the value overflows `u32`
pub fn decode_vlan_token(token: &str) -> Option<u32> {
    let sanitized: String = token
        .chars()
        .filter(|c| c.is_ascii_hexdigit() || *c == 'x')
        .collect();

    let digits = sanitized.strip_prefix("0x").unwrap_or(&sanitized);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(digits, 16).ok()
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
