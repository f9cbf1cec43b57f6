//! Trace parsing.
//!
//! This module handles:
//! - Recognizing broadcast lines in a raw trace dump
//! - Extracting source MAC, port and VLAN tokens
//! - Decoding the hexadecimal VLAN field
//! - Applying the malformed-line policy

pub mod record;
pub mod trace_line;

// Re-export main types
pub use record::{LinePolicy, ParsedTrace, TraceRecord};
pub use trace_line::{decode_vlan_token, is_broadcast_candidate, parse_line, parse_trace};
