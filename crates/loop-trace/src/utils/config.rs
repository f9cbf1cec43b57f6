//! Configuration and constants for the CLI.

use std::time::Duration;

/// Destination marker of an all-ones broadcast frame in a trace line
pub const BROADCAST_MARKER: &str = "dst=ff-ff-ff-ff-ff-ff";

/// VLAN marker; a line must carry it to be a trace record candidate
pub const VLAN_MARKER: &str = "vid=";

/// Dynamic threshold = average MACs per (port, VLAN) key times this
pub const DEFAULT_THRESHOLD_MULTIPLIER: f64 = 2.0;

/// Lower bound of the effective flood threshold
pub const DEFAULT_THRESHOLD_FLOOR: f64 = 10.0;

/// Trace snapshot read by the interactive "file" choice
pub const DEFAULT_TRACE_FILE: &str = "loop.txt";

pub const DEFAULT_SSH_PORT: u16 = 22;

/// How long the device collects trace data before it is shut off
pub const DEFAULT_CAPTURE_WINDOW: Duration = Duration::from_secs(15);

/// Upper bound for a single command to return to the prompt
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Output is considered complete once the channel has been silent this long
pub const TIMING_QUIET_PERIOD: Duration = Duration::from_secs(2);

pub const MAX_CAPTURE_WINDOW: Duration = Duration::from_secs(600);

/// SSH keepalive sent while the session is idle
pub const SSH_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(10);

pub const PTY_TERMINAL: &str = "vt100";
pub const PTY_COLUMNS: u32 = 511;
pub const PTY_ROWS: u32 = 24;
