//! Device command sequencing for live trace capture.
//!
//! The capture plan is expressed against the `DeviceSession` trait so the
//! sequence can run over SSH in production and over a scripted session in
//! tests.

use crate::utils::error::AcquireError;
use lazy_regex::regex;
use log::{debug, info, warn};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// An interactive CLI session on a network device
pub trait DeviceSession {
    /// Send a command and return its output once the prompt comes back
    fn send_command(&mut self, command: &str) -> Result<String, AcquireError>;

    /// Send a command and return whatever arrives until the session goes quiet.
    ///
    /// Used for commands whose completion cannot be recognized by the prompt.
    fn send_command_timing(&mut self, command: &str) -> Result<String, AcquireError>;

    /// Let the device collect trace data
    fn wait_for_capture(&mut self, window: Duration) {
        std::thread::sleep(window);
    }

    fn disconnect(&mut self) -> Result<(), AcquireError>;
}

/// Supported device CLI flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceProfile {
    /// Extreme Networks VOSS / VSP series
    #[default]
    ExtremeVsp,
}

impl FromStr for DeviceProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extreme_vsp" | "extreme-vsp" | "vsp" | "voss" => Ok(Self::ExtremeVsp),
            other => Err(format!("Unsupported device profile: {}", other)),
        }
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtremeVsp => write!(f, "extreme_vsp"),
        }
    }
}

/// One step of a capture plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStep {
    /// Command that returns to the prompt
    Command(&'static str),

    /// Command whose output is read until the session goes quiet
    TimedCommand(&'static str),

    /// Let the trace run for the configured window
    CaptureWindow,

    /// Command whose output is the trace dump
    CollectTrace(&'static str),
}

impl DeviceProfile {
    /// Ordered steps that produce a broadcast trace dump
    pub fn capture_plan(&self) -> &'static [CaptureStep] {
        match self {
            Self::ExtremeVsp => &[
                CaptureStep::Command("enable"),
                CaptureStep::Command("clear trace"),
                CaptureStep::Command("trace level 9 3"),
                CaptureStep::Command("terminal more disable"),
                CaptureStep::CaptureWindow,
                CaptureStep::TimedCommand("trace shutdown"),
                CaptureStep::CollectTrace("show trace file"),
            ],
        }
    }
}

/// A command sent during capture and what the device answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub command: String,
    pub output: String,
}

/// Result of running a capture plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureOutput {
    /// Output of the trace collection command
    pub trace: String,

    /// Every command in order, including the collection command
    pub transcript: Vec<TranscriptEntry>,
}

impl CaptureOutput {
    /// Render the transcript as a session log
    pub fn transcript_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.transcript {
            out.push_str(&format!("> {}\n", entry.command));
            out.push_str(&entry.output);
            if !entry.output.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }

    fn record(&mut self, command: &str, output: String) {
        self.transcript.push(TranscriptEntry {
            command: command.to_string(),
            output,
        });
    }
}

/// Run a device profile's capture plan over a session
///
/// **Public** - main entry point for live capture
///
/// The session is disconnected once the plan finishes, also when a step fails.
///
/// # Errors
/// The first `AcquireError` raised by the session
pub fn capture_trace<S: DeviceSession + ?Sized>(
    session: &mut S,
    profile: DeviceProfile,
    window: Duration,
) -> Result<CaptureOutput, AcquireError> {
    let result = run_plan(session, profile, window);

    if let Err(e) = session.disconnect() {
        warn!("Failed to close device session cleanly: {}", e);
    }

    result
}

fn run_plan<S: DeviceSession + ?Sized>(
    session: &mut S,
    profile: DeviceProfile,
    window: Duration,
) -> Result<CaptureOutput, AcquireError> {
    let mut capture = CaptureOutput::default();

    for step in profile.capture_plan() {
        match *step {
            CaptureStep::Command(command) => {
                debug!("Sending: {}", command);
                let output = session.send_command(command)?;
                capture.record(command, output);
            }
            CaptureStep::TimedCommand(command) => {
                debug!("Sending (timing): {}", command);
                let output = session.send_command_timing(command)?;
                capture.record(command, output);
            }
            CaptureStep::CaptureWindow => {
                info!("Collecting trace for {}s...", window.as_secs());
                session.wait_for_capture(window);
            }
            CaptureStep::CollectTrace(command) => {
                info!("Retrieving trace: {}", command);
                let output = session.send_command(command)?;
                capture.trace = output.clone();
                capture.record(command, output);
            }
        }
    }

    Ok(capture)
}

/// Check whether the last line of device output is a CLI prompt
pub fn ends_with_prompt(output: &str) -> bool {
    let last_line = output.rsplit('\n').next().unwrap_or(output);
    regex!(r"^[\w.\-]+:\d+(\([\w\-/.]+\))?[>#]\s*$").is_match(last_line.trim_start_matches('\r'))
}

/// Strip the echoed command and the trailing prompt from raw shell output
pub fn clean_command_output(raw: &str, command: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "");
    let mut lines: Vec<&str> = normalized.lines().collect();

    if lines
        .first()
        .map(|first| first.trim_end().ends_with(command))
        .unwrap_or(false)
    {
        lines.remove(0);
    }

    if lines.last().map(|last| ends_with_prompt(last)).unwrap_or(false) {
        lines.pop();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_detection() {
        assert!(ends_with_prompt("output\nVSP-8284XSQ:1>"));
        assert!(ends_with_prompt("VSP-8284XSQ:1# "));
        assert!(ends_with_prompt("banner\r\nVSP-4900:1(config)#"));
        assert!(!ends_with_prompt("port=1/1 src=aa dst=ff-ff-ff-ff-ff-ff vid=0x1"));
        assert!(!ends_with_prompt("VSP-8284XSQ:1> show trace"));
    }

    #[test]
    fn test_clean_command_output() {
        let raw = "VSP:1#show trace file\r\nline one\r\nline two\r\nVSP:1#";
        assert_eq!(clean_command_output(raw, "show trace file"), "line one\nline two");
    }

    #[test]
    fn test_clean_output_without_echo() {
        let raw = "line one\nVSP:1>";
        assert_eq!(clean_command_output(raw, "enable"), "line one");
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("extreme_vsp".parse::<DeviceProfile>().unwrap(), DeviceProfile::ExtremeVsp);
        assert_eq!("VOSS".parse::<DeviceProfile>().unwrap(), DeviceProfile::ExtremeVsp);
        assert!("cisco_ios".parse::<DeviceProfile>().is_err());
    }

    #[test]
    fn test_transcript_text() {
        let mut capture = CaptureOutput::default();
        capture.record("enable", String::new());
        capture.record("show trace file", "a\nb".to_string());
        assert_eq!(capture.transcript_text(), "> enable\n\n> show trace file\na\nb\n");
    }
}
