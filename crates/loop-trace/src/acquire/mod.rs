//! Trace acquisition.
//!
//! Produces the raw trace text consumed by the parser, either from a saved
//! snapshot file or from a live device over SSH.

pub mod file;
pub mod session;
pub mod ssh;

pub use file::read_trace_file;
pub use session::{capture_trace, CaptureOutput, DeviceProfile, DeviceSession, TranscriptEntry};
pub use ssh::{SshSession, SshTarget};

use crate::utils::config::{
    DEFAULT_CAPTURE_WINDOW, DEFAULT_COMMAND_TIMEOUT, DEFAULT_CONNECT_TIMEOUT, DEFAULT_SSH_PORT,
    DEFAULT_TRACE_FILE,
};
use crate::utils::error::AcquireError;
use std::path::PathBuf;
use std::time::Duration;

/// Where the trace comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    #[default]
    File,
    Live,
}

/// Everything acquisition needs, gathered up front
#[derive(Debug, Clone)]
pub struct AcquisitionConfig {
    pub mode: SourceMode,

    /// Snapshot to read in `SourceMode::File`
    pub file_path: PathBuf,

    /// Device address in `SourceMode::Live`
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub profile: DeviceProfile,

    /// How long the device traces before the dump is collected
    pub capture_window: Duration,
    pub command_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::File,
            file_path: PathBuf::from(DEFAULT_TRACE_FILE),
            host: None,
            port: DEFAULT_SSH_PORT,
            username: None,
            password: None,
            profile: DeviceProfile::default(),
            capture_window: DEFAULT_CAPTURE_WINDOW,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl AcquisitionConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            mode: SourceMode::File,
            file_path: path.into(),
            ..Default::default()
        }
    }

    pub fn live(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            mode: SourceMode::Live,
            host: Some(host.into()),
            username: Some(username.into()),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    /// SSH parameters for live mode
    ///
    /// # Errors
    /// `AcquireError::MissingParameter` if host, username or password is unset
    pub fn ssh_target(&self) -> Result<SshTarget, AcquireError> {
        Ok(SshTarget {
            host: self
                .host
                .clone()
                .ok_or(AcquireError::MissingParameter("host"))?,
            port: self.port,
            username: self
                .username
                .clone()
                .ok_or(AcquireError::MissingParameter("username"))?,
            password: self
                .password
                .clone()
                .ok_or(AcquireError::MissingParameter("password"))?,
            connect_timeout: self.connect_timeout,
            command_timeout: self.command_timeout,
            capture_window: self.capture_window,
        })
    }
}

/// Raw trace text plus the live session transcript, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquiredTrace {
    pub text: String,
    pub transcript: Option<String>,
}

impl AcquiredTrace {
    /// The dump as collected from a device; `None` for file input
    pub fn live_dump(&self) -> Option<&str> {
        self.transcript.as_ref().map(|_| self.text.as_str())
    }
}

/// Obtain the raw trace text for a run
///
/// **Public** - main entry point for acquisition
///
/// # Errors
/// Any `AcquireError`; the trace source is unavailable and the run ends
pub fn acquire_trace(config: &AcquisitionConfig) -> Result<AcquiredTrace, AcquireError> {
    match config.mode {
        SourceMode::File => Ok(AcquiredTrace {
            text: read_trace_file(&config.file_path)?,
            transcript: None,
        }),
        SourceMode::Live => {
            let target = config.ssh_target()?;
            let mut session = SshSession::connect(&target)?;
            let capture = capture_trace(&mut session, config.profile, config.capture_window)?;

            Ok(AcquiredTrace {
                transcript: Some(capture.transcript_text()),
                text: capture.trace,
            })
        }
    }
}
