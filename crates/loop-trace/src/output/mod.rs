//! Output for detection results and captured text.
//!
//! This module handles:
//! - Terminal rendering of findings
//! - Writing raw traces and session transcripts to disk

pub mod terminal;
pub mod text;

// Re-export main functions
pub use terminal::{render_detection, NO_LOOPS_MESSAGE};
pub use text::write_text;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
