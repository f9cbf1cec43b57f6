//! Plain text writer for raw traces and session logs.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write text content to a file
///
/// **Public** - used for `--save-trace` and `--session-log`
///
/// # Arguments
/// * `content` - Text to write, unchanged
/// * `output_path` - Destination file; parent directories are created
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_text(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing to: {}", output_path.display());

    super::validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Written successfully ({} bytes)", content.len());

    Ok(())
}
