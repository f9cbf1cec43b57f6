//! Trace snapshot files.

use crate::utils::error::AcquireError;
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a previously saved trace dump
///
/// # Errors
/// * `AcquireError::FileNotFound` - no file at `path`
/// * `AcquireError::ReadFailed` - file exists but cannot be read
///
/// Bytes that are not valid UTF-8 are replaced, as on the live path.
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<String, AcquireError> {
    let path = path.as_ref();

    info!("Reading trace from: {}", path.display());

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AcquireError::FileNotFound(path.to_path_buf()),
        _ => AcquireError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("{} is not valid UTF-8, decoding lossily", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    debug!("Trace loaded: {} bytes", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_utf8_bytes_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.txt");
        fs::write(&path, b"Banner caf\xe9\nRX port=1/1 src=aa dst=ff-ff-ff-ff-ff-ff vid=0x0a\n").unwrap();

        let text = read_trace_file(&path).unwrap();
        assert!(text.starts_with("Banner caf\u{fffd}\n"));
        assert!(text.contains("vid=0x0a"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_trace_file(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, AcquireError::FileNotFound(_)));
    }
}
