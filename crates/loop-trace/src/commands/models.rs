use crate::acquire::AcquisitionConfig;
use crate::detector::ThresholdConfig;
use crate::parser::LinePolicy;
use std::path::PathBuf;

/// Arguments for a detection run
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct DetectArgs {
    /// Where the trace comes from
    pub acquisition: AcquisitionConfig,

    /// Strict or skip-and-warn for malformed broadcast lines
    pub line_policy: LinePolicy,

    /// Threshold file (TOML); overrides `thresholds` when set
    pub threshold_file: Option<PathBuf>,

    /// Thresholds used when no file is given
    pub thresholds: ThresholdConfig,

    /// Write the raw trace text here
    pub save_trace: Option<PathBuf>,

    /// Write the live session transcript here
    pub session_log: Option<PathBuf>,
}
