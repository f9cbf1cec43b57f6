//! Detect command implementation.
//!
//! The detect command:
//! 1. Acquires the raw trace (file or live device)
//! 2. Prints a live dump, optionally saves the trace and session transcript
//! 3. Parses broadcast records
//! 4. Builds the port/VLAN and MAC tables
//! 5. Evaluates loop indicators
//! 6. Prints findings

use crate::acquire::{acquire_trace, SourceMode};
use crate::aggregator::build_aggregates;
use crate::commands::models::DetectArgs;
use crate::detector::{detect_loops, load_thresholds, Detection, ThresholdConfig};
use crate::output::{render_detection, write_text};
use crate::parser::{parse_trace, LinePolicy};
use crate::utils::config::MAX_CAPTURE_WINDOW;
use crate::utils::error::ParseError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute a detection run
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The detection outcome, after it has been printed
///
/// # Errors
/// * Trace source unavailable (missing file, connection or login failure)
/// * Malformed broadcast line under the strict policy
/// * Threshold file or output file errors
pub fn execute_detect(args: DetectArgs) -> Result<Detection> {
    let start_time = Instant::now();

    let thresholds = match &args.threshold_file {
        Some(path) => load_thresholds(path)
            .with_context(|| format!("Failed to load thresholds from {}", path.display()))?,
        None => args.thresholds,
    };
    debug!(
        "Thresholds: multiplier {}, floor {}",
        thresholds.multiplier, thresholds.floor
    );

    let acquired = acquire_trace(&args.acquisition).context("Failed to acquire trace")?;

    if let Some(dump) = acquired.live_dump() {
        println!("{}", dump);
    }

    if let Some(path) = &args.save_trace {
        write_text(&acquired.text, path).context("Failed to save raw trace")?;
        info!("✓ Trace written to: {}", path.display());
    }

    if let (Some(path), Some(transcript)) = (&args.session_log, &acquired.transcript) {
        write_text(transcript, path).context("Failed to write session log")?;
        info!("✓ Session log written to: {}", path.display());
    }

    info!("Analyzing trace ({} policy)...", args.line_policy);
    let detection = analyze_trace(&acquired.text, args.line_policy, &thresholds)
        .context("Failed to parse trace data")?;

    print!("{}", render_detection(&detection));

    info!(
        "Detection completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(detection)
}

/// Run parser, aggregator and detector over raw trace text
///
/// **Public** - the whole heuristic, no I/O
pub fn analyze_trace(
    raw_trace: &str,
    policy: LinePolicy,
    thresholds: &ThresholdConfig,
) -> Result<Detection, ParseError> {
    let parsed = parse_trace(raw_trace, policy)?;
    let aggregates = build_aggregates(&parsed.records);
    Ok(detect_loops(&aggregates, thresholds))
}

/// Validate detect arguments
///
/// **Public** - can be called before execute_detect for early validation
pub fn validate_args(args: &DetectArgs) -> Result<()> {
    let acquisition = &args.acquisition;

    match acquisition.mode {
        SourceMode::File => {
            if acquisition.file_path.as_os_str().is_empty() {
                anyhow::bail!("Trace file path cannot be empty");
            }
        }
        SourceMode::Live => {
            let host = acquisition.host.as_deref().unwrap_or_default().trim();
            if host.is_empty() {
                anyhow::bail!("Device address cannot be empty");
            }

            if host.chars().any(char::is_whitespace) {
                anyhow::bail!("Device address contains whitespace");
            }

            if acquisition
                .username
                .as_deref()
                .unwrap_or_default()
                .trim()
                .is_empty()
            {
                anyhow::bail!("Username cannot be empty");
            }

            if acquisition.password.is_none() {
                anyhow::bail!("Password is required for live capture");
            }

            if acquisition.port == 0 {
                anyhow::bail!("SSH port must be greater than 0");
            }

            if acquisition.capture_window.is_zero() {
                anyhow::bail!("Capture window must be greater than 0");
            }

            if acquisition.capture_window > MAX_CAPTURE_WINDOW {
                anyhow::bail!(
                    "Capture window is too large (max {}s)",
                    MAX_CAPTURE_WINDOW.as_secs()
                );
            }

            if acquisition.command_timeout.is_zero() {
                anyhow::bail!("Command timeout must be greater than 0");
            }
        }
    }

    if args.threshold_file.is_none() {
        args.thresholds.validate()?;
    }

    Ok(())
}
