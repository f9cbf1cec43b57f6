use loop_trace::acquire::{AcquisitionConfig, SourceMode};
use loop_trace::commands::{execute_detect, validate_args, DetectArgs};
use loop_trace::detector::{Detection, ThresholdConfig};
use loop_trace::parser::LinePolicy;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const LOOP_TRACE: &str = "\
RX port=1/1 src=aa:bb:cc:dd:ee:01 dst=ff-ff-ff-ff-ff-ff vid=0x0a
RX port=1/2 src=aa:bb:cc:dd:ee:01 dst=ff-ff-ff-ff-ff-ff vid=0x0a
RX port=1/3 src=aa:bb:cc:dd:ee:02 dst=ff-ff-ff-ff-ff-ff vid=(0x14)
";

fn live_args() -> DetectArgs {
    DetectArgs {
        acquisition: AcquisitionConfig::live("10.0.0.1", "admin", "secret"),
        ..Default::default()
    }
}

fn trace_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_validate_args_file_default() {
    let args = DetectArgs::default();
    assert_eq!(args.acquisition.mode, SourceMode::File);
    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_file_path() {
    let args = DetectArgs {
        acquisition: AcquisitionConfig::file(""),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_live_valid() {
    assert!(validate_args(&live_args()).is_ok());
}

#[test]
fn test_validate_args_live_empty_host() {
    let args = DetectArgs {
        acquisition: AcquisitionConfig::live("  ", "admin", "secret"),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_live_empty_username() {
    let args = DetectArgs {
        acquisition: AcquisitionConfig::live("10.0.0.1", "", "secret"),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_live_missing_password() {
    let mut args = live_args();
    args.acquisition.password = None;
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_capture_window_bounds() {
    let mut args = live_args();
    args.acquisition.capture_window = Duration::ZERO;
    assert!(validate_args(&args).is_err());

    args.acquisition.capture_window = Duration::from_secs(3600);
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_bad_thresholds() {
    let args = DetectArgs {
        thresholds: ThresholdConfig {
            multiplier: -1.0,
            floor: 10.0,
        },
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_execute_detect_from_file() {
    let file = trace_file(LOOP_TRACE);
    let args = DetectArgs {
        acquisition: AcquisitionConfig::file(file.path()),
        ..Default::default()
    };

    let detection = execute_detect(args).unwrap();
    let Detection::Analyzed(report) = detection else {
        panic!("expected analyzed report");
    };
    assert_eq!(report.flood_findings().count(), 0);
    assert_eq!(report.multi_port_findings().count(), 1);
}

#[test]
fn test_execute_detect_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = DetectArgs {
        acquisition: AcquisitionConfig::file(dir.path().join("loop.txt")),
        ..Default::default()
    };

    let err = execute_detect(args).unwrap_err();
    assert!(format!("{:#}", err).contains("Trace file not found"));
}

#[test]
fn test_execute_detect_saves_trace() {
    let file = trace_file(LOOP_TRACE);
    let dir = tempfile::tempdir().unwrap();
    let saved = dir.path().join("captures/loop.txt");

    let args = DetectArgs {
        acquisition: AcquisitionConfig::file(file.path()),
        save_trace: Some(saved.clone()),
        ..Default::default()
    };
    execute_detect(args).unwrap();

    assert_eq!(std::fs::read_to_string(&saved).unwrap(), LOOP_TRACE);
}

#[test]
fn test_execute_detect_threshold_file() {
    let file = trace_file(LOOP_TRACE);
    let thresholds = trace_file("multiplier = 1.0\nfloor = 0\n");

    let args = DetectArgs {
        acquisition: AcquisitionConfig::file(file.path()),
        threshold_file: Some(thresholds.path().to_path_buf()),
        ..Default::default()
    };

    // Keys: (1/1,10), (1/2,10), (1/3,20) with one MAC each; 1 > 1 is false
    let detection = execute_detect(args).unwrap();
    assert!(detection.findings().iter().all(|f| !f.is_flood()));
}

#[test]
fn test_execute_detect_strict_malformed() {
    let file = trace_file("port=1/1 src=aa dst=ff-ff-ff-ff-ff-ff vid=0xZZ\n");
    let args = DetectArgs {
        acquisition: AcquisitionConfig::file(file.path()),
        ..Default::default()
    };
    assert!(execute_detect(args).is_err());

    let args = DetectArgs {
        acquisition: AcquisitionConfig::file(file.path()),
        line_policy: LinePolicy::SkipAndWarn,
        ..Default::default()
    };
    assert_eq!(execute_detect(args).unwrap(), Detection::NoBroadcastTraffic);
}
