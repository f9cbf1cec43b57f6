use loop_trace::detector::{Detection, Finding, LoopReport};
use loop_trace::aggregator::MacDistribution;
use loop_trace::output::{render_detection, validate_path, write_text, NO_LOOPS_MESSAGE};
use loop_trace::output::terminal::render_finding;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::NamedTempFile;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn report(findings: Vec<Finding>) -> Detection {
    Detection::Analyzed(LoopReport {
        distribution: MacDistribution {
            key_count: 6,
            total_macs: 17,
            average_macs_per_key: 17.0 / 6.0,
            busiest: None,
            multi_port_macs: 0,
        },
        dynamic_threshold: 34.0 / 6.0,
        effective_threshold: 10.0,
        findings,
    })
}

#[test]
fn test_render_no_traffic() {
    let text = render_detection(&Detection::NoBroadcastTraffic);
    assert!(text.contains(NO_LOOPS_MESSAGE));
}

#[test]
fn test_render_flood_finding() {
    let text = render_finding(&Finding::PortVlanFlood {
        port: "1/1".to_string(),
        vlan_id: 10,
        macs: set(&["aa:01", "aa:02"]),
    });

    assert!(text.contains("Possible loop detected on Port: 1/1, VLAN ID: 10"));
    assert!(text.contains("MACs associated with the loop: aa:01, aa:02"));
}

#[test]
fn test_render_multi_port_finding() {
    let text = render_finding(&Finding::MacOnMultiplePorts {
        mac: "aa:bb:cc:dd:ee:ff".to_string(),
        ports: set(&["1/1", "1/2"]),
    });

    assert!(text.contains(
        "MAC address aa:bb:cc:dd:ee:ff detected on multiple ports: 1/1, 1/2. Possible loop."
    ));
}

#[test]
fn test_render_report_without_findings() {
    let text = render_detection(&report(Vec::new()));
    assert!(text.contains("flood threshold 10.00"));
    assert!(text.contains("No loop indicators exceeded the thresholds."));
    assert!(!text.contains("Possible loop"));
}

#[test]
fn test_render_report_lists_every_finding() {
    let text = render_detection(&report(vec![
        Finding::PortVlanFlood {
            port: "P1".to_string(),
            vlan_id: 10,
            macs: set(&["aa:01"]),
        },
        Finding::MacOnMultiplePorts {
            mac: "aa:01".to_string(),
            ports: set(&["P1", "P2"]),
        },
    ]));

    assert_eq!(text.matches("Possible loop").count(), 2);
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(validate_path(temp_dir.path()).is_err());
}

#[test]
fn test_write_text() {
    let temp_file = NamedTempFile::new().unwrap();
    write_text("> show trace file\n", temp_file.path()).unwrap();

    assert_eq!(
        std::fs::read_to_string(temp_file.path()).unwrap(),
        "> show trace file\n"
    );
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/session.log");

    write_text("log", &nested_path).unwrap();

    assert!(nested_path.exists());
}
