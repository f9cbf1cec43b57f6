use loop_trace::aggregator::build_aggregates;
use loop_trace::commands::analyze_trace;
use loop_trace::detector::{detect_loops, Detection, Finding, ThresholdConfig};
use loop_trace::parser::{LinePolicy, TraceRecord};
use loop_trace::utils::error::ParseError;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn broadcast(port: &str, mac: &str, vid: &str) -> String {
    format!(
        "RX port={} src={} dst=ff-ff-ff-ff-ff-ff vid={} etype=0x0806",
        port, mac, vid
    )
}

/// 12 MACs on P1/VLAN 0x0a and five single-MAC pairs
fn flooded_trace() -> String {
    let mut lines: Vec<String> = (0..12)
        .map(|i| broadcast("P1", &format!("00:00:00:00:00:{:02x}", i), "0x0a"))
        .collect();
    for i in 0..5 {
        lines.push(broadcast(
            &format!("P{}", i + 2),
            &format!("00:00:00:00:01:{:02x}", i),
            "0x0a",
        ));
    }
    lines.join("\n")
}

fn analyze(trace: &str) -> Detection {
    analyze_trace(trace, LinePolicy::Strict, &ThresholdConfig::default()).unwrap()
}

#[test]
fn test_no_qualifying_lines() {
    let trace = "trace level 9 3\nport=1/1 src=aa dst=00-11-22-33-44-55 vid=0x1\n";
    let detection = analyze(trace);

    assert_eq!(detection, Detection::NoBroadcastTraffic);
    assert!(detection.findings().is_empty());
}

#[test]
fn test_flood_example() {
    let Detection::Analyzed(report) = analyze(&flooded_trace()) else {
        panic!("expected analyzed report");
    };

    assert!((report.distribution.average_macs_per_key - 17.0 / 6.0).abs() < 1e-9);
    assert!((report.dynamic_threshold - 34.0 / 6.0).abs() < 1e-9);
    assert_eq!(report.effective_threshold, 10.0);

    let floods: Vec<&Finding> = report.flood_findings().collect();
    assert_eq!(floods.len(), 1);
    match floods[0] {
        Finding::PortVlanFlood {
            port,
            vlan_id,
            macs,
        } => {
            assert_eq!(port, "P1");
            assert_eq!(*vlan_id, 10);
            assert_eq!(macs.len(), 12);
        }
        other => panic!("unexpected finding {:?}", other),
    }
    assert_eq!(report.multi_port_findings().count(), 0);
}

#[test]
fn test_multi_port_example() {
    let trace = [
        broadcast("1/1", "aa:bb:cc:dd:ee:ff", "0x1"),
        broadcast("1/2", "aa:bb:cc:dd:ee:ff", "0x1"),
    ]
    .join("\n");

    let detection = analyze(&trace);
    let expected_ports: BTreeSet<String> = ["1/1", "1/2"].iter().map(|p| p.to_string()).collect();

    assert_eq!(
        detection.findings(),
        &[Finding::MacOnMultiplePorts {
            mac: "aa:bb:cc:dd:ee:ff".to_string(),
            ports: expected_ports,
        }]
    );
}

#[test]
fn test_both_signals_are_independent() {
    // The flooded MAC 00:..:00 also appears on a second port
    let mut trace = flooded_trace();
    trace.push('\n');
    trace.push_str(&broadcast("P9", "00:00:00:00:00:00", "0x0a"));

    let Detection::Analyzed(report) = analyze(&trace) else {
        panic!("expected analyzed report");
    };

    assert_eq!(report.flood_findings().count(), 1);
    assert_eq!(report.multi_port_findings().count(), 1);
    // Flood findings are listed before multi-port findings
    assert!(report.findings[0].is_flood());
}

#[test]
fn test_malformed_vlan_produces_no_findings() {
    let trace = format!(
        "{}\n{}",
        flooded_trace(),
        broadcast("1/1", "aa:bb:cc:dd:ee:ff", "0xZZ")
    );

    let result = analyze_trace(&trace, LinePolicy::Strict, &ThresholdConfig::default());
    assert!(matches!(
        result,
        Err(ParseError::MalformedVlanToken { line_number: 18, .. })
    ));
}

#[test]
fn test_malformed_vlan_skipped_when_lenient() {
    let trace = format!(
        "{}\n{}",
        flooded_trace(),
        broadcast("1/1", "aa:bb:cc:dd:ee:ff", "0xZZ")
    );

    let detection =
        analyze_trace(&trace, LinePolicy::SkipAndWarn, &ThresholdConfig::default()).unwrap();
    assert_eq!(detection.findings().len(), 1);
}

#[test]
fn test_threshold_rule() {
    // Keys with sizes 1..=15: average 8, effective max(16, 10) = 16
    let mut records = Vec::new();
    for size in 1..=15u32 {
        for i in 0..size {
            records.push(TraceRecord::new(
                format!("{:02x}:{:02x}", size, i),
                format!("1/{}", size),
                1,
            ));
        }
    }
    let aggregates = build_aggregates(&records);

    let Detection::Analyzed(report) = detect_loops(&aggregates, &ThresholdConfig::default())
    else {
        panic!("expected analyzed report");
    };
    assert_eq!(report.effective_threshold, 16.0);
    assert_eq!(report.flood_findings().count(), 0);

    // Growing one key past the threshold flags exactly that key
    let mut records = records;
    for i in 15..40u32 {
        records.push(TraceRecord::new(format!("0f:{:02x}", i), "1/15", 1));
    }
    let aggregates = build_aggregates(&records);
    let detection = detect_loops(&aggregates, &ThresholdConfig::default());

    let flooded: Vec<&str> = detection
        .findings()
        .iter()
        .filter_map(|f| match f {
            Finding::PortVlanFlood { port, .. } => Some(port.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(flooded, vec!["1/15"]);
}

#[test]
fn test_detection_is_idempotent() {
    let trace = flooded_trace();
    assert_eq!(analyze(&trace), analyze(&trace));
}
