//! Terminal output rendering for detection results.

use crate::detector::{Detection, Finding, LoopReport};
use colored::*;

pub const NO_LOOPS_MESSAGE: &str = "No loops detected from the trace output.";
pub const NO_INDICATORS_MESSAGE: &str = "No loop indicators exceeded the thresholds.";

/// Render a human-readable summary of a detection run for the terminal
pub fn render_detection(detection: &Detection) -> String {
    match detection {
        Detection::NoBroadcastTraffic => format!("{}\n", NO_LOOPS_MESSAGE.green()),
        Detection::Analyzed(report) => render_report(report),
    }
}

fn render_report(report: &LoopReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));

    if !report.has_findings() {
        out.push_str(&format!("{}\n", NO_INDICATORS_MESSAGE.green()));
        return out;
    }

    for finding in report.flood_findings() {
        out.push_str(&render_finding(finding));
    }
    for finding in report.multi_port_findings() {
        out.push_str(&render_finding(finding));
    }

    out
}

fn render_header(report: &LoopReport) -> String {
    let line = format!(
        "{} port/VLAN keys | {:.2} MACs per key | flood threshold {:.2}",
        report.distribution.key_count,
        report.distribution.average_macs_per_key,
        report.effective_threshold
    );
    format!("{}\n\n", line.dimmed())
}

/// Render one finding as one or two lines
pub fn render_finding(finding: &Finding) -> String {
    match finding {
        Finding::PortVlanFlood {
            port,
            vlan_id,
            macs,
        } => format!(
            "{}\nMACs associated with the loop: {}\n",
            format!("Possible loop detected on Port: {}, VLAN ID: {}", port, vlan_id)
                .red()
                .bold(),
            join(macs)
        ),
        Finding::MacOnMultiplePorts { mac, ports } => format!(
            "{}\n",
            format!(
                "MAC address {} detected on multiple ports: {}. Possible loop.",
                mac,
                join(ports)
            )
            .yellow()
        ),
    }
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
