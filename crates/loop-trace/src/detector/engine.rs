//! Core detection engine.
//!
//! Evaluates the flood signal against a dynamic threshold and the
//! multi-port signal, independently of each other.

use super::schema::{Detection, Finding, LoopReport};
use super::threshold::{effective_threshold, ThresholdConfig};
use crate::aggregator::{calculate_mac_distribution, TraceAggregates};
use log::{debug, info};

/// Evaluate loop indicators over the aggregate tables
///
/// **Public** - main entry point for detection
///
/// # Arguments
/// * `aggregates` - Port/VLAN and MAC tables of one trace
/// * `thresholds` - Multiplier and floor of the flood threshold
///
/// # Returns
/// `Detection::NoBroadcastTraffic` for an empty trace, otherwise a report
/// whose findings may still be empty
pub fn detect_loops(aggregates: &TraceAggregates, thresholds: &ThresholdConfig) -> Detection {
    if aggregates.is_empty() {
        info!("No broadcast records in trace, nothing to evaluate");
        return Detection::NoBroadcastTraffic;
    }

    let distribution = calculate_mac_distribution(aggregates);
    let (dynamic_threshold, effective) =
        effective_threshold(distribution.average_macs_per_key, thresholds);

    debug!(
        "Average {:.2} MACs per key, dynamic threshold {:.2}, effective {:.2}",
        distribution.average_macs_per_key, dynamic_threshold, effective
    );

    let mut findings: Vec<Finding> = aggregates
        .per_port_vlan
        .iter()
        .filter(|(_, macs)| macs.len() as f64 > effective)
        .map(|(key, macs)| Finding::PortVlanFlood {
            port: key.port.clone(),
            vlan_id: key.vlan_id,
            macs: macs.clone(),
        })
        .collect();

    // Evaluated regardless of the flood outcome: duplicate MACs southbound
    // (ingress VLAN mapping or VID mismatch) show up here even without a storm.
    findings.extend(
        aggregates
            .ports_per_mac
            .iter()
            .filter(|(_, ports)| ports.len() > 1)
            .map(|(mac, ports)| Finding::MacOnMultiplePorts {
                mac: mac.clone(),
                ports: ports.clone(),
            }),
    );

    info!(
        "Evaluated {} port/VLAN keys: {} loop indicators",
        distribution.key_count,
        findings.len()
    );

    Detection::Analyzed(LoopReport {
        distribution,
        dynamic_threshold,
        effective_threshold: effective,
        findings,
    })
}
