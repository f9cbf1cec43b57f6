//! Summary statistics over the port/VLAN table.
//!
//! The average MAC count per key is the base of the dynamic flood threshold.

use super::tables::{PortVlanKey, TraceAggregates};
use log::debug;

/// MAC distribution statistics
///
/// **Public** - returned from calculate_mac_distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacDistribution {
    /// Number of (port, VLAN) keys
    pub key_count: usize,

    /// Sum of unique MACs over all keys
    pub total_macs: usize,

    /// Mean unique MACs per key
    pub average_macs_per_key: f64,

    /// Key with the most unique MACs, and that count
    pub busiest: Option<(PortVlanKey, usize)>,

    /// MACs seen on more than one port
    pub multi_port_macs: usize,
}

/// Calculate MAC distribution statistics
///
/// **Public** - feeds the threshold evaluation and the summary log line
pub fn calculate_mac_distribution(aggregates: &TraceAggregates) -> MacDistribution {
    if aggregates.is_empty() {
        return MacDistribution::default();
    }

    let key_count = aggregates.per_port_vlan.len();
    let total_macs: usize = aggregates.per_port_vlan.values().map(|m| m.len()).sum();

    // First key wins on ties, keys are ordered
    let busiest = aggregates
        .per_port_vlan
        .iter()
        .fold(None::<(&PortVlanKey, usize)>, |best, (key, macs)| match best {
            Some((_, count)) if count >= macs.len() => best,
            _ => Some((key, macs.len())),
        })
        .map(|(key, count)| (key.clone(), count));

    let multi_port_macs = aggregates
        .ports_per_mac
        .values()
        .filter(|ports| ports.len() > 1)
        .count();

    let distribution = MacDistribution {
        key_count,
        total_macs,
        average_macs_per_key: total_macs as f64 / key_count as f64,
        busiest,
        multi_port_macs,
    };

    debug!("MAC distribution: {}", distribution.summary());
    distribution
}

impl MacDistribution {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let busiest = match &self.busiest {
            Some((key, count)) => format!("{} with {}", key, count),
            None => "none".to_string(),
        };
        format!(
            "Keys: {} | MACs: {} | Mean: {:.2} | Busiest: {} | Multi-port MACs: {}",
            self.key_count, self.total_macs, self.average_macs_per_key, busiest, self.multi_port_macs
        )
    }
}
