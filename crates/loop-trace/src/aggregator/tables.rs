//! Build the port/VLAN and MAC tables from parsed trace records.
//!
//! Both tables use ordered maps and sets so that findings render in a
//! stable order for identical input.

use crate::parser::TraceRecord;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Key of the port/VLAN table
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortVlanKey {
    pub port: String,
    pub vlan_id: u32,
}

impl PortVlanKey {
    pub fn new(port: impl Into<String>, vlan_id: u32) -> Self {
        Self {
            port: port.into(),
            vlan_id,
        }
    }
}

impl fmt::Display for PortVlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (VLAN {})", self.port, self.vlan_id)
    }
}

/// The two aggregate views of one trace snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceAggregates {
    /// (port, VLAN) -> unique source MACs broadcasting there
    pub per_port_vlan: BTreeMap<PortVlanKey, BTreeSet<String>>,

    /// source MAC -> unique ports it was seen on
    pub ports_per_mac: BTreeMap<String, BTreeSet<String>>,
}

impl TraceAggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record to both tables
    pub fn add_record(&mut self, record: &TraceRecord) {
        self.per_port_vlan
            .entry(PortVlanKey::new(record.port.clone(), record.vlan_id))
            .or_default()
            .insert(record.source_mac.clone());

        self.ports_per_mac
            .entry(record.source_mac.clone())
            .or_default()
            .insert(record.port.clone());
    }

    /// True when the trace held no broadcast records at all
    pub fn is_empty(&self) -> bool {
        self.per_port_vlan.is_empty()
    }

    /// Unique MACs seen on a port/VLAN pair
    pub fn macs_for(&self, port: &str, vlan_id: u32) -> Option<&BTreeSet<String>> {
        self.per_port_vlan.get(&PortVlanKey::new(port, vlan_id))
    }

    /// Unique ports a MAC was seen on
    pub fn ports_for(&self, mac: &str) -> Option<&BTreeSet<String>> {
        self.ports_per_mac.get(&mac.to_ascii_lowercase())
    }
}

/// Build both aggregate tables from parsed records
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `records` - Broadcast records from the parser
///
/// # Returns
/// Freshly built tables; nothing is carried over between calls
pub fn build_aggregates(records: &[TraceRecord]) -> TraceAggregates {
    debug!("Aggregating {} broadcast records", records.len());

    let mut aggregates = TraceAggregates::new();
    for record in records {
        aggregates.add_record(record);
    }

    debug!(
        "Built {} port/VLAN keys and {} MAC entries",
        aggregates.per_port_vlan.len(),
        aggregates.ports_per_mac.len()
    );

    aggregates
}
