//! Result types of a detection run.

use crate::aggregator::MacDistribution;
use std::collections::BTreeSet;

/// A single loop indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Too many distinct source MACs broadcasting on one port/VLAN
    PortVlanFlood {
        port: String,
        vlan_id: u32,
        macs: BTreeSet<String>,
    },

    /// One source MAC arriving on several ports
    MacOnMultiplePorts {
        mac: String,
        ports: BTreeSet<String>,
    },
}

impl Finding {
    pub fn is_flood(&self) -> bool {
        matches!(self, Self::PortVlanFlood { .. })
    }
}

/// Findings plus the numbers they were derived from
#[derive(Debug, Clone, PartialEq)]
pub struct LoopReport {
    pub distribution: MacDistribution,

    /// Average MACs per key times the multiplier
    pub dynamic_threshold: f64,

    /// Dynamic threshold raised to the configured floor
    pub effective_threshold: f64,

    /// Flood findings first, then multi-port findings
    pub findings: Vec<Finding>,
}

impl LoopReport {
    pub fn flood_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_flood())
    }

    pub fn multi_port_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_flood())
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Outcome of a detection run
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// The trace held no broadcast records; nothing to evaluate
    NoBroadcastTraffic,

    Analyzed(LoopReport),
}

impl Detection {
    /// Findings of the run, empty when there was no broadcast traffic
    pub fn findings(&self) -> &[Finding] {
        match self {
            Self::NoBroadcastTraffic => &[],
            Self::Analyzed(report) => &report.findings,
        }
    }
}
