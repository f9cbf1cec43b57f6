//! Aggregation of trace records into the two loop-detection views.
//!
//! This module transforms parsed broadcast records into:
//! - Port/VLAN table (unique source MACs per ingress port and VLAN)
//! - MAC table (unique ingress ports per source MAC)
//! - MAC distribution statistics

pub mod metrics;
pub mod tables;

// Re-export main types and functions
pub use metrics::{calculate_mac_distribution, MacDistribution};
pub use tables::{build_aggregates, PortVlanKey, TraceAggregates};
