//! Loop heuristic evaluation.
//!
//! Turns the aggregate tables into findings using two independent signals:
//! - a port/VLAN pair flooded by far more source MACs than its peers
//! - a source MAC arriving on more than one port
//!
//! # Example
//! ```ignore
//! use loop_trace::detector::{detect_loops, ThresholdConfig};
//!
//! let aggregates = build_aggregates(&parsed.records);
//! let detection = detect_loops(&aggregates, &ThresholdConfig::default());
//! ```

mod engine;
mod schema;
mod threshold;

// Public API exports
pub use engine::detect_loops;
pub use schema::{Detection, Finding, LoopReport};
pub use threshold::{effective_threshold, load_thresholds, ThresholdConfig};
