//! Loop Trace library
//!
//! Detects switching loops from broadcast trace dumps of network switches.
//! The `loop-trace` binary is a thin CLI over these modules.

pub mod acquire;
pub mod aggregator;
pub mod commands;
pub mod detector;
pub mod output;
pub mod parser;
pub mod utils;
