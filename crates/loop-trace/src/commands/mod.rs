//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod detect;
pub mod interactive;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use detect::{analyze_trace, execute_detect, validate_args};
pub use interactive::{prompt_acquisition, INVALID_CHOICE_MESSAGE};
pub use models::DetectArgs;
pub use utils::display_version;
