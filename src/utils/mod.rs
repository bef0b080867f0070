//! Utility functions module
//!
//! Process-level helpers shared by both run modes.

pub mod logging;
pub mod signals;

// Re-export main functions
pub use logging::{init_logging, LogSettings, LogTarget};
pub use signals::shutdown_signal;
