//! Countdown Timer - A single-screen countdown timer
//!
//! This library provides the countdown state machine, the presenters that
//! draw it, and the notification scheduler that fires the completion alert.

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use error::CountdownError;
pub use state::{CountdownController, CountingState};
pub use tasks::run_countdown;
pub use utils::signals::shutdown_signal;
