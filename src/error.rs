//! Error types for countdown control operations

use thiserror::Error;

/// Errors returned when a control is used in the wrong state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountdownError {
    /// Presets and reset are only accepted while the countdown is idle
    #[error("cannot {action} while the countdown is running")]
    Busy { action: &'static str },

    /// No preset exists at the requested position
    #[error("unknown preset #{0}")]
    UnknownPreset(usize),
}

pub type Result<T> = std::result::Result<T, CountdownError>;
