//! State management module
//!
//! This module contains the countdown state machine and the values it owns.

pub mod controller;
pub mod counting_state;
pub mod presets;
pub mod time_accumulator;

// Re-export main types
pub use controller::{ControllerOptions, CountdownController};
pub use counting_state::{CompletionPolicy, CountdownSnapshot, CountingState};
pub use presets::{PresetDefinition, PRESETS};
pub use time_accumulator::TimeAccumulator;
