//! Counting state and snapshot structures

use serde::{Deserialize, Serialize};

/// Whether the countdown timer is currently ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountingState {
    #[default]
    Idle,
    Running,
}

impl CountingState {
    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        matches!(self, CountingState::Running)
    }

    /// The state a toggle moves to
    pub fn toggled(&self) -> Self {
        match self {
            CountingState::Idle => CountingState::Running,
            CountingState::Running => CountingState::Idle,
        }
    }
}

/// What the controller does once the remaining time reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompletionPolicy {
    /// Clamp at zero, prompt once, and return to idle
    #[default]
    Stop,
    /// Keep the timer running and prompt again on every tick until stopped
    Repeat,
}

/// Point-in-time view of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub state: CountingState,
    pub remaining_seconds: u64,
}

impl CountdownSnapshot {
    pub fn new(state: CountingState, remaining_seconds: u64) -> Self {
        Self {
            state,
            remaining_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_the_two_states() {
        assert_eq!(CountingState::Idle.toggled(), CountingState::Running);
        assert_eq!(CountingState::Running.toggled(), CountingState::Idle);
        assert!(!CountingState::default().is_running());
    }

    #[test]
    fn snapshot_serializes_with_lowercase_state() {
        let snapshot = CountdownSnapshot::new(CountingState::Running, 42);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"state":"running","remaining_seconds":42}"#);
    }
}
