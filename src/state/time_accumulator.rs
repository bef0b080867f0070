//! Remaining-seconds accounting

/// Holds the remaining countdown time in whole seconds.
///
/// The count never goes below zero: ticks saturate, and the tick that lands
/// on zero (or any tick taken at zero) reports the terminal signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeAccumulator {
    remaining_seconds: u64,
}

impl TimeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seconds(remaining_seconds: u64) -> Self {
        Self { remaining_seconds }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Add a preset delta. There is no upper bound beyond the integer limit.
    pub fn apply_preset(&mut self, delta: u64) -> u64 {
        self.remaining_seconds = self.remaining_seconds.saturating_add(delta);
        self.remaining_seconds
    }

    pub fn reset(&mut self) {
        self.remaining_seconds = 0;
    }

    /// Take one second off. Returns `true` once the countdown has reached zero.
    pub fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }
}
