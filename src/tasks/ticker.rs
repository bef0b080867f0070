//! Repeating countdown timer

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Default period between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A running repeating timer.
///
/// The handle is polled by whoever owns it; dropping it stops the timer, and
/// no tick can be observed after the drop.
#[derive(Debug)]
pub struct TimerHandle {
    interval: Interval,
    fired: u64,
}

impl TimerHandle {
    /// Start a timer whose first tick is one full period from now
    pub fn start(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        // A late tick fires once; missed periods are not replayed.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, fired: 0 }
    }

    /// Wait for the next tick and return how many ticks have fired so far
    pub async fn tick(&mut self) -> u64 {
        self.interval.tick().await;
        self.fired += 1;
        self.fired
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }
}
