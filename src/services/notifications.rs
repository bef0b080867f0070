//! Completion notification scheduling

use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};
use notify_rust::Notification;
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

/// Default completion message
pub const COMPLETION_MESSAGE: &str = "计时完成！";

/// Application name shown as the notification summary
pub const APP_NAME: &str = "countdown-timer";

/// Schedules a single fire-and-forget completion alert
pub trait NotificationScheduler {
    /// Replace any pending alert with one that fires `seconds` from now
    fn schedule_after(&mut self, seconds: u64, message: &str);

    /// Drop any pending alert. Calling this with nothing pending is a no-op.
    fn cancel_all(&mut self);
}

/// An alert waiting to fire
#[derive(Debug)]
struct PendingNotification {
    fire_at: DateTime<Local>,
    task: JoinHandle<()>,
}

/// Shows desktop notifications through the system notification service
#[derive(Debug, Default)]
pub struct DesktopNotifier {
    pending: Option<PendingNotification>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local time at which the pending alert fires, if any
    pub fn pending_fire_time(&self) -> Option<DateTime<Local>> {
        self.pending
            .as_ref()
            .filter(|p| !p.task.is_finished())
            .map(|p| p.fire_at)
    }
}

impl NotificationScheduler for DesktopNotifier {
    fn schedule_after(&mut self, seconds: u64, message: &str) {
        self.cancel_all();

        let delay = Duration::from_secs(seconds);
        let fire_at = fire_time(seconds);
        let message = message.to_string();

        let task = tokio::spawn(async move {
            sleep(delay).await;
            // Showing the notification talks to the desktop service synchronously.
            let result = tokio::task::spawn_blocking(move || show_notification(&message)).await;
            match result {
                Ok(Ok(())) => info!("Completion notification delivered"),
                Ok(Err(e)) => warn!("Failed to show completion notification: {}", e),
                Err(e) => warn!("Notification task failed: {}", e),
            }
        });

        info!("Completion notification scheduled for {}", fire_at.format("%H:%M:%S %Z"));
        self.pending = Some(PendingNotification { fire_at, task });
    }

    fn cancel_all(&mut self) {
        if let Some(pending) = self.pending.take() {
            if !pending.task.is_finished() {
                pending.task.abort();
                info!("Cancelled completion notification due at {}", pending.fire_at.format("%H:%M:%S"));
            }
        }
    }
}

impl Drop for DesktopNotifier {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Local wall-clock time `seconds` from now; absurdly far deadlines are clamped to now
fn fire_time(seconds: u64) -> DateTime<Local> {
    let now = Local::now();
    i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(now)
}

fn show_notification(message: &str) -> Result<(), notify_rust::error::Error> {
    Notification::new()
        .appname(APP_NAME)
        .summary(APP_NAME)
        .body(message)
        .sound_name("alarm-clock-elapsed")
        .show()
        .map(|_| ())
}

/// Scheduler used when notifications are turned off; it only logs
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl NotificationScheduler for SilentNotifier {
    fn schedule_after(&mut self, seconds: u64, message: &str) {
        debug!("Notifications disabled, not scheduling {:?} in {}s", message, seconds);
    }

    fn cancel_all(&mut self) {
        debug!("Notifications disabled, nothing to cancel");
    }
}

/// Pick the desktop or silent scheduler
#[derive(Debug)]
pub enum Notifier {
    Desktop(DesktopNotifier),
    Silent(SilentNotifier),
}

impl Notifier {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Notifier::Desktop(DesktopNotifier::new())
        } else {
            Notifier::Silent(SilentNotifier)
        }
    }
}

impl NotificationScheduler for Notifier {
    fn schedule_after(&mut self, seconds: u64, message: &str) {
        match self {
            Notifier::Desktop(n) => n.schedule_after(seconds, message),
            Notifier::Silent(n) => n.schedule_after(seconds, message),
        }
    }

    fn cancel_all(&mut self) {
        match self {
            Notifier::Desktop(n) => n.cancel_all(),
            Notifier::Silent(n) => n.cancel_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_the_pending_alert() {
        let mut notifier = DesktopNotifier::new();
        notifier.schedule_after(600, COMPLETION_MESSAGE);
        let first = notifier.pending_fire_time().unwrap();

        notifier.schedule_after(60, COMPLETION_MESSAGE);
        let second = notifier.pending_fire_time().unwrap();
        assert!(second < first);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let mut notifier = DesktopNotifier::new();
        notifier.cancel_all();
        notifier.schedule_after(60, COMPLETION_MESSAGE);
        notifier.cancel_all();
        notifier.cancel_all();
        assert!(notifier.pending_fire_time().is_none());
    }

    #[test]
    fn silent_notifier_accepts_everything() {
        let mut notifier = Notifier::new(false);
        notifier.schedule_after(0, COMPLETION_MESSAGE);
        notifier.cancel_all();
        assert!(matches!(notifier, Notifier::Silent(_)));
        assert_eq!(format!("{:?}", notifier), "Silent(SilentNotifier)");
    }
}
