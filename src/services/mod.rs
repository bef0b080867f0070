//! External service module
//!
//! This module wraps the desktop notification service that delivers the
//! completion alert when the app is not in the foreground.

pub mod notifications;
pub mod system;

// Re-export main types
pub use notifications::{
    DesktopNotifier, NotificationScheduler, Notifier, SilentNotifier, APP_NAME, COMPLETION_MESSAGE,
};
pub use system::{check_notification_support, warn_if_notifications_unavailable};
