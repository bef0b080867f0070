//! Desktop notification service checks

use tracing::{info, warn};

/// Check the desktop notification service once at startup.
///
/// Failure means alerts will probably not be shown; the countdown itself keeps
/// working, so callers should only warn about it.
pub async fn check_notification_support() -> Result<(), String> {
    tokio::task::spawn_blocking(query_notification_server)
        .await
        .map_err(|e| format!("Notification check task failed: {}", e))?
}

#[cfg(all(unix, not(target_os = "macos")))]
fn query_notification_server() -> Result<(), String> {
    let server = notify_rust::get_server_information()
        .map_err(|e| format!("Desktop notification service is not available: {}", e))?;
    info!(
        "Notification service available: {} {} (spec {})",
        server.name, server.version, server.spec_version
    );
    Ok(())
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn query_notification_server() -> Result<(), String> {
    info!("Using the platform notification center");
    Ok(())
}

/// Run the startup check and downgrade a failure to a warning
pub async fn warn_if_notifications_unavailable() -> bool {
    match check_notification_support().await {
        Ok(()) => true,
        Err(e) => {
            warn!("{}; the countdown will run without desktop alerts", e);
            false
        }
    }
}
