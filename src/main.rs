//! Countdown Timer - A single-screen countdown timer
//!
//! This is the main entry point for the countdown-timer application.

use tokio::sync::mpsc;
use tracing::info;

use countdown_timer::{
    config::Config,
    services::{warn_if_notifications_unavailable, Notifier},
    state::CountdownController,
    tasks::{keyboard_input_task, run_countdown, spawn_stdin_reader},
    utils::{init_logging, shutdown_signal, LogSettings},
    view::{HeadlessView, Presenter, TerminalView},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    init_logging(&LogSettings::for_config(&config))?;

    info!("Starting countdown-timer v1.0.0");
    info!(
        "Configuration: headless={}, on_complete={:?}, notifications={}",
        config.headless,
        config.on_complete,
        config.notifications_enabled()
    );

    let notifications_available =
        !config.notifications_enabled() || warn_if_notifications_unavailable().await;
    let notifier = Notifier::new(config.notifications_enabled());

    let (command_tx, mut command_rx) = mpsc::unbounded_channel();

    let reason = if config.headless {
        spawn_stdin_reader(command_tx)?;
        let mut controller =
            CountdownController::new(HeadlessView::stdout(), notifier, config.controller_options());
        run_countdown(&mut controller, &mut command_rx, shutdown_signal()).await?
    } else {
        let view = TerminalView::enter()?;
        tokio::spawn(keyboard_input_task(command_tx));
        let mut controller = CountdownController::new(view, notifier, config.controller_options());
        if !notifications_available {
            controller
                .presenter_mut()
                .report_error("desktop notifications unavailable");
        }
        let result = run_countdown(&mut controller, &mut command_rx, shutdown_signal()).await;
        controller.presenter_mut().restore()?;
        result?
    };

    info!("Shutdown complete ({:?})", reason);
    Ok(())
}
