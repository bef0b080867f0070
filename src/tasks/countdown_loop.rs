//! The countdown event loop
//!
//! Every state change happens here, one event at a time: timer ticks, user
//! commands and the shutdown signal are serialized through a single
//! `select!`.

use std::{future::Future, io};

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use super::input::Command;
use crate::{
    error::Result,
    services::NotificationScheduler,
    state::CountdownController,
    view::Presenter,
};

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    InputClosed,
    Signal,
}

/// Drive the controller until the user quits, input ends, or `shutdown` resolves.
///
/// When input ends while the countdown is running, the loop keeps ticking
/// until the countdown completes or goes idle.
pub async fn run_countdown<P, N, S>(
    controller: &mut CountdownController<P, N>,
    commands: &mut UnboundedReceiver<Command>,
    shutdown: S,
) -> io::Result<ExitReason>
where
    P: Presenter,
    N: NotificationScheduler,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    controller.presenter_mut().flush()?;

    let mut input_open = true;
    let reason = loop {
        tokio::select! {
            _ = controller.next_tick() => {
                let finished = controller.on_tick();
                if finished {
                    debug!("Terminal signal at {:?}", controller.snapshot());
                }
                if !input_open && (finished || !controller.state().is_running()) {
                    break ExitReason::InputClosed;
                }
            }
            command = commands.recv(), if input_open => match command {
                Some(Command::Quit) => break ExitReason::Quit,
                Some(command) => handle_command(controller, command),
                None if controller.state().is_running() => {
                    info!("Input closed, waiting for the countdown to finish");
                    input_open = false;
                }
                None => break ExitReason::InputClosed,
            },
            _ = &mut shutdown => break ExitReason::Signal,
        }
        controller.presenter_mut().flush()?;
    };

    info!("Countdown loop finished: {:?}", reason);
    controller.shutdown();
    controller.presenter_mut().flush()?;
    Ok(reason)
}

/// Apply one user command to the controller
pub fn handle_command<P, N>(controller: &mut CountdownController<P, N>, command: Command)
where
    P: Presenter,
    N: NotificationScheduler,
{
    let result: Result<()> = match command {
        Command::Preset(index) => {
            controller.acknowledge_completion();
            controller.apply_preset(index).map(|_| ())
        }
        Command::Reset => {
            controller.acknowledge_completion();
            controller.reset()
        }
        Command::Toggle => {
            controller.acknowledge_completion();
            controller.toggle();
            Ok(())
        }
        Command::Confirm => {
            if controller.completion_pending() {
                controller.acknowledge_completion();
            } else {
                controller.toggle();
            }
            Ok(())
        }
        Command::Acknowledge => {
            controller.acknowledge_completion();
            Ok(())
        }
        Command::Redraw | Command::Quit => Ok(()),
        Command::Invalid(text) => {
            controller
                .presenter_mut()
                .report_error(&format!("unknown command: {}", text));
            Ok(())
        }
    };

    if let Err(e) = result {
        warn!("Rejected command: {}", e);
        controller.presenter_mut().report_error(&e.to_string());
    }
}
