//! Presentation module
//!
//! The controller pushes every visible change through the [`Presenter`]
//! trait. Two views implement it: a full-screen terminal UI and a headless
//! JSON-lines writer.

pub mod format;
pub mod headless;
pub mod terminal;

use std::io;

use tracing::warn;

pub use format::format_remaining;
pub use headless::HeadlessView;
pub use terminal::TerminalView;

/// Receives UI updates from the countdown controller
pub trait Presenter {
    /// Show the remaining time
    fn render_remaining(&mut self, seconds: u64);

    /// Enable or dim the preset and reset controls
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Reflect the start/stop state on the toggle control
    fn set_counting(&mut self, running: bool);

    /// Present the one-button completion prompt
    fn show_completion(&mut self, message: &str);

    /// Hide the completion prompt after it has been acknowledged
    fn dismiss_completion(&mut self);

    /// Tell the user a control was rejected
    fn report_error(&mut self, message: &str) {
        warn!("{}", message);
    }

    /// Push buffered output to the screen
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
