//! Background tasks module
//!
//! This module contains the countdown timer, the input readers that feed
//! commands to the event loop, and the loop itself.

pub mod countdown_loop;
pub mod input;
pub mod ticker;

// Re-export main functions
pub use countdown_loop::{handle_command, run_countdown, ExitReason};
pub use input::{keyboard_input_task, spawn_stdin_reader, Command};
pub use ticker::{TimerHandle, TICK_PERIOD};
