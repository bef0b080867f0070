//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    services::COMPLETION_MESSAGE,
    state::{CompletionPolicy, ControllerOptions},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A single-screen countdown timer with presets and a completion alert")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Read commands from stdin and print UI updates as JSON lines
    #[arg(long)]
    pub headless: bool,

    /// What to do when the countdown reaches zero
    #[arg(long, value_enum, default_value_t = CompletionPolicy::Stop)]
    pub on_complete: CompletionPolicy,

    /// Text of the completion prompt and desktop notification
    #[arg(short, long, default_value = COMPLETION_MESSAGE)]
    pub message: String,

    /// Do not schedule desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Milliseconds per countdown tick
    #[arg(long, default_value = "1000", hide = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_millis: u64,

    /// Append logs to this file (the full-screen view logs nowhere otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Whether desktop notifications should be scheduled
    pub fn notifications_enabled(&self) -> bool {
        !self.no_notify
    }

    /// Controller settings derived from the command line
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            policy: self.on_complete,
            tick_period: Duration::from_millis(self.tick_millis),
            message: self.message.clone(),
        }
    }
}
