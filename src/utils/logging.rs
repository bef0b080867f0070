//! Log routing for the two run modes
//!
//! The full-screen view draws on the terminal in raw mode, so nothing else
//! may write to the tty while it is up. Logs go to stderr only in headless
//! mode, to a file when `--log-file` is given, and nowhere otherwise.

use std::{
    fs::OpenOptions,
    io,
    path::PathBuf,
    sync::Mutex,
};

use crate::config::Config;

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

/// Subscriber settings derived from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub target: LogTarget,
}

impl LogSettings {
    pub fn for_config(config: &Config) -> Self {
        let target = match (&config.log_file, config.headless) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::Off,
        };
        let level = if target == LogTarget::Off {
            "off"
        } else {
            config.log_level()
        };
        Self {
            filter: format!("countdown_timer={}", level),
            target,
        }
    }
}

/// Install the global tracing subscriber
pub fn init_logging(settings: &LogSettings) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(settings.filter.as_str());
    match &settings.target {
        LogTarget::Stderr => builder.with_writer(io::stderr).init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        LogTarget::Off => builder.with_writer(io::sink).init(),
    }
    Ok(())
}
