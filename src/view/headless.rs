//! Headless presenter writing JSON lines

use std::io::{self, Stdout, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{format_remaining, Presenter};

/// One UI update, as written to the output stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewRecord {
    Remaining { seconds: u64, display: String },
    Controls { enabled: bool },
    Counting { running: bool },
    Completion { message: String },
    CompletionDismissed,
    Error { message: String },
}

/// A record stamped with the time it was emitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewEvent {
    #[serde(flatten)]
    pub record: ViewRecord,
    pub timestamp: DateTime<Utc>,
}

impl ViewEvent {
    pub fn new(record: ViewRecord) -> Self {
        Self {
            record,
            timestamp: Utc::now(),
        }
    }
}

/// Presenter that reports every update as a JSON object per line
#[derive(Debug)]
pub struct HeadlessView<W: Write> {
    out: W,
}

impl HeadlessView<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> HeadlessView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, record: ViewRecord) {
        let event = ViewEvent::new(record);
        let result = serde_json::to_writer(&mut self.out, &event)
            .map_err(io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = result {
            warn!("Failed to write headless record: {}", e);
        }
    }
}

impl<W: Write> Presenter for HeadlessView<W> {
    fn render_remaining(&mut self, seconds: u64) {
        self.emit(ViewRecord::Remaining {
            seconds,
            display: format_remaining(seconds),
        });
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.emit(ViewRecord::Controls { enabled });
    }

    fn set_counting(&mut self, running: bool) {
        self.emit(ViewRecord::Counting { running });
    }

    fn show_completion(&mut self, message: &str) {
        self.emit(ViewRecord::Completion {
            message: message.to_string(),
        });
    }

    fn dismiss_completion(&mut self) {
        self.emit(ViewRecord::CompletionDismissed);
    }

    fn report_error(&mut self, message: &str) {
        self.emit(ViewRecord::Error {
            message: message.to_string(),
        });
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
