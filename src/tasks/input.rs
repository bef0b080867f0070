//! Input background tasks
//!
//! Keyboard events (interactive mode) and stdin lines (headless mode) are
//! turned into [`Command`]s and forwarded to the countdown loop.

use std::{
    io::{self, BufRead},
    thread,
};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::stream::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use crate::state::presets::{preset_index_for_key, preset_index_for_name};

/// A user action, independent of where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Tap the preset button at this position
    Preset(usize),
    Toggle,
    Reset,
    /// Enter: acknowledges an open prompt, otherwise toggles
    Confirm,
    Acknowledge,
    Redraw,
    Quit,
    /// A headless line that names no command
    Invalid(String),
}

/// Map a key press to a command
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') => Some(Command::Toggle),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Char('o') => Some(Command::Acknowledge),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) => preset_index_for_key(c).map(Command::Preset),
        _ => None,
    }
}

/// Parse one headless input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line.to_ascii_lowercase().as_str() {
        "start" | "stop" | "toggle" => Command::Toggle,
        "reset" | "clear" => Command::Reset,
        "ok" => Command::Acknowledge,
        "quit" | "exit" => Command::Quit,
        _ => match preset_index_for_name(line) {
            Some(index) => Command::Preset(index),
            None => Command::Invalid(line.to_string()),
        },
    };
    Some(command)
}

/// Forward terminal key presses until the receiver goes away
pub async fn keyboard_input_task(tx: UnboundedSender<Command>) {
    info!("Starting keyboard input task");

    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        let command = match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => command_for_key(key),
            Ok(Event::Resize(width, height)) => {
                debug!("Terminal resized to {}x{}", width, height);
                Some(Command::Redraw)
            }
            Ok(_) => None,
            Err(e) => {
                error!("Error reading terminal events: {}", e);
                Some(Command::Quit)
            }
        };

        if let Some(command) = command {
            let quit = command == Command::Quit;
            if tx.send(command).is_err() || quit {
                break;
            }
        }
    }
}

/// Forward stdin commands, one per line. End of input closes the channel.
///
/// Reads on a plain OS thread: a pending blocking read must not keep the
/// runtime alive once the loop has quit.
pub fn spawn_stdin_reader(tx: UnboundedSender<Command>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || read_commands(io::stdin().lock(), tx))
}

/// Send the commands found in `input` until it ends or the receiver goes away
pub fn read_commands<R: BufRead>(input: R, tx: UnboundedSender<Command>) {
    info!("Reading commands from stdin");

    for line in input.lines() {
        match line {
            Ok(line) => {
                if let Some(command) = parse_command(&line) {
                    debug!("stdin command: {:?}", command);
                    if tx.send(command).is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                error!("Error reading stdin: {}", e);
                return;
            }
        }
    }

    info!("stdin closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_controls() {
        assert_eq!(command_for_key(key(KeyCode::Char('1'))), Some(Command::Preset(0)));
        assert_eq!(command_for_key(key(KeyCode::Char('3'))), Some(Command::Preset(1)));
        assert_eq!(command_for_key(key(KeyCode::Char('5'))), Some(Command::Preset(2)));
        assert_eq!(command_for_key(key(KeyCode::Char('s'))), Some(Command::Preset(3)));
        assert_eq!(command_for_key(key(KeyCode::Char(' '))), Some(Command::Toggle));
        assert_eq!(command_for_key(key(KeyCode::Enter)), Some(Command::Confirm));
        assert_eq!(command_for_key(key(KeyCode::Char('r'))), Some(Command::Reset));
        assert_eq!(command_for_key(key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for_key(key(KeyCode::Char('x'))), None);
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn reader_forwards_commands_then_closes() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        read_commands("1 min\n\nstart\nfly\n".as_bytes(), tx);

        let mut received = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(command) => received.push(command),
                Err(e) => {
                    assert_eq!(e, tokio::sync::mpsc::error::TryRecvError::Disconnected);
                    break;
                }
            }
        }
        assert_eq!(
            received,
            vec![
                Command::Preset(0),
                Command::Toggle,
                Command::Invalid("fly".to_string()),
            ]
        );
    }

    #[test]
    fn headless_lines_parse_to_commands() {
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("3 min"), Some(Command::Preset(1)));
        assert_eq!(parse_command("1sec"), Some(Command::Preset(3)));
        assert_eq!(parse_command("5"), Some(Command::Preset(2)));
        assert_eq!(parse_command("S"), Some(Command::Preset(3)));
        assert_eq!(parse_command("START"), Some(Command::Toggle));
        assert_eq!(parse_command("stop"), Some(Command::Toggle));
        assert_eq!(parse_command("reset"), Some(Command::Reset));
        assert_eq!(parse_command("ok"), Some(Command::Acknowledge));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(
            parse_command("jump"),
            Some(Command::Invalid("jump".to_string()))
        );
    }
}
