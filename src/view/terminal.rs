//! Full-screen terminal presenter

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use super::{format_remaining, Presenter};
use crate::state::PRESETS;

const BUTTON_ORANGE: Color = Color::Rgb(255, 149, 0);
const BUTTON_RED: Color = Color::Rgb(220, 40, 40);

/// The completion prompt currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    pub message: String,
    /// How many times the prompt was raised without being acknowledged
    pub raised: u32,
}

/// Everything the screen shows, independent of the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenModel {
    pub remaining: String,
    pub controls_enabled: bool,
    pub running: bool,
    pub completion: Option<CompletionPrompt>,
    /// Last rejected action, shown until the next successful update
    pub status: Option<String>,
}

impl Default for ScreenModel {
    fn default() -> Self {
        Self {
            remaining: format_remaining(0),
            controls_enabled: true,
            running: false,
            completion: None,
            status: None,
        }
    }
}

/// Presenter drawing the countdown screen with ratatui
pub struct TerminalView<B: Backend> {
    terminal: Terminal<B>,
    model: ScreenModel,
    raw_mode: bool,
}

impl TerminalView<CrosstermBackend<Stdout>> {
    /// Switch the terminal to raw mode on the alternate screen
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut view = Self::with_backend(CrosstermBackend::new(stdout))?;
        view.raw_mode = true;
        view.terminal.hide_cursor()?;
        view.terminal.clear()?;
        Ok(view)
    }
}

impl<B: Backend> TerminalView<B> {
    pub fn with_backend(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            model: ScreenModel::default(),
            raw_mode: false,
        })
    }

    pub fn model(&self) -> &ScreenModel {
        &self.model
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Leave the alternate screen and give the cursor back
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.raw_mode {
            return Ok(());
        }
        self.raw_mode = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        debug!("Terminal restored");
        Ok(())
    }
}

impl<B: Backend> Drop for TerminalView<B> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl<B: Backend> Presenter for TerminalView<B> {
    fn render_remaining(&mut self, seconds: u64) {
        self.model.status = None;
        self.model.remaining = format_remaining(seconds);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.model.controls_enabled = enabled;
    }

    fn set_counting(&mut self, running: bool) {
        self.model.running = running;
    }

    fn show_completion(&mut self, message: &str) {
        match &mut self.model.completion {
            Some(prompt) => prompt.raised += 1,
            None => {
                self.model.completion = Some(CompletionPrompt {
                    message: message.to_string(),
                    raised: 1,
                })
            }
        }
    }

    fn dismiss_completion(&mut self) {
        self.model.completion = None;
    }

    fn report_error(&mut self, message: &str) {
        debug!("Rejected: {}", message);
        self.model.status = Some(message.to_string());
    }

    fn flush(&mut self) -> io::Result<()> {
        let model = &self.model;
        self.terminal.draw(|frame| draw_screen(frame, model))?;
        Ok(())
    }
}

fn button(label: String, color: Color, enabled: bool) -> Paragraph<'static> {
    let style = if enabled {
        Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Gray)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    Paragraph::new(label)
        .alignment(Alignment::Center)
        .block(Block::bordered())
        .style(style)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_screen(frame: &mut Frame, model: &ScreenModel) {
    let [label_area, _, presets_area, actions_area, help_area] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let label = Paragraph::new(vec![
        Line::default(),
        Line::default(),
        Line::from(model.remaining.as_str()),
    ])
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::bordered());
    frame.render_widget(label, label_area);

    let preset_areas =
        Layout::horizontal(PRESETS.iter().map(|_| Constraint::Fill(1))).split(presets_area);
    for (preset, area) in PRESETS.iter().zip(preset_areas.iter()) {
        let text = format!("[{}] {}", preset.key, preset.label);
        frame.render_widget(button(text, BUTTON_ORANGE, model.controls_enabled), *area);
    }

    let [toggle_area, reset_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(16)]).areas(actions_area);
    let toggle_text = if model.running {
        "[space] stop"
    } else {
        "[space] start"
    };
    frame.render_widget(button(toggle_text.to_string(), BUTTON_RED, true), toggle_area);
    frame.render_widget(
        button("[r] reset".to_string(), BUTTON_RED, model.controls_enabled),
        reset_area,
    );

    let help = match &model.status {
        Some(status) => Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new("enter: start/stop or dismiss  q: quit"),
    };
    frame.render_widget(help.alignment(Alignment::Center), help_area);

    if let Some(prompt) = &model.completion {
        let popup = centered(frame.area(), 30, 6);
        let title = if prompt.raised > 1 {
            format!("{} (x{})", prompt.message, prompt.raised)
        } else {
            prompt.message.clone()
        };
        let body = Paragraph::new(vec![Line::default(), Line::from("[ OK ]")])
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title).title_alignment(Alignment::Center))
            .style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(Clear, popup);
        frame.render_widget(body, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn screen_text(view: &TerminalView<TestBackend>) -> String {
        view.backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_time_buttons_and_actions() {
        let mut view = TerminalView::with_backend(TestBackend::new(72, 20)).unwrap();
        view.render_remaining(80);
        view.flush().unwrap();

        let text = screen_text(&view);
        assert!(text.contains("01:20"));
        for preset in PRESETS.iter() {
            assert!(text.contains(preset.label), "missing {}", preset.label);
        }
        assert!(text.contains("[space] start"));
        assert!(text.contains("[r] reset"));
    }

    #[test]
    fn running_dims_controls_and_relabels_toggle() {
        let mut view = TerminalView::with_backend(TestBackend::new(72, 20)).unwrap();
        view.set_counting(true);
        view.set_controls_enabled(false);
        view.flush().unwrap();

        assert!(!view.model().controls_enabled);
        assert!(screen_text(&view).contains("[space] stop"));
    }

    #[test]
    fn repeated_completion_counts_until_dismissed() {
        let mut view = TerminalView::with_backend(TestBackend::new(72, 20)).unwrap();
        view.show_completion("Done");
        view.show_completion("Done");
        assert_eq!(view.model().completion.as_ref().map(|p| p.raised), Some(2));
        view.flush().unwrap();
        let text = screen_text(&view);
        assert!(text.contains("Done (x2)"));
        assert!(text.contains("[ OK ]"));

        view.dismiss_completion();
        view.flush().unwrap();
        assert!(view.model().completion.is_none());
        assert!(!screen_text(&view).contains("[ OK ]"));
    }

    #[test]
    fn rejected_actions_show_until_the_next_update() {
        let mut view = TerminalView::with_backend(TestBackend::new(72, 20)).unwrap();
        view.report_error("cannot reset while the countdown is running");
        view.flush().unwrap();
        assert!(screen_text(&view).contains("cannot reset"));

        view.render_remaining(59);
        view.flush().unwrap();
        assert!(!screen_text(&view).contains("cannot reset"));
    }
}
