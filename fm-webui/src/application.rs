//! Terminal host: draws the router's document and feeds it input.

use crate::dom::{Container, Document, HeaderBar, MountPoint};
use crate::error::TerminalSnafu;
use crate::history::{History, MemoryHistory};
use crate::notify::AlertQueue;
use crate::router::Router;
use crossterm::{
    cursor::Show,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use snafu::ResultExt;
use std::io::{self, stdout};
use std::time::Duration;

/// Host configuration.
#[derive(Debug, Clone)]
pub struct ApplicationConfig {
    /// Shown in the header bar border.
    pub title: String,
    /// How long to wait for input before redrawing.
    pub tick_rate: Duration,
    /// Capture mouse events so header links can be clicked.
    pub mouse_capture: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            title: "FnordMetric".to_string(),
            tick_rate: Duration::from_millis(100),
            mouse_capture: true,
        }
    }
}

/// What a single input asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenLink(usize),
    Back,
    Forward,
    OpenPrompt,
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    Dismiss,
    Quit,
    Noop,
}

impl Action {
    /// Map a key press to an action.
    ///
    /// A pending alert is modal: only dismissal and Ctrl+C get through.
    pub fn from_key(key: KeyEvent, alert_pending: bool, prompt_open: bool) -> Self {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        if alert_pending {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Action::Dismiss,
                _ => Action::Noop,
            };
        }

        if prompt_open {
            return match key.code {
                KeyCode::Enter => Action::PromptSubmit,
                KeyCode::Esc => Action::PromptCancel,
                KeyCode::Backspace => Action::PromptBackspace,
                KeyCode::Char(c) => Action::PromptInput(c),
                _ => Action::Noop,
            };
        }

        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char(c @ '1'..='9') => Action::OpenLink(c as usize - '1' as usize),
            KeyCode::Char('b') | KeyCode::Backspace => Action::Back,
            KeyCode::Left if alt => Action::Back,
            KeyCode::Char('f') => Action::Forward,
            KeyCode::Right if alt => Action::Forward,
            KeyCode::Char('g') | KeyCode::Char(':') => Action::OpenPrompt,
            _ => Action::Noop,
        }
    }
}

/// Input state owned by the host loop.
#[derive(Debug, Default)]
struct HostState {
    prompt: Option<String>,
    link_areas: Vec<Rect>,
}

impl HostState {
    /// Apply an action to the router. Returns false when the host should exit.
    fn apply(&mut self, router: &mut Router, action: Action) -> bool {
        match action {
            Action::OpenLink(index) => {
                if !router.click_menu_item(index) {
                    tracing::debug!(index, "no menu link at index");
                }
            }
            Action::Back => {
                router.go_back();
            }
            Action::Forward => {
                router.go_forward();
            }
            Action::OpenPrompt => self.prompt = Some(String::new()),
            Action::PromptInput(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.push(c);
                }
            }
            Action::PromptBackspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.pop();
                }
            }
            Action::PromptSubmit => {
                if let Some(input) = self.prompt.take() {
                    router.navigate(input.trim(), true);
                }
            }
            Action::PromptCancel => self.prompt = None,
            Action::Dismiss => {
                router.notifier_mut().dismiss();
            }
            Action::Quit => return false,
            Action::Noop => {}
        }
        true
    }

    fn link_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.link_areas.iter().position(|area| area.contains(position))
    }
}

/// Main application handle.
pub struct Application {
    config: ApplicationConfig,
}

impl Application {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self::with_config(ApplicationConfig::default())
    }

    pub fn with_config(config: ApplicationConfig) -> Self {
        Self { config }
    }

    /// Build the router, hand it to `setup` for route and menu registration,
    /// then run the terminal loop until the user quits.
    pub fn run<F>(self, setup: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Router) -> anyhow::Result<()>,
    {
        let mut document = Document::new();
        let mut router = Router::new(&mut document, MemoryHistory::new(), AlertQueue::new());
        setup(&mut router)?;
        tracing::info!(links = router.header_bar().links().len(), "starting terminal host");
        self.run_loop(&document, &mut router)
    }

    fn run_loop(&self, document: &Document, router: &mut Router) -> anyhow::Result<()> {
        enable_raw_mode().context(TerminalSnafu)?;

        // Restore runs whatever happened after raw mode was entered.
        let result = self.enter_and_run(document, router);
        let restored = restore_terminal(self.config.mouse_capture).context(TerminalSnafu);

        result?;
        restored?;
        Ok(())
    }

    fn enter_and_run(&self, document: &Document, router: &mut Router) -> anyhow::Result<()> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context(TerminalSnafu)?;
        if self.config.mouse_capture {
            execute!(stdout, EnableMouseCapture).context(TerminalSnafu)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.run_app_loop(&mut terminal, document, router)
    }

    fn run_app_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        document: &Document,
        router: &mut Router,
    ) -> anyhow::Result<()> {
        let mut state = HostState::default();

        loop {
            terminal.draw(|frame| draw(frame, &self.config.title, document, router, &mut state))?;

            if !event::poll(self.config.tick_rate)? {
                continue;
            }

            let alert_pending = router.notifier().is_blocking();
            let action = match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    Action::from_key(key, alert_pending, state.prompt.is_some())
                }
                CrosstermEvent::Mouse(mouse)
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                        && !alert_pending
                        && state.prompt.is_none() =>
                {
                    state
                        .link_at(mouse.column, mouse.row)
                        .map_or(Action::Noop, Action::OpenLink)
                }
                _ => Action::Noop,
            };

            if !state.apply(router, action) {
                tracing::info!("quit requested");
                return Ok(());
            }
            router.process_history();
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// Undo every terminal mode the host may have set. All steps run; the first
/// failure is returned.
fn restore_terminal(mouse_capture: bool) -> io::Result<()> {
    let mut stdout = stdout();
    first_error([
        disable_raw_mode(),
        if mouse_capture {
            execute!(stdout, DisableMouseCapture)
        } else {
            Ok(())
        },
        execute!(stdout, LeaveAlternateScreen),
        execute!(stdout, Show),
    ])
}

fn first_error(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    steps.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}

fn draw(frame: &mut Frame, title: &str, document: &Document, router: &Router, state: &mut HostState) {
    let mut constraints: Vec<Constraint> = document
        .body()
        .iter()
        .map(|mount| match mount {
            MountPoint::HeaderBar => Constraint::Length(3),
            MountPoint::Viewport => Constraint::Min(0),
        })
        .collect();
    constraints.push(Constraint::Length(1));
    let chunks = Layout::vertical(constraints).split(frame.area());

    for (mount, area) in document.body().iter().zip(chunks.iter()) {
        match mount {
            MountPoint::HeaderBar => draw_header_bar(frame, *area, title, router.header_bar(), &mut state.link_areas),
            MountPoint::Viewport => draw_viewport(frame, *area, router.viewport()),
        }
    }

    if let Some(status_area) = chunks.last() {
        draw_status(frame, *status_area, router.history().location(), state.prompt.as_deref());
    }

    if let Some(message) = router.notifier().current() {
        draw_alert(frame, message);
    }
}

fn draw_header_bar(frame: &mut Frame, area: Rect, title: &str, header: &HeaderBar, link_areas: &mut Vec<Rect>) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    link_areas.clear();
    let mut spans = Vec::new();
    let mut x = inner.x;
    for (i, anchor) in header.links().iter().enumerate() {
        let hint = Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray));
        let label = Span::styled(
            format!("{} ", anchor.label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        );
        let width = u16::try_from(hint.width() + label.width()).unwrap_or(u16::MAX);
        let visible = width.min(inner.right().saturating_sub(x));
        link_areas.push(Rect::new(x, inner.y, visible, 1));
        x = x.saturating_add(width);
        spans.push(hint);
        spans.push(label);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_viewport(frame: &mut Frame, area: Rect, viewport: &Container) {
    let mut block = Block::bordered().border_type(BorderType::Rounded);
    if let Some(title) = viewport.title() {
        block = block.title(format!(" {title} "));
    }
    let paragraph = Paragraph::new(Text::from(viewport.lines().to_vec()))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, area: Rect, location: &str, prompt: Option<&str>) {
    let line = match prompt {
        Some(input) => Line::from(vec![
            Span::styled(" go to #", Style::default().fg(Color::Yellow)),
            Span::raw(input.to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        None => Line::from(vec![
            Span::styled(format!(" {location} "), Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::styled(
                " 1-9 Menu │ b Back │ f Forward │ g Go to │ q Quit ",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_alert(frame: &mut Frame, message: &str) {
    let area = popup_area(frame.area(), 60, 5);
    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled("[Enter] OK", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(" Alert "),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = u16::try_from(u32::from(area.width) * u32::from(percent_x) / 100).unwrap_or(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
