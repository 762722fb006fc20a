use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::core::client::{GameClient, UiMode};

use super::events::{Action, AppEvent};
use super::layout::AppLayout;
use super::services::Services;
use super::theme;
use super::views::creation::CreationViewState;
use super::views::game::GameViewState;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Single owner of game state.
    pub client: GameClient,
    /// Character-creation form state.
    pub creation: CreationViewState,
    /// In-game view state.
    pub game: GameViewState,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Time fed to the dice animation per tick.
    tick_rate: Duration,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(
        client: GameClient,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
        tick_rate: Duration,
    ) -> Self {
        Self {
            running: true,
            client,
            creation: CreationViewState::new(),
            game: GameViewState::new(),
            show_help: false,
            tick_rate,
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(&crossterm_event),
            AppEvent::Tick => {
                self.client.tick(self.tick_rate);
            }
            AppEvent::CharacterCreated(result) => self.client.on_character_created(result),
            AppEvent::TurnResolved(result) => self.client.on_turn_response(result),
            AppEvent::RollResolved(result) => self.client.on_roll_response(result),
        }
    }

    fn handle_input(&mut self, event: &Event) {
        // Priority 1: Blocking alert
        if self.client.alert().is_some() {
            if let Some(action) = map_alert_input(event) {
                self.handle_action(action);
            }
            return;
        }

        // Priority 2: Help modal
        if self.show_help {
            if let Some(action) = map_help_input(event) {
                self.handle_action(action);
            }
            return;
        }

        // Priority 3: Active view
        let consumed = match self.client.mode() {
            UiMode::CharacterCreation => {
                self.creation
                    .handle_input(event, &mut self.client, &self.services)
            }
            UiMode::InGame => self.game.handle_input(event, &mut self.client, &self.services),
        };
        if consumed {
            return;
        }

        // Priority 4: Global keybindings
        if let Some(action) = map_input_to_action(event) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::DismissAlert => self.client.dismiss_alert(),
            Action::ScrollLogUp => self.game.scroll_up(),
            Action::ScrollLogDown => self.game.scroll_down(),
        }
    }

    /// Wait for the next backend event and apply it. `false` once the
    /// channel is closed.
    #[cfg(test)]
    pub(crate) async fn process_backend_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let in_game = self.client.mode() == UiMode::InGame;
        let layout = AppLayout::compute(area, in_game);

        if in_game {
            self.game
                .render(frame, layout.main, layout.sidebar, &self.client);
        } else {
            self.creation.render(frame, layout.main, &self.client);
        }

        self.render_status_bar(frame, layout.status);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
        if let Some(message) = self.client.alert() {
            render_alert(frame, area, message);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode = match self.client.mode() {
            UiMode::CharacterCreation => "Character Creation",
            UiMode::InGame => "In Game",
        };

        let busy_indicator = if self.client.is_waiting() {
            Span::styled(" WAITING ", theme::busy_badge())
        } else {
            Span::raw("")
        };

        let mut spans = vec![
            Span::styled(" TRPG ", theme::brand_badge()),
            Span::raw(" "),
            busy_indicator,
            Span::raw(" "),
            Span::styled(
                mode,
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(character) = self.client.character() {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(character.name.clone(), theme::title()));
            spans.push(Span::raw(" @ "));
            spans.push(Span::styled(
                character.location_label().to_string(),
                theme::muted(),
            ));
        }
        spans.extend([
            Span::raw(" │ "),
            Span::styled("F1", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("Ctrl+C", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = [
            ("Global:", ""),
            ("F1", "Toggle this help"),
            ("Ctrl+C / Ctrl+Q", "Quit"),
            ("Esc", "Close modal"),
            ("", ""),
            ("Character Creation:", ""),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("↑/↓", "Move between fields or stats"),
            ("←/→  -/+", "Lower / raise selected stat"),
            ("Enter", "Next field / create"),
            ("Ctrl+S", "Create character"),
            ("", ""),
            ("In Game:", ""),
            ("Enter", "Send action / roll dice"),
            ("Ctrl+R", "Roll dice"),
            ("PgUp / PgDn", "Scroll story"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("F1", Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" or "),
            Span::styled("Esc", Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let modal = centered_rect(50, 25, area);
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme::TEXT))),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":ok"),
        ]),
    ];
    let block = Block::default()
        .title(" Notice ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::WARNING));

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        modal,
    );
}

// ── Input mapping ───────────────────────────────────────────────────────

fn pressed(event: &Event) -> Option<(KeyModifiers, KeyCode)> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => Some((*modifiers, *code)),
        _ => None,
    }
}

fn is_quit(modifiers: KeyModifiers, code: KeyCode) -> bool {
    modifiers == KeyModifiers::CONTROL && matches!(code, KeyCode::Char('c') | KeyCode::Char('q'))
}

/// The alert blocks everything except dismissal and quitting.
fn map_alert_input(event: &Event) -> Option<Action> {
    let (modifiers, code) = pressed(event)?;
    if is_quit(modifiers, code) {
        return Some(Action::Quit);
    }
    match code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::DismissAlert),
        _ => None,
    }
}

fn map_help_input(event: &Event) -> Option<Action> {
    let (modifiers, code) = pressed(event)?;
    if is_quit(modifiers, code) {
        return Some(Action::Quit);
    }
    match code {
        KeyCode::Esc | KeyCode::F(1) => Some(Action::CloseHelp),
        _ => None,
    }
}

fn map_input_to_action(event: &Event) -> Option<Action> {
    let (modifiers, code) = pressed(event)?;
    if is_quit(modifiers, code) {
        return Some(Action::Quit);
    }
    match code {
        KeyCode::F(1) => Some(Action::ShowHelp),
        KeyCode::Up if modifiers == KeyModifiers::SHIFT => Some(Action::ScrollLogUp),
        KeyCode::Down if modifiers == KeyModifiers::SHIFT => Some(Action::ScrollLogDown),
        _ => None,
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
