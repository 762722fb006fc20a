//! In-game view: narrative log, action input, and the sidebar panels.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::client::GameClient;
use crate::tui::layout::{split_game_main, split_sidebar};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;
use crate::tui::widgets::markup;

use super::{dice_panel, sheet};

const SCROLL_STEP: u16 = 5;

pub struct GameViewState {
    input: InputBuffer,
    /// Lines scrolled up from the bottom of the log (0 = follow).
    scroll: u16,
}

impl GameViewState {
    pub fn new() -> Self {
        Self {
            input: InputBuffer::new(),
            scroll: 0,
        }
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_add(SCROLL_STEP);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
    }

    /// Handle input events. Returns `true` if the event was consumed.
    pub fn handle_input(
        &mut self,
        event: &Event,
        client: &mut GameClient,
        services: &Services,
    ) -> bool {
        let Event::Key(
            key @ KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            },
        ) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                self.roll(client, services);
                return true;
            }
            (_, KeyCode::PageUp) => {
                self.scroll_up();
                return true;
            }
            (_, KeyCode::PageDown) => {
                self.scroll_down();
                return true;
            }
            (_, KeyCode::Enter) => {
                if client.dice_enabled() {
                    self.roll(client, services);
                } else {
                    self.submit_action(client, services);
                }
                return true;
            }
            _ => {}
        }

        if !client.action_input_enabled() {
            // Swallow typing while the input is disabled.
            return matches!(code, KeyCode::Char(_)) && !modifiers.contains(KeyModifiers::CONTROL);
        }
        self.input.apply_key(key).is_some()
    }

    fn submit_action(&mut self, client: &mut GameClient, services: &Services) {
        if let Some(request) = client.submit_action(self.input.text()) {
            self.input.clear();
            self.scroll = 0;
            services.submit_turn(request);
        }
    }

    fn roll(&mut self, client: &mut GameClient, services: &Services) {
        if let Some(request) = client.request_roll() {
            self.scroll = 0;
            services.submit_roll(request);
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, main: Rect, sidebar: Option<Rect>, client: &GameClient) {
        let (log_area, input_area) = split_game_main(main);
        self.render_log(frame, log_area, client);
        self.render_input(frame, input_area, client);

        if let Some(sidebar) = sidebar {
            let [sheet_area, inventory_area, dice_area] = split_sidebar(sidebar);
            sheet::render_character(frame, sheet_area, client.character());
            sheet::render_inventory(frame, inventory_area, client.inventory());
            dice_panel::render(frame, dice_area, client);
        }
    }

    fn render_log(&self, frame: &mut Frame, area: Rect, client: &GameClient) {
        let block = theme::block_default("Story");
        let inner = block.inner(area);
        let lines: Vec<Line> = client
            .log()
            .iter()
            .flat_map(markup::log_entry_lines)
            .collect();
        frame.render_widget(
            story_paragraph(lines, inner.width, inner.height, self.scroll).block(block),
            area,
        );
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, client: &GameClient) {
        let enabled = client.action_input_enabled();
        let block = if enabled {
            theme::block_focused("Action")
        } else {
            theme::block_default("Action")
        };
        let inner = block.inner(area);
        let placeholder = client.action_placeholder();
        frame.render_widget(
            Paragraph::new(self.input.render_line(&placeholder, enabled)).block(block),
            area,
        );
        if enabled {
            frame.set_cursor_position((inner.x + self.input.cursor_column(), inner.y));
        }
    }
}

impl Default for GameViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// The wrapped story log, scrolled so its last row sits at the bottom of a
/// `width` x `height` area, then moved up by `scroll_back` rows.
pub fn story_paragraph(
    lines: Vec<Line<'static>>,
    width: u16,
    height: u16,
    scroll_back: u16,
) -> Paragraph<'static> {
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(width);
    paragraph.scroll((scroll_offset(rows, height, scroll_back), 0))
}

/// Top row to show so that the bottom of `rows` wrapped rows is visible,
/// moved up by `scroll_back`.
pub fn scroll_offset(rows: usize, height: u16, scroll_back: u16) -> u16 {
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_sub(height)
        .saturating_sub(scroll_back)
}
