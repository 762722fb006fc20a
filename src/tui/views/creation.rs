//! Character-creation form.
//!
//! Name, point-buy stats, inventory and an optional description. Text
//! edits are mirrored into the controller on every keystroke; the view
//! only keeps focus and cursor state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::client::GameClient;
use crate::core::stats::{self, StatKey, MAX_STAT, MIN_STAT};
use crate::tui::events::Focus;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;
use crate::tui::widgets::markup;

const NAME_PLACEHOLDER: &str = "Character name";
const INVENTORY_PLACEHOLDER: &str = "Comma separated, e.g. rope, lantern, old map";
const DESCRIPTION_PLACEHOLDER: &str = "Optional background";

pub struct CreationViewState {
    focus: Focus,
    name: InputBuffer,
    inventory: InputBuffer,
    description: InputBuffer,
    /// Index into `StatKey::ALL`.
    stat_cursor: usize,
}

impl CreationViewState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Name,
            name: InputBuffer::new(),
            inventory: InputBuffer::new(),
            description: InputBuffer::new(),
            stat_cursor: 0,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected_stat(&self) -> StatKey {
        StatKey::ALL[self.stat_cursor]
    }

    /// Handle input events. Returns `true` if the event was consumed.
    pub fn handle_input(
        &mut self,
        event: &Event,
        client: &mut GameClient,
        services: &Services,
    ) -> bool {
        let Event::Key(key @ KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (_, KeyCode::Tab) => {
                self.focus = self.focus.next();
                return true;
            }
            (_, KeyCode::BackTab) => {
                self.focus = self.focus.prev();
                return true;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                self.submit(client, services);
                return true;
            }
            _ => {}
        }

        match self.focus {
            Focus::Stats => self.handle_stats_key(*code, client),
            Focus::Create => match code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.submit(client, services);
                    true
                }
                KeyCode::Up => {
                    self.focus = self.focus.prev();
                    true
                }
                _ => false,
            },
            field => match code {
                KeyCode::Enter | KeyCode::Down => {
                    self.focus = field.next();
                    true
                }
                KeyCode::Up => {
                    self.focus = field.prev();
                    true
                }
                _ => self.edit_text(field, key, client),
            },
        }
    }

    fn handle_stats_key(&mut self, code: KeyCode, client: &mut GameClient) -> bool {
        let last = StatKey::ALL.len() - 1;
        match code {
            KeyCode::Up if self.stat_cursor == 0 => self.focus = self.focus.prev(),
            KeyCode::Up => self.stat_cursor -= 1,
            KeyCode::Down | KeyCode::Enter if self.stat_cursor == last => {
                self.focus = self.focus.next()
            }
            KeyCode::Down | KeyCode::Enter => self.stat_cursor += 1,
            KeyCode::Left | KeyCode::Char('-') => {
                client.decrement_stat(self.selected_stat());
            }
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                client.increment_stat(self.selected_stat());
            }
            _ => return false,
        }
        true
    }

    fn edit_text(&mut self, field: Focus, key: &KeyEvent, client: &mut GameClient) -> bool {
        let buffer = match field {
            Focus::Name => &mut self.name,
            Focus::Inventory => &mut self.inventory,
            Focus::Description => &mut self.description,
            Focus::Stats | Focus::Create => return false,
        };
        let Some(changed) = buffer.apply_key(key) else {
            return false;
        };
        if changed {
            let text = buffer.text();
            match field {
                Focus::Name => client.set_name(text),
                Focus::Inventory => client.set_inventory_text(text),
                Focus::Description => client.set_description(text),
                Focus::Stats | Focus::Create => {}
            }
        }
        true
    }

    fn submit(&mut self, client: &mut GameClient, services: &Services) {
        if let Some(request) = client.submit_creation() {
            services.create_character(request);
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, client: &GameClient) {
        let block = theme::block_focused("New Character").title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(3),                              // Name
            Constraint::Length(StatKey::ALL.len() as u16 + 4), // Stats
            Constraint::Length(3),                              // Inventory
            Constraint::Length(3),                              // Description
            Constraint::Length(2),                              // Create + preview
            Constraint::Min(0),                                 // Messages
        ])
        .split(inner);

        self.render_text_field(frame, rows[0], Focus::Name, &self.name, NAME_PLACEHOLDER);
        self.render_stats(frame, rows[1], client);
        self.render_text_field(
            frame,
            rows[2],
            Focus::Inventory,
            &self.inventory,
            INVENTORY_PLACEHOLDER,
        );
        self.render_text_field(
            frame,
            rows[3],
            Focus::Description,
            &self.description,
            DESCRIPTION_PLACEHOLDER,
        );
        self.render_create(frame, rows[4], client);
        render_messages(frame, rows[5], client);
    }

    fn render_text_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: Focus,
        buffer: &InputBuffer,
        placeholder: &str,
    ) {
        let focused = self.focus == field;
        let block = if focused {
            theme::block_focused(field.label())
        } else {
            theme::block_default(field.label())
        };
        let inner = block.inner(area);
        frame.render_widget(
            Paragraph::new(buffer.render_line(placeholder, true)).block(block),
            area,
        );
        if focused {
            frame.set_cursor_position((inner.x + buffer.cursor_column(), inner.y));
        }
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, client: &GameClient) {
        let focused = self.focus == Focus::Stats;
        let allocation = client.creation().allocation();
        let title = format!("Stats ({} points left)", allocation.remaining());
        let block = if focused {
            theme::block_focused(&title)
        } else {
            theme::block_default(&title)
        };

        let mut lines: Vec<Line> = StatKey::ALL
            .iter()
            .enumerate()
            .map(|(i, &key)| {
                let value = allocation.value(key);
                let selected = focused && i == self.stat_cursor;
                let marker = if selected { "▸ " } else { "  " };
                let label_style = if selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                Line::from(vec![
                    Span::styled(marker, theme::highlight()),
                    Span::styled(format!("{:<13}", key.label()), label_style),
                    Span::styled("[-]", theme::control(allocation.can_decrement(key))),
                    Span::styled(format!(" {value} "), theme::title()),
                    Span::styled("[+]", theme::control(allocation.can_increment(key))),
                    Span::styled(
                        format!("  mod {:+}", stats::modifier(value)),
                        theme::muted(),
                    ),
                ])
            })
            .collect();

        let current = allocation.stats();
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("Range {MIN_STAT}-{MAX_STAT}  "),
                theme::key_hint(),
            ),
            Span::styled("HP ", theme::muted()),
            Span::styled(stats::projected_max_hp(&current).to_string(), theme::title()),
            Span::styled("  SP ", theme::muted()),
            Span::styled(stats::projected_max_sp(&current).to_string(), theme::title()),
        ]));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_create(&self, frame: &mut Frame, area: Rect, client: &GameClient) {
        let focused = self.focus == Focus::Create;
        let label = if client.is_creating() {
            "Creating...".to_string()
        } else if focused {
            "▸ [ Create Character ]".to_string()
        } else {
            "  [ Create Character ]".to_string()
        };
        let lines = vec![
            Line::from(Span::styled(label, theme::control(client.can_create()))),
            Line::from(vec![
                Span::styled("Tab", theme::key_hint()),
                Span::raw(":next  "),
                Span::styled("←/→", theme::key_hint()),
                Span::raw(":adjust stat  "),
                Span::styled("Ctrl+S", theme::key_hint()),
                Span::raw(":create"),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Default for CreationViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend messages received before the game starts (creation failures).
fn render_messages(frame: &mut Frame, area: Rect, client: &GameClient) {
    if area.height == 0 || client.log().is_empty() {
        return;
    }
    let lines: Vec<Line> = client
        .log()
        .iter()
        .flat_map(markup::log_entry_lines)
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(theme::block_default("Messages")),
        area,
    );
}
