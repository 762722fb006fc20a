//! Single-line text input with cursor management and rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::{Line, Span};

use crate::tui::theme;

/// A simple text input buffer with cursor positioning.
///
/// `cursor` is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some((prev, _)) = self.content[..self.cursor].char_indices().next_back() {
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.content.drain(self.cursor..self.cursor + c.len_utf8());
        }
    }

    pub fn move_left(&mut self) {
        if let Some((prev, _)) = self.content[..self.cursor].char_indices().next_back() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Apply an editing key. `None` if the key is not an editing key,
    /// otherwise whether the text changed.
    pub fn apply_key(&mut self, key: &KeyEvent) -> Option<bool> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                Some(true)
            }
            KeyCode::Backspace => {
                let before = self.content.len();
                self.backspace();
                Some(self.content.len() != before)
            }
            KeyCode::Delete => {
                let before = self.content.len();
                self.delete();
                Some(self.content.len() != before)
            }
            KeyCode::Left => {
                self.move_left();
                Some(false)
            }
            KeyCode::Right => {
                self.move_right();
                Some(false)
            }
            KeyCode::Home => {
                self.move_home();
                Some(false)
            }
            KeyCode::End => {
                self.move_end();
                Some(false)
            }
            _ => None,
        }
    }

    /// Take the content out, resetting the buffer.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Whitespace-only counts as empty.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor, for `Frame::set_cursor_position`.
    pub fn cursor_column(&self) -> u16 {
        Span::raw(&self.content[..self.cursor]).width() as u16
    }

    /// Render as one line. An empty buffer shows `placeholder`; a disabled
    /// one is dimmed.
    pub fn render_line<'a>(&'a self, placeholder: &'a str, enabled: bool) -> Line<'a> {
        if self.content.is_empty() {
            return Line::from(Span::styled(placeholder, theme::dim()));
        }
        let style = if enabled {
            ratatui::style::Style::default().fg(theme::TEXT)
        } else {
            theme::dim()
        };
        Line::from(Span::styled(self.content.as_str(), style))
    }
}
