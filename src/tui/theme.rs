//! Ember & Slate color theme for the client.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::client::Speaker;

// ── Primary palette ─────────────────────────────────────────────────────────

/// Ember — primary accent, focused borders, active controls.
pub const PRIMARY: Color = Color::Rgb(0xE0, 0x7A, 0x3F);
/// Light ember — hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xF2, 0xA0, 0x6B);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Brass — titles, dice faces.
pub const ACCENT: Color = Color::Rgb(0xD9, 0xB9, 0x5B);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Slate — base background.
pub const BG_BASE: Color = Color::Rgb(0x1B, 0x1E, 0x24);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE6, 0xE1, 0xD6);
pub const TEXT_MUTED: Color = Color::Rgb(0x8C, 0x88, 0x80);
/// Disabled controls, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x55, 0x52, 0x4D);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xE5, 0x53, 0x4B);
pub const SUCCESS: Color = Color::Rgb(0x7B, 0xB6, 0x6A);
pub const WARNING: Color = Color::Rgb(0xF0, 0xB2, 0x3E);

// ── Domain ──────────────────────────────────────────────────────────────────

/// GM narration.
pub const GM: Color = Color::Rgb(0xC9, 0xA7, 0xE8);
/// Player lines.
pub const PLAYER: Color = Color::Rgb(0x79, 0xC2, 0xD0);
/// HP gauge.
pub const HP: Color = Color::Rgb(0xC8, 0x4B, 0x4B);
/// SP gauge.
pub const SP: Color = Color::Rgb(0x4B, 0x7B, 0xC8);

// ── Style helpers ───────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn highlight() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "Enter:send").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Enabled or disabled control text.
pub fn control(enabled: bool) -> Style {
    if enabled {
        highlight()
    } else {
        dim()
    }
}

pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Badge shown while a request is in flight.
pub fn busy_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(WARNING)
        .add_modifier(Modifier::BOLD)
}

pub fn speaker(speaker: Speaker) -> Style {
    let color = match speaker {
        Speaker::Gm => GM,
        Speaker::Player => PLAYER,
        Speaker::System => TEXT_MUTED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}
