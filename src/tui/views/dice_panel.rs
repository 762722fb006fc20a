//! Dice panel: roll control label, current faces, and the last roll's
//! breakdown.

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::client::{GameClient, RollSummary};
use crate::core::dice::DiceDisplay;
use crate::tui::theme;

/// `4 + 5 (+1) = 10, success`. Parts the backend omitted are left out.
pub fn breakdown(summary: &RollSummary) -> String {
    let (d1, d2) = summary.dice;
    let mut text = format!("{d1} + {d2}");
    if let Some(modifier) = summary.modifier {
        text.push_str(&format!(" ({modifier:+})"));
    }
    if let Some(total) = summary.total {
        text.push_str(&format!(" = {total}"));
    }
    if let Some(outcome) = summary.outcome.as_deref().filter(|o| !o.trim().is_empty()) {
        text.push_str(&format!(", {outcome}"));
    }
    text
}

pub fn render(frame: &mut Frame, area: Rect, client: &GameClient) {
    let enabled = client.dice_enabled();
    let label = client.dice_label();
    let block = if enabled {
        theme::block_focused(&label)
    } else {
        theme::block_default(&label)
    };

    let display = client.dice_display();
    let face_style = match display {
        DiceDisplay::Rolling(..) => theme::muted().add_modifier(Modifier::BOLD),
        DiceDisplay::Unknown => theme::title().fg(theme::ERROR),
        DiceDisplay::Idle | DiceDisplay::Final(..) => theme::title(),
    };

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(format!("🎲 {display}"), face_style)),
    ];

    match client.last_roll() {
        Some(summary) if !client.is_animating() => {
            lines.push(Line::from(Span::styled(breakdown(summary), theme::muted())));
        }
        _ => lines.push(Line::raw("")),
    }

    lines.push(Line::from(if enabled {
        vec![
            Span::styled("Enter", theme::key_hint()),
            Span::styled(":roll", theme::highlight()),
        ]
    } else if client.is_animating() {
        vec![Span::styled("rolling...", theme::muted())]
    } else {
        vec![Span::styled("no roll requested", theme::dim())]
    }));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
