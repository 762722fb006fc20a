//! Render narrative markup and log entries as ratatui lines.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::client::{LogEntry, Speaker};
use crate::core::markup::{self, Segment};
use crate::tui::theme;

/// Convert markup to owned lines. Bold segments add `BOLD` to `base`.
pub fn to_lines(input: &str, base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for segment in markup::parse(input) {
        match segment {
            Segment::Text { text, bold } => {
                let style = if bold {
                    base.add_modifier(Modifier::BOLD)
                } else {
                    base
                };
                current.push(Span::styled(text, style));
            }
            Segment::LineBreak => lines.push(Line::from(std::mem::take(&mut current))),
        }
    }
    lines.push(Line::from(current));
    lines
}

/// Text shown exactly as written, one line per `\n`.
pub fn literal_lines(input: &str, base: Style) -> Vec<Line<'static>> {
    input
        .split('\n')
        .map(|line| Line::from(Span::styled(line.trim_end_matches('\r').to_string(), base)))
        .collect()
}

/// A log entry with its speaker prefix on the first line and a blank
/// separator after it. Player text is never parsed as markup.
pub fn log_entry_lines(entry: &LogEntry) -> Vec<Line<'static>> {
    let base = Style::default().fg(theme::TEXT);
    let mut lines = match entry.speaker {
        Speaker::Player => literal_lines(&entry.text, base),
        Speaker::Gm | Speaker::System => to_lines(&entry.text, base),
    };
    let prefix = Span::styled(format!("{}: ", entry.speaker.label()), theme::speaker(entry.speaker));
    if let Some(first) = lines.first_mut() {
        first.spans.insert(0, prefix);
    }
    lines.push(Line::raw(""));
    lines
}
