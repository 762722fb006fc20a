//! Character sheet and inventory panels.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::core::character::Character;
use crate::core::stats::StatKey;
use crate::tui::theme;

/// `7/14`
pub fn resource_label(current: i32, maximum: i32) -> String {
    format!("{current}/{maximum}")
}

pub fn render_character(frame: &mut Frame, area: Rect, character: Option<&Character>) {
    let Some(character) = character else {
        frame.render_widget(
            Paragraph::new(Span::styled("No character", theme::dim()))
                .block(theme::block_default("Character")),
            area,
        );
        return;
    };

    let block = theme::block_default(&character.name).title_style(theme::title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(2), // Location + scenario
        Constraint::Length(1), // HP
        Constraint::Length(1), // SP
        Constraint::Min(0),    // Stats
    ])
    .split(inner);

    let place = vec![
        Line::from(vec![
            Span::styled("Location ", theme::muted()),
            Span::raw(character.location_label().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Scene    ", theme::muted()),
            Span::raw(character.scenario_label().to_string()),
        ]),
    ];
    frame.render_widget(Paragraph::new(place), rows[0]);

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(theme::HP))
            .percent(character.hp_percent())
            .label(format!("HP {}", resource_label(character.hp, character.max_hp))),
        rows[1],
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(theme::SP))
            .percent(character.sp_percent())
            .label(format!("SP {}", resource_label(character.sp, character.max_sp))),
        rows[2],
    );

    let stats: Vec<Line> = StatKey::ALL
        .iter()
        .map(|&key| {
            Line::from(vec![
                Span::styled(format!("{:<13}", key.label()), theme::muted()),
                Span::styled(character.stats.get(key).to_string(), theme::title()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(stats), rows[3]);
}

pub fn render_inventory(frame: &mut Frame, area: Rect, items: &[String]) {
    let block = theme::block_default("Inventory");
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("(empty)", theme::dim())).block(block),
            area,
        );
        return;
    }
    let list: Vec<ListItem> = items
        .iter()
        .map(|item| ListItem::new(format!("• {item}")))
        .collect();
    frame.render_widget(List::new(list).block(block), area);
}
