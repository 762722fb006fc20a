//! Root layout computation for main content + character sidebar + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the character sidebar.
pub const SIDEBAR_WIDTH: u16 = 34;
/// Hide the sidebar below this terminal width.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 70;
/// Height of the action input box, borders included.
pub const INPUT_HEIGHT: u16 = 3;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Character sidebar (None in creation mode or when too narrow).
    pub sidebar: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect, want_sidebar: bool) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        if !want_sidebar || area.width < HIDE_SIDEBAR_THRESHOLD {
            return AppLayout {
                sidebar: None,
                main: content_area,
                status,
            };
        }

        let cols = Layout::horizontal([Constraint::Min(1), Constraint::Length(SIDEBAR_WIDTH)])
            .split(content_area);
        AppLayout {
            sidebar: Some(cols[1]),
            main: cols[0],
            status,
        }
    }
}

/// Split the in-game main area into the narrative log and the action input.
pub fn split_game_main(main: Rect) -> (Rect, Rect) {
    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(INPUT_HEIGHT)]).split(main);
    (rows[0], rows[1])
}

/// Sidebar panels: character sheet, inventory, dice.
pub fn split_sidebar(sidebar: Rect) -> [Rect; 3] {
    let rows = Layout::vertical([
        Constraint::Length(12),
        Constraint::Min(3),
        Constraint::Length(7),
    ])
    .split(sidebar);
    [rows[0], rows[1], rows[2]]
}
