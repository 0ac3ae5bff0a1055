use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub url_input: Rect,
    pub query_input: Rect,
    pub submit: Rect,
    pub status: Rect,
    pub results: Rect,
    pub footer: Rect,
}

pub fn split(area: Rect) -> ScreenLayout {
    let rows = Layout::vertical([
        // Title and subtitle
        Constraint::Length(3),
        // Inputs, each with a border
        Constraint::Length(3),
        Constraint::Length(3),
        // Submit button
        Constraint::Length(1),
        // Validation hint or error message
        Constraint::Length(1),
        // Results fill the remaining space
        Constraint::Min(3),
        // Key help
        Constraint::Length(1),
    ])
    .split(area);

    ScreenLayout {
        header: rows[0],
        url_input: centered(rows[1]),
        query_input: centered(rows[2]),
        submit: centered(rows[3]),
        status: centered(rows[4]),
        results: rows[5],
        footer: rows[6],
    }
}

/// Narrows form rows to a readable width, like a centered card.
fn centered(row: Rect) -> Rect {
    const FORM_WIDTH: u16 = 72;
    if row.width <= FORM_WIDTH {
        return row;
    }
    let margin = (row.width - FORM_WIDTH) / 2;
    Rect {
        x: row.x + margin,
        width: FORM_WIDTH,
        ..row
    }
}
