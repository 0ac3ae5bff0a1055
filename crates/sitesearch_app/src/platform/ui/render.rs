use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use sitesearch_core::{AppViewModel, InputField, ResultCardView};

use super::constants::*;
use super::input::{Focus, UiCursor};
use super::layout;

/// Draws one frame. Everything shown is derived from `view` and `cursor`.
pub fn draw(frame: &mut Frame<'_>, view: &AppViewModel, cursor: &UiCursor) {
    let areas = layout::split(frame.area());

    draw_header(frame, areas.header);
    draw_input(
        frame,
        areas.url_input,
        InputBox {
            title: URL_TITLE,
            placeholder: URL_PLACEHOLDER,
            value: &view.url,
            focused: cursor.focus == Focus::Url,
            missing: view.missing_field == Some(InputField::Url),
        },
    );
    draw_input(
        frame,
        areas.query_input,
        InputBox {
            title: QUERY_TITLE,
            placeholder: QUERY_PLACEHOLDER,
            value: &view.query,
            focused: cursor.focus == Focus::Query,
            missing: view.missing_field == Some(InputField::Query),
        },
    );
    draw_submit(frame, areas.submit, view);
    draw_status(frame, areas.status, view);
    draw_results(frame, areas.results, view, cursor);
    draw_footer(frame, areas.footer);
}

fn draw_header(frame: &mut Frame<'_>, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(ACCENT_LIGHT))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

struct InputBox<'a> {
    title: &'a str,
    placeholder: &'a str,
    value: &'a str,
    focused: bool,
    missing: bool,
}

fn draw_input(frame: &mut Frame<'_>, area: Rect, input: InputBox<'_>) {
    let border = if input.missing {
        Style::default().fg(ERROR)
    } else if input.focused {
        Style::default().fg(ACCENT_LIGHT)
    } else {
        Style::default().fg(MUTED)
    };
    let inner_width = area.width.saturating_sub(2) as usize;
    let text = if input.value.is_empty() {
        Span::styled(input.placeholder, Style::default().fg(MUTED))
    } else {
        Span::raw(tail(input.value, inner_width.saturating_sub(1)))
    };
    let widget = Paragraph::new(Line::from(text)).block(
        Block::bordered()
            .title(input.title)
            .border_style(border),
    );
    frame.render_widget(widget, area);

    if input.focused && area.width > 2 && area.height > 2 {
        let typed = input.value.chars().count().min(inner_width.saturating_sub(1)) as u16;
        frame.set_cursor_position(Position::new(area.x + 1 + typed, area.y + 1));
    }
}

/// Last `width` characters of `value`, so the caret end stays visible.
fn tail(value: &str, width: usize) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(width)).collect()
}

fn draw_submit(frame: &mut Frame<'_>, area: Rect, view: &AppViewModel) {
    let style = if view.submit_enabled {
        Style::default()
            .fg(ratatui::style::Color::White)
            .bg(ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    };
    let button = Paragraph::new(Line::from(Span::styled(
        format!("[ {} ]", view.submit_label),
        style,
    )))
    .alignment(Alignment::Center);
    frame.render_widget(button, area);
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, view: &AppViewModel) {
    let line = if view.missing_field.is_some() {
        Line::from(Span::styled(REQUIRED_HINT, Style::default().fg(ERROR)))
    } else if let Some(error) = &view.error {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_results(frame: &mut Frame<'_>, area: Rect, view: &AppViewModel, cursor: &UiCursor) {
    let width = area.width.saturating_sub(4) as usize;
    let (lines, card_starts) = result_lines(view, cursor, width);
    let offset = match (cursor.selected, card_starts.get(cursor.selected)) {
        (0, _) | (_, None) => 0,
        (_, Some(start)) => *start,
    };
    let results = Paragraph::new(lines).scroll((offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(results, area);
}

/// Flattens the result list into lines, returning the first line of each card.
fn result_lines(
    view: &AppViewModel,
    cursor: &UiCursor,
    width: usize,
) -> (Vec<Line<'static>>, Vec<usize>) {
    let mut lines = Vec::new();
    let mut card_starts = Vec::with_capacity(view.results.len());

    if let Some(heading) = view.results_heading {
        lines.push(
            Line::from(Span::styled(
                heading,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(Line::default());
    }

    for card in &view.results {
        card_starts.push(lines.len());
        let selected = cursor.focus == Focus::Results && cursor.selected == card.index;
        let scroll = if cursor.selected == card.index {
            cursor.panel_scroll as usize
        } else {
            0
        };
        push_card(&mut lines, card, selected, scroll, width);
    }

    (lines, card_starts)
}

fn push_card(
    lines: &mut Vec<Line<'static>>,
    card: &ResultCardView,
    selected: bool,
    scroll: usize,
    width: usize,
) {
    let marker = if selected { "▶ " } else { "  " };
    lines.push(Line::from(vec![
        Span::styled(marker, Style::default().fg(ACCENT_LIGHT)),
        Span::styled(
            format!("[{}]", card.score_label),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Path: ", Style::default().fg(ACCENT_LIGHT)),
        Span::styled(card.path.clone(), Style::default().fg(ACCENT)),
    ]));

    push_panel(lines, &card.chunk, CHUNK_MAX_ROWS, scroll, width, Style::default());

    let mut toggle_style = Style::default().fg(LINK).add_modifier(Modifier::BOLD);
    if selected {
        toggle_style = toggle_style.add_modifier(Modifier::REVERSED);
    }
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(card.toggle_label, toggle_style),
    ]));

    if let Some(html) = &card.html {
        push_panel(
            lines,
            html,
            HTML_MAX_ROWS,
            scroll,
            width,
            Style::default().fg(MUTED),
        );
    }
    lines.push(Line::default());
}

/// Renders `text` as preformatted rows inside a bounded window starting at
/// `scroll`, with markers when rows are hidden above or below.
fn push_panel(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    max_rows: usize,
    scroll: usize,
    width: usize,
    style: Style,
) {
    let rows = wrap_preformatted(text, width.max(1));
    let start = scroll.min(rows.len().saturating_sub(max_rows));
    let end = (start + max_rows).min(rows.len());

    if start > 0 {
        lines.push(indicator(format!("↑ {start} more line(s)")));
    }
    for row in &rows[start..end] {
        lines.push(Line::from(vec![
            Span::styled("  │ ", Style::default().fg(MUTED)),
            Span::styled(row.clone(), style),
        ]));
    }
    if end < rows.len() {
        lines.push(indicator(format!("↓ {} more line(s)", rows.len() - end)));
    }
}

fn indicator(text: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("  │ {text}"),
        Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
    ))
}

/// Splits on line breaks, keeps inner whitespace, expands tabs and hard-wraps
/// long rows at `width` characters.
fn wrap_preformatted(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for raw in text.split('\n') {
        let line = raw.trim_end_matches('\r').replace('\t', "    ");
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        for piece in chars.chunks(width) {
            rows.push(piece.iter().collect());
        }
    }
    rows
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect) {
    let footer = Paragraph::new(HELP_TEXT).style(Style::default().fg(MUTED));
    frame.render_widget(footer, area);
}
