//! Shared rendering pieces: status bar, caption overlay, wrapping helpers.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use super::super::app::TuiApp;
use super::super::input::hints;

pub(super) fn draw_status(f: &mut Frame, app: &TuiApp, area: Rect) {
    let line = if let Some(err) = app.error_text() {
        Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(Color::White).bg(Color::Red),
        ))
    } else if let Some(notice) = &app.notice {
        Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Black).bg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", hints(app.view())),
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

/// The narrator's caption, centered near the bottom.
pub(super) fn draw_caption(f: &mut Frame, text: &str, area: Rect) {
    let width = area.width.saturating_sub(8).min(80).max(20);
    let inner_width = width.saturating_sub(2).max(1);
    let height = (wrap_chars(text, inner_width).len() as u16 + 2).min(area.height.saturating_sub(2));

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::End)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::default()
        .title(" 🔊 Speaking (Esc to dismiss) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text.to_string())
            .wrap(Wrap { trim: false })
            .block(block),
        popup,
    );
}

/// A bordered box centered in `area`.
pub(super) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub(super) fn title_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Break `text` into rows of at most `width` columns, by character.
/// Matches `cursor_xy` exactly, which word wrapping would not.
pub(super) fn wrap_chars(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = vec![String::new()];
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            rows.push(String::new());
            used = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        used += w;
    }
    rows
}

/// Column and row of the cursor (a char offset) in `wrap_chars` output.
pub(super) fn cursor_xy(text: &str, cursor: usize, width: u16) -> (u16, u16) {
    let width = usize::from(width.max(1));
    let (mut x, mut y) = (0usize, 0usize);
    for ch in text.chars().take(cursor) {
        let w = ch.width().unwrap_or(0);
        if x + w > width {
            x = 0;
            y += 1;
        }
        x += w;
    }
    if x >= width {
        x = 0;
        y += 1;
    }
    (x as u16, y as u16)
}

/// Terminal color for a palette's Tailwind class.
pub(super) fn swatch_color(class: &str) -> Color {
    let name = class
        .trim_start_matches("bg-")
        .trim_start_matches("text-");
    match name {
        "white" => Color::Rgb(255, 255, 255),
        "indigo-600" => Color::Rgb(79, 70, 229),
        "orange-500" => Color::Rgb(249, 115, 22),
        "blue-800" => Color::Rgb(30, 64, 175),
        "amber-400" => Color::Rgb(251, 191, 36),
        "yellow-50" => Color::Rgb(254, 252, 232),
        "slate-100" => Color::Rgb(241, 245, 249),
        "gray-50" => Color::Rgb(249, 250, 251),
        "gray-700" => Color::Rgb(55, 65, 81),
        "gray-800" => Color::Rgb(31, 41, 55),
        "gray-900" => Color::Rgb(17, 24, 39),
        _ => Color::Gray,
    }
}
