//! Form screen: contact details, description, palette.

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::PALETTES;
use crate::session::Field;

use super::super::app::{Focus, TuiApp};
use super::shared::{cursor_xy, swatch_color, title_style, wrap_chars};

const LABEL_WIDTH: u16 = 16;

const DETAILS: [(Field, &str); 4] = [
    (Field::UserName, "Your name"),
    (Field::BusinessName, "Business name"),
    (Field::UserEmail, "Email"),
    (Field::UserPhone, "Phone"),
];

pub(super) fn draw_form(f: &mut Frame, app: &TuiApp, area: Rect) {
    let [details, description, palette] = Layout::vertical([
        Constraint::Length(DETAILS.len() as u16 + 2),
        Constraint::Min(5),
        Constraint::Length(6),
    ])
    .areas(area);

    draw_details(f, app, details);
    draw_description(f, app, description);
    draw_palettes(f, app, palette);
}

fn draw_details(f: &mut Frame, app: &TuiApp, area: Rect) {
    let any_focused = DETAILS.iter().any(|(field, _)| app.focus == Focus::Field(*field));
    let block = Block::default()
        .title(" 1. Your details ")
        .borders(Borders::ALL)
        .border_style(title_style(any_focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row, (field, label)) in DETAILS.iter().enumerate() {
        let y = inner.y + row as u16;
        if y >= inner.bottom() {
            break;
        }
        let focused = app.focus == Focus::Field(*field);
        let label_area = Rect::new(inner.x, y, LABEL_WIDTH.min(inner.width), 1);
        let value_area = Rect::new(
            inner.x + label_area.width,
            y,
            inner.width.saturating_sub(label_area.width),
            1,
        );

        let marker = if focused { "▸ " } else { "  " };
        f.render_widget(
            Paragraph::new(Span::styled(format!("{marker}{label}"), title_style(focused))),
            label_area,
        );

        let (visible, cursor_col) = app.input(*field).window(value_area.width);
        f.render_widget(Paragraph::new(visible), value_area);
        if focused {
            f.set_cursor_position(Position::new(value_area.x + cursor_col, y));
        }
    }
}

fn draw_description(f: &mut Frame, app: &TuiApp, area: Rect) {
    let focused = app.focus == Focus::Field(Field::Description);
    let mut title = vec![Span::raw(" 2. Describe your business ")];
    if app.dictation.is_listening() {
        title.push(Span::styled(
            "● listening ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(title_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let input = app.input(Field::Description);
    if input.content().is_empty() && !focused {
        f.render_widget(
            Paragraph::new("Use your voice (^D) or type in any language. Be as descriptive as you can! ^E for an example.")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let rows = wrap_chars(input.content(), inner.width);
    let (cx, cy) = cursor_xy(input.content(), input.cursor(), inner.width);
    let scroll = cy.saturating_sub(inner.height.saturating_sub(1));
    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

    if focused {
        f.set_cursor_position(Position::new(inner.x + cx, inner.y + cy - scroll));
    }
}

fn draw_palettes(f: &mut Frame, app: &TuiApp, area: Rect) {
    let focused = app.focus == Focus::Palette;
    let block = Block::default()
        .title(" 3. Choose a style ")
        .borders(Borders::ALL)
        .border_style(title_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let selected = app.session.form().palette.as_deref();
    let mut spans = Vec::new();
    for (i, palette) in PALETTES.iter().enumerate() {
        let is_selected = selected == Some(palette.name);
        let is_cursor = focused && i == app.palette_cursor;
        let mut name_style = if is_selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if is_cursor {
            name_style = name_style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::raw(" "));
        for class in [palette.swatch.bg, palette.swatch.primary, palette.swatch.subtle] {
            spans.push(Span::styled("█", Style::default().fg(swatch_color(class))));
        }
        let check = if is_selected { "✓" } else { " " };
        spans.push(Span::styled(format!(" {}{check} ", palette.name), name_style));
    }

    let described = PALETTES[app.palette_cursor.min(PALETTES.len() - 1)].description;
    let text = vec![
        Line::from(spans),
        Line::from(Span::styled(described, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}
