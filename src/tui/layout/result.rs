//! Result screen: site preview or source on the right, assistant and
//! marketing panes on the left. Also the "generation failed" and loading
//! screens.

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::session::Field;

use super::super::app::TuiApp;
use super::shared::{centered, title_style};

pub(super) fn draw_result(f: &mut Frame, app: &TuiApp, area: Rect) {
    let [side, preview] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(area);
    let [assistant, marketing, info] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(6),
        Constraint::Length(4),
    ])
    .areas(side);

    draw_assistant(f, app, assistant);
    draw_marketing(f, app, marketing);
    draw_info(f, app, info);
    draw_preview(f, app, preview);
}

fn draw_assistant(f: &mut Frame, app: &TuiApp, area: Rect) {
    let mut title = vec![Span::raw(" AI assistant ")];
    if app.dictation.is_listening() {
        title.push(Span::styled("● listening ", Style::default().fg(Color::Red)));
    }
    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(title_style(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [hint, input] =
        Layout::vertical([Constraint::Length(inner.height.saturating_sub(1)), Constraint::Length(1)])
            .areas(inner);
    f.render_widget(
        Paragraph::new("Describe a change, e.g. \"make the headline bolder\". Enter to apply.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true }),
        hint,
    );

    let (visible, col) = app.input(Field::Modification).window(input.width.saturating_sub(2));
    f.render_widget(Paragraph::new(format!("> {visible}")), input);
    f.set_cursor_position(Position::new(input.x + 2 + col, input.y));
}

fn draw_marketing(f: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default()
        .title(" Marketing text ")
        .borders(Borders::ALL)
        .border_style(title_style(false));

    let body: Vec<Line> = if app.session.is_generating_newsletter() {
        vec![Line::from(Span::styled(
            "Writing your announcement...",
            Style::default().fg(Color::Yellow),
        ))]
    } else if app.session.newsletter().is_empty() {
        vec![Line::from(Span::styled(
            "^N writes a short post announcing your new site.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        let mut lines: Vec<Line> = app.session.newsletter().lines().map(Line::from).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "^K copy  ^L share on WhatsApp",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    };
    f.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }).block(block), area);
}

fn draw_info(f: &mut Frame, app: &TuiApp, area: Rect) {
    let html = app.session.artifact();
    let lines = vec![
        Line::from(format!("{} bytes of HTML", html.len())),
        Line::from(Span::styled(
            "^S save index.html  ^Y copy HTML",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .title(" Export ")
        .borders(Borders::ALL)
        .border_style(title_style(false));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_preview(f: &mut Frame, app: &TuiApp, area: Rect) {
    let (title, text) = if app.show_code {
        (" Code (^T preview) ", app.session.artifact().to_string())
    } else {
        (" Preview (^T code) ", html_outline(app.session.artifact()).join("\n"))
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(title_style(false));
    f.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((app.code_scroll, 0))
            .block(block),
        area,
    );
}

pub(super) fn draw_loading(f: &mut Frame, app: &TuiApp, area: Rect) {
    let business = &app.session.form().business_name;
    let lines = vec![
        Line::from(Span::styled(
            "Building your website...",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Designing a site for {business}.")),
        Line::from(Span::styled("Esc to cancel", Style::default().fg(Color::DarkGray))),
    ];
    let rect = centered(area, 50, 6);
    f.render_widget(
        Paragraph::new(lines)
            .centered()
            .block(Block::default().borders(Borders::ALL)),
        rect,
    );
}

pub(super) fn draw_failed(f: &mut Frame, app: &TuiApp, area: Rect) {
    let message = app.error_text().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "Generation Failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled("Enter to try again", Style::default().fg(Color::DarkGray))),
    ];
    let rect = centered(area, 60, 9);
    f.render_widget(
        Paragraph::new(lines)
            .centered()
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red))),
        rect,
    );
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "header", "footer", "nav", "main", "article", "li", "h1", "h2", "h3",
    "h4", "h5", "h6", "br", "tr", "form", "button", "title",
];

/// Readable text of an HTML page for the terminal: scripts and styles
/// dropped, block elements on their own lines, headings marked with `#`.
pub(crate) fn html_outline(html: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        push_text(&mut current, &rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            rest = "";
            break;
        };
        let tag = &after[..close];
        rest = &after[close + 1..];

        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if (name == "script" || name == "style") && !tag.starts_with('/') {
            let end = format!("</{name}");
            rest = match rest.to_ascii_lowercase().find(&end) {
                Some(i) => rest[i..].find('>').map(|j| &rest[i + j + 1..]).unwrap_or(""),
                None => "",
            };
            continue;
        }
        if BLOCK_TAGS.contains(&name.as_str()) {
            flush(&mut lines, &mut current);
            if !tag.starts_with('/') && name.len() == 2 && name.starts_with('h') && name != "hr" {
                if let Some(level) = name[1..].parse::<usize>().ok().filter(|l| (1..=6).contains(l)) {
                    current.push_str(&"#".repeat(level));
                    current.push(' ');
                }
            }
        }
    }
    push_text(&mut current, rest);
    flush(&mut lines, &mut current);
    lines
}

fn push_text(current: &mut String, text: &str) {
    for word in decode_entities(text).split_whitespace() {
        if !current.is_empty() && !current.ends_with(' ') {
            current.push(' ');
        }
        current.push_str(word);
    }
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let line = current.trim();
    // A heading marker with no text yet stays pending.
    if !line.is_empty() && !line.chars().all(|c| c == '#') {
        lines.push(line.to_string());
        current.clear();
    } else if line.is_empty() {
        current.clear();
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&copy;", "©")
        .replace("&amp;", "&")
}
