//! Dashboard screen: demo metrics plus the spoken AI summary.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::resolve_language;
use crate::dashboard::DashboardSnapshot;

use super::super::app::TuiApp;
use super::shared::{centered, title_style};

pub(super) fn draw_dashboard(f: &mut Frame, app: &TuiApp, snap: &DashboardSnapshot, area: Rect) {
    let [metrics, middle, analysis] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(6),
        Constraint::Length(7),
    ])
    .areas(area);

    let [visitors, peak, viewed] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(metrics);
    metric(f, "Visitors today", &snap.visitors_display(), visitors);
    metric(f, "Peak time", &snap.peak_time, peak);
    metric(f, "Most viewed", &snap.most_viewed_page, viewed);

    let [pages, campaigns, reviews] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(middle);
    list(
        f,
        "Top pages",
        snap.top_pages
            .iter()
            .enumerate()
            .map(|(i, p)| Line::from(format!("{}. {p}", i + 1)))
            .collect(),
        pages,
    );
    list(
        f,
        "Campaigns",
        vec![
            Line::from(Span::styled("Upcoming", Style::default().fg(Color::Green))),
            Line::from(snap.upcoming_campaign.as_str()),
            Line::from(Span::styled("Past", Style::default().fg(Color::DarkGray))),
            Line::from(snap.past_campaign.as_str()),
        ],
        campaigns,
    );
    let mut review_lines = vec![Line::from(format!("Sentiment: {}", snap.review_sentiment))];
    for review in &snap.latest_reviews {
        review_lines.push(Line::from(review.stars_display()));
        review_lines.push(Line::from(Span::styled(
            format!("\"{}\"", review.text),
            Style::default().fg(Color::Gray),
        )));
    }
    list(f, "Reviews", review_lines, reviews);

    draw_analysis(f, app, analysis);
}

fn draw_analysis(f: &mut Frame, app: &TuiApp, area: Rect) {
    let language = resolve_language(app.session.language());
    let status = if app.session.is_analyzing() {
        Span::styled("Analyzing...", Style::default().fg(Color::Yellow))
    } else if app.narrator.is_speaking() {
        Span::styled("Speaking (Enter to stop)", Style::default().fg(Color::Magenta))
    } else {
        Span::styled("Enter to analyze & speak", Style::default().fg(Color::DarkGray))
    };
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(format!(" AI summary ({}) ", language.label)),
            status,
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_style(title_style(true));

    let body = app.session.analysis().unwrap_or_default().to_string();
    f.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }).block(block), area);
}

fn metric(f: &mut Frame, label: &str, value: &str, area: Rect) {
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(title_style(false));
    f.render_widget(
        Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .block(block),
        area,
    );
}

fn list(f: &mut Frame, title: &str, lines: Vec<Line>, area: Rect) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(title_style(false));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

pub(super) fn draw_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "No business yet",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Create a website first, then come back for insights."),
        Line::from(Span::styled("Enter to start", Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .centered()
            .block(Block::default().borders(Borders::ALL)),
        centered(area, 60, 6),
    );
}
