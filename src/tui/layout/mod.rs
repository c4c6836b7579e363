//! Screen layout.
//!
//! ```text
//! ┌ BizBoost · Create your website ─────────── English ┐
//! │                                                      │
//! │  (full-screen content for the current view)          │
//! │                                                      │
//! ├──────────────────────────────────────────────────────┤
//! │ status: error / notice / key hints                   │
//! └──────────────────────────────────────────────────────┘
//! ```

mod dashboard;
mod form;
mod result;
mod shared;

use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::catalog::resolve_language;

use super::app::TuiApp;
use super::router::View;

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &TuiApp) {
    let [header, content, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let view = app.view();
    draw_header(f, app, view, header);

    match view {
        View::Form => form::draw_form(f, app, content),
        View::Loading => result::draw_loading(f, app, content),
        View::Result => result::draw_result(f, app, content),
        View::ResultFailed => result::draw_failed(f, app, content),
        View::Dashboard => match app.session.dashboard_snapshot() {
            Some(snap) => dashboard::draw_dashboard(f, app, &snap, content),
            None => dashboard::draw_empty(f, content),
        },
        View::DashboardEmpty => dashboard::draw_empty(f, content),
    }

    shared::draw_status(f, app, status);

    if let Some(caption) = app.narrator.engine().caption() {
        shared::draw_caption(f, caption, content);
    }
}

fn draw_header(f: &mut Frame, app: &TuiApp, view: View, area: ratatui::layout::Rect) {
    let bar = Style::default().fg(Color::Black).bg(Color::White);
    let language = resolve_language(app.session.language()).label;
    let left = format!(" BizBoost · {} ", view.title());
    let right = format!(" {language} [F3] ");
    let pad = usize::from(area.width)
        .saturating_sub(unicode_width::UnicodeWidthStr::width(left.as_str()))
        .saturating_sub(unicode_width::UnicodeWidthStr::width(right.as_str()));

    let line = Line::from(vec![
        Span::styled(left, bar.add_modifier(Modifier::BOLD)),
        Span::styled(" ".repeat(pad), bar),
        Span::styled(right, bar),
    ]);
    f.render_widget(Paragraph::new(line).style(bar), area);
}
