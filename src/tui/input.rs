//! Key binding dispatch for the TUI.
//!
//! Global: Ctrl+C quits, F2 dashboard, F3 language, Ctrl+R starts over,
//! Ctrl+D toggles dictation, Esc dismisses a spoken caption first.
//! Everything else depends on the current view; unhandled keys go to the
//! field being edited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{Field, Page};

use super::app::{Focus, TuiApp};
use super::router::View;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut TuiApp, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if key.code == KeyCode::Char('c') && ctrl {
        app.should_quit = true;
        return;
    }

    // Any key after an export clears its notice.
    app.notice = None;

    if key.code == KeyCode::Esc && app.narrator.engine().caption().is_some() {
        app.dismiss_caption();
        return;
    }

    match key.code {
        KeyCode::F(2) => {
            app.session.navigate(Page::Dashboard);
            return;
        }
        KeyCode::F(3) => {
            app.cycle_language();
            return;
        }
        KeyCode::Char('r') if ctrl => {
            app.start_over();
            return;
        }
        KeyCode::Char('d') if ctrl => {
            app.toggle_dictation();
            return;
        }
        _ => {}
    }

    match app.view() {
        View::Form => handle_form(app, key),
        View::Loading => {
            if key.code == KeyCode::Esc {
                app.cancel_generation();
            }
        }
        View::Result => handle_result(app, key),
        View::ResultFailed => match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                app.session.clear_error();
                app.session.navigate(Page::Form);
            }
            _ => {}
        },
        View::Dashboard => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.analyze_or_stop(),
            KeyCode::Esc => leave_dashboard(app),
            _ => {}
        },
        View::DashboardEmpty => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.session.navigate(Page::Form);
            }
        }
    }
}

fn handle_form(app: &mut TuiApp, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Char('g') if ctrl => app.generate(),
        KeyCode::Char('e') if ctrl => app.next_example(),
        KeyCode::Esc => app.session.clear_error(),
        KeyCode::Enter => match app.focus {
            Focus::Palette => {
                app.select_palette();
                app.generate();
            }
            Focus::Field(Field::Description) => app.generate(),
            Focus::Field(_) => app.focus_next(),
        },
        KeyCode::Left if app.focus == Focus::Palette => app.cycle_palette(false),
        KeyCode::Right if app.focus == Focus::Palette => app.cycle_palette(true),
        _ => {
            if let Focus::Field(field) = app.focus {
                app.edit(field, key);
            }
        }
    }
}

fn handle_result(app: &mut TuiApp, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => app.assist(),
        KeyCode::Char('g') if ctrl => app.generate(),
        KeyCode::Char('s') if ctrl => app.save_site(),
        KeyCode::Char('y') if ctrl => app.copy_html(),
        KeyCode::Char('n') if ctrl => app.newsletter(),
        KeyCode::Char('k') if ctrl => app.copy_newsletter(),
        KeyCode::Char('l') if ctrl => app.share_newsletter(),
        KeyCode::Char('t') if ctrl => {
            app.show_code = !app.show_code;
            app.code_scroll = 0;
        }
        KeyCode::Char('o') if ctrl => {
            app.session.navigate(Page::Form);
        }
        KeyCode::Up | KeyCode::PageUp => {
            let step = if key.code == KeyCode::PageUp { 10 } else { 1 };
            app.code_scroll = app.code_scroll.saturating_sub(step);
        }
        KeyCode::Down | KeyCode::PageDown => {
            let step = if key.code == KeyCode::PageDown { 10 } else { 1 };
            app.code_scroll = app.code_scroll.saturating_add(step);
        }
        KeyCode::Esc => app.session.clear_error(),
        _ => {
            app.edit(Field::Modification, key);
        }
    }
}

/// Back to wherever makes sense: the site if there is one, else the form.
fn leave_dashboard(app: &mut TuiApp) {
    if !app.session.navigate(Page::Result) {
        app.session.navigate(Page::Form);
    }
}

/// Key hints for the status bar.
pub fn hints(view: View) -> &'static str {
    match view {
        View::Form => {
            "Tab next  ←/→ palette  ^E example  ^D dictate  ^G generate  F2 dashboard  F3 language  ^C quit"
        }
        View::Loading => "Esc cancel  F2 dashboard  ^C quit",
        View::Result => {
            "Enter apply change  ^G regenerate  ^T code  ^S save  ^Y copy  ^N marketing  ^K copy text  ^L share  ^O edit  ^R start over"
        }
        View::ResultFailed => "Enter try again  ^R start over  ^C quit",
        View::Dashboard => "Enter analyze & speak / stop  Esc back  F3 language",
        View::DashboardEmpty => "Enter create a website  ^C quit",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::generation::SiteGenerator;
    use crate::llm::mock::{Reply, ScriptedModel};
    use crate::session::{PageMode, Session};

    fn app(replies: Vec<Reply>) -> TuiApp {
        let generator = SiteGenerator::new(Arc::new(ScriptedModel::new(replies)));
        TuiApp::new(Session::new("en-US"), generator, std::env::temp_dir()).0
    }

    fn press(app: &mut TuiApp, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut TuiApp, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app(vec![]);
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[test]
    fn tab_moves_between_fields() {
        let mut app = app(vec![]);
        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Ana's Bakery");
        assert_eq!(app.session.form().user_name, "Ana");
        assert_eq!(app.session.form().business_name, "Ana's Bakery");
    }

    #[test]
    fn enter_advances_through_details() {
        let mut app = app(vec![]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Field(Field::BusinessName));
    }

    #[test]
    fn palette_arrows_select() {
        let mut app = app(vec![]);
        app.focus = Focus::Palette;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.form().palette.as_deref(), Some("Vibrant"));
    }

    #[test]
    fn f2_opens_dashboard_and_esc_returns() {
        let mut app = app(vec![]);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.view(), View::DashboardEmpty);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session.mode(), PageMode::Form);
    }

    #[test]
    fn f3_cycles_language() {
        let mut app = app(vec![]);
        press(&mut app, KeyCode::F(3));
        assert_eq!(app.session.language(), "te-IN");
        press(&mut app, KeyCode::F(3));
        press(&mut app, KeyCode::F(3));
        assert_eq!(app.session.language(), "en-US");
    }

    #[tokio::test]
    async fn generate_from_keyboard() {
        let mut app = app(vec![Reply::Text("<!DOCTYPE html>")]);
        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Ana's Bakery");
        app.focus = Focus::Field(Field::Description);
        type_text(&mut app, "We sell cakes");
        app.focus = Focus::Palette;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view(), View::Loading);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view(), View::Form);
    }

    #[test]
    fn ctrl_r_starts_over() {
        let mut app = app(vec![]);
        type_text(&mut app, "Ana");
        ctrl(&mut app, 'r');
        assert!(app.session.form().user_name.is_empty());
    }
}
