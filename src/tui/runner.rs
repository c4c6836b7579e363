//! Terminal setup and the main event loop.
//!
//! One task owns the app. It waits on three sources at once: terminal
//! input, finished model jobs, and a frame tick that drains speech events.

use std::io;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::info;

use super::app::{JobResult, TuiApp};
use super::input::handle_key;
use super::layout::draw;

const TICK: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the TUI until the user quits. The terminal is restored on every exit path.
pub async fn run(app: TuiApp, jobs: mpsc::UnboundedReceiver<JobResult>) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, app, jobs).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Term,
    mut app: TuiApp,
    mut jobs: mpsc::UnboundedReceiver<JobResult>,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);
    info!("tui started");

    loop {
        terminal.draw(|f| draw(f, &app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => handle_key(&mut app, key),
                Some(Ok(Event::Paste(text))) => {
                    app.paste(&text);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(result) = jobs.recv() => app.apply_job(result),
            _ = tick.tick() => app.tick(),
        }

        if app.should_quit {
            break;
        }
    }

    // Anything still running is abandoned with the session.
    app.start_over();
    info!("tui stopped");
    Ok(())
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()
}
