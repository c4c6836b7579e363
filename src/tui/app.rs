//! TUI model: the session plus everything only the terminal needs.
//!
//! The session stays the source of truth for form content; `InputLine`s
//! hold cursors and are re-synced from the session after every update.
//! Model calls run on spawned tasks and come back as `JobResult`s.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::catalog::{EXAMPLE_PROMPTS, LANGUAGES, PALETTES};
use crate::export;
use crate::generation::{GenerationError, SiteGenerator};
use crate::session::{Field, Session, SessionError, Ticket, WebsiteJob};
use crate::speech::recognition::{self, Dictation, RecognitionEvent, Recognizer};
use crate::speech::{CaptionEngine, Narrator};

use super::input_line::InputLine;
use super::router::{route, View};

/// Form widgets in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Palette,
}

pub const FORM_ORDER: [Focus; 6] = [
    Focus::Field(Field::UserName),
    Focus::Field(Field::BusinessName),
    Focus::Field(Field::UserEmail),
    Focus::Field(Field::UserPhone),
    Focus::Field(Field::Description),
    Focus::Palette,
];

const TEXT_FIELDS: [Field; 6] = [
    Field::UserName,
    Field::BusinessName,
    Field::UserEmail,
    Field::UserPhone,
    Field::Description,
    Field::Modification,
];

/// A finished model call, on its way back to the UI task.
#[derive(Debug)]
pub enum JobResult {
    Website(Ticket, Result<String, GenerationError>),
    Newsletter(Ticket, Result<String, GenerationError>),
    Analysis(Ticket, Result<String, GenerationError>),
}

pub struct TuiApp {
    pub session: Session,
    generator: SiteGenerator,
    jobs_tx: mpsc::UnboundedSender<JobResult>,

    inputs: [InputLine; 6],
    pub focus: Focus,
    pub palette_cursor: usize,
    pub example_cursor: usize,

    pub narrator: Narrator<CaptionEngine>,
    pub dictation: Dictation<Box<dyn Recognizer>>,
    dictation_target: Field,

    /// One-line feedback for exports ("Saved to ...").
    pub notice: Option<String>,
    pub show_code: bool,
    pub code_scroll: u16,
    output_dir: PathBuf,
    pub should_quit: bool,
}

impl TuiApp {
    /// App plus the receiver the runner drains for finished jobs.
    pub fn new(
        session: Session,
        generator: SiteGenerator,
        output_dir: PathBuf,
    ) -> (Self, mpsc::UnboundedReceiver<JobResult>) {
        // `Unavailable` never emits, so nothing ever sends on this channel.
        let (no_recognizer, rx) = mpsc::unbounded_channel::<RecognitionEvent>();
        drop(no_recognizer);
        Self::with_recognizer(
            session,
            generator,
            output_dir,
            Box::new(recognition::Unavailable),
            rx,
        )
    }

    pub fn with_recognizer(
        session: Session,
        generator: SiteGenerator,
        output_dir: PathBuf,
        recognizer: Box<dyn Recognizer>,
        recognition_events: mpsc::UnboundedReceiver<RecognitionEvent>,
    ) -> (Self, mpsc::UnboundedReceiver<JobResult>) {
        let (jobs_tx, jobs_rx) = mpsc::unbounded_channel();
        let (engine, speech_events) = CaptionEngine::new();
        let mut app = Self {
            session,
            generator,
            jobs_tx,
            inputs: Default::default(),
            focus: FORM_ORDER[0],
            palette_cursor: 0,
            example_cursor: 0,
            narrator: Narrator::new(engine, speech_events),
            dictation: Dictation::new(recognizer, recognition_events),
            dictation_target: Field::Description,
            notice: None,
            show_code: false,
            code_scroll: 0,
            output_dir,
            should_quit: false,
        };
        app.sync_inputs();
        (app, jobs_rx)
    }

    pub fn view(&self) -> View {
        route(&self.session)
    }

    pub fn input(&self, field: Field) -> &InputLine {
        &self.inputs[slot(field)]
    }

    /// Field the keyboard edits in the current view, if any.
    pub fn editing_field(&self) -> Option<Field> {
        match self.view() {
            View::Form => match self.focus {
                Focus::Field(f) => Some(f),
                Focus::Palette => None,
            },
            View::Result => Some(Field::Modification),
            _ => None,
        }
    }

    /// Forward an editing key to `field` and write the result to the session.
    pub fn edit(&mut self, field: Field, key: crossterm::event::KeyEvent) -> bool {
        let line = &mut self.inputs[slot(field)];
        if !line.handle_key(key) {
            return false;
        }
        let text = line.content().to_string();
        self.session.set_field(field, text);
        true
    }

    /// Insert pasted text at the cursor of the field being edited.
    pub fn paste(&mut self, text: &str) -> bool {
        let Some(field) = self.editing_field() else {
            return false;
        };
        let line = &mut self.inputs[slot(field)];
        line.insert_str(text);
        let text = line.content().to_string();
        self.session.set_field(field, text);
        true
    }

    /// Pull field contents from the session (after reset, transcripts, etc.).
    pub fn sync_inputs(&mut self) {
        for field in TEXT_FIELDS {
            let text = self.session.field(field).to_string();
            self.inputs[slot(field)].set_content(&text);
        }
        if let Some(name) = &self.session.form().palette {
            if let Some(i) = PALETTES.iter().position(|p| p.name == name.as_str()) {
                self.palette_cursor = i;
            }
        }
    }

    // ── Form navigation ──

    pub fn focus_next(&mut self) {
        self.focus = FORM_ORDER[(self.focus_index() + 1) % FORM_ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let i = self.focus_index();
        self.focus = FORM_ORDER[(i + FORM_ORDER.len() - 1) % FORM_ORDER.len()];
    }

    fn focus_index(&self) -> usize {
        FORM_ORDER.iter().position(|f| *f == self.focus).unwrap_or(0)
    }

    /// Move the palette highlight and select it.
    pub fn cycle_palette(&mut self, forward: bool) {
        let n = PALETTES.len();
        self.palette_cursor = if forward {
            (self.palette_cursor + 1) % n
        } else {
            (self.palette_cursor + n - 1) % n
        };
        self.session.select_palette(PALETTES[self.palette_cursor].name);
    }

    pub fn select_palette(&mut self) {
        self.session.select_palette(PALETTES[self.palette_cursor].name);
    }

    /// Fill the description with the next canned example.
    pub fn next_example(&mut self) {
        let example = &EXAMPLE_PROMPTS[self.example_cursor];
        self.example_cursor = (self.example_cursor + 1) % EXAMPLE_PROMPTS.len();
        self.session.select_example(example.prompt);
        self.focus = Focus::Field(Field::Description);
        self.notice = Some(format!("Example: {}", example.label));
        self.sync_inputs();
    }

    pub fn cycle_language(&mut self) {
        let i = LANGUAGES
            .iter()
            .position(|l| l.code == self.session.language())
            .unwrap_or(0);
        let next = LANGUAGES[(i + 1) % LANGUAGES.len()];
        self.session.set_language(next.code);
        self.notice = Some(format!("Language: {}", next.label));
    }

    // ── Model calls ──

    pub fn generate(&mut self) {
        match self.session.submit() {
            Ok(job) => self.spawn_website(job),
            Err(e) => debug!("submit refused: {e}"),
        }
    }

    pub fn assist(&mut self) {
        match self.session.assist() {
            Ok(job) => self.spawn_website(job),
            Err(e) => debug!("assist refused: {e}"),
        }
    }

    pub fn cancel_generation(&mut self) {
        if self.session.cancel_generation() {
            self.notice = Some("Generation cancelled.".into());
        }
    }

    pub fn newsletter(&mut self) {
        let Some(job) = self.session.request_newsletter() else {
            return;
        };
        let generator = self.generator.clone();
        let tx = self.jobs_tx.clone();
        tokio::spawn(async move {
            let result = job.run(&generator).await;
            let _ = tx.send(JobResult::Newsletter(job.ticket, result));
        });
    }

    /// The dashboard's one button: stop narration if any, else analyze.
    pub fn analyze_or_stop(&mut self) {
        if self.narrator.is_busy() {
            self.narrator.cancel();
            return;
        }
        let Some(job) = self.session.request_analysis() else {
            return;
        };
        let generator = self.generator.clone();
        let tx = self.jobs_tx.clone();
        tokio::spawn(async move {
            let result = job.run(&generator).await;
            let _ = tx.send(JobResult::Analysis(job.ticket, result));
        });
    }

    fn spawn_website(&mut self, job: WebsiteJob) {
        self.show_code = false;
        self.code_scroll = 0;
        let generator = self.generator.clone();
        let tx = self.jobs_tx.clone();
        tokio::spawn(async move {
            let result = job.run(&generator).await;
            // Receiver gone means the UI has shut down.
            let _ = tx.send(JobResult::Website(job.ticket, result));
        });
    }

    /// Apply a finished job to the session.
    pub fn apply_job(&mut self, result: JobResult) {
        match result {
            JobResult::Website(ticket, result) => {
                let applied = self.session.apply_website(ticket, result);
                debug!(?applied, "website job applied");
            }
            JobResult::Newsletter(ticket, result) => {
                self.session.apply_newsletter(ticket, result);
            }
            JobResult::Analysis(ticket, result) => {
                let summary = self.session.apply_analysis(ticket, result).map(str::to_string);
                if let Some(summary) = summary {
                    let lang = self.session.language().to_string();
                    if let Err(e) = self.narrator.speak(&summary, &lang) {
                        self.session.set_speech_error(e.to_string());
                    }
                }
            }
        }
        self.sync_inputs();
    }

    // ── Speech ──

    /// Start or stop dictating into the field being edited.
    pub fn toggle_dictation(&mut self) {
        if !self.dictation.is_listening() {
            match self.editing_field() {
                Some(field) => self.dictation_target = field,
                None => return,
            }
        }
        let lang = self.session.language().to_string();
        self.dictation.toggle(&lang);
        if let Some(message) = self.dictation.take_error() {
            self.session.set_speech_error(message);
        }
    }

    pub fn dismiss_caption(&mut self) {
        self.narrator.engine_mut().finish();
    }

    /// Drain speech events. Called once per frame.
    pub fn tick(&mut self) {
        self.narrator.poll_events();
        if let Some(transcript) = self.dictation.poll_events() {
            self.session.apply_transcript(self.dictation_target, &transcript);
            self.sync_inputs();
        }
        if let Some(message) = self.dictation.take_error() {
            self.session.set_speech_error(message);
        }
    }

    // ── Export ──

    pub fn save_site(&mut self) {
        self.notice = Some(match export::save_html(&self.output_dir, self.session.artifact()) {
            Ok(path) => format!("Saved to {}", path.display()),
            Err(e) => {
                warn!("save failed: {e}");
                e.to_string()
            }
        });
    }

    pub fn copy_html(&mut self) {
        self.notice = Some(match export::copy_to_clipboard(self.session.artifact()) {
            Ok(()) => "HTML copied to clipboard.".into(),
            Err(e) => e.to_string(),
        });
    }

    pub fn copy_newsletter(&mut self) {
        self.notice = Some(match export::copy_to_clipboard(self.session.newsletter()) {
            Ok(()) => "Marketing text copied.".into(),
            Err(e) => e.to_string(),
        });
    }

    pub fn share_newsletter(&mut self) {
        self.notice = Some(match export::share_text(self.session.newsletter()) {
            Ok((text, url)) => match export::copy_to_clipboard(&text) {
                Ok(()) => format!("Copied. Paste it at {url}"),
                Err(_) => format!("Share at {url}"),
            },
            Err(e) => e.to_string(),
        });
    }

    /// "Start over": cancel everything and clear the session.
    pub fn start_over(&mut self) {
        self.narrator.cancel();
        if self.dictation.is_listening() {
            let lang = self.session.language().to_string();
            self.dictation.toggle(&lang);
        }
        self.session.reset();
        self.focus = FORM_ORDER[0];
        self.palette_cursor = 0;
        self.show_code = false;
        self.code_scroll = 0;
        self.notice = None;
        self.sync_inputs();
    }

    /// Error line for the status bar.
    pub fn error_text(&self) -> Option<String> {
        self.session.error().map(SessionError::to_string)
    }
}

fn slot(field: Field) -> usize {
    match field {
        Field::UserName => 0,
        Field::BusinessName => 1,
        Field::UserEmail => 2,
        Field::UserPhone => 3,
        Field::Description => 4,
        Field::Modification => 5,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::llm::mock::{Reply, ScriptedModel};
    use crate::session::PageMode;
    use crate::speech::SpeechError;

    const HTML: &str = "<!DOCTYPE html><html><body>Ana's Bakery</body></html>";

    fn app(replies: Vec<Reply>) -> (TuiApp, mpsc::UnboundedReceiver<JobResult>) {
        let generator = SiteGenerator::new(Arc::new(ScriptedModel::new(replies)));
        TuiApp::new(Session::new("en-US"), generator, std::env::temp_dir())
    }

    fn type_into(app: &mut TuiApp, field: Field, text: &str) {
        for c in text.chars() {
            app.edit(field, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn fill(app: &mut TuiApp) {
        type_into(app, Field::UserName, "Ana");
        type_into(app, Field::BusinessName, "Ana's Bakery");
        type_into(app, Field::Description, "We sell cakes");
        app.select_palette();
    }

    #[test]
    fn typing_updates_session() {
        let (mut app, _rx) = app(vec![]);
        type_into(&mut app, Field::BusinessName, "Ana's Bakery");
        assert_eq!(app.session.form().business_name, "Ana's Bakery");
        assert_eq!(app.input(Field::BusinessName).content(), "Ana's Bakery");
    }

    #[test]
    fn focus_wraps_around() {
        let (mut app, _rx) = app(vec![]);
        app.focus_prev();
        assert_eq!(app.focus, Focus::Palette);
        app.focus_next();
        assert_eq!(app.focus, Focus::Field(Field::UserName));
    }

    #[test]
    fn palette_cycling_selects() {
        let (mut app, _rx) = app(vec![]);
        app.cycle_palette(true);
        assert_eq!(app.session.form().palette.as_deref(), Some("Vibrant"));
        app.cycle_palette(false);
        app.cycle_palette(false);
        assert_eq!(app.session.form().palette.as_deref(), Some("Elegant"));
    }

    #[test]
    fn example_fills_description_input() {
        let (mut app, _rx) = app(vec![]);
        app.next_example();
        assert!(app.input(Field::Description).content().contains("coffee shop"));
        assert_eq!(app.focus, Focus::Field(Field::Description));
        app.next_example();
        assert!(app.session.form().description.contains("portfolio"));
    }

    #[tokio::test]
    async fn generate_round_trip() {
        let (mut app, mut rx) = app(vec![Reply::Text(HTML)]);
        fill(&mut app);

        app.generate();
        assert_eq!(app.view(), View::Loading);

        let result = rx.recv().await.unwrap();
        app.apply_job(result);
        assert_eq!(app.view(), View::Result);
        assert_eq!(app.session.artifact(), HTML);
    }

    #[tokio::test]
    async fn incomplete_form_stays_put() {
        let (mut app, _rx) = app(vec![]);
        type_into(&mut app, Field::UserName, "Ana");
        app.generate();
        assert_eq!(app.view(), View::Form);
        assert!(app.error_text().unwrap().contains("fill out all fields"));
    }

    #[tokio::test]
    async fn assist_clears_modification_input() {
        let (mut app, mut rx) = app(vec![Reply::Text(HTML), Reply::Text(HTML)]);
        fill(&mut app);
        app.generate();
        let r = rx.recv().await.unwrap();
        app.apply_job(r);

        type_into(&mut app, Field::Modification, "bigger logo");
        app.assist();
        let r = rx.recv().await.unwrap();
        app.apply_job(r);
        assert_eq!(app.input(Field::Modification).content(), "");
    }

    #[tokio::test]
    async fn analysis_is_spoken_as_caption() {
        let (mut app, mut rx) = app(vec![Reply::Text("Great day for Ana's Bakery!")]);
        fill(&mut app);
        app.session.navigate(crate::session::Page::Dashboard);

        app.analyze_or_stop();
        let r = rx.recv().await.unwrap();
        app.apply_job(r);
        app.tick();
        assert!(app.narrator.is_speaking());
        assert_eq!(app.narrator.engine().caption(), Some("Great day for Ana's Bakery!"));

        // Second press stops narration instead of analyzing again.
        app.analyze_or_stop();
        app.tick();
        assert!(!app.narrator.is_speaking());
        assert!(!app.session.is_analyzing());
    }

    #[tokio::test]
    async fn start_over_resets_everything() {
        let (mut app, mut rx) = app(vec![Reply::Text(HTML)]);
        fill(&mut app);
        app.generate();
        let r = rx.recv().await.unwrap();
        app.apply_job(r);

        app.start_over();
        assert_eq!(app.session.mode(), PageMode::Form);
        assert_eq!(app.input(Field::BusinessName).content(), "");
        assert_eq!(app.focus, FORM_ORDER[0]);
    }

    #[tokio::test]
    async fn save_site_writes_index() {
        let dir = tempfile::tempdir().unwrap();
        let generator = SiteGenerator::new(Arc::new(ScriptedModel::text(HTML)));
        let (mut app, mut rx) =
            TuiApp::new(Session::new("en-US"), generator, dir.path().to_path_buf());
        fill(&mut app);
        app.generate();
        let r = rx.recv().await.unwrap();
        app.apply_job(r);

        app.save_site();
        assert!(app.notice.as_deref().unwrap().starts_with("Saved to"));
        assert_eq!(std::fs::read_to_string(dir.path().join("index.html")).unwrap(), HTML);
    }

    struct Mic;

    impl Recognizer for Mic {
        fn start(&mut self, _lang: &str) -> Result<(), SpeechError> {
            Ok(())
        }
        fn stop(&mut self) {}
    }

    #[test]
    fn dictation_fills_focused_field() {
        let (tx, rx) = mpsc::unbounded_channel();
        let generator = SiteGenerator::new(Arc::new(ScriptedModel::new(vec![])));
        let (mut app, _jobs) = TuiApp::with_recognizer(
            Session::new("te-IN"),
            generator,
            std::env::temp_dir(),
            Box::new(Mic),
            rx,
        );
        app.focus = Focus::Field(Field::Description);
        app.toggle_dictation();
        assert!(app.dictation.is_listening());

        tx.send(RecognitionEvent::Transcript {
            text: "మా బేకరీ".into(),
            is_final: true,
        })
        .unwrap();
        app.tick();
        assert_eq!(app.session.form().description, "మా బేకరీ");
        assert_eq!(app.input(Field::Description).content(), "మా బేకరీ");
    }

    #[test]
    fn dictation_without_microphone_is_inline_error() {
        let (mut app, _rx) = app(vec![]);
        app.focus = Focus::Field(Field::Description);
        app.toggle_dictation();
        assert!(!app.dictation.is_listening());
        assert!(matches!(app.session.error(), Some(SessionError::Speech(_))));

        app.session.clear_error();
        app.tick();
        assert!(app.session.error().is_none());
        assert_eq!(app.session.form().description, "");
    }

    #[test]
    fn paste_inserts_at_cursor() {
        let (mut app, _rx) = app(vec![]);
        app.focus = Focus::Field(Field::Description);
        type_into(&mut app, Field::Description, "We cakes");
        for _ in 0.."cakes".len() {
            app.edit(Field::Description, KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        }

        assert!(app.paste("sell\nfresh "));
        assert_eq!(app.session.form().description, "We sell fresh cakes");
        assert_eq!(app.input(Field::Description).content(), "We sell fresh cakes");
    }

    #[test]
    fn paste_ignored_without_editable_field() {
        let (mut app, _rx) = app(vec![]);
        app.focus = Focus::Palette;
        assert!(!app.paste("Modern"));
    }
}
