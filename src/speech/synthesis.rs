//! Text-to-speech narration.
//!
//! `Narrator` is single-flight: a new `speak` cancels whatever is playing.
//! Cancellation is request-and-confirm. `cancel()` only asks the engine; the
//! speaking flag drops when the engine reports `Ended` or `Failed` for the
//! current utterance.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::SpeechError;

/// A voice the engine offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP-47 tag, e.g. `en-US`.
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// One request to speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub id: u64,
    pub text: String,
    pub lang: String,
    /// `None` lets the engine pick its default for `lang`.
    pub voice: Option<Voice>,
}

/// Lifecycle reported by an engine, keyed by utterance id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Started(u64),
    Ended(u64),
    Failed { id: u64, code: String },
}

/// Error codes an engine reports when speech is stopped on purpose.
const EXPECTED_FAILURES: &[&str] = &["interrupted", "canceled"];

/// A platform speech synthesizer.
pub trait SpeechEngine: Send {
    fn voices(&self) -> Vec<Voice>;

    /// Queue an utterance. Lifecycle arrives on the engine's event channel.
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Ask the engine to stop. Confirmation arrives as an event.
    fn cancel(&mut self);

    fn is_speaking(&self) -> bool;
}

/// Best voice for `lang`: exact tag or same primary subtag, preferring
/// names containing "google".
pub fn select_voice(voices: &[Voice], lang: &str) -> Option<Voice> {
    let prefix = lang.split('-').next().unwrap_or(lang);
    let matching: Vec<&Voice> = voices
        .iter()
        .filter(|v| v.lang == lang || v.lang.starts_with(prefix))
        .collect();

    matching
        .iter()
        .find(|v| v.name.to_lowercase().contains("google"))
        .or_else(|| matching.first())
        .map(|v| (*v).clone())
}

/// Drives a `SpeechEngine` and tracks whether it is speaking.
pub struct Narrator<E: SpeechEngine> {
    engine: E,
    events: mpsc::UnboundedReceiver<SpeechEvent>,
    current: Option<u64>,
    speaking: bool,
    next_id: u64,
    last_error: Option<String>,
}

impl<E: SpeechEngine> Narrator<E> {
    pub fn new(engine: E, events: mpsc::UnboundedReceiver<SpeechEvent>) -> Self {
        Self {
            engine,
            events,
            current: None,
            speaking: false,
            next_id: 0,
            last_error: None,
        }
    }

    /// Speak `text` in `lang`, cancelling anything already playing.
    /// Empty text is a no-op and returns `Ok(None)`.
    pub fn speak(&mut self, text: &str, lang: &str) -> Result<Option<u64>, SpeechError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if self.engine.is_speaking() || self.current.is_some() {
            self.engine.cancel();
        }

        self.next_id += 1;
        let id = self.next_id;
        let voice = select_voice(&self.engine.voices(), lang);
        debug!(id, lang, voice = ?voice.as_ref().map(|v| &v.name), "speaking");

        self.last_error = None;
        let result = self.engine.speak(Utterance {
            id,
            text: text.to_string(),
            lang: lang.to_string(),
            voice,
        });
        match result {
            Ok(()) => {
                self.current = Some(id);
                Ok(Some(id))
            }
            Err(e) => {
                // No lifecycle event will follow a refused utterance.
                warn!(id, error = %e, "speech engine refused utterance");
                self.current = None;
                self.speaking = false;
                Err(e)
            }
        }
    }

    /// Request a stop. `is_speaking` stays true until the engine confirms.
    pub fn cancel(&mut self) {
        if self.engine.is_speaking() || self.current.is_some() {
            self.engine.cancel();
        }
    }

    /// Drain pending engine events. Returns how many were handled.
    pub fn poll_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    fn handle(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Started(id) if self.current == Some(id) => self.speaking = true,
            SpeechEvent::Ended(id) if self.current == Some(id) => {
                self.speaking = false;
                self.current = None;
            }
            SpeechEvent::Failed { id, code } => {
                if EXPECTED_FAILURES.contains(&code.as_str()) {
                    debug!(id, %code, "speech stopped");
                } else {
                    warn!(id, %code, "speech synthesis error");
                    if self.current == Some(id) {
                        self.last_error = Some(code);
                    }
                }
                if self.current == Some(id) {
                    self.speaking = false;
                    self.current = None;
                }
            }
            other => debug!(?other, "ignoring event for superseded utterance"),
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// An utterance has been issued and not yet confirmed finished.
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Last unexpected engine failure code for the current utterance.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
