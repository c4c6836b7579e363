//! Caption engine: the terminal's `SpeechEngine`.
//!
//! A terminal cannot talk, so "speaking" means showing the text as a
//! caption until the user dismisses it. Lifecycle events are emitted exactly
//! like a real synthesizer would: `Started` on speak, `Failed("interrupted")`
//! when replaced, `Failed("canceled")` on cancel, `Ended` on dismiss.

use tokio::sync::mpsc;

use super::synthesis::{SpeechEngine, SpeechEvent, Utterance, Voice};
use super::SpeechError;
use crate::catalog::LANGUAGES;

pub struct CaptionEngine {
    events: mpsc::UnboundedSender<SpeechEvent>,
    current: Option<Utterance>,
    voices: Vec<Voice>,
}

impl CaptionEngine {
    /// Engine plus the receiver a `Narrator` consumes.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SpeechEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let voices = LANGUAGES
            .iter()
            .map(|l| Voice::new(format!("Caption ({})", l.label), l.code))
            .collect();
        (
            Self {
                events: tx,
                current: None,
                voices,
            },
            rx,
        )
    }

    /// Text currently on screen.
    pub fn caption(&self) -> Option<&str> {
        self.current.as_ref().map(|u| u.text.as_str())
    }

    /// The user has read the caption.
    pub fn finish(&mut self) {
        if let Some(u) = self.current.take() {
            self.emit(SpeechEvent::Ended(u.id));
        }
    }

    fn emit(&self, event: SpeechEvent) {
        // Receiver gone means the narrator was dropped; nothing to report to.
        let _ = self.events.send(event);
    }
}

impl SpeechEngine for CaptionEngine {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        if let Some(prev) = self.current.take() {
            self.emit(SpeechEvent::Failed {
                id: prev.id,
                code: "interrupted".into(),
            });
        }
        let id = utterance.id;
        self.current = Some(utterance);
        self.emit(SpeechEvent::Started(id));
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(u) = self.current.take() {
            self.emit(SpeechEvent::Failed {
                id: u.id,
                code: "canceled".into(),
            });
        }
    }

    fn is_speaking(&self) -> bool {
        self.current.is_some()
    }
}
