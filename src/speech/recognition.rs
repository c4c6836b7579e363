//! Speech-to-text dictation into a form field.
//!
//! Listening is toggled by the user only; there is no silence timeout. Each
//! session of listening starts from an empty buffer. Final transcripts
//! accumulate, the latest interim one is appended for display, and the
//! combined text replaces the target field.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::SpeechError;

/// What a recognizer reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Transcript { text: String, is_final: bool },
    Error(String),
    Ended,
}

/// A platform speech recognizer.
pub trait Recognizer: Send {
    fn start(&mut self, lang: &str) -> Result<(), SpeechError>;
    fn stop(&mut self);
}

impl Recognizer for Box<dyn Recognizer> {
    fn start(&mut self, lang: &str) -> Result<(), SpeechError> {
        (**self).start(lang)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Recognizer for hosts with no microphone pipeline.
#[derive(Debug, Default)]
pub struct Unavailable;

impl Recognizer for Unavailable {
    fn start(&mut self, _lang: &str) -> Result<(), SpeechError> {
        Err(SpeechError::RecognitionUnavailable)
    }

    fn stop(&mut self) {}
}

/// User-facing text for a recognizer error code.
pub fn error_message(code: &str) -> String {
    match code {
        "not-allowed" | "service-not-allowed" => "Microphone access was denied.".to_string(),
        "no-speech" => "No speech was detected. Please try again.".to_string(),
        "audio-capture" => "No microphone was found.".to_string(),
        "network" => "Speech recognition needs a network connection.".to_string(),
        other => format!("Speech recognition error: {other}"),
    }
}

pub struct Dictation<R: Recognizer> {
    recognizer: R,
    events: mpsc::UnboundedReceiver<RecognitionEvent>,
    listening: bool,
    finalized: String,
    interim: String,
    error: Option<String>,
}

impl<R: Recognizer> Dictation<R> {
    pub fn new(recognizer: R, events: mpsc::UnboundedReceiver<RecognitionEvent>) -> Self {
        Self {
            recognizer,
            events,
            listening: false,
            finalized: String::new(),
            interim: String::new(),
            error: None,
        }
    }

    /// Start or stop listening. Returns the new listening state.
    pub fn toggle(&mut self, lang: &str) -> bool {
        if self.listening {
            self.recognizer.stop();
            self.listening = false;
            return false;
        }

        self.finalized.clear();
        self.interim.clear();
        self.error = None;
        match self.recognizer.start(lang) {
            Ok(()) => {
                debug!(lang, "dictation started");
                self.listening = true;
            }
            Err(e) => {
                warn!("dictation unavailable: {e}");
                self.error = Some(e.to_string());
            }
        }
        self.listening
    }

    /// Drain recognizer events. Returns the updated transcript when any
    /// text arrived.
    pub fn poll_events(&mut self) -> Option<String> {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            match event {
                RecognitionEvent::Transcript { text, is_final } => {
                    if is_final {
                        push_segment(&mut self.finalized, &text);
                        self.interim.clear();
                    } else {
                        self.interim = text;
                    }
                    changed = true;
                }
                RecognitionEvent::Error(code) => {
                    warn!(%code, "speech recognition error");
                    self.error = Some(error_message(&code));
                    self.listening = false;
                }
                RecognitionEvent::Ended => self.listening = false,
            }
        }
        changed.then(|| self.transcript())
    }

    /// Final transcripts plus the pending interim one.
    pub fn transcript(&self) -> String {
        let mut out = self.finalized.clone();
        push_segment(&mut out, &self.interim);
        out
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Inline error; taking it clears it.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}

fn push_segment(buf: &mut String, segment: &str) {
    let segment = segment.trim();
    if segment.is_empty() {
        return;
    }
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(segment);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeRecognizer {
        started: Vec<String>,
        stops: usize,
    }

    impl Recognizer for FakeRecognizer {
        fn start(&mut self, lang: &str) -> Result<(), SpeechError> {
            self.started.push(lang.to_string());
            Ok(())
        }
        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    fn dictation() -> (Dictation<FakeRecognizer>, mpsc::UnboundedSender<RecognitionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Dictation::new(FakeRecognizer::default(), rx), tx)
    }

    fn said(text: &str, is_final: bool) -> RecognitionEvent {
        RecognitionEvent::Transcript {
            text: text.into(),
            is_final,
        }
    }

    #[test]
    fn toggle_starts_and_stops() {
        let (mut d, _tx) = dictation();
        assert!(d.toggle("te-IN"));
        assert!(d.is_listening());
        assert_eq!(d.recognizer.started, vec!["te-IN"]);

        assert!(!d.toggle("te-IN"));
        assert_eq!(d.recognizer.stops, 1);
    }

    #[test]
    fn final_transcripts_accumulate() {
        let (mut d, tx) = dictation();
        d.toggle("en-US");
        tx.send(said("We sell cakes", true)).unwrap();
        tx.send(said("and coff", false)).unwrap();
        assert_eq!(d.poll_events().unwrap(), "We sell cakes and coff");

        tx.send(said("and coffee", true)).unwrap();
        assert_eq!(d.poll_events().unwrap(), "We sell cakes and coffee");
        assert!(d.poll_events().is_none());
    }

    #[test]
    fn restart_clears_buffer() {
        let (mut d, tx) = dictation();
        d.toggle("en-US");
        tx.send(said("old text", true)).unwrap();
        d.poll_events();
        d.toggle("en-US");
        d.toggle("en-US");
        assert_eq!(d.transcript(), "");
    }

    #[test]
    fn error_is_inline_and_stops_listening() {
        let (mut d, tx) = dictation();
        d.toggle("hi-IN");
        tx.send(RecognitionEvent::Error("not-allowed".into())).unwrap();
        assert!(d.poll_events().is_none());
        assert!(!d.is_listening());
        assert_eq!(d.take_error().unwrap(), "Microphone access was denied.");
        assert!(d.take_error().is_none());
    }

    #[test]
    fn ended_event_stops_listening() {
        let (mut d, tx) = dictation();
        d.toggle("en-US");
        tx.send(RecognitionEvent::Ended).unwrap();
        d.poll_events();
        assert!(!d.is_listening());
    }

    #[test]
    fn unavailable_recognizer_reports_error() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut d = Dictation::new(Unavailable, rx);
        assert!(!d.toggle("en-US"));
        assert!(d.take_error().unwrap().contains("not supported"));
    }

    #[test]
    fn unknown_error_code_is_passed_through() {
        assert_eq!(error_message("aborted"), "Speech recognition error: aborted");
    }
}
