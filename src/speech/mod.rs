//! Speech: text-to-speech narration and speech-to-text dictation.
//!
//! Native engines are external collaborators behind traits. Both directions
//! report lifecycle through `tokio::sync::mpsc` channels that the UI drains
//! once per frame; nothing here blocks or spawns.

pub mod caption;
pub mod recognition;
pub mod synthesis;

pub use caption::CaptionEngine;
pub use recognition::{Dictation, RecognitionEvent, Recognizer};
pub use synthesis::{Narrator, SpeechEngine, SpeechEvent, Utterance, Voice};

/// Errors raised by a speech engine when asked to start something.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech recognition is not supported on this device.")]
    RecognitionUnavailable,

    #[error("Speech synthesis is not supported on this device.")]
    SynthesisUnavailable,

    #[error("speech engine error: {0}")]
    Engine(String),
}
