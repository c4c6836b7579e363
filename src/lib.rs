//! BizBoost: describe a business, get a single-page website.
//!
//! Layers, leaf first: `catalog` and `prompts` are pure data and text;
//! `llm` talks to Gemini; `generation` turns requests into sanitized model
//! output; `session` is the state machine the UI renders; `speech`,
//! `export` and `tui` sit on top.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod generation;
pub mod llm;
pub mod prompts;
pub mod session;
pub mod speech;
pub mod tui;
