//! Terminal front end: ratatui stand-in for the browser UI.
//!
//! ## Architecture (TEA)
//!
//! Model (`TuiApp`, wrapping the `Session`) + Update (`input::handle_key`,
//! `TuiApp::apply_job`) + View (`layout::draw`, chosen by `router::route`).
//! Immediate mode: every frame is drawn from the session alone.

pub mod app;
pub mod input;
pub mod input_line;
pub mod layout;
pub mod router;
pub mod runner;
