//! Interactive workspace list.
//!
//! [`controller`] holds the toolkit-independent state machine and is always
//! compiled.  When the `tui` feature is enabled, [`terminal::run`] drives it
//! from a ratatui/crossterm event loop.

pub mod controller;

#[cfg(feature = "tui")]
pub mod terminal;
