//! **gnav** — named GNOME workspaces.
//!
//! gnav keeps a list of human-readable workspace names in a small JSON file
//! and merges it with the live workspace state reported by the desktop.  The
//! merged list can be printed, fed to a fuzzy-finder (wofi), or browsed and
//! edited in an interactive terminal list.
//!
//! # Architecture
//!
//! The crate is organised around a handful of capability traits:
//!
//! * [`traits::WorkspaceProbe`] — workspace count, active workspace, and
//!   switching.
//! * [`traits::SettingsBridge`] — the dynamic-workspaces flag and the static
//!   workspace count.
//! * [`traits::Picker`] — a fuzzy-finder that returns one chosen line.
//!
//! Concrete implementations live in [`gnome`] (`wmctrl`, `gsettings` and
//! `wofi`).  [`workspaces::WorkspaceOps`] holds all validation and
//! orchestration, [`render`] turns state into lines, and
//! [`tui::controller`] is the interactive list's state machine.

pub mod command;
pub mod config;
pub mod gnome;
pub mod launcher;
pub mod render;
pub mod store;
pub mod traits;
pub mod tui;
pub mod workspaces;
