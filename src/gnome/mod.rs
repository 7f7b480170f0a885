//! GNOME-specific implementations.
//!
//! This module provides concrete backends for the
//! [`WorkspaceProbe`](crate::traits::WorkspaceProbe),
//! [`SettingsBridge`](crate::traits::SettingsBridge) and
//! [`Picker`](crate::traits::Picker) traits, powered by the `wmctrl`,
//! `gsettings` and `wofi` command-line utilities.
//!
//! Nothing outside this module should spawn processes directly.

pub mod exec;
pub mod gsettings;
pub mod wmctrl;
pub mod wofi;
