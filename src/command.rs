//! Command-line vocabulary.
//!
//! [`Cli`] is parsed by clap; [`Command`] lists every subcommand.  With no
//! subcommand gnav opens the interactive list.
//!
//! Indices and counts are parsed as signed integers so that `0` or a
//! negative value reaches [`WorkspaceOps`](crate::workspaces::WorkspaceOps)
//! and is rejected there with a proper error.

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gnav",
    version,
    about = "Name, create and switch GNOME workspaces"
)]
pub struct Cli {
    /// Workspace names file (defaults to $XDG_CONFIG_HOME/gnav/workspaces.json).
    #[arg(long, global = true, env = "GNAV_NAMES_FILE")]
    pub names_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Every action gnav can perform from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Display workspace names.
    List,
    /// Rename a workspace.
    Rename {
        #[arg(allow_negative_numbers = true)]
        index: i64,
        /// New name; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Add or expand static workspaces.
    Create {
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Switch to workspace by index.
    Switch {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Enable/disable GNOME dynamic workspaces.
    Dynamic {
        #[arg(value_enum, ignore_case = true)]
        state: Toggle,
    },
    /// Output the workspace list for wofi.
    #[command(name = "wofi-feed", alias = "wofi")]
    WofiFeed,
    /// Switch workspace from an "index: name" line on stdin.
    #[command(name = "wofi-select", alias = "wofi-switch")]
    WofiSelect,
    /// Pick a workspace with wofi and switch to it.
    #[command(name = "wofi-run")]
    WofiRun,
    /// Launch the text-based UI.
    Interactive,
}

impl Command {
    /// The new name for [`Command::Rename`], words joined by single spaces.
    pub fn joined_name(words: &[String]) -> String {
        words.join(" ")
    }
}

/// `on` / `off` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::On => write!(f, "on"),
            Toggle::Off => write!(f, "off"),
        }
    }
}
