//! State machine behind the interactive workspace list.
//!
//! The controller knows nothing about terminals: it consumes abstract
//! [`Key`]s and exposes its [`Mode`], rows and cursor for a front-end to
//! draw.  In [`Mode::Browsing`] keys are looked up in [`KEYMAP`] and the
//! resulting [`Action`] is applied; the other modes handle text entry or
//! dismissal themselves.
//!
//! After every mutation (rename, create, reorder, delete, toggle, switch)
//! the stored names are re-read from disk and the live state is re-fetched,
//! so the displayed rows are never trusted across a mutation.
//!
//! Errors never escape: they are shown as a dismissible
//! [`Mode::ShowingMessage`].

use crate::render::DisplayRow;
use crate::store::NameStore;
use crate::traits::{SettingsBridge, WorkspaceProbe};
use crate::workspaces::{WorkspaceError, WorkspaceOps};
use log::{debug, warn};

/// Input symbols the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Home,
    End,
    Enter,
    Esc,
    Backspace,
    Char(char),
}

/// Transitions available from [`Mode::Browsing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    First,
    Last,
    MoveRowUp,
    MoveRowDown,
    Rename,
    Create,
    ToggleDynamic,
    Delete,
    Select,
    Help,
    Quit,
}

/// Browsing keybindings.
pub const KEYMAP: &[(Key, Action)] = &[
    (Key::Up, Action::CursorUp),
    (Key::Char('k'), Action::CursorUp),
    (Key::Down, Action::CursorDown),
    (Key::Char('j'), Action::CursorDown),
    (Key::Home, Action::First),
    (Key::Char('g'), Action::First),
    (Key::End, Action::Last),
    (Key::Char('G'), Action::Last),
    (Key::Char('K'), Action::MoveRowUp),
    (Key::Char('J'), Action::MoveRowDown),
    (Key::Char('r'), Action::Rename),
    (Key::Char('R'), Action::Rename),
    (Key::Char('n'), Action::Create),
    (Key::Char('N'), Action::Create),
    (Key::Char('z'), Action::ToggleDynamic),
    (Key::Char('Z'), Action::ToggleDynamic),
    (Key::Char('x'), Action::Delete),
    (Key::Char('X'), Action::Delete),
    (Key::Enter, Action::Select),
    (Key::Char('?'), Action::Help),
    (Key::Char('q'), Action::Quit),
    (Key::Char('Q'), Action::Quit),
    (Key::Esc, Action::Quit),
];

/// Look up the browsing action bound to `key`.
pub fn action_for(key: Key) -> Option<Action> {
    KEYMAP.iter().find(|(k, _)| *k == key).map(|(_, a)| *a)
}

pub const HELP_TEXT: &str = "Enter: Switch\n\
↑/↓ or j/k: Move\n\
R: Rename\n\
N: New Workspace\n\
Z: Toggle Dynamic\n\
X: Remove\n\
Shift+J/K: Rearrange\n\
G/g: Last/First\n\
Q/Esc: Quit";

pub const FOOTER_TEXT: &str = "[↑/↓] Move  [Enter] Switch  [X] Remove  [?] More  [Q/Esc] Quit";

/// What the controller is currently doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// The list has focus.
    Browsing,
    /// Inline rename of the 0-based row `index`.
    EditingName { index: usize, buffer: String },
    /// Dialog asking how many workspaces should exist.
    CreatingCount { buffer: String },
    ShowingHelp,
    ShowingMessage(String),
}

impl Mode {
    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self {
            Mode::EditingName { buffer, .. } | Mode::CreatingCount { buffer } => Some(buffer),
            _ => None,
        }
    }

    /// Whether the mode blocks list interaction.
    pub fn is_modal(&self) -> bool {
        matches!(self, Mode::ShowingHelp | Mode::ShowingMessage(_) | Mode::CreatingCount { .. })
    }
}

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive list.
pub struct Controller<P: WorkspaceProbe, S: SettingsBridge> {
    ops: WorkspaceOps<P, S>,
    store: NameStore,
    rows: Vec<DisplayRow>,
    cursor: usize,
    mode: Mode,
}

impl<P: WorkspaceProbe, S: SettingsBridge> Controller<P, S> {
    /// Build the controller and populate it from live state.
    ///
    /// The cursor starts on the active workspace.  A failed first refresh is
    /// reported as a message rather than an error.
    pub fn new(ops: WorkspaceOps<P, S>, store: NameStore) -> Self {
        let mut ctl = Self {
            ops,
            store,
            rows: Vec::new(),
            cursor: 0,
            mode: Mode::Browsing,
        };
        match ctl.refresh() {
            Ok(()) => {
                if let Some(active) = ctl.rows.iter().position(|r| r.active) {
                    ctl.cursor = active;
                }
            }
            Err(e) => ctl.show_error(e),
        }
        ctl
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn store(&self) -> &NameStore {
        &self.store
    }

    pub fn ops(&self) -> &WorkspaceOps<P, S> {
        &self.ops
    }

    /// Rows formatted as `(N) label`, the active one padded and marked
    /// with a trailing `*`.
    pub fn list_lines(&self) -> Vec<String> {
        let entries: Vec<String> = self
            .rows
            .iter()
            .map(|r| format!("({}) {}", r.number(), r.label))
            .collect();
        let width = entries.iter().map(|e| e.chars().count()).max().unwrap_or(0);
        entries
            .into_iter()
            .zip(&self.rows)
            .map(|(entry, row)| {
                if row.active {
                    format!("{:<width$}  *", entry, width = width)
                } else {
                    entry
                }
            })
            .collect()
    }

    /// Feed one key and apply the resulting transition.
    pub fn handle_key(&mut self, key: Key) -> Flow {
        match self.mode {
            Mode::Browsing => match action_for(key) {
                Some(action) => return self.apply(action),
                None => debug!("unbound key {:?}", key),
            },
            Mode::EditingName { .. } | Mode::CreatingCount { .. } => self.handle_edit_key(key),
            Mode::ShowingHelp | Mode::ShowingMessage(_) => {
                if matches!(key, Key::Enter | Key::Esc | Key::Char('q')) {
                    self.mode = Mode::Browsing;
                }
            }
        }
        Flow::Continue
    }

    /// Apply a browsing transition.
    pub fn apply(&mut self, action: Action) -> Flow {
        debug!("apply {:?} at row {}", action, self.cursor);
        let len = self.rows.len();
        match action {
            Action::Quit => return Flow::Quit,
            Action::CursorUp if len > 0 => self.cursor = (self.cursor + len - 1) % len,
            Action::CursorDown if len > 0 => self.cursor = (self.cursor + 1) % len,
            Action::First => self.cursor = 0,
            Action::Last => self.cursor = len.saturating_sub(1),
            Action::MoveRowUp if self.cursor > 0 && self.cursor < len => {
                let i = self.cursor;
                let result = self.ops.swap_names(&mut self.store, i, i - 1);
                self.after_mutation(result, Some(i - 1));
            }
            Action::MoveRowDown if self.cursor + 1 < len => {
                let i = self.cursor;
                let result = self.ops.swap_names(&mut self.store, i, i + 1);
                self.after_mutation(result, Some(i + 1));
            }
            Action::Delete if self.cursor < len => {
                let i = self.cursor;
                match self.ops.remove_name(&mut self.store, i) {
                    Ok(true) => self.after_mutation(Ok(()), Some(i)),
                    Ok(false) => debug!("row {} has no stored name", i + 1),
                    Err(e) => self.show_error(e),
                }
            }
            Action::Rename if self.cursor < len => {
                self.mode = Mode::EditingName {
                    index: self.cursor,
                    buffer: self.store.label(self.cursor),
                };
            }
            Action::Create => {
                self.mode = Mode::CreatingCount {
                    buffer: String::new(),
                };
            }
            Action::ToggleDynamic => match self.ops.toggle_dynamic() {
                Ok(on) => {
                    self.after_mutation(Ok(()), None);
                    if self.mode == Mode::Browsing {
                        let state = if on { "ON" } else { "OFF" };
                        self.mode = Mode::ShowingMessage(format!("Dynamic Workspaces = {}", state));
                    }
                }
                Err(e) => self.show_error(e),
            },
            Action::Select if self.cursor < len => {
                let result = self.ops.switch(self.cursor as i64 + 1);
                self.after_mutation(result, None);
            }
            Action::Help => self.mode = Mode::ShowingHelp,
            _ => {}
        }
        Flow::Continue
    }

    fn handle_edit_key(&mut self, key: Key) {
        match key {
            Key::Esc => self.mode = Mode::Browsing,
            Key::Enter => {
                let mode = std::mem::replace(&mut self.mode, Mode::Browsing);
                self.commit(mode);
            }
            Key::Backspace => {
                if let Some(buffer) = self.mode.buffer_mut() {
                    buffer.pop();
                }
            }
            Key::Char(c) => {
                if let Some(buffer) = self.mode.buffer_mut() {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn commit(&mut self, mode: Mode) {
        match mode {
            Mode::EditingName { index, buffer } => {
                // An emptied edit box discards the rename.
                if buffer.is_empty() {
                    return;
                }
                let result = self.ops.rename(&mut self.store, index as i64 + 1, &buffer);
                self.after_mutation(result, None);
            }
            Mode::CreatingCount { buffer } => {
                let result = match buffer.trim().parse::<i64>() {
                    Ok(count) => self.ops.create(&mut self.store, count),
                    Err(_) => Err(WorkspaceError::InvalidArgument(format!(
                        "workspace count must be a number, got {:?}",
                        buffer
                    ))),
                };
                self.after_mutation(result, None);
            }
            _ => {}
        }
    }

    /// Re-read the names file and the live state, then rebuild every row.
    pub fn refresh(&mut self) -> Result<(), WorkspaceError> {
        self.store = NameStore::load(self.store.path())?;
        self.rows = self.ops.rows(&self.store)?;
        self.clamp_cursor();
        Ok(())
    }

    fn after_mutation(&mut self, result: Result<(), WorkspaceError>, focus: Option<usize>) {
        if let Err(e) = result {
            self.show_error(e);
            // Keep the reported error; the list just shows whatever is on disk.
            if let Err(e) = self.refresh() {
                debug!("refresh after failed mutation: {}", e);
            }
            return;
        }
        if let Some(row) = focus {
            self.cursor = row;
        }
        if let Err(e) = self.refresh() {
            self.show_error(e);
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    fn show_error(&mut self, e: WorkspaceError) {
        warn!("{}", e);
        self.mode = Mode::ShowingMessage(format!("Error: {}", e));
    }
}
