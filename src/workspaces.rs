//! Workspace operations: the logic shared by the CLI and the interactive
//! list.
//!
//! [`WorkspaceOps`] combines a [`WorkspaceProbe`], a [`SettingsBridge`] and a
//! caller-supplied [`NameStore`].  All validation of user input happens here,
//! before any file write or external call.

use crate::render::{merge_rows, DisplayRow, SelectionError, Snapshot};
use crate::store::{NameStore, StoreError};
use crate::traits::{SettingsBridge, WorkspaceProbe};
use log::{debug, info, warn};

/// Possible errors from workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// A bad index or count from user input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The names document could not be read, parsed or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A system utility is missing, failed, or answered nonsense.
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// A selected line was not of the form `N: label`.
    #[error(transparent)]
    Format(#[from] SelectionError),

    #[error("no active workspace found")]
    NotFound,

    /// Terminal or standard-stream failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Orchestrates the probe and settings bridge on behalf of a name store.
///
/// The store is not owned: every mutating operation takes it explicitly, so
/// callers (and tests) decide which file backs it.
pub struct WorkspaceOps<P: WorkspaceProbe, S: SettingsBridge> {
    probe: P,
    settings: S,
}

/// Upper bound on workspace indices and counts; GNOME caps
/// `num-workspaces` at 36.
pub const MAX_WORKSPACES: usize = 36;

/// Check a 1-based workspace index or count from user input.
pub fn validate_workspace_number(value: i64, what: &str) -> Result<usize, WorkspaceError> {
    if value < 1 {
        return Err(WorkspaceError::InvalidArgument(format!(
            "{} must be >= 1, got {}",
            what, value
        )));
    }
    match usize::try_from(value) {
        Ok(n) if n <= MAX_WORKSPACES => Ok(n),
        _ => Err(WorkspaceError::InvalidArgument(format!(
            "{} must be <= {}, got {}",
            what, MAX_WORKSPACES, value
        ))),
    }
}

/// Check the arguments of a rename before anything is loaded or written.
pub fn validate_rename(index: i64, name: &str) -> Result<usize, WorkspaceError> {
    let index = validate_workspace_number(index, "workspace index")?;
    if name.is_empty() {
        return Err(WorkspaceError::InvalidArgument("name must not be empty".into()));
    }
    Ok(index)
}

/// Apply `edit` to a copy of `store`, persist the copy, and only then
/// replace `store` with it.  A failed save leaves `store` untouched.
fn commit<T>(store: &mut NameStore, edit: impl FnOnce(&mut NameStore) -> T) -> Result<T, WorkspaceError> {
    let mut next = store.clone();
    let out = edit(&mut next);
    next.save()?;
    *store = next;
    Ok(out)
}

impl<P: WorkspaceProbe, S: SettingsBridge> WorkspaceOps<P, S> {
    pub fn new(probe: P, settings: S) -> Self {
        Self { probe, settings }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    //  Reads

    /// Number of live workspaces.
    pub fn workspace_count(&self) -> Result<usize, WorkspaceError> {
        self.probe
            .workspace_count()
            .map_err(|e| WorkspaceError::ExternalTool(e.to_string()))
    }

    /// 0-based index of the active workspace.
    pub fn active_index(&self) -> Result<usize, WorkspaceError> {
        self.probe
            .active_workspace()
            .map_err(|e| WorkspaceError::ExternalTool(e.to_string()))?
            .ok_or(WorkspaceError::NotFound)
    }

    pub fn dynamic(&self) -> Result<bool, WorkspaceError> {
        self.settings
            .dynamic_workspaces()
            .map_err(|e| WorkspaceError::ExternalTool(format!("reading dynamic workspaces: {}", e)))
    }

    /// Fetch the live state.
    ///
    /// Only the workspace count is required; an unreadable dynamic flag or
    /// active index degrades to "off" / "none".
    pub fn snapshot(&self) -> Result<Snapshot, WorkspaceError> {
        let count = self.workspace_count()?;
        let active = match self.active_index() {
            Ok(i) => Some(i),
            Err(e) => {
                debug!("no active workspace: {}", e);
                None
            }
        };
        let dynamic = self.dynamic().unwrap_or_else(|e| {
            warn!("{}", e);
            false
        });
        Ok(Snapshot {
            count,
            active,
            dynamic,
        })
    }

    /// Fresh merged rows for display.
    pub fn rows(&self, store: &NameStore) -> Result<Vec<DisplayRow>, WorkspaceError> {
        Ok(merge_rows(&self.snapshot()?, store))
    }

    //  Mutations

    /// Set the name of 1-based workspace `index`, padding the stored list
    /// with defaults as needed, and persist.
    pub fn rename(&self, store: &mut NameStore, index: i64, name: &str) -> Result<(), WorkspaceError> {
        let index = validate_rename(index, name)?;
        info!("rename workspace {} to {:?}", index, name);
        commit(store, |s| s.set(index - 1, name))
    }

    /// Make sure at least `count` workspaces exist and have names.
    ///
    /// If `count` exceeds the live count the desktop is switched to static
    /// mode with `count` workspaces.  That write is best-effort: a failure is
    /// logged, not returned, so the stored list can end up longer than the
    /// live count.  Existing names are never removed.
    pub fn create(&self, store: &mut NameStore, count: i64) -> Result<(), WorkspaceError> {
        let count = validate_workspace_number(count, "workspace count")?;
        let live = self.workspace_count()?;
        if count > live {
            info!("expanding static workspaces from {} to {}", live, count);
            if let Err(e) = self.settings.expand_static(count) {
                warn!("failed to expand static workspaces to {}: {}", count, e);
            }
        }
        commit(store, |s| s.pad_to(count))
    }

    /// Switch to 1-based workspace `index`.
    pub fn switch(&self, index: i64) -> Result<(), WorkspaceError> {
        let index = validate_workspace_number(index, "workspace index")?;
        info!("switch to workspace {}", index);
        self.probe
            .switch_workspace(index - 1)
            .map_err(|e| WorkspaceError::ExternalTool(e.to_string()))
    }

    pub fn set_dynamic(&self, on: bool) -> Result<(), WorkspaceError> {
        info!("dynamic workspaces -> {}", on);
        self.settings
            .set_dynamic_workspaces(on)
            .map_err(|e| WorkspaceError::ExternalTool(format!("setting dynamic workspaces: {}", e)))
    }

    /// Flip the dynamic-workspaces flag and return the new value.
    pub fn toggle_dynamic(&self) -> Result<bool, WorkspaceError> {
        let next = !self.dynamic()?;
        self.set_dynamic(next)?;
        Ok(next)
    }

    /// Swap the stored names at two 0-based rows and persist.
    pub fn swap_names(&self, store: &mut NameStore, a: usize, b: usize) -> Result<(), WorkspaceError> {
        debug!("swap names {} <-> {}", a, b);
        commit(store, |s| s.swap(a, b))
    }

    /// Remove the stored name at 0-based `index` and persist.
    ///
    /// Returns `false` (and writes nothing) if no name is stored there.
    pub fn remove_name(&self, store: &mut NameStore, index: usize) -> Result<bool, WorkspaceError> {
        let Some(name) = store.get(index) else {
            return Ok(false);
        };
        info!("remove name {:?} at row {}", name, index + 1);
        commit(store, |s| s.remove(index))?;
        Ok(true)
    }
}
