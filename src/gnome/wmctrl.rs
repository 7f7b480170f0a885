//! [`WorkspaceProbe`] implementation backed by `wmctrl`.
//!
//! `wmctrl -d` prints one line per desktop, the second column being `*`
//! for the active one and `-` otherwise:
//!
//! ```text
//! 0  * DG: 1920x1080  VP: 0,0  WA: 0,27 1920x1053  Workspace 1
//! 1  - DG: 1920x1080  VP: N/A  WA: 0,27 1920x1053  Workspace 2
//! ```
//!
//! `wmctrl -s N` switches to the 0-based desktop `N`.

use crate::gnome::exec::SystemRunner;
use crate::traits::{CommandRunner, WorkspaceProbe};

/// Marker `wmctrl -d` puts in the second column of the active desktop.
const ACTIVE_MARKER: &str = "*";

/// `wmctrl`-backed workspace probe.
///
/// Every method spawns a fresh `wmctrl` process; nothing is cached.
pub struct WmctrlProbe<R: CommandRunner = SystemRunner> {
    runner: R,
    program: String,
}

/// Errors that can occur when talking to `wmctrl`.
#[derive(Debug, thiserror::Error)]
#[error("wmctrl error: {0}")]
pub struct WmctrlError(String);

impl WmctrlProbe<SystemRunner> {
    /// Create a probe that runs `program` (usually just `"wmctrl"`).
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(SystemRunner, program)
    }
}

impl<R: CommandRunner> WmctrlProbe<R> {
    pub fn with_runner(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    fn list_desktops(&self) -> Result<String, WmctrlError> {
        self.runner
            .run(&self.program, &["-d"], None)
            .map_err(|e| WmctrlError(e.to_string()))
    }
}

/// Number of desktops in `wmctrl -d` output.
pub fn parse_count(output: &str) -> usize {
    output.trim().lines().filter(|l| !l.trim().is_empty()).count()
}

/// 0-based index of the desktop flagged active in `wmctrl -d` output.
pub fn parse_active(output: &str) -> Option<usize> {
    output
        .trim()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .position(|line| line.split_whitespace().nth(1) == Some(ACTIVE_MARKER))
}

impl<R: CommandRunner> WorkspaceProbe for WmctrlProbe<R> {
    type Error = WmctrlError;

    fn workspace_count(&self) -> Result<usize, Self::Error> {
        Ok(parse_count(&self.list_desktops()?))
    }

    fn active_workspace(&self) -> Result<Option<usize>, Self::Error> {
        Ok(parse_active(&self.list_desktops()?))
    }

    fn switch_workspace(&self, index: usize) -> Result<(), Self::Error> {
        let target = index.to_string();
        self.runner
            .run(&self.program, &["-s", &target], None)
            .map(|_| ())
            .map_err(|e| WmctrlError(e.to_string()))
    }
}
