//! Core traits that decouple gnav from the concrete desktop utilities.
//!
//! Every concrete backend (`wmctrl`, `gsettings`, `wofi`, a test harness,
//! …) implements one of these traits.  The
//! [`WorkspaceOps`](crate::workspaces::WorkspaceOps) and the interactive
//! [`Controller`](crate::tui::controller::Controller) only depend on these
//! abstractions.

/// Read-only view of the window manager's workspaces plus the ability to
/// switch between them.
///
/// Every call is a point-in-time read: implementations must not cache, so
/// that every view reflects the live system state.
pub trait WorkspaceProbe {
    /// The error type produced by this probe.
    type Error: std::error::Error + Send + 'static;

    /// Number of workspaces the window manager currently reports.
    fn workspace_count(&self) -> Result<usize, Self::Error>;

    /// 0-based index of the active workspace, or `None` if no workspace
    /// carries the active marker.
    fn active_workspace(&self) -> Result<Option<usize>, Self::Error>;

    /// Switch to the workspace at 0-based `index`.
    fn switch_workspace(&self, index: usize) -> Result<(), Self::Error>;
}

/// Access to the desktop settings store.
pub trait SettingsBridge {
    /// The error type produced by this bridge.
    type Error: std::error::Error + Send + 'static;

    /// Whether the desktop grows workspaces on demand.
    fn dynamic_workspaces(&self) -> Result<bool, Self::Error>;

    /// Turn dynamic workspaces on or off.
    fn set_dynamic_workspaces(&self, on: bool) -> Result<(), Self::Error>;

    /// Write the static workspace-count preference.
    fn set_workspace_count(&self, count: usize) -> Result<(), Self::Error>;

    /// Switch the desktop into static mode with `count` workspaces.
    ///
    /// Both writes are attempted even if the first fails; the first error
    /// (if any) is returned.
    fn expand_static(&self, count: usize) -> Result<(), Self::Error> {
        let count_result = self.set_workspace_count(count);
        let dynamic_result = self.set_dynamic_workspaces(false);
        count_result.and(dynamic_result)
    }
}

/// Runs an external program and captures its standard output.
///
/// The process backends in [`gnome`](crate::gnome) are written against
/// this trait so their text parsing can be exercised with canned output.
pub trait CommandRunner {
    /// The error type produced by this runner.
    type Error: std::error::Error + Send + 'static;

    /// Run `program` with `args`, optionally feeding `stdin`, and return
    /// its standard output.
    ///
    /// A non-zero exit status is an error.
    fn run(&self, program: &str, args: &[&str], stdin: Option<&str>) -> Result<String, Self::Error>;
}

/// A fuzzy-finder that lets the user pick one line out of a feed.
pub trait Picker {
    /// The error type produced by this picker.
    type Error: std::error::Error + Send + 'static;

    /// Present the newline-delimited `feed` and return the chosen line as
    /// the finder printed it.
    fn pick(&self, feed: &str) -> Result<String, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    //  Mock SettingsBridge

    /// A test double that records every write made to it.
    #[derive(Debug, Default)]
    struct MockSettings {
        writes: RefCell<Vec<String>>,
        fail_count_write: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    impl SettingsBridge for MockSettings {
        type Error = MockError;

        fn dynamic_workspaces(&self) -> Result<bool, MockError> {
            Ok(true)
        }

        fn set_dynamic_workspaces(&self, on: bool) -> Result<(), MockError> {
            self.writes.borrow_mut().push(format!("dynamic={}", on));
            Ok(())
        }

        fn set_workspace_count(&self, count: usize) -> Result<(), MockError> {
            self.writes.borrow_mut().push(format!("count={}", count));
            if self.fail_count_write {
                Err(MockError)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn expand_static_writes_count_then_disables_dynamic() {
        let settings = MockSettings::default();
        settings.expand_static(6).unwrap();
        assert_eq!(*settings.writes.borrow(), vec!["count=6", "dynamic=false"]);
    }

    #[test]
    fn expand_static_attempts_both_writes_on_failure() {
        let settings = MockSettings {
            fail_count_write: true,
            ..Default::default()
        };
        assert!(settings.expand_static(4).is_err());
        assert_eq!(settings.writes.borrow().len(), 2);
    }
}
