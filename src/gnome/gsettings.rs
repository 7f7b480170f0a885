//! [`SettingsBridge`] implementation backed by `gsettings`.

use crate::gnome::exec::SystemRunner;
use crate::traits::{CommandRunner, SettingsBridge};
use log::debug;

const MUTTER_SCHEMA: &str = "org.gnome.mutter";
const DYNAMIC_KEY: &str = "dynamic-workspaces";
const WM_PREFERENCES_SCHEMA: &str = "org.gnome.desktop.wm.preferences";
const COUNT_KEY: &str = "num-workspaces";

/// `gsettings`-backed settings bridge.
pub struct GSettingsBridge<R: CommandRunner = SystemRunner> {
    runner: R,
    program: String,
}

/// Errors that can occur when talking to `gsettings`.
#[derive(Debug, thiserror::Error)]
#[error("gsettings error: {0}")]
pub struct GSettingsError(String);

impl GSettingsBridge<SystemRunner> {
    /// Create a bridge that runs `program` (usually just `"gsettings"`).
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(SystemRunner, program)
    }
}

impl<R: CommandRunner> GSettingsBridge<R> {
    pub fn with_runner(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    fn get(&self, schema: &str, key: &str) -> Result<String, GSettingsError> {
        let out = self
            .runner
            .run(&self.program, &["get", schema, key], None)
            .map_err(|e| GSettingsError(e.to_string()))?;
        Ok(out.trim().to_string())
    }

    fn set(&self, schema: &str, key: &str, value: &str) -> Result<(), GSettingsError> {
        debug!("gsettings set {} {} {}", schema, key, value);
        self.runner
            .run(&self.program, &["set", schema, key, value], None)
            .map(|_| ())
            .map_err(|e| GSettingsError(e.to_string()))
    }
}

/// Parse a `gsettings get` boolean.
///
/// Only the literal `true` counts as on.
pub fn parse_bool(value: &str) -> bool {
    value.trim() == "true"
}

impl<R: CommandRunner> SettingsBridge for GSettingsBridge<R> {
    type Error = GSettingsError;

    fn dynamic_workspaces(&self) -> Result<bool, Self::Error> {
        Ok(parse_bool(&self.get(MUTTER_SCHEMA, DYNAMIC_KEY)?))
    }

    fn set_dynamic_workspaces(&self, on: bool) -> Result<(), Self::Error> {
        let value = if on { "true" } else { "false" };
        self.set(MUTTER_SCHEMA, DYNAMIC_KEY, value)
    }

    fn set_workspace_count(&self, count: usize) -> Result<(), Self::Error> {
        self.set(WM_PREFERENCES_SCHEMA, COUNT_KEY, &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnome::testing::CannedRunner;

    #[test]
    fn reads_dynamic_flag() {
        let bridge = GSettingsBridge::with_runner(CannedRunner::answering("true\n"), "gsettings");
        assert!(bridge.dynamic_workspaces().unwrap());
        assert_eq!(
            *bridge.runner.calls.borrow(),
            vec!["gsettings get org.gnome.mutter dynamic-workspaces"]
        );
    }

    #[test]
    fn anything_but_true_is_off() {
        assert!(!parse_bool("false"));
        assert!(!parse_bool("'true'"));
        assert!(parse_bool("  true \n"));
    }

    #[test]
    fn writes_literal_booleans() {
        let bridge = GSettingsBridge::with_runner(CannedRunner::default(), "gsettings");
        bridge.set_dynamic_workspaces(true).unwrap();
        bridge.set_dynamic_workspaces(false).unwrap();
        assert_eq!(
            *bridge.runner.calls.borrow(),
            vec![
                "gsettings set org.gnome.mutter dynamic-workspaces true",
                "gsettings set org.gnome.mutter dynamic-workspaces false",
            ]
        );
    }

    #[test]
    fn expand_static_sets_count_and_static_mode() {
        let bridge = GSettingsBridge::with_runner(CannedRunner::default(), "gsettings");
        bridge.expand_static(7).unwrap();
        assert_eq!(
            *bridge.runner.calls.borrow(),
            vec![
                "gsettings set org.gnome.desktop.wm.preferences num-workspaces 7",
                "gsettings set org.gnome.mutter dynamic-workspaces false",
            ]
        );
    }

    #[test]
    fn failure_is_reported() {
        let bridge = GSettingsBridge::with_runner(CannedRunner::failing("no schema"), "gsettings");
        assert!(bridge.dynamic_workspaces().is_err());
    }
}
