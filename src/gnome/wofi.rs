//! [`Picker`] implementation backed by `wofi --show dmenu`.

use crate::gnome::exec::SystemRunner;
use crate::traits::{CommandRunner, Picker};

/// Runs wofi in dmenu mode with the feed on its standard input.
pub struct WofiPicker<R: CommandRunner = SystemRunner> {
    runner: R,
    program: String,
    args: Vec<String>,
}

/// Errors from running wofi.  A cancelled menu (non-zero exit) is one too.
#[derive(Debug, thiserror::Error)]
#[error("wofi canceled or error: {0}")]
pub struct WofiError(String);

impl WofiPicker<SystemRunner> {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self::with_runner(SystemRunner, program, args)
    }
}

impl<R: CommandRunner> WofiPicker<R> {
    pub fn with_runner(runner: R, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            runner,
            program: program.into(),
            args,
        }
    }
}

impl<R: CommandRunner> Picker for WofiPicker<R> {
    type Error = WofiError;

    fn pick(&self, feed: &str) -> Result<String, WofiError> {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        let out = self
            .runner
            .run(&self.program, &args, Some(feed))
            .map_err(|e| WofiError(e.to_string()))?;
        Ok(out.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnome::testing::CannedRunner;

    #[test]
    fn pipes_feed_and_trims_choice() {
        let picker = WofiPicker::with_runner(
            CannedRunner::answering("2: Chat\n"),
            "wofi",
            vec!["--show".into(), "dmenu".into()],
        );
        assert_eq!(picker.pick("1: Web\n2: Chat\n").unwrap(), "2: Chat");
        assert_eq!(*picker.runner.calls.borrow(), vec!["wofi --show dmenu"]);
        assert_eq!(*picker.runner.stdin.borrow(), vec!["1: Web\n2: Chat\n"]);
    }

    #[test]
    fn cancel_is_an_error() {
        let picker = WofiPicker::with_runner(CannedRunner::failing("exit status: 1"), "wofi", vec![]);
        let err = picker.pick("1: Web\n").unwrap_err();
        assert!(err.to_string().starts_with("wofi canceled or error"));
    }
}
