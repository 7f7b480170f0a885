//! Fuzzy-finder integration: building the feed, reading a choice back, and
//! the combined "show menu, then switch" flow.

use crate::render::{parse_selection, render_lines, ActiveMarker, SelectionError};
use crate::store::NameStore;
use crate::traits::{Picker, SettingsBridge, WorkspaceProbe};
use crate::workspaces::{WorkspaceError, WorkspaceOps};
use log::{debug, info};
use std::io::BufRead;

/// Lines to pipe into the fuzzy-finder, the active one wrapped per `marker`.
pub fn feed<P: WorkspaceProbe, S: SettingsBridge>(
    ops: &WorkspaceOps<P, S>,
    store: &NameStore,
    marker: &ActiveMarker,
) -> Result<Vec<String>, WorkspaceError> {
    Ok(render_lines(&ops.rows(store)?, marker))
}

/// Parse a chosen `N: label` line and switch to workspace `N`.
pub fn switch_to_selection<P: WorkspaceProbe, S: SettingsBridge>(
    ops: &WorkspaceOps<P, S>,
    line: &str,
) -> Result<(), WorkspaceError> {
    let selection = parse_selection(line)?;
    debug!("selected {} ({:?})", selection.index, selection.label);
    ops.switch(selection.index)
}

/// Read the first line from `input` and switch to it.
pub fn select_from_reader<P: WorkspaceProbe, S: SettingsBridge>(
    ops: &WorkspaceOps<P, S>,
    input: impl BufRead,
) -> Result<(), WorkspaceError> {
    let line = input
        .lines()
        .next()
        .transpose()?
        .ok_or(SelectionError::Empty)?;
    switch_to_selection(ops, &line)
}

/// Show the feed in `picker` and switch to whatever the user chose.
pub fn pick_and_switch<P: WorkspaceProbe, S: SettingsBridge, K: Picker>(
    ops: &WorkspaceOps<P, S>,
    store: &NameStore,
    picker: &K,
    marker: &ActiveMarker,
) -> Result<(), WorkspaceError> {
    let mut input = feed(ops, store, marker)?.join("\n");
    input.push('\n');
    let choice = picker
        .pick(&input)
        .map_err(|e| WorkspaceError::ExternalTool(e.to_string()))?;
    info!("picked {:?}", choice);
    switch_to_selection(ops, &choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspaces::testing::{FakeProbe, FakeSettings};
    use std::cell::RefCell;

    struct FakePicker {
        answer: Result<&'static str, &'static str>,
        seen: RefCell<Option<String>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct PickerError(&'static str);

    impl Picker for FakePicker {
        type Error = PickerError;

        fn pick(&self, feed: &str) -> Result<String, PickerError> {
            *self.seen.borrow_mut() = Some(feed.to_string());
            self.answer.map(str::to_string).map_err(PickerError)
        }
    }

    fn fixture() -> (WorkspaceOps<FakeProbe, FakeSettings>, NameStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = NameStore::load(dir.path().join("workspaces.json")).unwrap();
        store.set(0, "Web");
        store.set(1, "Chat");
        let ops = WorkspaceOps::new(FakeProbe::new(3, Some(1)), FakeSettings::default());
        (ops, store, dir)
    }

    fn span() -> ActiveMarker {
        ActiveMarker::Span {
            color: "#ff5555".into(),
        }
    }

    #[test]
    fn feed_highlights_active() {
        let (ops, store, _dir) = fixture();
        assert_eq!(
            feed(&ops, &store, &span()).unwrap(),
            vec![
                "1: Web",
                "<span foreground='#ff5555'>2: Chat</span>",
                "3: Workspace 3"
            ]
        );
    }

    #[test]
    fn select_reads_first_line_only() {
        let (ops, _store, _dir) = fixture();
        select_from_reader(&ops, "3: Workspace 3\n1: Web\n".as_bytes()).unwrap();
        assert_eq!(*ops.probe().switches.borrow(), vec![2]);
    }

    #[test]
    fn select_without_input_is_a_format_error() {
        let (ops, _store, _dir) = fixture();
        let err = select_from_reader(&ops, "".as_bytes()).unwrap_err();
        assert!(matches!(err, WorkspaceError::Format(SelectionError::Empty)));
    }

    #[test]
    fn select_rejects_malformed_line_without_switching() {
        let (ops, _store, _dir) = fixture();
        let err = select_from_reader(&ops, "Chat\n".as_bytes()).unwrap_err();
        assert!(matches!(err, WorkspaceError::Format(SelectionError::MissingColon(_))));
        assert_eq!(ops.probe().calls.get(), 0);
    }

    #[test]
    fn select_zero_is_invalid() {
        let (ops, _store, _dir) = fixture();
        let err = select_from_reader(&ops, "0: nope\n".as_bytes()).unwrap_err();
        assert!(matches!(err, WorkspaceError::InvalidArgument(_)));
    }

    #[test]
    fn pick_pipes_feed_and_switches() {
        let (ops, store, _dir) = fixture();
        let picker = FakePicker {
            answer: Ok("<span foreground='#ff5555'>2: Chat</span>"),
            seen: RefCell::new(None),
        };
        pick_and_switch(&ops, &store, &picker, &span()).unwrap();
        assert_eq!(*ops.probe().switches.borrow(), vec![1]);
        let seen = picker.seen.borrow().clone().unwrap();
        assert!(seen.starts_with("1: Web\n"));
        assert!(seen.ends_with("3: Workspace 3\n"));
    }

    #[test]
    fn cancelled_pick_is_an_external_error() {
        let (ops, store, _dir) = fixture();
        let picker = FakePicker {
            answer: Err("exit status: 1"),
            seen: RefCell::new(None),
        };
        let err = pick_and_switch(&ops, &store, &picker, &span()).unwrap_err();
        assert!(matches!(err, WorkspaceError::ExternalTool(_)));
        assert!(ops.probe().switches.borrow().is_empty());
    }

    #[test]
    fn empty_pick_is_a_format_error() {
        let (ops, store, _dir) = fixture();
        let picker = FakePicker {
            answer: Ok(""),
            seen: RefCell::new(None),
        };
        let err = pick_and_switch(&ops, &store, &picker, &span()).unwrap_err();
        assert!(matches!(err, WorkspaceError::Format(SelectionError::Empty)));
    }
}
