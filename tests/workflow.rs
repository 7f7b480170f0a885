//! End-to-end flows through the public API with in-memory collaborators.

use gnav::launcher;
use gnav::render::ActiveMarker;
use gnav::store::NameStore;
use gnav::traits::{SettingsBridge, WorkspaceProbe};
use gnav::tui::controller::{Controller, Flow, Key, Mode};
use gnav::workspaces::{WorkspaceError, WorkspaceOps};
use std::cell::{Cell, RefCell};

#[derive(Debug, thiserror::Error)]
#[error("desktop unavailable")]
struct Unavailable;

/// A tiny desktop: a workspace count, an active index and a dynamic flag.
#[derive(Debug, Default)]
struct Desktop {
    count: Cell<usize>,
    active: Cell<Option<usize>>,
    dynamic: Cell<bool>,
    log: RefCell<Vec<String>>,
}

struct Probe<'a>(&'a Desktop);
struct Settings<'a>(&'a Desktop);

impl WorkspaceProbe for Probe<'_> {
    type Error = Unavailable;

    fn workspace_count(&self) -> Result<usize, Unavailable> {
        Ok(self.0.count.get())
    }

    fn active_workspace(&self) -> Result<Option<usize>, Unavailable> {
        Ok(self.0.active.get())
    }

    fn switch_workspace(&self, index: usize) -> Result<(), Unavailable> {
        if index >= self.0.count.get() {
            return Err(Unavailable);
        }
        self.0.log.borrow_mut().push(format!("switch {}", index));
        self.0.active.set(Some(index));
        Ok(())
    }
}

impl SettingsBridge for Settings<'_> {
    type Error = Unavailable;

    fn dynamic_workspaces(&self) -> Result<bool, Unavailable> {
        Ok(self.0.dynamic.get())
    }

    fn set_dynamic_workspaces(&self, on: bool) -> Result<(), Unavailable> {
        self.0.log.borrow_mut().push(format!("dynamic {}", on));
        self.0.dynamic.set(on);
        Ok(())
    }

    fn set_workspace_count(&self, count: usize) -> Result<(), Unavailable> {
        self.0.log.borrow_mut().push(format!("count {}", count));
        self.0.count.set(count);
        Ok(())
    }
}

fn desktop(count: usize, active: usize) -> Desktop {
    let d = Desktop::default();
    d.count.set(count);
    d.active.set(Some(active));
    d
}

#[test]
fn cli_style_flow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnav").join("workspaces.json");
    let d = desktop(2, 0);
    let ops = WorkspaceOps::new(Probe(&d), Settings(&d));

    let mut store = NameStore::load(&path).unwrap();
    ops.rename(&mut store, 1, "Web").unwrap();
    ops.create(&mut store, 4).unwrap();
    assert_eq!(d.count.get(), 4);
    assert!(!d.dynamic.get());

    let lines = launcher::feed(&ops, &NameStore::load(&path).unwrap(), &ActiveMarker::None).unwrap();
    assert_eq!(
        lines,
        vec!["1: Web", "2: Workspace 2", "3: Workspace 3", "4: Workspace 4"]
    );

    launcher::select_from_reader(&ops, "3: Workspace 3\n".as_bytes()).unwrap();
    assert_eq!(d.active.get(), Some(2));
}

#[test]
fn invalid_input_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspaces.json");
    let d = desktop(2, 0);
    let ops = WorkspaceOps::new(Probe(&d), Settings(&d));
    let mut store = NameStore::load(&path).unwrap();
    let before = std::fs::read(&path).unwrap();

    assert!(matches!(ops.rename(&mut store, 0, "x"), Err(WorkspaceError::InvalidArgument(_))));
    assert!(matches!(ops.create(&mut store, 0), Err(WorkspaceError::InvalidArgument(_))));
    assert!(matches!(ops.switch(-2), Err(WorkspaceError::InvalidArgument(_))));

    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert!(d.log.borrow().is_empty());
}

#[test]
fn interactive_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspaces.json");
    let d = desktop(3, 1);
    let ops = WorkspaceOps::new(Probe(&d), Settings(&d));
    let store = NameStore::load(&path).unwrap();
    let mut ctl = Controller::new(ops, store);
    assert_eq!(ctl.cursor(), 1);

    // Rename row 2, move it to the top, then switch to it.
    ctl.handle_key(Key::Char('r'));
    for _ in 0.."Workspace 2".len() {
        ctl.handle_key(Key::Backspace);
    }
    for c in "Editor".chars() {
        ctl.handle_key(Key::Char(c));
    }
    ctl.handle_key(Key::Enter);
    ctl.handle_key(Key::Char('K'));
    assert_eq!(ctl.cursor(), 0);
    ctl.handle_key(Key::Enter);

    assert_eq!(d.active.get(), Some(0));
    assert_eq!(
        NameStore::load(&path).unwrap().names(),
        ["Editor", "Workspace 1"]
    );
    assert_eq!(
        ctl.list_lines(),
        vec!["(1) Editor       *", "(2) Workspace 1", "(3) Workspace 3"]
    );

    // Turn dynamic workspaces on: the last row becomes the placeholder.
    ctl.handle_key(Key::Char('z'));
    assert_eq!(ctl.mode(), &Mode::ShowingMessage("Dynamic Workspaces = ON".into()));
    assert_eq!(ctl.rows()[2].label, "New Workspace");
    assert_eq!(ctl.handle_key(Key::Char('Q')), Flow::Continue);
    ctl.handle_key(Key::Enter);
    assert_eq!(ctl.handle_key(Key::Char('Q')), Flow::Quit);
}
