//! Entry point for the **gnav** command.
//!
//! Parses the command line, wires the GNOME backends into
//! [`WorkspaceOps`], and runs either a single subcommand or the interactive
//! list.  Any surfaced error is printed to stderr and exits with status 1.

use clap::Parser;
use gnav::command::{Cli, Command};
use gnav::config::{config_dir, default_names_path, Config};
use gnav::gnome::gsettings::GSettingsBridge;
use gnav::gnome::wmctrl::WmctrlProbe;
use gnav::gnome::wofi::WofiPicker;
use gnav::launcher;
use gnav::render::{render_lines, ActiveMarker};
use gnav::store::NameStore;
use gnav::traits::{SettingsBridge, WorkspaceProbe};
use gnav::workspaces::{validate_rename, validate_workspace_number, WorkspaceError, WorkspaceOps};
use log::info;
use std::path::Path;

type Ops = WorkspaceOps<WmctrlProbe, GSettingsBridge>;

/// Try to load the config from `$XDG_CONFIG_HOME/gnav/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), WorkspaceError> {
    let config = load_config();
    let names_path = cli.names_file.unwrap_or_else(default_names_path);
    let ops: Ops = WorkspaceOps::new(
        WmctrlProbe::new(config.tools.wmctrl.clone()),
        GSettingsBridge::new(config.tools.gsettings.clone()),
    );
    dispatch(
        ops,
        cli.command.unwrap_or(Command::Interactive),
        &names_path,
        &config,
    )
}

/// Run one command.  The names file is only loaded (and, on first use,
/// seeded) by commands that read or write names, after their arguments
/// have been checked.
fn dispatch<P: WorkspaceProbe, S: SettingsBridge>(
    ops: WorkspaceOps<P, S>,
    command: Command,
    names_path: &Path,
    config: &Config,
) -> Result<(), WorkspaceError> {
    let highlight = ActiveMarker::Span {
        color: config.feed.active_color.clone(),
    };

    match command {
        Command::List => {
            let rows = ops.rows(&NameStore::load(names_path)?)?;
            for line in render_lines(&rows, &ActiveMarker::None) {
                println!("{}", line);
            }
        }
        Command::Rename { index, name } => {
            let name = Command::joined_name(&name);
            validate_rename(index, &name)?;
            ops.rename(&mut NameStore::load(names_path)?, index, &name)?;
        }
        Command::Create { count } => {
            validate_workspace_number(count, "workspace count")?;
            ops.create(&mut NameStore::load(names_path)?, count)?;
        }
        Command::Switch { index } => ops.switch(index)?,
        Command::Dynamic { state } => {
            info!("dynamic {}", state);
            ops.set_dynamic(state.is_on())?;
        }
        Command::WofiFeed => {
            for line in launcher::feed(&ops, &NameStore::load(names_path)?, &highlight)? {
                println!("{}", line);
            }
        }
        Command::WofiSelect => {
            launcher::select_from_reader(&ops, std::io::stdin().lock())?;
        }
        Command::WofiRun => {
            let store = NameStore::load(names_path)?;
            let picker = WofiPicker::new(config.tools.wofi.clone(), config.tools.wofi_args.clone());
            launcher::pick_and_switch(&ops, &store, &picker, &highlight)?;
        }
        Command::Interactive => run_interactive(ops, NameStore::load(names_path)?)?,
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive<P: WorkspaceProbe, S: SettingsBridge>(
    ops: WorkspaceOps<P, S>,
    store: NameStore,
) -> Result<(), WorkspaceError> {
    let controller = gnav::tui::controller::Controller::new(ops, store);
    gnav::tui::terminal::run(controller)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_interactive<P: WorkspaceProbe, S: SettingsBridge>(
    _ops: WorkspaceOps<P, S>,
    _store: NameStore,
) -> Result<(), WorkspaceError> {
    Err(WorkspaceError::InvalidArgument(
        "the interactive list requires the `tui` feature".into(),
    ))
}
