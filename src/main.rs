#![deny(warnings, clippy::all, clippy::pedantic, clippy::nursery)]

use anyhow::{Result, bail};
use clap::Parser;
use mapty::app::{App, AppState, SubmitOutcome};
use mapty::cli::{self, Cmd};
use mapty::config::Config;
use mapty::form::FormInput;
use mapty::storage::SqliteStorage;
use mapty::terminal::{FixedPosition, TerminalMap, TerminalUi, format_entry};
use mapty::{persistence, shell, utils};

#[macro_use]
extern crate mapty;

type TerminalApp = App<FixedPosition, TerminalMap, TerminalUi<std::io::Stdout>, SqliteStorage>;

fn open_app(config: &Config, interactive: bool) -> Result<TerminalApp> {
    let storage = SqliteStorage::open(&config.db_path)?;
    let mut app = App::new(
        FixedPosition(config.position),
        TerminalMap,
        TerminalUi::stdout(interactive),
        storage,
        config.settings(),
    );
    app.start()?;
    Ok(app)
}

fn require_map(app: &TerminalApp) -> Result<()> {
    if app.state() == AppState::PositionFailed {
        bail!("the map needs a device position; pass --position LAT,LNG or set MAPTY_POSITION");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);
    let config = Config::from_cli(&cli);
    dlog!(
        "db={} position={:?} zoom={}",
        config.db_path.display(),
        config.position,
        config.zoom
    );

    match cli.cmd.unwrap_or(Cmd::List) {
        Cmd::List => {
            let storage = SqliteStorage::open(&config.db_path)?;
            let store = persistence::load(&storage, &config.storage_key)?;
            if store.is_empty() {
                println!("No workouts yet.");
            }
            for w in &store {
                println!("{}", format_entry(w));
            }
            Ok(())
        }
        Cmd::Add {
            workout_type,
            at,
            distance,
            duration,
            cadence,
            elevation,
        } => {
            let mut app = open_app(&config, false)?;
            require_map(&app)?;

            app.show_form(at);
            app.select_type(workout_type);
            let input = FormInput {
                workout_type,
                distance,
                duration,
                cadence,
                elevation,
            };
            match app.submit(&input)? {
                SubmitOutcome::Added(id) => {
                    if let Some(w) = app.workouts().find_by_id(id.as_str()) {
                        println!("{}", format_entry(w));
                    }
                    Ok(())
                }
                SubmitOutcome::Rejected(e) => bail!("workout not saved: {e}"),
                SubmitOutcome::Ignored => bail!("the workout form was not open"),
            }
        }
        Cmd::Goto { id } => {
            let mut app = open_app(&config, false)?;
            require_map(&app)?;
            if !app.select_workout(Some(&id)) {
                bail!("no workout with id {id}");
            }
            if let Some(map) = app.map() {
                println!("centered on {} (zoom {})", map.center, map.zoom);
            }
            Ok(())
        }
        Cmd::Reset => {
            let mut storage = SqliteStorage::open(&config.db_path)?;
            persistence::clear(&mut storage, &config.storage_key)?;
            println!("All workouts deleted.");
            Ok(())
        }
        Cmd::Shell => {
            let mut app = open_app(&config, true)?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            shell::run(&mut app, stdin.lock(), &mut stdout)
        }
    }
}
