//! Line-oriented event loop: each input line is one map/form/list event.

use crate::app::{App, AppState, Clock, SubmitOutcome};
use crate::form::FormInput;
use crate::ports::{Geolocation, MapProvider, Storage, WorkoutUi};
use crate::terminal::format_entry;
use crate::types::{Coords, WorkoutType};
use anyhow::Result;
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  click LAT,LNG                  open the form at a map position
  type running|cycling           switch the form's workout type
  submit DISTANCE DURATION METRIC  save the workout (METRIC = cadence or elevation gain)
  select ID                      center the map on a saved workout
  list                           print saved workouts
  reset                          delete all saved workouts and start over
  help                           show this text
  quit                           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Click(String),
    Type(WorkoutType),
    Submit {
        distance: String,
        duration: String,
        metric: String,
    },
    Select(String),
    List,
    Reset,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let cmd = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("click", parts) if !parts.is_empty() => Command::Click(join_coords(parts)),
        ("type", [t]) => Command::Type(t.parse()?),
        ("submit", [distance, duration, metric]) => Command::Submit {
            distance: (*distance).to_string(),
            duration: (*duration).to_string(),
            metric: (*metric).to_string(),
        },
        ("select", [id]) => Command::Select((*id).to_string()),
        ("list", []) => Command::List,
        ("reset", []) => Command::Reset,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => return Err(format!("can't understand {line:?}; try `help`")),
    };
    Ok(Some(cmd))
}

/// `40.0 -73.0`, `40.0, -73.0` and `40.0 , -73.0` all become `40.0,-73.0`.
fn join_coords(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|p| p.split(','))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Feeds `input` to `app` until EOF or `quit`.
pub fn run<G, M, U, S, C>(
    app: &mut App<G, M, U, S, C>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()>
where
    G: Geolocation,
    M: MapProvider,
    U: WorkoutUi,
    S: Storage,
    C: Clock,
{
    let mut form_type = WorkoutType::Running;
    writeln!(out, "type `help` for commands")?;
    if app.state() == AppState::PositionFailed {
        writeln!(out, "no map this session; only `list` and `reset` are useful")?;
    }

    for line in input.lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        tracing::trace!(?cmd, "shell command");

        match cmd {
            Command::Click(raw) => match raw.parse::<Coords>() {
                Ok(at) => {
                    if !app.show_form(at) {
                        writeln!(out, "the map is not available")?;
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Type(t) => {
                form_type = t;
                app.select_type(t);
            }
            Command::Submit {
                distance,
                duration,
                metric,
            } => {
                let input = match form_type {
                    WorkoutType::Running => FormInput::running(&distance, &duration, &metric),
                    WorkoutType::Cycling => FormInput::cycling(&distance, &duration, &metric),
                };
                match app.submit(&input)? {
                    SubmitOutcome::Added(id) => writeln!(out, "saved workout {id}")?,
                    SubmitOutcome::Rejected(e) => writeln!(out, "not saved: {e}")?,
                    SubmitOutcome::Ignored => writeln!(out, "click on the map first")?,
                }
            }
            Command::Select(id) => {
                if !app.select_workout(Some(&id)) {
                    writeln!(out, "no workout {id} on the map")?;
                }
            }
            Command::List => {
                if app.workouts().is_empty() {
                    writeln!(out, "no workouts yet")?;
                }
                for w in app.workouts() {
                    writeln!(out, "{}", format_entry(w))?;
                }
            }
            Command::Reset => {
                app.reset()?;
                form_type = WorkoutType::Running;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }
    Ok(())
}
