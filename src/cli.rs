use crate::types::{Coords, WorkoutType};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DB: &str = "mapty.sqlite3";

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts on a map and keep them between sessions"
)]
pub struct Cli {
    /// SQLite file holding the saved workouts.
    #[arg(long, env = "MAPTY_DB", default_value = DEFAULT_DB, global = true)]
    pub db: PathBuf,

    /// Device position as LAT,LNG. Without it the map cannot be opened.
    #[arg(long, env = "MAPTY_POSITION", allow_hyphen_values = true, global = true)]
    pub position: Option<Coords>,

    /// Map zoom level.
    #[arg(long, env = "MAPTY_ZOOM", default_value_t = crate::app::DEFAULT_ZOOM, global = true)]
    pub zoom: u8,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print the saved workouts (default).
    List,

    /// Record a workout at a map position.
    Add {
        /// running or cycling
        #[arg(value_name = "TYPE")]
        workout_type: WorkoutType,

        /// Where the workout happened, as LAT,LNG.
        #[arg(long, allow_hyphen_values = true)]
        at: Coords,

        /// Distance in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Steps per minute (running).
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        cadence: String,

        /// Elevation gain in meters (cycling).
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        elevation: String,
    },

    /// Center the map on a saved workout.
    Goto {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete every saved workout.
    Reset,

    /// Read map and form events from stdin, one per line.
    Shell,
}
