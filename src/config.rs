//! Runtime configuration assembled from the command line and `MAPTY_*`
//! environment variables (clap resolves the latter).

use crate::app::Settings;
use crate::cli::Cli;
use crate::persistence::DEFAULT_KEY;
use crate::types::Coords;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub position: Option<Coords>,
    pub zoom: u8,
    pub storage_key: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            db_path: cli.db.clone(),
            position: cli.position,
            zoom: cli.zoom,
            storage_key: DEFAULT_KEY.to_string(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            zoom: self.zoom,
            storage_key: self.storage_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["mapty"]).unwrap();
        let cfg = Config::from_cli(&cli);
        assert_eq!(cfg.zoom, 13);
        assert_eq!(cfg.storage_key, "workouts");
        assert!(cfg.db_path.ends_with("mapty.sqlite3"));
    }

    #[test]
    fn parses_negative_position() {
        let cli =
            Cli::try_parse_from(["mapty", "--position", "40.7,-73.9", "--zoom", "15", "list"])
                .unwrap();
        let cfg = Config::from_cli(&cli);
        assert_eq!(cfg.position, Some(Coords { lat: 40.7, lng: -73.9 }));
        assert_eq!(cfg.settings().zoom, 15);
    }

    #[test]
    fn rejects_malformed_position() {
        assert!(Cli::try_parse_from(["mapty", "--position", "north"]).is_err());
    }
}
