//! Port adapters for running the controller in a terminal.

use crate::app::FORM_REDISPLAY_DELAY;
use crate::ports::{
    Geolocation, GeolocationError, MapHandle, MapProvider, MarkerId, PopupOptions, ViewOptions,
    WorkoutUi,
};
use crate::types::{Coords, Workout, WorkoutKind, WorkoutType};
use anyhow::Result;
use std::io::Write;

/// Geolocation backed by a configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Option<Coords>);

impl Geolocation for FixedPosition {
    fn request_current_position(&mut self) -> Result<Coords, GeolocationError> {
        self.0.ok_or_else(|| {
            GeolocationError::Unavailable("no position configured (use --position)".to_string())
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub at: Coords,
    pub popup: Option<(String, PopupOptions)>,
}

/// Map without tiles: remembers the view and the markers and logs each change.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalMapHandle {
    pub center: Coords,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapHandle for TerminalMapHandle {
    fn set_view(&mut self, center: Coords, zoom: u8, options: ViewOptions) {
        self.center = center;
        self.zoom = zoom;
        tracing::info!(
            %center,
            zoom,
            animate = options.animate,
            pan_ms = u64::try_from(options.pan_duration.as_millis()).unwrap_or(u64::MAX),
            "map view"
        );
    }

    fn add_marker(&mut self, at: Coords) -> MarkerId {
        self.markers.push(Marker { at, popup: None });
        MarkerId(self.markers.len() - 1)
    }

    fn bind_popup(&mut self, marker: MarkerId, content: &str, options: PopupOptions) {
        let Some(m) = self.markers.get_mut(marker.0) else {
            tracing::warn!(marker = marker.0, "popup for unknown marker");
            return;
        };
        tracing::debug!(at = %m.at, content, class = ?options.class_name, "marker popup");
        m.popup = Some((content.to_string(), options));
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalMap;

impl MapProvider for TerminalMap {
    type Map = TerminalMapHandle;

    fn create_map(&mut self, center: Coords, zoom: u8) -> Result<Self::Map> {
        tracing::debug!(%center, zoom, "creating terminal map");
        Ok(TerminalMapHandle {
            center,
            zoom,
            markers: Vec::new(),
        })
    }
}

/// Prints the workout list to stdout and alerts to stderr. A non-interactive
/// UI keeps quiet except for alerts.
#[derive(Debug)]
pub struct TerminalUi<W: Write> {
    out: W,
    form_open: bool,
    metric: WorkoutType,
    interactive: bool,
}

impl TerminalUi<std::io::Stdout> {
    pub fn stdout(interactive: bool) -> Self {
        Self::new(std::io::stdout(), interactive)
    }
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self {
            out,
            form_open: false,
            metric: WorkoutType::Running,
            interactive,
        }
    }

    pub const fn form_open(&self) -> bool {
        self.form_open
    }

    pub const fn metric(&self) -> WorkoutType {
        self.metric
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(err = %e, "writing to terminal failed");
        }
    }
}

impl<W: Write> WorkoutUi for TerminalUi<W> {
    fn show_form(&mut self) {
        self.form_open = true;
        if self.interactive {
            let field = metric_field(self.metric);
            self.line(&format!("new workout: enter distance, duration and {field}"));
        }
    }

    fn hide_form(&mut self) {
        if self.form_open && self.interactive {
            let secs = FORM_REDISPLAY_DELAY.as_secs();
            self.line(&format!("form closed; click again in {secs}s for the next workout"));
        }
        self.form_open = false;
    }

    fn show_metric_field(&mut self, workout_type: WorkoutType) {
        self.metric = workout_type;
        if self.form_open && self.interactive {
            let field = metric_field(workout_type);
            self.line(&format!("form now asks for {field}"));
        }
    }

    fn render_workout(&mut self, workout: &Workout) {
        if self.interactive {
            let entry = format_entry(workout);
            self.line(&entry);
        }
    }

    fn clear_workouts(&mut self) {
        if self.interactive {
            self.line("(workouts cleared)");
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

const fn metric_field(workout_type: WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Running => "cadence (spm)",
        WorkoutType::Cycling => "elevation gain (m)",
    }
}

/// One list entry: id, description and the variant's figures.
pub fn format_entry(w: &Workout) -> String {
    let kind = w.workout_type();
    let figures = match *w.kind() {
        WorkoutKind::Running { cadence, pace } => {
            format!("⚡️ {pace:.1} min/km  🦶🏼 {cadence} spm")
        }
        WorkoutKind::Cycling {
            elevation_gain,
            speed,
        } => format!("⚡️ {speed:.1} km/h  ⛰ {elevation_gain} m"),
    };
    format!(
        "[{}] {}  {} {} km  ⏱ {} min  {figures}",
        w.id(),
        w.description(),
        kind.icon(),
        w.distance(),
        w.duration(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn fixed_position_without_coords_is_unavailable() {
        assert!(matches!(
            FixedPosition(None).request_current_position(),
            Err(GeolocationError::Unavailable(_))
        ));
        let here = Coords::new(1.0, 2.0).unwrap();
        assert_eq!(FixedPosition(Some(here)).request_current_position(), Ok(here));
    }

    #[test]
    fn map_handle_tracks_markers_and_view() {
        let here = Coords::new(1.0, 2.0).unwrap();
        let there = Coords::new(3.0, 4.0).unwrap();
        let mut map = TerminalMap.create_map(here, 13).unwrap();
        let m = map.add_marker(there);
        map.bind_popup(m, "hello", PopupOptions::default());
        map.set_view(there, 15, ViewOptions::jump());
        assert_eq!(map.center, there);
        assert_eq!(map.zoom, 15);
        assert_eq!(map.markers[0].popup.as_ref().unwrap().0, "hello");
    }

    #[test]
    fn renders_entries_with_derived_metric() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let here = Coords::new(1.0, 2.0).unwrap();
        let w = Workout::running("77".into(), date, here, 5.0, 26.0, 170.0);
        let mut ui = TerminalUi::new(Vec::new(), true);
        ui.render_workout(&w);
        let text = String::from_utf8(ui.into_inner()).unwrap();
        assert!(text.starts_with("[77] Running on "));
        assert!(text.contains("5.2 min/km"));
        assert!(text.contains("170 spm"));
    }

    #[test]
    fn closing_an_open_form_mentions_the_redisplay_delay() {
        let mut ui = TerminalUi::new(Vec::new(), true);
        ui.hide_form();
        ui.show_form();
        ui.hide_form();
        assert!(!ui.form_open());
        let text = String::from_utf8(ui.into_inner()).unwrap();
        assert_eq!(FORM_REDISPLAY_DELAY, std::time::Duration::from_secs(1));
        assert_eq!(text.matches("form closed").count(), 1);
        assert!(text.contains("click again in 1s"));
    }

    #[test]
    fn quiet_ui_prints_nothing_for_entries() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let here = Coords::new(1.0, 2.0).unwrap();
        let w = Workout::cycling("1".into(), date, here, 20.0, 60.0, 100.0);
        let mut ui = TerminalUi::new(Vec::new(), false);
        ui.render_workout(&w);
        assert!(ui.into_inner().is_empty());
    }
}
