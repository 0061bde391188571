//! Recording fakes for every port the controller drives.
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use mapty::app::{App, Clock, Settings};
use mapty::ports::{
    Geolocation, GeolocationError, MapHandle, MapProvider, MarkerId, PopupOptions, ViewOptions,
    WorkoutUi,
};
use mapty::storage::MemoryStorage;
use mapty::types::{Coords, Workout, WorkoutType};

pub struct FakeGeo(pub Result<Coords, GeolocationError>);

impl Geolocation for FakeGeo {
    fn request_current_position(&mut self) -> Result<Coords, GeolocationError> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub center: Coords,
    pub zoom: u8,
    pub options: ViewOptions,
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub created_at: Option<(Coords, u8)>,
    pub views: Vec<View>,
    pub markers: Vec<Coords>,
    pub popups: Vec<(MarkerId, String, PopupOptions)>,
}

impl MapHandle for RecordingMap {
    fn set_view(&mut self, center: Coords, zoom: u8, options: ViewOptions) {
        self.views.push(View {
            center,
            zoom,
            options,
        });
    }

    fn add_marker(&mut self, at: Coords) -> MarkerId {
        self.markers.push(at);
        MarkerId(self.markers.len() - 1)
    }

    fn bind_popup(&mut self, marker: MarkerId, content: &str, options: PopupOptions) {
        self.popups.push((marker, content.to_string(), options));
    }
}

#[derive(Debug, Default)]
pub struct RecordingMaps;

impl MapProvider for RecordingMaps {
    type Map = RecordingMap;

    fn create_map(&mut self, center: Coords, zoom: u8) -> Result<Self::Map> {
        Ok(RecordingMap {
            created_at: Some((center, zoom)),
            ..RecordingMap::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ShowForm,
    HideForm,
    MetricField(WorkoutType),
    Rendered(String),
    Cleared,
    Alert(String),
}

#[derive(Debug, Default)]
pub struct RecordingUi {
    pub events: Vec<UiEvent>,
}

impl RecordingUi {
    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Alert(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rendered(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Rendered(d) => Some(d.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl WorkoutUi for RecordingUi {
    fn show_form(&mut self) {
        self.events.push(UiEvent::ShowForm);
    }

    fn hide_form(&mut self) {
        self.events.push(UiEvent::HideForm);
    }

    fn show_metric_field(&mut self, workout_type: WorkoutType) {
        self.events.push(UiEvent::MetricField(workout_type));
    }

    fn render_workout(&mut self, workout: &Workout) {
        self.events
            .push(UiEvent::Rendered(workout.description().to_string()));
    }

    fn clear_workouts(&mut self) {
        self.events.push(UiEvent::Cleared);
    }

    fn alert(&mut self, message: &str) {
        self.events.push(UiEvent::Alert(message.to_string()));
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn coords(lat: f64, lng: f64) -> Coords {
    Coords::new(lat, lng).unwrap()
}

pub type TestApp = App<FakeGeo, RecordingMaps, RecordingUi, MemoryStorage, FixedClock>;

pub fn app_with(position: Result<Coords, GeolocationError>, storage: MemoryStorage) -> TestApp {
    App::with_clock(
        FakeGeo(position),
        RecordingMaps,
        RecordingUi::default(),
        storage,
        Settings::default(),
        FixedClock(noon()),
    )
}

/// Started app whose device sits at (51.5, -0.1).
pub fn ready_app() -> TestApp {
    let mut app = app_with(Ok(coords(51.5, -0.1)), MemoryStorage::new());
    app.start().unwrap();
    app
}
