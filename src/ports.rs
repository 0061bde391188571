//! Interfaces the controller drives. Platform code (map widget, form surface,
//! device location, durable storage) lives behind these traits so the
//! controller itself never touches a concrete UI.

use crate::types::{Coords, Workout, WorkoutType};
use anyhow::Result;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("permission to read the device position was denied")]
    Denied,
    #[error("device position unavailable: {0}")]
    Unavailable(String),
}

/// One-shot position lookup.
pub trait Geolocation {
    fn request_current_position(&mut self) -> Result<Coords, GeolocationError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub animate: bool,
    pub pan_duration: Duration,
}

impl ViewOptions {
    pub const fn jump() -> Self {
        Self {
            animate: false,
            pan_duration: Duration::ZERO,
        }
    }

    pub const fn pan(duration: Duration) -> Self {
        Self {
            animate: true,
            pan_duration: duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupOptions {
    pub max_width: Option<u32>,
    pub min_width: Option<u32>,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub usize);

pub trait MapHandle {
    fn set_view(&mut self, center: Coords, zoom: u8, options: ViewOptions);
    fn add_marker(&mut self, at: Coords) -> MarkerId;
    fn bind_popup(&mut self, marker: MarkerId, content: &str, options: PopupOptions);
}

pub trait MapProvider {
    type Map: MapHandle;

    fn create_map(&mut self, center: Coords, zoom: u8) -> Result<Self::Map>;
}

/// Form surface and workout list.
pub trait WorkoutUi {
    fn show_form(&mut self);
    /// Clears the fields and hides the form. Adapters that animate restore
    /// the form shell after [`crate::app::FORM_REDISPLAY_DELAY`].
    fn hide_form(&mut self);
    fn show_metric_field(&mut self, workout_type: WorkoutType);
    fn render_workout(&mut self, workout: &Workout);
    fn clear_workouts(&mut self);
    fn alert(&mut self, message: &str);
}

/// Durable string key-value storage.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}
