use crate::dlog;
use crate::form::{FormInput, INVALID_INPUT_ALERT, Metric, ValidationError};
use crate::persistence;
use crate::ports::{
    Geolocation, GeolocationError, MapHandle, MapProvider, PopupOptions, Storage, ViewOptions,
    WorkoutUi,
};
use crate::store::WorkoutStore;
use crate::types::{Coords, Workout, WorkoutId, WorkoutType};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

pub const DEFAULT_ZOOM: u8 = 13;
/// Delay before an animated form shell is shown again after being hidden.
pub const FORM_REDISPLAY_DELAY: Duration = Duration::from_secs(1);
pub const POSITION_ALERT: &str = "Could not get your position";
pub const HERE_POPUP: &str = "You are here!";
const PAN_DURATION: Duration = Duration::from_secs(1);

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub zoom: u8,
    pub storage_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            storage_key: persistence::DEFAULT_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Hidden,
    Shown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Uninitialized,
    AwaitingPosition,
    MapReady(FormState),
    /// Position lookup failed; no map for the rest of the session.
    PositionFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(WorkoutId),
    Rejected(ValidationError),
    /// No form was open.
    Ignored,
}

/// Controller tying the ports together. Owns the store, the map handle and
/// the pending map click.
pub struct App<G, M, U, S, C = SystemClock>
where
    M: MapProvider,
{
    geolocation: G,
    maps: M,
    map: Option<M::Map>,
    ui: U,
    storage: S,
    clock: C,
    settings: Settings,
    store: WorkoutStore,
    pending_click: Option<Coords>,
    state: AppState,
}

impl<G, M, U, S> App<G, M, U, S>
where
    G: Geolocation,
    M: MapProvider,
    U: WorkoutUi,
    S: Storage,
{
    pub fn new(geolocation: G, maps: M, ui: U, storage: S, settings: Settings) -> Self {
        Self::with_clock(geolocation, maps, ui, storage, settings, SystemClock)
    }
}

impl<G, M, U, S, C> App<G, M, U, S, C>
where
    G: Geolocation,
    M: MapProvider,
    U: WorkoutUi,
    S: Storage,
    C: Clock,
{
    pub fn with_clock(
        geolocation: G,
        maps: M,
        ui: U,
        storage: S,
        settings: Settings,
        clock: C,
    ) -> Self {
        Self {
            geolocation,
            maps,
            map: None,
            ui,
            storage,
            clock,
            settings,
            store: WorkoutStore::new(),
            pending_click: None,
            state: AppState::Uninitialized,
        }
    }

    /// Loads persisted workouts into the list, then asks for the device
    /// position and builds the map around it.
    pub fn start(&mut self) -> Result<()> {
        let key = &self.settings.storage_key;
        self.store = persistence::load(&self.storage, key)
            .with_context(|| format!("Loading workouts from key {key:?}"))?;
        for w in &self.store {
            self.ui.render_workout(w);
        }
        tracing::info!(workouts = self.store.len(), "restored workouts");

        self.state = AppState::AwaitingPosition;
        match self.geolocation.request_current_position() {
            Ok(position) => self.load_map(position),
            Err(e) => {
                self.position_failed(&e);
                Ok(())
            }
        }
    }

    fn load_map(&mut self, position: Coords) -> Result<()> {
        let zoom = self.settings.zoom;
        let mut map = self
            .maps
            .create_map(position, zoom)
            .context("Creating map")?;
        map.set_view(position, zoom, ViewOptions::jump());

        let here = map.add_marker(position);
        map.bind_popup(
            here,
            HERE_POPUP,
            PopupOptions {
                auto_close: false,
                close_on_click: false,
                ..PopupOptions::default()
            },
        );

        // Markers need the map, so they are replayed only now.
        for w in &self.store {
            place_marker(&mut map, w);
        }

        self.map = Some(map);
        self.state = AppState::MapReady(FormState::Hidden);
        tracing::info!(%position, zoom, markers = self.store.len(), "map ready");
        Ok(())
    }

    fn position_failed(&mut self, err: &GeolocationError) {
        tracing::warn!(err = %err, "position request failed");
        self.state = AppState::PositionFailed;
        self.ui.alert(POSITION_ALERT);
    }

    /// Map click. Returns `false` when the map is not ready.
    pub fn show_form(&mut self, at: Coords) -> bool {
        let AppState::MapReady(_) = self.state else {
            dlog!("map click ignored state={:?}", self.state);
            return false;
        };
        self.pending_click = Some(at);
        self.state = AppState::MapReady(FormState::Shown);
        self.ui.show_form();
        dlog!("form shown at={at}");
        true
    }

    pub fn select_type(&mut self, workout_type: WorkoutType) {
        if self.state == AppState::MapReady(FormState::Shown) {
            self.ui.show_metric_field(workout_type);
        }
    }

    pub fn submit(&mut self, input: &FormInput) -> Result<SubmitOutcome> {
        let (AppState::MapReady(FormState::Shown), Some(at)) = (self.state, self.pending_click)
        else {
            dlog!("submit ignored state={:?}", self.state);
            return Ok(SubmitOutcome::Ignored);
        };

        let valid = match input.validate() {
            Ok(v) => v,
            Err(e) => {
                tracing::info!(err = %e, "rejected workout input");
                self.ui.alert(INVALID_INPUT_ALERT);
                return Ok(SubmitOutcome::Rejected(e));
            }
        };

        let (id, date) = self.next_id();
        let workout = match valid.metric {
            Metric::Cadence(cadence) => {
                Workout::running(id.clone(), date, at, valid.distance, valid.duration, cadence)
            }
            Metric::ElevationGain(gain) => {
                Workout::cycling(id.clone(), date, at, valid.distance, valid.duration, gain)
            }
        };

        if let Some(map) = self.map.as_mut() {
            place_marker(map, &workout);
        }
        self.ui.render_workout(&workout);
        tracing::info!(id = %id, kind = %workout.workout_type(), "added workout");
        self.store.append(workout);

        self.ui.hide_form();
        self.pending_click = None;
        self.state = AppState::MapReady(FormState::Hidden);

        persistence::save(&mut self.storage, &self.settings.storage_key, &self.store)?;
        Ok(SubmitOutcome::Added(id))
    }

    /// List click. Recenters on the matching workout; `false` when nothing
    /// matched or there is no map.
    pub fn select_workout(&mut self, id: Option<&str>) -> bool {
        let Some(id) = id else {
            return false;
        };
        let Some(workout) = self.store.find_by_id(id) else {
            dlog!("no workout with id={id}");
            return false;
        };
        let Some(map) = self.map.as_mut() else {
            return false;
        };
        map.set_view(
            workout.coords(),
            self.settings.zoom,
            ViewOptions::pan(PAN_DURATION),
        );
        true
    }

    /// Drops the persisted snapshot and every piece of session state, then
    /// boots again from scratch.
    pub fn reset(&mut self) -> Result<()> {
        persistence::clear(&mut self.storage, &self.settings.storage_key)?;
        self.store = WorkoutStore::new();
        self.map = None;
        self.pending_click = None;
        self.ui.hide_form();
        self.ui.clear_workouts();
        self.state = AppState::Uninitialized;
        tracing::info!("reset");
        self.start()
    }

    fn next_id(&self) -> (WorkoutId, DateTime<Utc>) {
        let now = self.clock.now();
        let mut stamp = now;
        let mut id = WorkoutId::from_timestamp(stamp);
        while self.store.contains(&id) {
            stamp += chrono::Duration::milliseconds(1);
            id = WorkoutId::from_timestamp(stamp);
        }
        (id, now)
    }

    pub const fn state(&self) -> AppState {
        self.state
    }

    pub const fn workouts(&self) -> &WorkoutStore {
        &self.store
    }

    pub const fn pending_click(&self) -> Option<Coords> {
        self.pending_click
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn map(&self) -> Option<&M::Map> {
        self.map.as_ref()
    }

    pub const fn ui(&self) -> &U {
        &self.ui
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

fn place_marker(map: &mut impl MapHandle, workout: &Workout) {
    let marker = map.add_marker(workout.coords());
    let kind = workout.workout_type();
    map.bind_popup(
        marker,
        &format!("{}{}", kind.icon(), workout.description()),
        PopupOptions {
            max_width: Some(250),
            min_width: Some(100),
            auto_close: false,
            close_on_click: false,
            class_name: Some(format!("{kind}-popup")),
        },
    );
}
