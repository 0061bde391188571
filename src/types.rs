use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordsError {
    #[error("coordinates must be finite numbers (got {lat}, {lng})")]
    NotFinite { lat: String, lng: String },
    #[error("expected coordinates as LAT,LNG (got {0:?})")]
    Malformed(String),
}

/// Geographic position, serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordsError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordsError::NotFinite {
                lat: lat.to_string(),
                lng: lng.to_string(),
            });
        }
        Ok(Self { lat, lng })
    }

    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl FromStr for Coords {
    type Err = CoordsError;

    /// Parses `LAT,LNG` (whitespace around either part is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lat, lng)) = s.split_once(',') else {
            return Err(CoordsError::Malformed(s.to_string()));
        };
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordsError::Malformed(s.to_string()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordsError::Malformed(s.to_string()))?;
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// Capitalized tag, as used in descriptions.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WorkoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(format!("unknown workout type {other:?} (expected running or cycling)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Last 10 decimal digits of the millisecond timestamp.
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        let ms = at.timestamp_millis().unsigned_abs().to_string();
        let start = ms.len().saturating_sub(10);
        Self(ms[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-variant payload. The `type` tag lives alongside the base fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        /// steps/min
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        /// meters
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

impl WorkoutKind {
    pub const fn workout_type(&self) -> WorkoutType {
        match self {
            Self::Running { .. } => WorkoutType::Running,
            Self::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    date: DateTime<Utc>,
    coords: Coords,
    /// km
    distance: f64,
    /// min
    duration: f64,
    description: String,
    #[serde(flatten)]
    kind: WorkoutKind,
}

pub fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// "{Label} on {Month} {day}".
pub fn describe(workout_type: WorkoutType, day: NaiveDate) -> String {
    let month = MONTHS[day.month0() as usize];
    format!("{} on {month} {}", workout_type.label(), day.day())
}

impl Workout {
    /// Inputs are expected to be validated by the caller.
    pub fn running(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        let kind = WorkoutKind::Running {
            cadence,
            pace: pace(distance, duration),
        };
        Self::build(id, date, coords, distance, duration, kind)
    }

    /// Inputs are expected to be validated by the caller.
    pub fn cycling(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        let kind = WorkoutKind::Cycling {
            elevation_gain,
            speed: speed(distance, duration),
        };
        Self::build(id, date, coords, distance, duration, kind)
    }

    fn build(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        kind: WorkoutKind,
    ) -> Self {
        let description = describe(
            kind.workout_type(),
            date.with_timezone(&Local).date_naive(),
        );
        Self {
            id,
            date,
            coords,
            distance,
            duration,
            description,
            kind,
        }
    }

    pub const fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    pub const fn distance(&self) -> f64 {
        self.distance
    }

    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub const fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    /// Checks the numeric invariants a stored record must satisfy.
    pub fn check_invariants(&self) -> Result<(), String> {
        if !self.coords.is_finite() {
            return Err(format!("coords {} are not finite", self.coords));
        }
        let metric = match self.kind {
            WorkoutKind::Running { cadence, .. } => ("cadence", cadence),
            WorkoutKind::Cycling { elevation_gain, .. } => ("elevationGain", elevation_gain),
        };
        for (field, v) in [
            ("distance", self.distance),
            ("duration", self.duration),
            metric,
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(format!("{field}={v} is not a positive finite number"));
            }
        }
        let (field, stored, expected) = match self.kind {
            WorkoutKind::Running { pace: p, .. } => ("pace", p, pace(self.distance, self.duration)),
            WorkoutKind::Cycling { speed: s, .. } => {
                ("speed", s, speed(self.distance, self.duration))
            }
        };
        let matches = (stored - expected).abs() <= expected.abs() * 1e-9;
        if !matches {
            return Err(format!("{field}={stored} does not match distance and duration ({expected})"));
        }
        Ok(())
    }
}
