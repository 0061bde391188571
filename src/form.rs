use crate::types::WorkoutType;

pub const INVALID_INPUT_ALERT: &str = "Input must be positive numbers!";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is not a number: {raw:?}")]
    NotANumber { field: &'static str, raw: String },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
}

/// Form contents as typed. Only the metric field matching `workout_type` is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub workout_type: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormInput {
    pub fn new(workout_type: WorkoutType) -> Self {
        Self {
            workout_type,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }

    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            ..Self::new(WorkoutType::Running)
        }
    }

    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            distance: distance.to_string(),
            duration: duration.to_string(),
            elevation: elevation.to_string(),
            ..Self::new(WorkoutType::Cycling)
        }
    }

    pub fn validate(&self) -> Result<ValidInput, ValidationError> {
        let distance = positive("distance", &self.distance)?;
        let duration = positive("duration", &self.duration)?;
        let metric = match self.workout_type {
            WorkoutType::Running => Metric::Cadence(positive("cadence", &self.cadence)?),
            WorkoutType::Cycling => {
                Metric::ElevationGain(positive("elevation gain", &self.elevation)?)
            }
        };
        Ok(ValidInput {
            distance,
            duration,
            metric,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Cadence(f64),
    ElevationGain(f64),
}

/// Form values that passed validation: every number is finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidInput {
    pub distance: f64,
    pub duration: f64,
    pub metric: Metric,
}

/// Empty text reads as zero, which then fails the positivity check.
fn positive(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    let v = if raw.is_empty() {
        0.0
    } else {
        raw.parse::<f64>()
            .map_err(|_| ValidationError::NotANumber {
                field,
                raw: raw.to_string(),
            })?
    };
    if !v.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if v <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_running_input() {
        let v = FormInput::running("5", "25", "160").validate().unwrap();
        assert_eq!(v.distance, 5.0);
        assert_eq!(v.duration, 25.0);
        assert_eq!(v.metric, Metric::Cadence(160.0));
    }

    #[test]
    fn reads_only_the_selected_metric() {
        let mut input = FormInput::cycling("20", "60", "300");
        input.cadence = "garbage".to_string();
        let v = input.validate().unwrap();
        assert_eq!(v.metric, Metric::ElevationGain(300.0));
    }

    #[test]
    fn rejects_bad_values_for_every_field_and_type() {
        let bad = ["", "0", "-3", "abc", "NaN", "inf", "-inf"];
        for raw in bad {
            for field in 0..3 {
                let mut values = ["5", "25", "160"];
                values[field] = raw;
                let running = FormInput::running(values[0], values[1], values[2]);
                assert!(running.validate().is_err(), "running {field} {raw:?}");
                let cycling = FormInput::cycling(values[0], values[1], values[2]);
                assert!(cycling.validate().is_err(), "cycling {field} {raw:?}");
            }
        }
    }

    #[test]
    fn reports_which_rule_failed() {
        let e = FormInput::running("-3", "25", "160").validate().unwrap_err();
        assert_eq!(e, ValidationError::NotPositive { field: "distance" });
        let e = FormInput::running("5", "abc", "160").validate().unwrap_err();
        assert!(matches!(e, ValidationError::NotANumber { field: "duration", .. }));
        let e = FormInput::cycling("5", "25", "inf").validate().unwrap_err();
        assert_eq!(e, ValidationError::NotFinite { field: "elevation gain" });
    }
}
