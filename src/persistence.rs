//! Snapshot of the whole store under a single storage key.
//!
//! Every write replaces the snapshot. Loading validates each record and drops
//! the ones that do not fit the current shape, logging a warning for each.

use crate::dlog;
use crate::ports::Storage;
use crate::store::WorkoutStore;
use crate::types::Workout;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

pub const DEFAULT_KEY: &str = "workouts";

pub fn save(storage: &mut impl Storage, key: &str, store: &WorkoutStore) -> Result<()> {
    let json = serde_json::to_string(store.as_slice()).context("Serializing workouts")?;
    storage.set(key, &json)?;
    tracing::debug!(key, workouts = store.len(), "persisted workouts");
    Ok(())
}

pub fn load(storage: &impl Storage, key: &str) -> Result<WorkoutStore> {
    let Some(raw) = storage.get(key)? else {
        dlog!("no snapshot under key={key}");
        return Ok(WorkoutStore::new());
    };
    Ok(WorkoutStore::from(decode_snapshot(key, &raw)))
}

pub fn clear(storage: &mut impl Storage, key: &str) -> Result<()> {
    storage.remove(key)?;
    tracing::info!(key, "cleared persisted workouts");
    Ok(())
}

fn decode_snapshot(key: &str, raw: &str) -> Vec<Workout> {
    let records = match serde_json::from_str::<JsonValue>(raw) {
        Ok(JsonValue::Array(records)) => records,
        Ok(JsonValue::Null) => return Vec::new(),
        Ok(other) => {
            tracing::warn!(key, kind = json_kind(&other), "snapshot is not an array; discarding it");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(key, err = %e, "snapshot is not valid JSON; discarding it");
            return Vec::new();
        }
    };

    let total = records.len();
    let mut out = Vec::with_capacity(total);
    for (idx, record) in records.into_iter().enumerate() {
        let workout = match serde_json::from_value::<Workout>(record) {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!(key, idx, err = %e, "discarding malformed workout record");
                continue;
            }
        };
        if let Err(reason) = workout.check_invariants() {
            tracing::warn!(key, idx, id = %workout.id(), %reason, "discarding invalid workout record");
            continue;
        }
        out.push(workout);
    }

    if out.len() < total {
        tracing::warn!(key, kept = out.len(), total, "some stored workouts were discarded");
    } else {
        dlog!("loaded workouts key={key} count={total}");
    }
    out
}

const fn json_kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
