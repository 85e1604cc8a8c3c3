//! Permissive coercion of raw plan input
//!
//! Callers submit plans as loosely-typed JSON: positions may be numbers or
//! numeric strings, fields may be missing, mappings may be misspelled.
//! Normalization never fails. A fragment that cannot be coerced is dropped
//! silently (logged at debug level) so one garbage entry does not block an
//! otherwise-valid plan; anything structural the caller should hear about is
//! the validator's job.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{Mapping, PairingPlan, RangeRule, TrioOverride};

/// Raw plan as submitted by a caller. Missing collections default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlan {
    #[serde(default)]
    pub trios: Vec<RawTrio>,
    #[serde(default)]
    pub ranges: Vec<RawRange>,
}

/// Raw trio fragment; every field is an arbitrary JSON value until coerced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrio {
    #[serde(default)]
    pub original: Option<Value>,
    #[serde(default)]
    pub sample_a: Option<Value>,
    #[serde(default)]
    pub sample_b: Option<Value>,
}

/// Raw range fragment; every field is an arbitrary JSON value until coerced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRange {
    #[serde(default)]
    pub start: Option<Value>,
    #[serde(default)]
    pub end: Option<Value>,
    #[serde(default)]
    pub mapping: Option<Value>,
}

/// Coerce and clamp a raw plan into a well-typed, sorted [`PairingPlan`].
///
/// - Positions parse from numbers or numeric strings; a non-numeric field
///   drops its whole trio/range
/// - Accepted positions clamp into `[1, track_count]`
/// - Ranges with `start > end` are swapped, not rejected
/// - Unrecognized mappings drop the range
/// - Ranges are stably sorted ascending by `start` for deterministic
///   processing order in the builder
pub fn normalize(raw: &RawPlan, track_count: usize) -> PairingPlan {
    let mut trios = Vec::with_capacity(raw.trios.len());
    for (i, t) in raw.trios.iter().enumerate() {
        let coerced = (
            coerce_position(t.original.as_ref(), track_count),
            coerce_position(t.sample_a.as_ref(), track_count),
            coerce_position(t.sample_b.as_ref(), track_count),
        );
        match coerced {
            (Some(original), Some(sample_a), Some(sample_b)) => {
                trios.push(TrioOverride::new(original, sample_a, sample_b));
            }
            _ => debug!("dropping trio {}: non-numeric position", i),
        }
    }

    let mut ranges = Vec::with_capacity(raw.ranges.len());
    for (i, r) in raw.ranges.iter().enumerate() {
        let start = coerce_position(r.start.as_ref(), track_count);
        let end = coerce_position(r.end.as_ref(), track_count);
        let mapping = coerce_mapping(r.mapping.as_ref());
        match (start, end, mapping) {
            (Some(start), Some(end), Some(mapping)) => {
                // Reversed bounds are a formatting mistake, not an intent
                // mismatch: swap rather than reject.
                let (start, end) = if start <= end { (start, end) } else { (end, start) };
                ranges.push(RangeRule::new(start, end, mapping));
            }
            (_, _, None) if r.mapping.is_some() => {
                debug!("dropping range {}: unrecognized mapping {:?}", i, r.mapping)
            }
            _ => debug!("dropping range {}: non-numeric bound", i),
        }
    }
    ranges.sort_by_key(|r| r.start);

    PairingPlan { trios, ranges }
}

/// Parse a position from a JSON number or numeric string, clamped into
/// `[1, track_count]`. `None` means the field is absent or non-numeric.
fn coerce_position(value: Option<&Value>, track_count: usize) -> Option<usize> {
    let n = match value? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    let upper = track_count.max(1) as i64;
    Some(n.clamp(1, upper) as usize)
}

fn coerce_mapping(value: Option<&Value>) -> Option<Mapping> {
    match value? {
        Value::String(s) => Mapping::from_str(s),
        _ => None,
    }
}
