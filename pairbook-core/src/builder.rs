//! Deterministic pair construction from a validated plan
//!
//! Trio overrides are applied first (each yields two pairs sharing the same
//! original), then ranges in the plan's sorted order pair up their remaining
//! positions by parity. No randomness anywhere: the same tracks and plan
//! always produce the same pair list in the same order.

use tracing::warn;

use crate::error::{Error, Result};
use crate::plan::PairingPlan;
use crate::track::{Pair, Track};

/// Result of one build: the ordered pair list plus any positions the plan
/// never consumed. Leftovers are a warning, not a failure.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub pairs: Vec<Pair>,
    pub leftover: Vec<usize>,
}

/// Build the ordered pair set for `tracks` under `plan`.
///
/// The plan is expected to have passed validation against
/// `tracks.len()`. A range whose unused positions split unevenly between the
/// original and sampled roles aborts the whole build with
/// [`Error::RangeParity`]: the plan is geometrically inconsistent and a
/// truncated pair set would silently mask it.
///
/// The returned pairs are sorted ascending by the lower of the two positions
/// involved, independent of processing order.
pub fn build(tracks: &[Track], plan: &PairingPlan) -> Result<BuildOutcome> {
    let track_count = tracks.len();
    let mut used = vec![false; track_count + 1];
    let mut pairs = Vec::new();

    let track_at = |pos: usize| -> Result<Track> {
        tracks
            .get(pos.wrapping_sub(1))
            .cloned()
            .ok_or_else(|| Error::InvalidInput(format!("position {pos} outside the track list")))
    };

    // Trios first, in input order. Two pairs each, shared original.
    for trio in &plan.trios {
        let original = track_at(trio.original)?;
        pairs.push(Pair::new(
            original.clone(),
            trio.original,
            track_at(trio.sample_a)?,
            trio.sample_a,
        ));
        pairs.push(Pair::new(
            original,
            trio.original,
            track_at(trio.sample_b)?,
            trio.sample_b,
        ));
        for pos in trio.positions() {
            used[pos] = true;
        }
    }

    // Ranges next, in the plan's sorted order. Unused positions split by
    // parity; both role sequences are ascending, so pairing is positional.
    for range in &plan.ranges {
        let mut originals = Vec::new();
        let mut samples = Vec::new();
        for pos in range.start..=range.end.min(track_count) {
            if used[pos] {
                continue;
            }
            if range.mapping.is_original(pos) {
                originals.push(pos);
            } else {
                samples.push(pos);
            }
        }
        if originals.len() != samples.len() {
            return Err(Error::RangeParity {
                start: range.start,
                end: range.end,
                originals: originals.len(),
                samples: samples.len(),
            });
        }
        for (&o, &s) in originals.iter().zip(samples.iter()) {
            pairs.push(Pair::new(track_at(o)?, o, track_at(s)?, s));
            used[o] = true;
            used[s] = true;
        }
    }

    let leftover: Vec<usize> = (1..=track_count).filter(|&p| !used[p]).collect();
    if !leftover.is_empty() {
        warn!("build left {} position(s) unpaired: {:?}", leftover.len(), leftover);
    }

    pairs.sort_by_key(Pair::min_pos);

    Ok(BuildOutcome { pairs, leftover })
}
