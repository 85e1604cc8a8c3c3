//! Pairing plans
//!
//! A plan declares how 1-based track positions group into original/sample
//! pairs: `ranges` cover contiguous spans whose positions pair up by parity,
//! and `trios` override specific positions where one original was sampled by
//! two different tracks.
//!
//! Plans go through two tiers before the builder sees them:
//! - [`normalize`] — permissive coercion of raw caller input; malformed
//!   fragments are dropped silently so garbage never blocks a usable plan
//! - [`validate`] — strict structural and coverage checks; every violation
//!   is accumulated and reported

mod normalize;
mod validate;

pub use normalize::{normalize, RawPlan, RawRange, RawTrio};
pub use validate::{validate, PlanViolation, ValidationReport};

use serde::{Deserialize, Serialize};

/// Parity role assignment inside a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mapping {
    /// Even positions are originals, odd positions are samples
    EvenOriginal,
    /// Odd positions are originals, even positions are samples
    OddOriginal,
}

impl Mapping {
    /// Parse a mapping from caller input (case-insensitive).
    /// Returns `None` for unrecognized values; the plan normalizer drops
    /// the whole range in that case.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "EVEN_ORIGINAL" => Some(Mapping::EvenOriginal),
            "ODD_ORIGINAL" => Some(Mapping::OddOriginal),
            _ => None,
        }
    }

    /// Whether a 1-based position takes the original role under this mapping.
    pub fn is_original(&self, pos: usize) -> bool {
        match self {
            Mapping::EvenOriginal => pos % 2 == 0,
            Mapping::OddOriginal => pos % 2 == 1,
        }
    }
}

/// A contiguous span of positions, inclusive on both ends, paired by parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRule {
    pub start: usize,
    pub end: usize,
    pub mapping: Mapping,
}

impl RangeRule {
    pub fn new(start: usize, end: usize, mapping: Mapping) -> Self {
        Self { start, end, mapping }
    }

    /// Whether this range covers the given position.
    pub fn covers(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }
}

/// One original position sampled by two distinct tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrioOverride {
    pub original: usize,
    pub sample_a: usize,
    pub sample_b: usize,
}

impl TrioOverride {
    pub fn new(original: usize, sample_a: usize, sample_b: usize) -> Self {
        Self {
            original,
            sample_a,
            sample_b,
        }
    }

    pub fn positions(&self) -> [usize; 3] {
        [self.original, self.sample_a, self.sample_b]
    }
}

/// A normalized pairing plan. Ranges are sorted ascending by `start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairingPlan {
    pub trios: Vec<TrioOverride>,
    pub ranges: Vec<RangeRule>,
}

impl PairingPlan {
    /// The default plan when the caller supplies none: one range over the
    /// whole track list with odd positions as originals, pairing adjacent
    /// tracks `(1,2), (3,4), ...`. An odd track count fails at build time
    /// with the range parity error.
    pub fn sequential(track_count: usize) -> Self {
        Self {
            trios: Vec::new(),
            ranges: vec![RangeRule::new(1, track_count.max(1), Mapping::OddOriginal)],
        }
    }
}
