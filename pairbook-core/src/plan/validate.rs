//! Strict plan validation
//!
//! The validator accumulates every violation it finds and never
//! short-circuits, so a caller sees the full defect list in one pass. Nothing
//! here raises: validation outcomes are data, and the caller decides whether
//! to reject the request.

use std::collections::BTreeSet;
use thiserror::Error;

use super::PairingPlan;

/// One structural or coverage defect in a pairing plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanViolation {
    /// Zero ranges is always an error, even when trios fully cover the list.
    #[error("plan has no ranges")]
    NoRanges,

    #[error("trio position {position} is out of bounds 1-{track_count}")]
    TrioOutOfBounds { position: usize, track_count: usize },

    #[error("trio {original}/{sample_a}/{sample_b} positions are not distinct")]
    TrioNotDistinct {
        original: usize,
        sample_a: usize,
        sample_b: usize,
    },

    #[error("position {position} is claimed by more than one trio")]
    TrioPositionReused { position: usize },

    #[error("range {start}-{end} is out of bounds 1-{track_count}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        track_count: usize,
    },

    #[error("range {a_start}-{a_end} overlaps range {b_start}-{b_end}")]
    RangeOverlap {
        a_start: usize,
        a_end: usize,
        b_start: usize,
        b_end: usize,
    },

    #[error("position {position} is not covered by any range or trio")]
    Uncovered { position: usize },

    #[error("position {position} is covered by {count} ranges")]
    MultiplyCovered { position: usize, count: usize },
}

/// Outcome of validating one plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<PlanViolation>,
}

impl ValidationReport {
    /// A plan is valid iff the error list is empty.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable form of every violation, in discovery order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Check structural and coverage invariants over a normalized plan:
/// - at least one range exists
/// - trio positions are in bounds, pairwise distinct, and not shared with
///   another trio
/// - range bounds are in bounds
/// - no two ranges overlap (touching end-to-start is allowed)
/// - every position in `1..=track_count` not claimed by a trio is covered by
///   exactly one range
pub fn validate(plan: &PairingPlan, track_count: usize) -> ValidationReport {
    let mut errors = Vec::new();

    if plan.ranges.is_empty() {
        errors.push(PlanViolation::NoRanges);
    }

    // Trio bounds and internal distinctness
    for trio in &plan.trios {
        for position in trio.positions() {
            if position < 1 || position > track_count {
                errors.push(PlanViolation::TrioOutOfBounds {
                    position,
                    track_count,
                });
            }
        }
        let [o, a, b] = trio.positions();
        if o == a || o == b || a == b {
            errors.push(PlanViolation::TrioNotDistinct {
                original: o,
                sample_a: a,
                sample_b: b,
            });
        }
    }

    // Cross-trio reuse, attributed to the specific position
    let claimed: BTreeSet<usize> = plan.trios.iter().flat_map(|t| t.positions()).collect();
    for &position in &claimed {
        if trios_claiming(plan, position) > 1 {
            errors.push(PlanViolation::TrioPositionReused { position });
        }
    }

    // Range bounds
    for range in &plan.ranges {
        if range.start < 1 || range.end > track_count || range.start > range.end {
            errors.push(PlanViolation::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                track_count,
            });
        }
    }

    // Pairwise overlap; ranges that merely touch end-to-start are exempt
    for (i, a) in plan.ranges.iter().enumerate() {
        for b in plan.ranges.iter().skip(i + 1) {
            let overlapping = a.end >= b.start && b.end >= a.start;
            let adjacent = a.end + 1 == b.start || b.end + 1 == a.start;
            if overlapping && !adjacent {
                errors.push(PlanViolation::RangeOverlap {
                    a_start: a.start,
                    a_end: a.end,
                    b_start: b.start,
                    b_end: b.end,
                });
            }
        }
    }

    // Per-position coverage, trio-claimed positions exempt
    for position in 1..=track_count {
        if claimed.contains(&position) {
            continue;
        }
        let count = plan.ranges.iter().filter(|r| r.covers(position)).count();
        match count {
            1 => {}
            0 => errors.push(PlanViolation::Uncovered { position }),
            _ => errors.push(PlanViolation::MultiplyCovered { position, count }),
        }
    }

    ValidationReport { errors }
}

/// How many distinct trios claim the given position.
fn trios_claiming(plan: &PairingPlan, position: usize) -> usize {
    plan.trios
        .iter()
        .filter(|t| t.positions().contains(&position))
        .count()
}
