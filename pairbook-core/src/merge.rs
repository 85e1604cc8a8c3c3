//! Canonical merge of pair collections
//!
//! Folds newly built pairs into the previously accumulated set, keyed by
//! [`crate::key::pair_key`]. The first occurrence of a key wins, so pairs
//! already in the store always beat newly scraped duplicates and insertion
//! order is the order of first observation.

use serde::Serialize;
use std::collections::HashSet;

use crate::key::{is_keyable, pair_key};
use crate::track::Pair;

/// Why a new pair did not enter the merged set as a fresh entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionReason {
    DuplicateWithinBatch,
    AlreadyInStore,
}

/// Diagnostic record for one colliding new pair. Reporting only: collisions
/// never change the merged output.
#[derive(Debug, Clone, Serialize)]
pub struct Collision {
    pub pair: Pair,
    pub reason: CollisionReason,
}

/// Merge `stored ++ new`, keeping the first occurrence of each pair key.
///
/// Unkeyable pairs (no usable track metadata on either side) are dropped
/// entirely rather than allowed to collide on the empty key.
pub fn merge(stored: &[Pair], new: &[Pair]) -> Vec<Pair> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(stored.len() + new.len());
    for pair in stored.iter().chain(new.iter()) {
        if !is_keyable(pair) {
            continue;
        }
        if seen.insert(pair_key(pair)) {
            merged.push(pair.clone());
        }
    }
    merged
}

/// Classify which of `new` collided with the stored set or with an earlier
/// pair in the same batch. Unkeyable pairs are excluded from deduplication
/// and therefore never reported as collisions.
pub fn classify_collisions(stored: &[Pair], new: &[Pair]) -> Vec<Collision> {
    let stored_keys: HashSet<String> = stored
        .iter()
        .filter(|p| is_keyable(p))
        .map(pair_key)
        .collect();

    let mut batch_keys: HashSet<String> = HashSet::new();
    let mut collisions = Vec::new();
    for pair in new {
        if !is_keyable(pair) {
            continue;
        }
        let key = pair_key(pair);
        if stored_keys.contains(&key) {
            collisions.push(Collision {
                pair: pair.clone(),
                reason: CollisionReason::AlreadyInStore,
            });
        } else if !batch_keys.insert(key) {
            collisions.push(Collision {
                pair: pair.clone(),
                reason: CollisionReason::DuplicateWithinBatch,
            });
        }
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Track;

    fn pair(ot: &str, st: &str) -> Pair {
        Pair::new(Track::new(ot, "A"), 1, Track::new(st, "B"), 2)
    }

    #[test]
    fn test_merge_identity() {
        let stored = vec![pair("One", "Two"), pair("Three", "Four")];
        assert_eq!(merge(&stored, &[]), stored);
    }

    #[test]
    fn test_merge_idempotent() {
        let stored = vec![pair("One", "Two"), pair("Three", "Four")];
        assert_eq!(merge(&stored, &stored), stored);
    }

    #[test]
    fn test_stored_pairs_win_ties() {
        let mut stored_pair = pair("One", "Two");
        stored_pair
            .original_track
            .extra
            .insert("mediaId".into(), "from-store".into());
        // Same key, different formatting and enrichment.
        let incoming = pair("One - Remastered", "Two");

        let merged = merge(&[stored_pair.clone()], &[incoming]);
        assert_eq!(merged, vec![stored_pair]);
    }

    #[test]
    fn test_new_pairs_append_in_observation_order() {
        let stored = vec![pair("One", "Two")];
        let new = vec![pair("Three", "Four"), pair("Five", "Six")];
        let merged = merge(&stored, &new);
        assert_eq!(
            merged,
            vec![pair("One", "Two"), pair("Three", "Four"), pair("Five", "Six")]
        );
    }

    #[test]
    fn test_unkeyable_pairs_dropped() {
        let blank = Pair::new(Track::default(), 1, Track::new("C", "D"), 2);
        let merged = merge(&[blank.clone()], &[blank, pair("One", "Two")]);
        assert_eq!(merged, vec![pair("One", "Two")]);
    }

    #[test]
    fn test_collision_classification() {
        let stored = vec![pair("One", "Two")];
        let new = vec![
            pair("One", "Two"),     // already in store
            pair("Three", "Four"),  // fresh
            pair("Three", "Four"),  // duplicate within batch
        ];
        let collisions = classify_collisions(&stored, &new);
        assert_eq!(collisions.len(), 2);
        assert_eq!(collisions[0].reason, CollisionReason::AlreadyInStore);
        assert_eq!(collisions[0].pair, pair("One", "Two"));
        assert_eq!(collisions[1].reason, CollisionReason::DuplicateWithinBatch);
        assert_eq!(collisions[1].pair, pair("Three", "Four"));
    }

    #[test]
    fn test_collisions_do_not_affect_merge_output() {
        let stored = vec![pair("One", "Two")];
        let new = vec![pair("One", "Two"), pair("Three", "Four"), pair("Three", "Four")];
        let merged = merge(&stored, &new);
        assert_eq!(merged, vec![pair("One", "Two"), pair("Three", "Four")]);
    }

    #[test]
    fn test_unkeyable_pairs_never_reported_as_collisions() {
        let blank = Pair::new(Track::default(), 1, Track::default(), 2);
        let collisions = classify_collisions(&[blank.clone()], &[blank.clone(), blank]);
        assert!(collisions.is_empty());
    }
}
