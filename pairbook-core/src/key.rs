//! Pair identity keys
//!
//! A pair's key is derived from the normalized title/artist of both tracks,
//! so formatting differences between catalog exports ("Remastered" suffixes,
//! dash styles, case) do not create duplicate entries in the canonical store.

use crate::normalize::{normalize_artist, normalize_title};
use crate::track::{Pair, Track};

fn track_key(track: &Track) -> String {
    format!(
        "{}|{}",
        normalize_title(&track.title),
        normalize_artist(&track.artist)
    )
}

/// Stable identity key for a pair: `O:{title}|{artist}||S:{title}|{artist}`
/// over normalized fields. Equal keys denote the same semantic pair.
///
/// A pair with empty/absent track data still yields a key with empty
/// components rather than an error; such keys are *unkeyable* and callers
/// must exclude them from deduplication sets instead of treating them as a
/// valid collision target (see [`is_keyable`]).
pub fn pair_key(pair: &Pair) -> String {
    format!(
        "O:{}||S:{}",
        track_key(&pair.original_track),
        track_key(&pair.sampled_track)
    )
}

/// Whether a pair carries enough metadata to participate in deduplication.
///
/// A track is keyable when its normalized title or artist is non-empty; a
/// pair is keyable when both of its tracks are.
pub fn is_keyable(pair: &Pair) -> bool {
    let keyable_track = |t: &Track| {
        !normalize_title(&t.title).is_empty() || !normalize_artist(&t.artist).is_empty()
    };
    keyable_track(&pair.original_track) && keyable_track(&pair.sampled_track)
}
