//! Track and pair data model
//!
//! A [`Track`] carries free-text `title`/`artist` metadata plus whatever
//! enrichment fields the catalog attached (URL, media id, start offset, ...);
//! those ride through untouched in `extra`. Tracks are identified by 1-based
//! position within an ordered track list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One track from an ordered track list.
///
/// `title` and `artist` default to the empty string when absent so that
/// partial records from older store files still deserialize; such tracks
/// normalize to empty and are excluded from deduplication downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    /// Opaque enrichment fields, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            extra: Map::new(),
        }
    }
}

/// One original/sample pair.
///
/// A trio override yields two pairs sharing `original_track`/`original_pos`
/// with distinct sample positions. The legacy field names `original` and
/// `sampled` (from an older store format) are accepted on deserialization;
/// serialization always uses the canonical names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    #[serde(alias = "original", default)]
    pub original_track: Track,
    #[serde(alias = "sampled", default)]
    pub sampled_track: Track,
    #[serde(default)]
    pub original_pos: usize,
    #[serde(default)]
    pub sampled_pos: usize,
}

impl Pair {
    pub fn new(
        original_track: Track,
        original_pos: usize,
        sampled_track: Track,
        sampled_pos: usize,
    ) -> Self {
        Self {
            original_track,
            sampled_track,
            original_pos,
            sampled_pos,
        }
    }

    /// Lowest position involved in this pair. Drives presentation order.
    pub fn min_pos(&self) -> usize {
        self.original_pos.min(self.sampled_pos)
    }
}
