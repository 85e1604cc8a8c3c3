//! Canonical store persistence
//!
//! The accumulated pair set is durable state with a lifetime beyond a single
//! request: a flat JSON array of pair records, read once at the start of a
//! merge and rewritten once at the end. Writes go through a temp file in the
//! same directory followed by a rename, so a crash mid-save never leaves a
//! half-written store behind.
//!
//! The store performs no locking. Concurrent merges against the same file
//! must be serialized by the caller (the service layer holds the store behind
//! a mutex for exactly this reason).

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::track::Pair;

/// Handle on one canonical store file.
#[derive(Debug, Clone)]
pub struct CanonicalStore {
    path: PathBuf,
}

impl CanonicalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored pairs. A missing file is an empty store, not an
    /// error; a file that exists but does not parse is surfaced as
    /// [`crate::Error::Json`].
    pub fn load(&self) -> Result<Vec<Pair>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let pairs: Vec<Pair> = serde_json::from_str(&contents)?;
        Ok(pairs)
    }

    /// Rewrite the store atomically: temp file in the same directory, then
    /// rename over the target. Parent directories are created on demand.
    pub fn save(&self, pairs: &[Pair]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let contents = serde_json::to_vec_pretty(pairs)?;
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        info!("saved {} pair(s) to {}", pairs.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Track;

    fn pair(ot: &str, st: &str) -> Pair {
        Pair::new(Track::new(ot, "A"), 1, Track::new(st, "B"), 2)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CanonicalStore::new(dir.path().join("pairs.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CanonicalStore::new(dir.path().join("pairs.json"));
        let pairs = vec![pair("One", "Two"), pair("Three", "Four")];
        store.save(&pairs).unwrap();
        assert_eq!(store.load().unwrap(), pairs);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = CanonicalStore::new(dir.path().join("nested/deeper/pairs.json"));
        store.save(&[pair("One", "Two")]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = CanonicalStore::new(dir.path().join("pairs.json"));
        store.save(&[pair("One", "Two"), pair("Three", "Four")]).unwrap();
        store.save(&[pair("Five", "Six")]).unwrap();
        assert_eq!(store.load().unwrap(), vec![pair("Five", "Six")]);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CanonicalStore::new(dir.path().join("pairs.json"));
        store.save(&[pair("One", "Two")]).unwrap();
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["pairs.json".to_string()]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        fs::write(&path, "not json at all").unwrap();
        let store = CanonicalStore::new(path);
        assert!(matches!(store.load(), Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_legacy_records_load() {
        // Older store files used `original`/`sampled` field names.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        fs::write(
            &path,
            r#"[{"original": {"title": "T", "artist": "A"},
                 "sampled": {"title": "U", "artist": "B"},
                 "originalPos": 1, "sampledPos": 2}]"#,
        )
        .unwrap();
        let loaded = CanonicalStore::new(path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].original_track.title, "T");
    }
}
