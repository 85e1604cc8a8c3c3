//! # Pairbook Core Library
//!
//! Synchronous engine for building original/sample track pairs from a
//! declarative pairing plan, and for accumulating pairs across runs into a
//! deduplicated canonical store:
//! - Title/artist normalization for comparison-stable identity
//! - Pairing plan coercion (permissive) and validation (strict)
//! - Deterministic pair construction from ranges and trio overrides
//! - Key-based merge of new pairs into the persisted canonical set
//!
//! All operations are pure functions over in-memory data except
//! [`store::CanonicalStore`], which reads and rewrites one JSON file.
//! Concurrent merges against the same store file must be serialized by the
//! caller; the core performs no locking.

pub mod builder;
pub mod error;
pub mod key;
pub mod merge;
pub mod normalize;
pub mod plan;
pub mod store;
pub mod track;

pub use builder::{build, BuildOutcome};
pub use error::{Error, Result};
pub use plan::{Mapping, PairingPlan, RangeRule, TrioOverride};
pub use track::{Pair, Track};
