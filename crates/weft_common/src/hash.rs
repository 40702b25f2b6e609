//! Content hashing for style deduplication and identifier generation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 64-bit content hash computed with XXH3 over serialized style text.
///
/// Two styles with the same `StyleHash` are assumed to serialize to identical
/// text. The hash doubles as the stable suffix of generated class and
/// animation identifiers, so its `Display` form must never change between
/// processes that exchange hydration ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleHash(u64);

impl StyleHash {
    /// Computes the hash of a serialized style string.
    pub fn of(text: &str) -> Self {
        Self(xxhash_rust::xxh3::xxh3_64(text.as_bytes()))
    }

    /// Returns the raw 64-bit value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StyleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl fmt::Debug for StyleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StyleHash({:x})", self.0)
    }
}
