//! Cross-process hand-off of already-inserted rule identifiers.

use serde::{Deserialize, Serialize};

/// The set of identifiers a prior rendering pass already emitted.
///
/// A server process snapshots its insertion cache into a payload, ships it
/// alongside the rendered document, and the next process hydrates from it
/// so the first occurrence of each identifier is a no-op instead of a
/// duplicate insertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationPayload {
    /// Inserted identifiers, sorted and deduplicated.
    pub ids: Vec<String>,
}

impl HydrationPayload {
    /// Creates a payload from raw identifiers, sorting and deduplicating.
    pub fn new(mut ids: Vec<String>) -> Self {
        ids.sort();
        ids.dedup();
        Self { ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_and_dedups() {
        let p = HydrationPayload::new(vec![
            "css-b".to_string(),
            "css-a".to_string(),
            "css-b".to_string(),
        ]);
        assert_eq!(p.ids, vec!["css-a".to_string(), "css-b".to_string()]);
    }

    #[test]
    fn json_roundtrip() {
        let p = HydrationPayload::new(vec!["css-a".to_string(), "1f2e3d".to_string()]);
        let json = serde_json::to_string(&p).unwrap();
        let back: HydrationPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
