//! The stylesheet sink abstraction and its in-memory implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A stylesheet sink: the backing storage compiled rules are appended to.
///
/// The engine drives the sink but does not own its storage semantics; a
/// DOM-backed implementation would manage style tags, a server-side one a
/// string buffer. Return values are never inspected.
pub trait Sheet: Send + Sync {
    /// Prepares or attaches the sink's backing storage.
    fn inject(&self);

    /// Appends one compiled CSS rule, order-preserving.
    fn insert(&self, rule: &str);

    /// Detaches and clears the backing storage.
    fn flush(&self);
}

/// The default in-memory sink.
///
/// Stores rules in insertion order behind a mutex. Suitable for tests and
/// for server-side rendering, where the accumulated rules are read back
/// with [`rules`](Self::rules) and emitted into a document.
pub struct MemorySheet {
    rules: Mutex<Vec<String>>,
    injected: AtomicBool,
}

impl MemorySheet {
    /// Creates an empty, uninjected sheet.
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            injected: AtomicBool::new(false),
        }
    }

    /// Returns a snapshot of all inserted rules in insertion order.
    pub fn rules(&self) -> Vec<String> {
        self.rules.lock().unwrap().clone()
    }

    /// Returns the number of inserted rules.
    pub fn len(&self) -> usize {
        self.rules.lock().unwrap().len()
    }

    /// Returns `true` if no rules have been inserted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the sheet is currently injected.
    pub fn is_injected(&self) -> bool {
        self.injected.load(Ordering::Relaxed)
    }
}

impl Sheet for MemorySheet {
    fn inject(&self) {
        self.injected.store(true, Ordering::Relaxed);
    }

    fn insert(&self, rule: &str) {
        log::trace!("sheet insert: {rule}");
        self.rules.lock().unwrap().push(rule.to_string());
    }

    fn flush(&self) {
        self.rules.lock().unwrap().clear();
        self.injected.store(false, Ordering::Relaxed);
    }
}

impl Default for MemorySheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order() {
        let sheet = MemorySheet::new();
        sheet.insert(".a{color:red;}");
        sheet.insert(".b{color:blue;}");
        assert_eq!(sheet.rules(), vec![".a{color:red;}", ".b{color:blue;}"]);
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn flush_clears_rules_and_injection() {
        let sheet = MemorySheet::new();
        sheet.inject();
        sheet.insert(".a{color:red;}");
        assert!(sheet.is_injected());

        sheet.flush();
        assert!(sheet.is_empty());
        assert!(!sheet.is_injected());
    }

    #[test]
    fn new_sheet_is_uninjected() {
        let sheet = MemorySheet::new();
        assert!(!sheet.is_injected());
        assert!(sheet.is_empty());
    }
}
