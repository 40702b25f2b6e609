//! Single-argument memoization for pure string transforms.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

/// A memoizer for a pure single-argument function.
///
/// The cache is unbounded and never invalidated; callers use it for
/// transforms over a small finite key space (CSS property names). The cache
/// is guarded by a mutex so a `Memo` stored in a `static` stays usable from
/// multiple threads.
pub struct Memo<K, V, F> {
    cache: Mutex<HashMap<K, V>>,
    func: F,
}

impl<K, V, F> Memo<K, V, F>
where
    K: Eq + Hash + Clone,
    V: Clone,
    F: Fn(&K) -> V,
{
    /// Creates a memoizer wrapping the given pure function.
    pub fn new(func: F) -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
            func,
        }
    }

    /// Returns the memoized result for `key`, computing it on first use.
    pub fn get(&self, key: &K) -> V {
        let mut cache = self.cache.lock().unwrap();
        if let Some(v) = cache.get(key) {
            return v.clone();
        }
        let v = (self.func)(key);
        cache.insert(key.clone(), v.clone());
        v
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    /// Returns `true` if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn computes_once_per_key() {
        let calls = AtomicUsize::new(0);
        let memo = Memo::new(|k: &String| {
            calls.fetch_add(1, Ordering::Relaxed);
            k.to_uppercase()
        });

        assert_eq!(memo.get(&"abc".to_string()), "ABC");
        assert_eq!(memo.get(&"abc".to_string()), "ABC");
        assert_eq!(calls.load(Ordering::Relaxed), 1);

        assert_eq!(memo.get(&"def".to_string()), "DEF");
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn empty_until_first_get() {
        let memo = Memo::new(|k: &String| k.clone());
        assert!(memo.is_empty());
        memo.get(&"x".to_string());
        assert!(!memo.is_empty());
    }
}
