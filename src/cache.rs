//! Session-scoped memoization of pipeline results.

use crate::CorrectionResult;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Capacity-bounded cache keyed by the exact input text.
///
/// Eviction is strict insertion order: when the cache is at or beyond its
/// capacity before an insert, the single oldest-inserted entry goes, not the
/// least-recently-read one. Keys are never normalized, so texts differing
/// only in whitespace are distinct entries. Shared across all in-flight
/// requests; same-key races resolve last-writer-wins.
pub struct CorrectionCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

struct Inner {
    entries: HashMap<String, CorrectionResult>,
    order: VecDeque<String>,
}

impl CorrectionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity,
        }
    }

    pub fn get(&self, text: &str) -> Option<CorrectionResult> {
        let inner = self.inner.lock().expect("cache lock poisoned");
        inner.entries.get(text).cloned()
    }

    pub fn put(&self, text: &str, result: CorrectionResult) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        if inner.entries.contains_key(text) {
            // Refresh the value; the key keeps its original queue position.
            inner.entries.insert(text.to_string(), result);
            return;
        }

        while inner.entries.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }

        inner.order.push_back(text.to_string());
        inner.entries.insert(text.to_string(), result);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache lock poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str) -> CorrectionResult {
        CorrectionResult {
            text: text.to_string(),
            corrections: Vec::new(),
            score: 100,
        }
    }

    #[test]
    fn test_get_returns_stored_result() {
        let cache = CorrectionCache::new(10);
        assert!(cache.get("bonjour").is_none());

        cache.put("bonjour", result("bonjour"));
        let hit = cache.get("bonjour").unwrap();
        assert_eq!(hit.text, "bonjour");
        assert_eq!(hit.score, 100);
    }

    #[test]
    fn test_keys_are_exact_strings() {
        let cache = CorrectionCache::new(10);
        cache.put("texte", result("texte"));
        assert!(cache.get("texte ").is_none());
        assert!(cache.get(" texte").is_none());
    }

    #[test]
    fn test_capacity_plus_one_evicts_first_inserted() {
        let capacity = 5;
        let cache = CorrectionCache::new(capacity);

        for i in 0..=capacity {
            let key = format!("texte-{i}");
            cache.put(&key, result(&key));
        }

        assert_eq!(cache.len(), capacity);
        assert!(cache.get("texte-0").is_none());
        for i in 1..=capacity {
            assert!(cache.get(&format!("texte-{i}")).is_some());
        }
    }

    #[test]
    fn test_eviction_is_fifo_not_lru() {
        let cache = CorrectionCache::new(2);
        cache.put("a", result("a"));
        cache.put("b", result("b"));

        // Reading "a" must not save it from eviction.
        assert!(cache.get("a").is_some());
        cache.put("c", result("c"));

        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_reput_refreshes_without_duplicating_key() {
        let cache = CorrectionCache::new(2);
        cache.put("a", result("a"));
        let mut updated = result("a");
        updated.score = 42;
        cache.put("a", updated);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").unwrap().score, 42);

        // "a" keeps its original (oldest) queue position.
        cache.put("b", result("b"));
        cache.put("c", result("c"));
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_concurrent_puts_for_distinct_keys() {
        use std::sync::Arc;
        use std::thread;

        let cache = Arc::new(CorrectionCache::new(64));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..8 {
                        let key = format!("t{t}-{i}");
                        cache.put(&key, result(&key));
                        assert!(cache.get(&key).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 64);
    }
}
