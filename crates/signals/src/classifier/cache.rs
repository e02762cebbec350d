//! In-memory memo of classifier results.
//!
//! Constructed explicitly and injected into [`FallbackClassifier`](super::FallbackClassifier);
//! there is no process-wide instance.

use crate::text::normalize;
use edge_feed_core::Classification;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CachedClassification {
    value: Classification,
    inserted_at: Instant,
}

/// TTL and capacity bounded classification cache keyed by normalized text.
#[derive(Debug)]
pub struct ClassificationCache {
    entries: RwLock<HashMap<String, CachedClassification>>,
    ttl: Duration,
    capacity: usize,
}

impl ClassificationCache {
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Returns the cached classification if present and younger than the TTL.
    pub fn get(&self, text: &str) -> Option<Classification> {
        let key = normalize(text);
        let entries = self.entries.read();
        entries
            .get(&key)
            .filter(|c| c.inserted_at.elapsed() < self.ttl)
            .map(|c| c.value.clone())
    }

    /// Stores a classification, evicting the oldest entry when full.
    pub fn insert(&self, text: &str, value: Classification) {
        let key = normalize(text);
        let mut entries = self.entries.write();

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, c| c.inserted_at.elapsed() < ttl);
            if entries.len() >= self.capacity {
                if let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(_, c)| c.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            CachedClassification {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
