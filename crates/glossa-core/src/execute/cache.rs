use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use glossa_types::EngineQueryResult;

use crate::query::StepKey;

#[derive(Debug, Clone)]
pub struct CachedStep {
    pub payload: Arc<EngineQueryResult>,
    pub execution_time: Duration,
    stored_at: Instant,
}

/// Successful step payloads keyed by step identity.
///
/// Shared by every executor and request of the process. Only successes are
/// ever stored, and an existing live entry is never overwritten.
#[derive(Debug)]
pub struct StepResultCache {
    entries: DashMap<StepKey, CachedStep>,
    capacity: Option<usize>,
    ttl: Option<Duration>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Default for StepResultCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl StepResultCache {
    pub fn new(capacity: Option<usize>, ttl: Option<Duration>) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.filter(|c| *c > 0),
            ttl,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Keeps everything for the lifetime of the process
    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub fn get(&self, key: &StepKey) -> Option<CachedStep> {
        let lookup = self.entries.get(key).map(|entry| entry.value().clone());

        match lookup {
            Some(entry) if !self.is_expired(&entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry)
            }
            Some(_) => {
                self.entries.remove_if(key, |_, entry| self.is_expired(entry));
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a successful payload unless a live entry already exists.
    /// Returns whether the payload was stored.
    pub fn insert(
        &self,
        key: StepKey,
        payload: Arc<EngineQueryResult>,
        execution_time: Duration,
    ) -> bool {
        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity && !self.entries.contains_key(&key) {
                self.evict_one();
            }
        }

        let fresh = CachedStep {
            payload,
            execution_time,
            stored_at: Instant::now(),
        };

        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if self.is_expired(occupied.get()) {
                    occupied.insert(fresh);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(fresh);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn is_expired(&self, entry: &CachedStep) -> bool {
        self.ttl
            .is_some_and(|ttl| entry.stored_at.elapsed() >= ttl)
    }

    /// Drop an expired entry if there is one, otherwise any entry
    fn evict_one(&self) {
        let expired = self
            .entries
            .iter()
            .find(|entry| self.is_expired(entry.value()))
            .map(|entry| entry.key().clone());
        let victim = match expired {
            Some(key) => Some(key),
            None => self.entries.iter().next().map(|entry| entry.key().clone()),
        };

        if let Some(key) = victim {
            tracing::debug!("Evicting cached step for engine {}", key.engine_name);
            self.entries.remove(&key);
        }
    }
}
