use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::MemoryLayerConfig;
use crate::core::{BackendError, Cache, Closer};

/// In-process LRU cache layer with per-entry expiration
#[derive(Clone)]
pub struct MemoryCache<T> {
    name: String,
    store: Arc<RwLock<LruStore<T>>>,
    stats: Arc<RwLock<MemoryCacheStats>>,
    closed: Arc<AtomicBool>,
}

/// LRU storage
struct LruStore<T> {
    /// Cache data
    data: HashMap<String, Entry<T>>,

    /// LRU ordering (most recent at back)
    lru_order: VecDeque<String>,

    /// Maximum number of entries
    max_entries: usize,
}

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Entry<T> {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Memory layer statistics
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

impl<T> MemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a memory layer holding at most `max_entries` keys
    pub fn new(name: impl Into<String>, max_entries: usize) -> Self {
        Self {
            name: name.into(),
            store: Arc::new(RwLock::new(LruStore {
                data: HashMap::new(),
                lru_order: VecDeque::new(),
                max_entries: max_entries.max(1),
            })),
            stats: Arc::new(RwLock::new(MemoryCacheStats::default())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_config(config: &MemoryLayerConfig) -> Self {
        Self::new(config.name.clone(), config.max_entries)
    }

    /// Whether a live (unexpired) entry exists, without touching LRU order or stats
    pub fn contains(&self, key: &str) -> bool {
        self.store
            .read()
            .data
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Time left before `key` expires, `None` if absent or expired
    pub fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let store = self.store.read();
        let entry = store.data.get(key).filter(|entry| !entry.is_expired())?;
        entry.expires_at.checked_duration_since(Instant::now())
    }

    /// Number of stored entries, including expired ones not yet reclaimed
    pub fn len(&self) -> usize {
        self.store.read().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut store = self.store.write();
        let count = store.data.len();
        store.data.clear();
        store.lru_order.clear();
        self.stats.write().entries = 0;

        debug!("MEMORY[{}] CLEAR ({} entries)", self.name, count);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> MemoryCacheStats {
        self.stats.read().clone()
    }

    fn ensure_open(&self) -> Result<(), BackendError> {
        if self.is_closed() {
            return Err(BackendError::Closed);
        }
        Ok(())
    }

    fn lookup(&self, key: &str) -> Option<T> {
        let mut store = self.store.write();
        let mut stats = self.stats.write();

        let is_expired = match store.data.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                stats.misses += 1;
                return None;
            }
        };

        if is_expired {
            store.data.remove(key);
            store.lru_order.retain(|k| k != key);
            stats.misses += 1;
            stats.entries = store.data.len();
            debug!("MEMORY[{}] expired key={}", self.name, key);
            return None;
        }

        let value = store.data.get(key).map(|entry| entry.value.clone());
        store.lru_order.retain(|k| k != key);
        store.lru_order.push_back(key.to_string());
        stats.hits += 1;

        value
    }

    fn insert(&self, key: &str, value: T, expiration: Duration) {
        let mut store = self.store.write();
        let mut stats = self.stats.write();

        if store.data.remove(key).is_some() {
            store.lru_order.retain(|k| k != key);
        }

        while store.data.len() >= store.max_entries {
            let Some(evict_key) = store.lru_order.pop_front() else {
                break;
            };
            if store.data.remove(&evict_key).is_some() {
                stats.evictions += 1;
                debug!("MEMORY[{}] EVICT: {}", self.name, evict_key);
            }
        }

        let expires_at = Instant::now()
            .checked_add(expiration)
            .unwrap_or_else(|| Instant::now() + Duration::from_secs(u32::MAX as u64));

        store.data.insert(key.to_string(), Entry { value, expires_at });
        store.lru_order.push_back(key.to_string());
        stats.entries = store.data.len();
    }

    fn remove(&self, keys: &[&str]) {
        let mut store = self.store.write();

        for key in keys {
            if store.data.remove(*key).is_some() {
                store.lru_order.retain(|k| k != key);
            }
        }

        self.stats.write().entries = store.data.len();
    }
}

#[async_trait]
impl<T> Cache<T> for MemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<T>, BackendError> {
        self.ensure_open()?;
        Ok(self.lookup(key))
    }

    async fn set(&self, key: &str, value: T, expiration: Duration) -> Result<(), BackendError> {
        self.ensure_open()?;
        self.insert(key, value, expiration);
        Ok(())
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), BackendError> {
        self.ensure_open()?;
        self.remove(keys);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_closer(&self) -> Option<&dyn Closer> {
        Some(self)
    }
}

#[async_trait]
impl<T> Closer for MemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn close(&self) -> Result<(), BackendError> {
        self.closed.store(true, Ordering::Release);
        self.clear();
        Ok(())
    }
}
