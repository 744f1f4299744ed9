//! Layered cache orchestrator
//!
//! Presents an ordered list of cache layers as a single cache:
//! - Get: read-through from the fastest layer, backfilling faster layers on a deeper hit
//! - Set/Delete: fan-out to every layer, failing fast on the first layer error
//! - Close: best-effort teardown of every closeable layer

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::{CacheError, Result};
use super::traits::Cache;
use crate::config::StrataConfig;

/// Shared handle to one cache layer
pub type Layer<T> = Arc<dyn Cache<T>>;

/// Ordered cache layers behind one read/write interface.
///
/// Index 0 is the fastest layer, higher indices are slower and more
/// authoritative. The layer list and the expiration are fixed at
/// construction; the orchestrator holds no other state, so it is safe to
/// share across tasks whenever the layers are.
pub struct LayeredCache<T> {
    layers: Vec<Layer<T>>,
    expiration: Duration,
}

impl<T> LayeredCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new layered cache. Every write issued through it, including
    /// backfills, uses `expiration`.
    pub fn new(expiration: Duration, layers: Vec<Layer<T>>) -> Self {
        Self { layers, expiration }
    }

    /// Start building a layered cache layer by layer
    pub fn builder() -> LayeredCacheBuilder<T> {
        LayeredCacheBuilder::default()
    }

    /// Create a layered cache with the expiration from `config`
    pub fn from_config(config: &StrataConfig, layers: Vec<Layer<T>>) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.expiration(), layers))
    }

    /// Write `value` to every layer, front to back.
    ///
    /// Stops at the first failing layer; layers after it are not written and
    /// layers before it keep the value.
    pub async fn set(&self, key: &str, value: T) -> Result<()> {
        debug!("SET key={}, layers={}", key, self.layers.len());

        for layer in &self.layers {
            if let Err(e) = layer.set(key, value.clone(), self.expiration).await {
                warn!("SET key={} failed on layer '{}': {}", key, layer.name(), e);
                return Err(CacheError::layer_failure(layer.name(), e));
            }
        }

        Ok(())
    }

    /// Read-through lookup.
    ///
    /// Returns the value from the first layer that has it. On a hit below
    /// layer 0 the value is written back to every faster layer before
    /// returning. A layer error aborts the scan.
    pub async fn get(&self, key: &str) -> Result<Option<T>> {
        for (index, layer) in self.layers.iter().enumerate() {
            let found = layer.get(key).await.map_err(|e| {
                warn!("GET key={} failed on layer '{}': {}", key, layer.name(), e);
                CacheError::layer_failure(layer.name(), e)
            })?;

            if let Some(value) = found {
                debug!("HIT key={} layer='{}' index={}", key, layer.name(), index);
                self.backfill(key, &value, index).await;
                return Ok(Some(value));
            }
        }

        debug!("MISS key={}", key);
        Ok(None)
    }

    /// Remove `keys` from every layer, front to back, failing fast like [`set`](Self::set).
    pub async fn delete(&self, keys: &[&str]) -> Result<()> {
        debug!("DELETE count={}, layers={}", keys.len(), self.layers.len());

        for layer in &self.layers {
            if let Err(e) = layer.delete(keys).await {
                warn!("DELETE failed on layer '{}': {}", layer.name(), e);
                return Err(CacheError::layer_failure(layer.name(), e));
            }
        }

        Ok(())
    }

    /// Close every layer that supports it. Errors are ignored so one failing
    /// layer never keeps the others open.
    ///
    /// No closed state is recorded: calls made afterwards reach the layers,
    /// which decide how to answer.
    pub async fn close(&self) {
        for layer in &self.layers {
            if let Some(closer) = layer.as_closer() {
                let _ = closer.close().await;
            }
        }

        debug!("CLOSE layers={}", self.layers.len());
    }

    /// Expiration applied to every write
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer names, fastest first
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    // Best effort: a failed backfill must not fail the read.
    async fn backfill(&self, key: &str, value: &T, hit_index: usize) {
        if hit_index == 0 {
            return;
        }

        debug!("BACKFILL key={} into {} layer(s)", key, hit_index);
        for layer in &self.layers[..hit_index] {
            let _ = layer.set(key, value.clone(), self.expiration).await;
        }
    }
}

impl<T> fmt::Debug for LayeredCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.layers.iter().map(|layer| layer.name()).collect();
        f.debug_struct("LayeredCache")
            .field("layers", &names)
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Builder for [`LayeredCache`]
pub struct LayeredCacheBuilder<T> {
    layers: Vec<Layer<T>>,
    expiration: Duration,
}

impl<T> Default for LayeredCacheBuilder<T> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            expiration: StrataConfig::default().expiration(),
        }
    }
}

impl<T> LayeredCacheBuilder<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }

    /// Append a layer; layers added first are consulted first
    pub fn layer(mut self, layer: impl Cache<T> + 'static) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    /// Append an already shared layer
    pub fn shared_layer(mut self, layer: Layer<T>) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn build(self) -> LayeredCache<T> {
        LayeredCache::new(self.expiration, self.layers)
    }
}
