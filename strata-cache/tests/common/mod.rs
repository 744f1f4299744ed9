//! Test helper utilities: a scriptable cache layer
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use strata_cache::{BackendError, Cache, Closer};

/// Install a test subscriber once; honours RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Layer that records every call and can be told to fail
pub struct ScriptedCache {
    name: String,
    closeable: bool,
    data: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String, Duration)>>,
    gets: AtomicUsize,
    closes: AtomicUsize,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_delete: AtomicBool,
    fail_close: AtomicBool,
}

impl ScriptedCache {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self::build(name, true))
    }

    /// Layer without the close capability
    pub fn without_closer(name: &str) -> Arc<Self> {
        Arc::new(Self::build(name, false))
    }

    fn build(name: &str, closeable: bool) -> Self {
        Self {
            name: name.to_string(),
            closeable,
            data: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            gets: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            fail_close: AtomicBool::new(false),
        }
    }

    /// Seed a value without recording a write
    pub fn seed(&self, key: &str, value: &str) {
        self.data.lock().insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.data.lock().get(key).cloned()
    }

    pub fn writes(&self) -> Vec<(String, String, Duration)> {
        self.writes.lock().clone()
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn fail_get(&self) {
        self.fail_get.store(true, Ordering::SeqCst);
    }

    pub fn fail_set(&self) {
        self.fail_set.store(true, Ordering::SeqCst);
    }

    pub fn fail_delete(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn fail_close(&self) {
        self.fail_close.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Cache<String> for ScriptedCache {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(BackendError::Timeout);
        }
        Ok(self.value(key))
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        expiration: Duration,
    ) -> Result<(), BackendError> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(BackendError::Other(format!("{} is read-only", self.name)));
        }
        self.writes
            .lock()
            .push((key.to_string(), value.clone(), expiration));
        self.data.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), BackendError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(BackendError::Io(std::io::Error::other("disk unavailable")));
        }
        let mut data = self.data.lock();
        for key in keys {
            data.remove(*key);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_closer(&self) -> Option<&dyn Closer> {
        if self.closeable { Some(self) } else { None }
    }
}

#[async_trait]
impl Closer for ScriptedCache {
    async fn close(&self) -> Result<(), BackendError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(BackendError::Other(format!("{} failed to close", self.name)));
        }
        Ok(())
    }
}
