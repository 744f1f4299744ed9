//! Cache capability contract
//!
//! The minimum set of operations a backend must expose to take part as a
//! layer in a [`LayeredCache`](crate::LayeredCache).

use std::time::Duration;

use async_trait::async_trait;

use super::error::BackendError;

/// A single cache layer holding values of type `T`.
///
/// A miss is `Ok(None)`, never an error. Errors are reserved for
/// operational failures (I/O, serialization, timeouts, a closed backend).
#[async_trait]
pub trait Cache<T>: Send + Sync {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<T>, BackendError>;

    /// Store a value that stays readable for at least `expiration`.
    ///
    /// Backends without TTL support may treat `expiration` as advisory.
    async fn set(&self, key: &str, value: T, expiration: Duration) -> Result<(), BackendError>;

    /// Remove zero or more keys. Missing keys are not an error.
    async fn delete(&self, keys: &[&str]) -> Result<(), BackendError>;

    /// Stable identifier, used only in diagnostics and error attribution
    fn name(&self) -> &str;

    /// Teardown capability, if this backend needs one
    fn as_closer(&self) -> Option<&dyn Closer> {
        None
    }
}

/// Optional teardown capability of a cache layer
#[async_trait]
pub trait Closer: Send + Sync {
    /// Release backend resources
    async fn close(&self) -> Result<(), BackendError>;
}
