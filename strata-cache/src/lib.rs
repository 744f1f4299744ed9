//! # Strata
//!
//! Layered cache facade: an ordered list of cache layers behind one
//! read/write interface.
//!
//! - **Read-through**: lookups try the fastest layer first
//! - **Backfill**: a hit in a slower layer is written back to the faster ones
//! - **Fan-out writes**: every write reaches every layer
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use strata_cache::{LayeredCache, MemoryCache};
//!
//! # #[tokio::main]
//! # async fn main() -> strata_cache::Result<()> {
//! let cache = LayeredCache::builder()
//!     .expiration(Duration::from_secs(300))
//!     .layer(MemoryCache::new("l1", 1_000))
//!     .layer(MemoryCache::new("l2", 100_000))
//!     .build();
//!
//! cache.set("user:1", "John Doe".to_string()).await?;
//! let value = cache.get("user:1").await?;
//! assert_eq!(value.as_deref(), Some("John Doe"));
//!
//! cache.close().await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod core;

pub use cache::{MemoryCache, MemoryCacheStats};
pub use config::{MemoryLayerConfig, StrataConfig};
pub use crate::core::{
    BackendError, Cache, CacheError, Closer, Layer, LayeredCache, LayeredCacheBuilder, Result,
};
