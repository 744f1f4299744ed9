//! Cache layers
//!
//! - Memory: in-process LRU layer with per-entry expiration

pub mod memory;

pub use memory::{MemoryCache, MemoryCacheStats};
