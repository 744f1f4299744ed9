pub mod error;
pub mod layered;
pub mod traits;

pub use error::{BackendError, CacheError, Result};
pub use layered::{Layer, LayeredCache, LayeredCacheBuilder};
pub use traits::{Cache, Closer};
