use thiserror::Error;

/// Failure reported by a single cache layer
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Operation timeout")]
    Timeout,

    #[error("Cache is closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

/// Main error type for layered cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// A layer failed while serving a get, set or delete.
    #[error("cache layer '{layer}' failed: {source}")]
    Layer {
        layer: String,
        #[source]
        source: BackendError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CacheError {
    pub(crate) fn layer_failure(layer: &str, source: BackendError) -> Self {
        Self::Layer {
            layer: layer.to_string(),
            source,
        }
    }

    /// Name of the layer that failed, if this is a layer failure
    pub fn layer(&self) -> Option<&str> {
        match self {
            Self::Layer { layer, .. } => Some(layer),
            Self::Config(_) => None,
        }
    }

    /// Underlying backend error, if this is a layer failure
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            Self::Layer { source, .. } => Some(source),
            Self::Config(_) => None,
        }
    }
}

/// Result type alias for layered cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
