//! Error types for module loading

use thiserror::Error;

/// Failure reported by an [`AssetLoader`](crate::registry::AssetLoader)
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Failure of an asynchronous module load
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("Unknown module type: {0}")]
    UnknownModuleType(String),
    /// The asset loader's error, forwarded unchanged
    #[error(transparent)]
    Asset(#[from] AssetError),
}
