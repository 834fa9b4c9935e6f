//! Error Types
//!
//! This module defines the error types used throughout the player.
//!
//! # Overview
//!
//! The main error type [`MeshVideoError`] covers all failure modes including:
//! - Asset reading and mesh source failures
//! - Metadata parsing and validation errors
//! - Background load channel failures
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, MeshVideoError>`.
//!
//! ```rust,ignore
//! use mesh_video::errors::{MeshVideoError, Result};
//!
//! fn open_folder() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the mesh video player.
#[derive(Error, Debug)]
pub enum MeshVideoError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// The mesh source produced no scene to read frames from.
    #[error("Mesh source '{path}' has no root node")]
    MissingRootNode {
        /// Path that was requested from the source
        path: String,
    },

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    // ========================================================================
    // Metadata Errors
    // ========================================================================
    /// Metadata was parsed but holds an unusable value.
    #[error("Invalid metadata field '{field}': {reason}")]
    InvalidMetadata {
        /// Name of the JSON key
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// The loader side of a track's load channel went away without a result.
    #[error("Load channel closed before a result was delivered")]
    LoadChannelClosed,
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<gltf::Error> for MeshVideoError {
    fn from(err: gltf::Error) -> Self {
        MeshVideoError::GltfError(err.to_string())
    }
}

impl From<flume::RecvError> for MeshVideoError {
    fn from(_: flume::RecvError) -> Self {
        MeshVideoError::LoadChannelClosed
    }
}

/// Alias for `Result<T, MeshVideoError>`.
pub type Result<T> = std::result::Result<T, MeshVideoError>;
