//! Error types for grid setup and persistence.
//!
//! Ordinary tile operations never fail with an error: rejected requests
//! report `false` and leave state untouched. Only configuration and
//! snapshot handling can produce a [`GridError`].

use thiserror::Error;

/// Result type alias using [`GridError`].
pub type Result<T> = std::result::Result<T, GridError>;

/// Top-level error type for grid construction, config and snapshots.
#[derive(Debug, Error)]
pub enum GridError {
    /// Width or height is zero or exceeds the addressable range.
    #[error("Invalid grid dimensions {width}x{height} (each side must be 1..={max})")]
    InvalidDimensions {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
        /// Largest allowed side length.
        max: u16,
    },

    /// Failed to read a config file.
    #[error("Failed to read config file '{path}': {source}")]
    ConfigIo {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON config text.
    #[error("Failed to parse grid config '{path}': {source}")]
    ConfigParse {
        /// Path (or `<inline>`) of the parsed text.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to read or write a snapshot file.
    #[error("Snapshot file '{path}': {source}")]
    SnapshotIo {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Snapshot encoding or decoding failed.
    #[error("Snapshot codec error: {0}")]
    SnapshotCodec(#[from] bincode::Error),

    /// Snapshot was written by an incompatible format version.
    #[error("Snapshot version mismatch: expected {expected}, got {found}")]
    SnapshotVersion {
        /// Version this build understands.
        expected: u32,
        /// Version found in the data.
        found: u32,
    },

    /// Snapshot dimensions do not match the config it is loaded with.
    #[error(
        "Snapshot is {snapshot_width}x{snapshot_height} but config expects {config_width}x{config_height}"
    )]
    DimensionMismatch {
        /// Width stored in the snapshot.
        snapshot_width: u16,
        /// Height stored in the snapshot.
        snapshot_height: u16,
        /// Width from the config.
        config_width: u16,
        /// Height from the config.
        config_height: u16,
    },

    /// Snapshot arrays are inconsistent with its header.
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}
