//! Error types for asset loading, part addressing and compositing

use std::path::PathBuf;
use thiserror::Error;

use crate::part::PartTag;

/// Error raised by any asset, buffer or render operation.
///
/// Every failure is local to the call that produced it: the asset that was
/// being operated on stays usable and keeps any earlier successful mutation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssetError {
    /// Source bytes are not a decodable image
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Sheet dimensions do not fit the grid of the asset kind
    #[error("Image {width}x{height} does not fit a {columns}x{rows} {kind} grid")]
    InvalidDimensions { width: u32, height: u32, columns: u32, rows: u32, kind: &'static str },

    /// Tag does not belong to the layout being queried
    #[error("Unknown part '{tag}' for {kind} layout")]
    UnknownPart { tag: PartTag, kind: &'static str },

    /// Tag exists but is not valid for this operation
    #[error("Invalid part '{tag}': {reason}")]
    InvalidPart { tag: PartTag, reason: &'static str },

    /// Resampling ratio outside the supported range
    #[error("Cannot resample {from_w}x{from_h} to {to_w}x{to_h}: ratio exceeds 1:{max}", from_w = from.0, from_h = from.1, to_w = to.0, to_h = to.1)]
    SizeMismatch { from: (u32, u32), to: (u32, u32), max: u32 },

    /// Region falls outside the buffer
    #[error("Region {x},{y} {w}x{h} is outside a {buf_w}x{buf_h} buffer", x = rect.0, y = rect.1, w = rect.2, h = rect.3, buf_w = bounds.0, buf_h = bounds.1)]
    OutOfBounds { rect: (u32, u32, u32, u32), bounds: (u32, u32) },

    /// Operation needs something that has not been loaded or set
    #[error("{0} is not loaded")]
    Uninitialized(&'static str),

    /// Asset was already populated by a previous load
    #[error("{0} is already loaded")]
    AlreadyLoaded(&'static str),

    /// Target file exists and overwrite was not requested
    #[error("File already exists: {}", .0.display())]
    FileExists(PathBuf),

    /// Output directory could not be created
    #[error("Cannot create directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Source location cannot be fetched
    #[error("Cannot fetch '{url}': {reason}")]
    Fetch { url: String, reason: String },

    /// Image encoding failed
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// Board legend could not be serialized
    #[error("Failed to write legend: {0}")]
    Legend(#[from] serde_json::Error),

    /// Any other I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;
