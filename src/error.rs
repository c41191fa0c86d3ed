//! Typed failures at the library boundaries.
//!
//! Only [`ConfigurationError`] is fatal to a run; the rest are per-file and the
//! walker logs them and moves on.

use std::path::PathBuf;
use thiserror::Error;

/// The source/destination roots cannot be used together
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Source and destination directories must differ: {}", .0.display())]
    SameDirectory(PathBuf),

    #[error("Inexisting destination directory: {}", .0.display())]
    MissingDestination(PathBuf),

    #[error("Inexisting source directory: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Failed to resolve {}: {source}", path.display())]
    Unresolvable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A qualifying file could not be read or decoded
#[derive(Debug, Error)]
#[error("Cannot read {}: {source}", path.display())]
pub struct UnreadableImageError {
    pub path: PathBuf,
    #[source]
    pub source: image::ImageError,
}

/// Metadata could not be transplanted into an encoded thumbnail
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("encoded thumbnail is not a well-formed JPEG: {0}")]
    Container(#[from] img_parts::Error),

    #[error("failed to serialize JPEG segments: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered thumbnail could not be written
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to encode thumbnail: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to embed metadata: {0}")]
    Metadata(#[from] MetadataError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
