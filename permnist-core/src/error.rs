use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the permnist crates.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum PermnistError {
    #[error("Permutation length mismatch: expected {expected} entries (one per pixel), got {actual}")]
    PermutationLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid permutation: entry {index} of a length-{len} permutation {reason}")]
    InvalidPermutation {
        index: usize,
        len: usize,
        reason: String,
    },

    #[error("Index out of bounds: index {index} for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Sample size too large: requested {requested} items without replacement, only {available} available")]
    SampleSizeTooLarge { requested: usize, available: usize },

    #[error("Invalid IDX magic number: expected {expected:#06x}, got {got:#06x}")]
    InvalidMagic { expected: u32, got: u32 },

    #[error("Truncated {what}: expected at least {expected} bytes, got {actual}")]
    Truncated {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid image dimensions: {rows}x{cols}, both must be non-zero")]
    InvalidImageDims { rows: usize, cols: usize },

    #[error("Image/label count mismatch: {images} images vs {labels} labels")]
    CountMismatch { images: usize, labels: usize },

    #[error("Image size mismatch at index {index}: expected {expected} pixels, got {actual}")]
    ImageSizeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Dataset file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("Failed to decompress {}: {message}", .path.display())]
    Decompression { path: PathBuf, message: String },

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PermnistError {
    /// Wraps an `std::io::Error` together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        PermnistError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
