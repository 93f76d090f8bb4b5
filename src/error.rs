// Error types for stream scanning

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a scan failed. A failed scan never yields partial results.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("File not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Stream not readable: {0}")]
    NotReadable(#[from] io::Error),

    #[error("No MPEG audio frame sync found")]
    NoSyncFound,

    /// The frame at `offset` runs past end of stream, or the bytes there are
    /// not a frame although more than a trailer's worth of data remains.
    #[error("Truncated frame at offset {offset} ({remaining} bytes left in stream)")]
    TruncatedFrame { offset: u64, remaining: u64 },

    #[error("Malformed frame header: {0}")]
    Malformed(&'static str),
}

pub type Result<T> = std::result::Result<T, ScanError>;
