//! Error types for manifest decoding, bit reading and line output.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cascinstall operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the decoding and output layers.
///
/// End of a bit stream is not an error; [`BitReader`](crate::BitReader)
/// reports it as `Ok(None)`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The buffer does not start with the install manifest signature
    #[error("invalid install manifest signature: expected 0x4e49, found {found:#06x}")]
    InvalidSignature {
        /// Signature read from the buffer (little-endian)
        found: u16,
    },

    /// A declared length runs past the end of the buffer
    #[error("truncated data at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        /// Cursor offset at which the read was attempted
        offset: u64,
        /// Bytes the read required
        needed: u64,
        /// Bytes left in the buffer
        available: u64,
    },

    /// Bytes remain after the last file record
    #[error("{remaining} unexpected trailing bytes at offset {offset}")]
    TrailingData {
        /// Offset of the first unread byte
        offset: u64,
        /// Number of unread bytes
        remaining: u64,
    },

    /// `read_bits` was called with a width outside 1..=16
    #[error("invalid bit count {requested}: must be between 1 and 16")]
    InvalidBitCount {
        /// The width that was requested
        requested: u32,
    },

    /// The output sink failed to accept data or to close
    #[error("output sink failed: {0}")]
    Sink(#[source] std::io::Error),

    /// Failed to read or create a file
    #[error("failed to access '{path}': {source}")]
    Io {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new truncation error
    pub fn truncated(offset: u64, needed: u64, available: u64) -> Self {
        Self::Truncated {
            offset,
            needed,
            available,
        }
    }

    /// Creates a new file access error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the input buffer itself is malformed
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSignature { .. } | Self::Truncated { .. } | Self::TrailingData { .. }
        )
    }
}
