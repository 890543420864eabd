//! Error types for restart files.

use std::io;

use multregt_scanner::ScannerError;
use thiserror::Error;

/// Errors from writing or reading a restart file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// An I/O error occurred during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The input does not start with `b"MRGT"`.
    #[error("invalid magic bytes (expected b\"MRGT\")")]
    InvalidMagic,
    /// The format version is not supported by this build.
    #[error("unsupported format version {found}")]
    UnsupportedVersion {
        /// The version found in the input.
        found: u8,
    },
    /// The input could not be decoded.
    #[error("malformed snapshot: {detail}")]
    Malformed {
        /// What went wrong.
        detail: String,
    },
    /// The stored content hash does not match the decoded content.
    #[error("content hash mismatch: recorded={recorded:#018x}, computed={computed:#018x}")]
    ChecksumMismatch {
        /// Hash stored in the trailer.
        recorded: u64,
        /// Hash of the decoded snapshot.
        computed: u64,
    },
    /// The decoded snapshot does not describe a valid scanner.
    #[error(transparent)]
    Scanner(#[from] ScannerError),
}

impl SnapshotError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed {
            detail: detail.into(),
        }
    }
}
