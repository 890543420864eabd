//! Binary restart files for MULTREGT scanners.
//!
//! A [`ScannerSnapshot`](multregt_scanner::ScannerSnapshot) carries rule
//! indices rather than references, so it can be written out and read back
//! in another process. This crate provides the on-disk encoding.
//!
//! # Architecture
//!
//! - [`write_scanner`] and [`read_scanner`] persist a whole scanner
//! - [`codec`] holds the primitive and snapshot encoders
//! - [`snapshot_hash`] fingerprints a snapshot; it is stored as a trailer
//!   and checked on read
//!
//! # Format
//!
//! ```text
//! [MAGIC "MRGT"] [VERSION u8]
//! [nx u64] [ny u64] [nz u64] [default_region str]
//! [record_count u32] [Record]*
//! [region_count u32] [name str, len u64, i32*]*
//! [table_count u32]  [name str, entry_count u32, (lo i32, hi i32, rule u32)*]*
//! [content_hash u64]
//! ```
//!
//! All integers are little-endian; strings are `u32`-length-prefixed UTF-8.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hash;

pub use codec::{decode_snapshot, encode_snapshot, read_scanner, write_scanner};
pub use error::SnapshotError;
pub use hash::snapshot_hash;

/// Magic bytes at the start of every restart file.
pub const MAGIC: [u8; 4] = *b"MRGT";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
