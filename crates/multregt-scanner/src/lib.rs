//! Region-pair transmissibility multipliers.
//!
//! [`MultRegtScanner`] is built once from the deck's `MULTREGT` keywords
//! and the grid's region arrays, and then answers
//! [`multiplier`](MultRegtScanner::multiplier) queries for every cell
//! connection the simulator assembles.
//!
//! # Construction
//!
//! 1. Every `MULTREGT` record becomes a [`MultRegtRecord`](multregt_core::MultRegtRecord),
//!    in declaration order.
//! 2. For every classification the rules mention, the region array is
//!    copied out of the property store and a table from unordered region
//!    pair to winning rule is built. Later rules override earlier ones;
//!    wildcard rules only fill pairs no concrete rule claims.
//!
//! The property store is only borrowed during construction.
//!
//! # Persistence
//!
//! Tables refer to rules by [`RuleId`](multregt_core::RuleId), so the
//! whole state flattens into a [`ScannerSnapshot`] and comes back through
//! [`MultRegtScanner::restore`] without the deck or the property store.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod scanner;
pub mod snapshot;
pub mod table;

pub use config::{ConfigError, ScannerConfig};
pub use error::ScannerError;
pub use scanner::MultRegtScanner;
pub use snapshot::{ScannerSnapshot, SearchMap};
pub use table::RegionTable;
