//! Error types for scanner construction and restore.

use multregt_core::{RuleError, RuleId};
use multregt_deck::{IngestError, RecordLocation};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors from building or restoring a [`MultRegtScanner`](crate::MultRegtScanner).
///
/// All of these are construction-time failures; the resolver itself
/// cannot fail.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ScannerError {
    /// A keyword record could not be turned into a rule.
    #[error(transparent)]
    Ingest(#[from] IngestError),
    /// The scanner configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A rule supplied without a deck can never be honoured as written.
    #[error("rule {rule} is invalid: {source}")]
    InvalidRule {
        /// Position of the rule in the rule list.
        rule: RuleId,
        /// What is wrong with it.
        source: RuleError,
    },
    /// A rule names a classification the property store does not have.
    #[error("region array {region} does not exist{}", referenced_by(.at))]
    UnknownRegionArray {
        /// The missing classification.
        region: String,
        /// The first record that referenced it, when known.
        at: Option<RecordLocation>,
    },
    /// A region array does not have one value per grid cell.
    #[error("region array {region} has {actual} values, grid has {expected} cells")]
    RegionArraySize {
        /// The classification.
        region: String,
        /// Grid cell count.
        expected: usize,
        /// Array length.
        actual: usize,
    },
    /// A snapshot is internally inconsistent.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// What is inconsistent.
        reason: String,
    },
}

fn referenced_by(at: &Option<RecordLocation>) -> String {
    match at {
        Some(at) => format!(" (referenced by {at})"),
        None => String::new(),
    }
}
