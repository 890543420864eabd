//! Error types for rule ingestion.

use multregt_core::{ConnectionFilter, DirectionSet};
use std::fmt;
use thiserror::Error;

use crate::keyword::DeckLocation;

/// Identifies a single record of a keyword occurrence for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordLocation {
    /// Keyword name.
    pub keyword: String,
    /// Where the keyword appears.
    pub location: DeckLocation,
    /// 1-based ordinal of the record within the keyword.
    pub record: usize,
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record {} at {}",
            self.keyword, self.record, self.location
        )
    }
}

/// Errors from turning deck records into rules.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum IngestError {
    /// The keyword handed to the parser is not `MULTREGT`.
    #[error("expected keyword {expected}, found {found} at {location}")]
    WrongKeyword {
        /// The keyword the parser handles.
        expected: &'static str,
        /// The keyword it was given.
        found: String,
        /// Where the keyword appears.
        location: DeckLocation,
    },
    /// A required item was defaulted or absent.
    #[error("{at}: item {item} is required")]
    MissingItem {
        /// Deck name of the item.
        item: &'static str,
        /// The offending record.
        at: RecordLocation,
    },
    /// An item holds a value of the wrong type or an unrecognised token.
    #[error("{at}: invalid value {value} for item {item}")]
    InvalidItem {
        /// Deck name of the item.
        item: &'static str,
        /// The value as written.
        value: String,
        /// The offending record.
        at: RecordLocation,
    },
    /// Source and target name the same region, so the rule can never match.
    #[error("{at}: source and target are both region {region}; a region cannot be multiplied against itself")]
    IntraRegionRule {
        /// The repeated region value.
        region: i32,
        /// The offending record.
        at: RecordLocation,
    },
    /// A direction restriction on a rule that never sees face connections.
    #[error("{at}: directions {directions} cannot be combined with connection type {filter}; non-neighbour connections have no face direction")]
    UnsupportedCombination {
        /// The requested faces.
        directions: DirectionSet,
        /// The requested connection filter.
        filter: ConnectionFilter,
        /// The offending record.
        at: RecordLocation,
    },
}
