//! Error types for grid and rule construction.

use thiserror::Error;

use crate::face::DirectionSet;
use crate::record::ConnectionFilter;

/// Errors arising from grid dimension construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// One of the three extents is zero.
    #[error("grid must have at least one cell, got {nx}x{ny}x{nz}")]
    EmptyGrid {
        /// Extent along X.
        nx: usize,
        /// Extent along Y.
        ny: usize,
        /// Extent along Z.
        nz: usize,
    },
    /// `nx * ny * nz` does not fit in `usize`.
    #[error("cell count overflows usize for {nx}x{ny}x{nz}")]
    CellCountOverflow {
        /// Extent along X.
        nx: usize,
        /// Extent along Y.
        ny: usize,
        /// Extent along Z.
        nz: usize,
    },
}

/// A rule that can never be honoured as written.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RuleError {
    /// Source and target are the same concrete region; the resolver skips
    /// equal regions, so the rule could never match.
    #[error("source and target are both region {region}")]
    IntraRegion {
        /// The repeated region value.
        region: i32,
    },
    /// A direction restriction on a rule whose filter never admits a face
    /// connection.
    #[error("directions {directions} cannot be combined with connection type {filter}; non-neighbour connections have no face direction")]
    UnsupportedCombination {
        /// The requested faces.
        directions: DirectionSet,
        /// The requested connection filter.
        filter: ConnectionFilter,
    },
    /// The multiplier is NaN or infinite.
    #[error("multiplier {value} is not finite")]
    NonFiniteMultiplier {
        /// The offending multiplier.
        value: f64,
    },
}
