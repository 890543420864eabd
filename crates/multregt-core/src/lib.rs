//! Core types and traits for MULTREGT region-pair transmissibility multipliers.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: grid dimensions
//! and cell indexing, face directions and connection descriptors, the
//! parsed rule type ([`MultRegtRecord`]), and the read-only interface to
//! per-cell region arrays ([`RegionProperties`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod face;
pub mod grid;
pub mod props;
pub mod record;

pub use error::{GridError, RuleError};
pub use face::{Connection, DirectionSet, FaceDir};
pub use grid::GridDims;
pub use props::RegionProperties;
pub use record::{ConnectionFilter, MultRegtRecord, RegionPair, RegionValue, RuleId};
