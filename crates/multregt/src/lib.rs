//! MULTREGT: region-pair transmissibility multipliers for reservoir grids.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all MULTREGT sub-crates. For most users, adding `multregt` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use multregt::prelude::*;
//!
//! // A property store with one region array.
//! struct Props {
//!     dims: GridDims,
//!     fluxnum: Vec<i32>,
//! }
//! impl RegionProperties for Props {
//!     fn dims(&self) -> GridDims { self.dims }
//!     fn region_array(&self, name: &str) -> Option<&[i32]> {
//!         (name == "FLUXNUM").then_some(self.fluxnum.as_slice())
//!     }
//! }
//!
//! let props = Props {
//!     dims: GridDims::new(3, 1, 1).unwrap(),
//!     fluxnum: vec![1, 1, 2],
//! };
//!
//! // MULTREGT
//! //   1 2 0.5 X /
//! // /
//! let deck = vec![DeckKeyword::new(
//!     "MULTREGT",
//!     DeckLocation::new("CASE.DATA", 120),
//!     vec![DeckRecord::new([
//!         DeckValue::Int(1),
//!         DeckValue::Int(2),
//!         DeckValue::Real(0.5),
//!         DeckValue::from("X"),
//!     ])],
//! )];
//!
//! let scanner = MultRegtScanner::new(&props, &deck, &ScannerConfig::default()).unwrap();
//! let dims = scanner.dims();
//! assert_eq!(scanner.multiplier(1, 2, dims.connection_between(1, 2)), 0.5);
//! assert_eq!(scanner.multiplier(0, 1, dims.connection_between(0, 1)), 1.0);
//!
//! // Restart without the deck or the property store.
//! let mut restart = Vec::new();
//! multregt::snapshot::write_scanner(&mut restart, &scanner).unwrap();
//! let restored = multregt::snapshot::read_scanner(&mut restart.as_slice()).unwrap();
//! assert_eq!(restored, scanner);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `multregt-core` | Grid indexing, faces, connections, rules, the property-store trait |
//! | [`deck`] | `multregt-deck` | Deck keyword model and `MULTREGT` ingestion |
//! | [`scanner`] | `multregt-scanner` | Lookup tables, the resolver, in-memory snapshot/restore |
//! | [`snapshot`] | `multregt-snapshot` | Binary restart files and content hashing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the property-store trait (`multregt-core`).
///
/// Contains [`types::GridDims`], [`types::Connection`],
/// [`types::MultRegtRecord`] and [`types::RegionProperties`].
pub use multregt_core as types;

/// Deck keyword model and rule ingestion (`multregt-deck`).
///
/// [`deck::parse_keyword`] turns one `MULTREGT` occurrence into rules.
pub use multregt_deck as deck;

/// Lookup tables and the multiplier resolver (`multregt-scanner`).
pub use multregt_scanner as scanner;

/// Binary restart files (`multregt-snapshot`).
///
/// [`snapshot::write_scanner`] and [`snapshot::read_scanner`] persist a
/// scanner across process boundaries.
pub use multregt_snapshot as snapshot;

/// Common imports for typical MULTREGT usage.
///
/// ```rust
/// use multregt::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use multregt_core::{
        Connection, ConnectionFilter, DirectionSet, FaceDir, GridDims, MultRegtRecord,
        RegionProperties, RegionValue,
    };

    // Deck model
    pub use multregt_deck::{DeckKeyword, DeckLocation, DeckRecord, DeckValue};

    // Scanner
    pub use multregt_scanner::{MultRegtScanner, ScannerConfig, ScannerSnapshot};

    // Errors
    pub use multregt_core::{GridError, RuleError};
    pub use multregt_deck::IngestError;
    pub use multregt_scanner::ScannerError;
    pub use multregt_snapshot::SnapshotError;
}
