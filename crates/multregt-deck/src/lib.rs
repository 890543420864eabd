//! Deck record model and MULTREGT rule ingestion.
//!
//! The deck tokenizer lives outside this workspace. It hands over each
//! keyword occurrence as a [`DeckKeyword`]: a name, a source location,
//! and a list of positional [`DeckRecord`]s whose items are already typed
//! ([`DeckValue`]). [`parse_keyword`] turns a `MULTREGT` keyword into
//! declaration-ordered [`ParsedRule`]s, rejecting combinations the
//! resolver cannot honour.
//!
//! Classification names are not checked here; whether a region array
//! exists is only known once the property store is consulted, so that
//! check belongs to the scanner.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod ingest;
pub mod keyword;
pub mod tokens;

pub use error::{IngestError, RecordLocation};
pub use ingest::{parse_keyword, MultRegtItem, ParsedRule, KEYWORD};
pub use keyword::{DeckKeyword, DeckLocation, DeckRecord, DeckValue};
