//! Typed keyword records as delivered by the deck tokenizer.

use smallvec::SmallVec;
use std::fmt;

/// Where a keyword appears in the input deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckLocation {
    /// Path of the file containing the keyword.
    pub filename: String,
    /// 1-based line number of the keyword name.
    pub lineno: usize,
}

impl DeckLocation {
    /// Create a location.
    pub fn new(filename: impl Into<String>, lineno: usize) -> Self {
        Self {
            filename: filename.into(),
            lineno,
        }
    }
}

impl fmt::Display for DeckLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.lineno)
    }
}

/// One item of a keyword record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeckValue {
    /// An integer token.
    Int(i32),
    /// A real-number token.
    Real(f64),
    /// A string token, unquoted.
    Str(String),
    /// The item was defaulted (`1*`) or left out.
    Defaulted,
}

impl fmt::Display for DeckValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Defaulted => f.write_str("1*"),
        }
    }
}

impl From<i32> for DeckValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for DeckValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for DeckValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

/// One slash-terminated record of positional items.
///
/// Items past the end of the record read as defaulted.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckRecord {
    items: SmallVec<[DeckValue; 6]>,
}

impl DeckRecord {
    /// Create a record from its items in declaration order.
    pub fn new(items: impl IntoIterator<Item = DeckValue>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// The item at `index`, or `None` when the record is shorter.
    pub fn item(&self, index: usize) -> Option<&DeckValue> {
        self.items.get(index)
    }

    /// Number of items physically present.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the record has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One occurrence of a keyword in the deck.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckKeyword {
    name: String,
    location: DeckLocation,
    records: Vec<DeckRecord>,
}

impl DeckKeyword {
    /// Create a keyword occurrence.
    pub fn new(name: impl Into<String>, location: DeckLocation, records: Vec<DeckRecord>) -> Self {
        Self {
            name: name.into(),
            location,
            records,
        }
    }

    /// Keyword name as written in the deck.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the keyword name.
    pub fn location(&self) -> &DeckLocation {
        &self.location
    }

    /// Records in declaration order.
    pub fn records(&self) -> &[DeckRecord] {
        &self.records
    }
}
