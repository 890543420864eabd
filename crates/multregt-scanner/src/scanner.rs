//! The scanner: construction from deck keywords and the multiplier resolver.

use multregt_core::{Connection, GridDims, MultRegtRecord, RegionPair, RegionProperties, RuleId};
use multregt_deck::{parse_keyword, DeckKeyword, RecordLocation};
use tracing::info;

use crate::config::ScannerConfig;
use crate::error::ScannerError;
use crate::table::{build_tables, RegionTable};

/// Resolves region-pair transmissibility multipliers for cell connections.
///
/// Immutable once built. Queries take `&self` and touch no shared mutable
/// state, so a scanner can be shared freely across threads.
///
/// Equality compares grid size, rules, materialised region arrays and
/// the default classification; the lookup tables are derived from those
/// and are not compared.
#[derive(Clone, Debug)]
pub struct MultRegtScanner {
    dims: GridDims,
    records: Vec<MultRegtRecord>,
    tables: Vec<RegionTable>,
    default_region: String,
}

impl MultRegtScanner {
    /// Build a scanner from every `MULTREGT` keyword in the deck.
    ///
    /// `props` is only read during this call.
    ///
    /// # Errors
    ///
    /// - [`ScannerError::Config`] if `config` is invalid
    /// - [`ScannerError::Ingest`] if a record is malformed or unsupported
    /// - [`ScannerError::UnknownRegionArray`] if a rule names a
    ///   classification `props` does not have
    /// - [`ScannerError::RegionArraySize`] if a region array does not
    ///   match the grid
    pub fn new(
        props: &dyn RegionProperties,
        keywords: &[DeckKeyword],
        config: &ScannerConfig,
    ) -> Result<Self, ScannerError> {
        config.validate()?;
        let default_region = config.resolve_default_region(props);

        let mut records = Vec::new();
        let mut origins = Vec::new();
        for keyword in keywords {
            for rule in parse_keyword(keyword, &default_region)? {
                records.push(rule.record);
                origins.push(rule.origin);
            }
        }
        Self::build(props, records, &origins, default_region)
    }

    /// Build a scanner from rules that were assembled without a deck.
    ///
    /// Rules are held to the same checks as deck records.
    ///
    /// # Errors
    ///
    /// - [`ScannerError::InvalidRule`] if a rule fails
    ///   [`MultRegtRecord::validate`]
    /// - [`ScannerError::UnknownRegionArray`] and
    ///   [`ScannerError::RegionArraySize`] as for [`new`](Self::new)
    ///
    /// # Examples
    ///
    /// ```
    /// use multregt_core::{
    ///     Connection, ConnectionFilter, DirectionSet, FaceDir, GridDims, MultRegtRecord,
    ///     RegionValue,
    /// };
    /// use multregt_scanner::MultRegtScanner;
    /// use multregt_test_utils::MockRegionProperties;
    ///
    /// let props = MockRegionProperties::new(GridDims::new(3, 1, 1).unwrap())
    ///     .with_region("R", vec![1, 1, 2]);
    /// let rule = MultRegtRecord {
    ///     src: RegionValue::Value(1),
    ///     target: RegionValue::Value(2),
    ///     multiplier: 0.5,
    ///     directions: DirectionSet::X,
    ///     filter: ConnectionFilter::All,
    ///     region_name: "R".into(),
    /// };
    /// let scanner = MultRegtScanner::from_records(&props, vec![rule], "R").unwrap();
    ///
    /// let x = Connection::Face(FaceDir::XPlus);
    /// assert_eq!(scanner.multiplier(1, 2, x), 0.5);
    /// assert_eq!(scanner.multiplier(0, 1, x), 1.0);
    /// ```
    pub fn from_records(
        props: &dyn RegionProperties,
        records: Vec<MultRegtRecord>,
        default_region: impl Into<String>,
    ) -> Result<Self, ScannerError> {
        Self::build(props, records, &[], default_region.into())
    }

    fn build(
        props: &dyn RegionProperties,
        records: Vec<MultRegtRecord>,
        origins: &[RecordLocation],
        default_region: String,
    ) -> Result<Self, ScannerError> {
        validate_records(&records)?;
        let dims = props.dims();
        let tables = build_tables(props, &records, origins)?;
        info!(
            grid = %dims,
            rules = records.len(),
            classifications = tables.len(),
            default_region = %default_region,
            "MULTREGT scanner ready"
        );
        Ok(Self {
            dims,
            records,
            tables,
            default_region,
        })
    }

    pub(crate) fn from_parts(
        dims: GridDims,
        records: Vec<MultRegtRecord>,
        tables: Vec<RegionTable>,
        default_region: String,
    ) -> Self {
        Self {
            dims,
            records,
            tables,
            default_region,
        }
    }

    /// Combined multiplier for the connection between `cell_a` and `cell_b`.
    ///
    /// Every classification whose values differ between the two cells and
    /// whose table has a rule for that pair contributes the rule's
    /// multiplier, provided the rule admits the connection kind and, for
    /// face connections, the face. Contributions multiply. With no
    /// applicable rule the result is `1.0`.
    ///
    /// `connection` is seen from `cell_a`: for structural neighbours, the
    /// face of `cell_a` that touches `cell_b`.
    ///
    /// # Panics
    ///
    /// Cell indices must be valid for the grid; out-of-range indices panic.
    /// Debug builds also assert `cell_a != cell_b`.
    #[inline]
    pub fn multiplier(&self, cell_a: usize, cell_b: usize, connection: Connection) -> f64 {
        debug_assert_ne!(cell_a, cell_b, "a cell has no connection to itself");
        let mut result = 1.0;
        for table in &self.tables {
            let r1 = table.value(cell_a);
            let r2 = table.value(cell_b);
            if r1 == r2 {
                continue;
            }
            let Some(id) = table.get(RegionPair::new(r1, r2)) else {
                continue;
            };
            let rule = &self.records[id.index()];
            if rule.applies_to(connection) {
                result *= rule.multiplier;
            }
        }
        result
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Rules in declaration order.
    pub fn records(&self) -> &[MultRegtRecord] {
        &self.records
    }

    /// Classification used by rules that did not name one.
    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    /// Whether the scanner has no rules (every multiplier is `1.0`).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lookup tables, one per referenced classification.
    pub fn tables(&self) -> &[RegionTable] {
        &self.tables
    }

    /// Materialised region arrays as `(classification, values)`.
    pub fn regions(&self) -> impl Iterator<Item = (&str, &[i32])> + '_ {
        self.tables.iter().map(|t| (t.name(), t.values()))
    }

    /// Materialised region array for one classification.
    pub fn region_values(&self, name: &str) -> Option<&[i32]> {
        self.tables
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.values())
    }
}

fn validate_records(records: &[MultRegtRecord]) -> Result<(), ScannerError> {
    for (i, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|source| ScannerError::InvalidRule {
                rule: RuleId(i as u32),
                source,
            })?;
    }
    Ok(())
}

impl PartialEq for MultRegtScanner {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims
            && self.records == other.records
            && self.default_region == other.default_region
            && self.regions().eq(other.regions())
    }
}
