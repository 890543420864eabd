//! Turning `MULTREGT` keyword records into rules.

use multregt_core::{ConnectionFilter, DirectionSet, MultRegtRecord, RegionValue, RuleError};
use tracing::debug;

use crate::error::{IngestError, RecordLocation};
use crate::keyword::{DeckKeyword, DeckRecord, DeckValue};
use crate::tokens;

/// Name of the keyword this module parses.
pub const KEYWORD: &str = "MULTREGT";

/// Positional items of a `MULTREGT` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultRegtItem {
    /// Source region value (defaulted or negative: wildcard).
    SrcRegion,
    /// Target region value (defaulted or negative: wildcard).
    TargetRegion,
    /// Transmissibility multiplier. Required.
    TranMult,
    /// Face directions. Default `XYZ`.
    Directions,
    /// Connection type filter. Default `ALL`.
    NncMult,
    /// Region classification. Default: the caller's default classification.
    RegionDef,
}

impl MultRegtItem {
    /// Position of the item in the record.
    pub fn index(self) -> usize {
        match self {
            Self::SrcRegion => 0,
            Self::TargetRegion => 1,
            Self::TranMult => 2,
            Self::Directions => 3,
            Self::NncMult => 4,
            Self::RegionDef => 5,
        }
    }

    /// Item name as used in deck documentation.
    pub fn name(self) -> &'static str {
        match self {
            Self::SrcRegion => "SRC_REGION",
            Self::TargetRegion => "TARGET_REGION",
            Self::TranMult => "TRAN_MULT",
            Self::Directions => "DIRECTIONS",
            Self::NncMult => "NNC_MULT",
            Self::RegionDef => "REGION_DEF",
        }
    }
}

/// A rule together with the record it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedRule {
    /// The parsed rule.
    pub record: MultRegtRecord,
    /// Where it was declared.
    pub origin: RecordLocation,
}

/// Parse every record of a `MULTREGT` keyword, in declaration order.
///
/// `default_region` names the classification used by records that leave
/// `REGION_DEF` defaulted. The first invalid record aborts parsing.
///
/// # Examples
///
/// ```
/// use multregt_deck::{parse_keyword, DeckKeyword, DeckLocation, DeckRecord, DeckValue};
///
/// let kw = DeckKeyword::new(
///     "MULTREGT",
///     DeckLocation::new("CASE.DATA", 10),
///     vec![DeckRecord::new([
///         DeckValue::Int(1),
///         DeckValue::Int(2),
///         DeckValue::Real(0.5),
///         DeckValue::from("X"),
///     ])],
/// );
/// let rules = parse_keyword(&kw, "FLUXNUM").unwrap();
/// assert_eq!(rules.len(), 1);
/// assert_eq!(rules[0].record.multiplier, 0.5);
/// assert_eq!(rules[0].record.region_name, "FLUXNUM");
/// ```
pub fn parse_keyword(
    keyword: &DeckKeyword,
    default_region: &str,
) -> Result<Vec<ParsedRule>, IngestError> {
    if !keyword.name().eq_ignore_ascii_case(KEYWORD) {
        return Err(IngestError::WrongKeyword {
            expected: KEYWORD,
            found: keyword.name().to_string(),
            location: keyword.location().clone(),
        });
    }

    let mut rules = Vec::with_capacity(keyword.records().len());
    for (i, record) in keyword.records().iter().enumerate() {
        let origin = RecordLocation {
            keyword: keyword.name().to_string(),
            location: keyword.location().clone(),
            record: i + 1,
        };
        let parsed = parse_record(record, &origin, default_region)?;
        rules.push(ParsedRule {
            record: parsed,
            origin,
        });
    }

    debug!(
        location = %keyword.location(),
        records = rules.len(),
        "parsed MULTREGT keyword"
    );
    Ok(rules)
}

fn parse_record(
    record: &DeckRecord,
    at: &RecordLocation,
    default_region: &str,
) -> Result<MultRegtRecord, IngestError> {
    let src = region_value(record, MultRegtItem::SrcRegion, at)?;
    let target = region_value(record, MultRegtItem::TargetRegion, at)?;
    let multiplier = multiplier(record, at)?;
    let directions = directions(record, at)?;
    let filter = connection_filter(record, at)?;
    let region_name = region_name(record, at, default_region)?;

    let rule = MultRegtRecord {
        src,
        target,
        multiplier,
        directions,
        filter,
        region_name,
    };
    rule.validate().map_err(|e| match e {
        RuleError::IntraRegion { region } => IngestError::IntraRegionRule {
            region,
            at: at.clone(),
        },
        RuleError::UnsupportedCombination { directions, filter } => {
            IngestError::UnsupportedCombination {
                directions,
                filter,
                at: at.clone(),
            }
        }
        RuleError::NonFiniteMultiplier { value } => IngestError::InvalidItem {
            item: MultRegtItem::TranMult.name(),
            value: value.to_string(),
            at: at.clone(),
        },
    })?;
    Ok(rule)
}

static ABSENT: DeckValue = DeckValue::Defaulted;

fn item(record: &DeckRecord, item: MultRegtItem) -> &DeckValue {
    record.item(item.index()).unwrap_or(&ABSENT)
}

fn invalid(item: MultRegtItem, value: &DeckValue, at: &RecordLocation) -> IngestError {
    IngestError::InvalidItem {
        item: item.name(),
        value: value.to_string(),
        at: at.clone(),
    }
}

fn region_value(
    record: &DeckRecord,
    which: MultRegtItem,
    at: &RecordLocation,
) -> Result<RegionValue, IngestError> {
    match item(record, which) {
        DeckValue::Defaulted => Ok(RegionValue::Any),
        DeckValue::Int(v) if *v < 0 => Ok(RegionValue::Any),
        DeckValue::Int(v) => Ok(RegionValue::Value(*v)),
        other => Err(invalid(which, other, at)),
    }
}

fn multiplier(record: &DeckRecord, at: &RecordLocation) -> Result<f64, IngestError> {
    let which = MultRegtItem::TranMult;
    match item(record, which) {
        DeckValue::Defaulted => Err(IngestError::MissingItem {
            item: which.name(),
            at: at.clone(),
        }),
        DeckValue::Int(v) => Ok(f64::from(*v)),
        DeckValue::Real(v) if v.is_finite() => Ok(*v),
        other => Err(invalid(which, other, at)),
    }
}

fn directions(record: &DeckRecord, at: &RecordLocation) -> Result<DirectionSet, IngestError> {
    let which = MultRegtItem::Directions;
    match item(record, which) {
        DeckValue::Defaulted => Ok(DirectionSet::ALL),
        value @ DeckValue::Str(s) => {
            tokens::directions(s).ok_or_else(|| invalid(which, value, at))
        }
        other => Err(invalid(which, other, at)),
    }
}

fn connection_filter(
    record: &DeckRecord,
    at: &RecordLocation,
) -> Result<ConnectionFilter, IngestError> {
    let which = MultRegtItem::NncMult;
    match item(record, which) {
        DeckValue::Defaulted => Ok(ConnectionFilter::All),
        value @ DeckValue::Str(s) => {
            tokens::connection_filter(s).ok_or_else(|| invalid(which, value, at))
        }
        other => Err(invalid(which, other, at)),
    }
}

fn region_name(
    record: &DeckRecord,
    at: &RecordLocation,
    default_region: &str,
) -> Result<String, IngestError> {
    let which = MultRegtItem::RegionDef;
    match item(record, which) {
        DeckValue::Defaulted => Ok(default_region.to_string()),
        DeckValue::Str(s) => {
            Ok(tokens::region_name(s).unwrap_or_else(|| default_region.to_string()))
        }
        other => Err(invalid(which, other, at)),
    }
}
