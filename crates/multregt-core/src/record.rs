//! The parsed MULTREGT rule and its component types.

use crate::error::RuleError;
use crate::face::{Connection, DirectionSet};
use std::fmt;

/// Index of a rule in a scanner's declaration-ordered rule list.
///
/// Lookup tables refer to rules through this index rather than by
/// reference, so tables can be cloned, compared, and persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleId(pub u32);

impl RuleId {
    /// Position in the rule list.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RuleId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// One endpoint of a rule's region pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionValue {
    /// A specific region number.
    Value(i32),
    /// Any region value not claimed by a more specific rule.
    Any,
}

impl RegionValue {
    /// Whether this endpoint is a wildcard.
    pub fn is_wildcard(self) -> bool {
        matches!(self, Self::Any)
    }
}

impl fmt::Display for RegionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Any => f.write_str("*"),
        }
    }
}

/// An unordered pair of distinct region values, stored as `(lo, hi)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionPair {
    lo: i32,
    hi: i32,
}

impl RegionPair {
    /// Normalize `(a, b)` so that `RegionPair::new(a, b) == RegionPair::new(b, a)`.
    #[inline]
    pub fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The smaller value.
    pub fn lo(self) -> i32 {
        self.lo
    }

    /// The larger value.
    pub fn hi(self) -> i32 {
        self.hi
    }
}

impl fmt::Display for RegionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

/// Which kinds of connection a rule applies to.
///
/// Deck tokens: `NNC`, `NONNC`, `ALL`, `NOAQUNNC`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionFilter {
    /// Only non-neighbour connections (`NNC`).
    NncOnly,
    /// Only face connections between structural neighbours (`NONNC`).
    NeighbourOnly,
    /// Every connection (`ALL`).
    #[default]
    All,
    /// Every connection except aquifer connections (`NOAQUNNC`).
    ///
    /// Aquifer connections are not visible to the resolver; callers filter
    /// them out. At this layer the filter admits non-neighbour connections only.
    NoAquiferNnc,
}

impl ConnectionFilter {
    /// Whether a rule with this filter applies to `connection`.
    #[inline]
    pub fn admits(self, connection: Connection) -> bool {
        match (self, connection) {
            (Self::All, _) => true,
            (Self::NeighbourOnly, Connection::Face(_)) => true,
            (Self::NeighbourOnly, Connection::NonNeighbour) => false,
            (Self::NncOnly | Self::NoAquiferNnc, Connection::Face(_)) => false,
            (Self::NncOnly | Self::NoAquiferNnc, Connection::NonNeighbour) => true,
        }
    }

    /// Whether this filter rejects every face connection.
    ///
    /// Such rules never see a face direction, so restricting their
    /// directions is meaningless.
    pub fn excludes_faces(self) -> bool {
        match self {
            Self::NncOnly | Self::NoAquiferNnc => true,
            Self::NeighbourOnly | Self::All => false,
        }
    }

    /// The deck token for this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NncOnly => "NNC",
            Self::NeighbourOnly => "NONNC",
            Self::All => "ALL",
            Self::NoAquiferNnc => "NOAQUNNC",
        }
    }
}

impl fmt::Display for ConnectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One region-pair multiplier rule.
///
/// "When a cell in region `src` of classification `region_name` connects
/// to a cell in region `target`, through one of `directions`, over a
/// connection admitted by `filter`, multiply the transmissibility by
/// `multiplier`."
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultRegtRecord {
    /// Source region.
    pub src: RegionValue,
    /// Target region.
    pub target: RegionValue,
    /// Transmissibility multiplier.
    pub multiplier: f64,
    /// Faces the rule applies through.
    pub directions: DirectionSet,
    /// Connection kinds the rule applies to.
    pub filter: ConnectionFilter,
    /// Name of the region array the region values refer to.
    pub region_name: String,
}

impl MultRegtRecord {
    /// Whether either endpoint is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.src.is_wildcard() || self.target.is_wildcard()
    }

    /// Check that the rule can be honoured as written.
    ///
    /// # Errors
    ///
    /// - [`RuleError::IntraRegion`] if source and target are the same value
    /// - [`RuleError::UnsupportedCombination`] if a filter that excludes face
    ///   connections is paired with a strict direction subset
    /// - [`RuleError::NonFiniteMultiplier`] if the multiplier is NaN or infinite
    pub fn validate(&self) -> Result<(), RuleError> {
        if let (RegionValue::Value(s), RegionValue::Value(t)) = (self.src, self.target) {
            if s == t {
                return Err(RuleError::IntraRegion { region: s });
            }
        }
        if self.filter.excludes_faces() && !self.directions.is_all() {
            return Err(RuleError::UnsupportedCombination {
                directions: self.directions,
                filter: self.filter,
            });
        }
        if !self.multiplier.is_finite() {
            return Err(RuleError::NonFiniteMultiplier {
                value: self.multiplier,
            });
        }
        Ok(())
    }

    /// Whether the rule contributes to `connection`, ignoring region values.
    ///
    /// Directions are matched per axis: a face is admitted when it or its
    /// opposite is in `directions`, so the result is the same from either
    /// cell of a connection.
    #[inline]
    pub fn applies_to(&self, connection: Connection) -> bool {
        if !self.filter.admits(connection) {
            return false;
        }
        match connection {
            Connection::Face(face) => {
                self.directions.contains(face) || self.directions.contains(face.opposite())
            }
            Connection::NonNeighbour => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FaceDir;

    fn record(directions: DirectionSet, filter: ConnectionFilter) -> MultRegtRecord {
        MultRegtRecord {
            src: RegionValue::Value(1),
            target: RegionValue::Value(2),
            multiplier: 0.5,
            directions,
            filter,
            region_name: "FLUXNUM".into(),
        }
    }

    #[test]
    fn region_pair_is_unordered() {
        assert_eq!(RegionPair::new(3, 1), RegionPair::new(1, 3));
        let p = RegionPair::new(7, -2);
        assert_eq!((p.lo(), p.hi()), (-2, 7));
    }

    #[test]
    fn filter_admission_table() {
        let face = Connection::Face(FaceDir::XPlus);
        let nnc = Connection::NonNeighbour;
        assert!(ConnectionFilter::All.admits(face));
        assert!(ConnectionFilter::All.admits(nnc));
        assert!(ConnectionFilter::NeighbourOnly.admits(face));
        assert!(!ConnectionFilter::NeighbourOnly.admits(nnc));
        assert!(!ConnectionFilter::NncOnly.admits(face));
        assert!(ConnectionFilter::NncOnly.admits(nnc));
        assert!(!ConnectionFilter::NoAquiferNnc.admits(face));
        assert!(ConnectionFilter::NoAquiferNnc.admits(nnc));
    }

    #[test]
    fn applies_to_checks_direction_for_faces_only() {
        let r = record(DirectionSet::Z, ConnectionFilter::All);
        assert!(r.applies_to(Connection::Face(FaceDir::ZMinus)));
        assert!(!r.applies_to(Connection::Face(FaceDir::XPlus)));
        assert!(r.applies_to(Connection::NonNeighbour));
    }

    #[test]
    fn single_face_rule_applies_along_its_whole_axis() {
        let xp = DirectionSet::from_faces([FaceDir::XPlus]).unwrap();
        let r = record(xp, ConnectionFilter::All);
        assert!(r.applies_to(Connection::Face(FaceDir::XPlus)));
        assert!(r.applies_to(Connection::Face(FaceDir::XMinus)));
        assert!(!r.applies_to(Connection::Face(FaceDir::YPlus)));
    }

    // ── Validation ──────────────────────────────────────────────

    #[test]
    fn well_formed_rule_validates() {
        assert_eq!(record(DirectionSet::X, ConnectionFilter::All).validate(), Ok(()));
        let mut r = record(DirectionSet::ALL, ConnectionFilter::NncOnly);
        r.src = RegionValue::Any;
        r.target = RegionValue::Any;
        assert_eq!(r.validate(), Ok(()));
    }

    #[test]
    fn intra_region_rule_is_invalid() {
        let mut r = record(DirectionSet::ALL, ConnectionFilter::All);
        r.target = RegionValue::Value(1);
        assert_eq!(r.validate(), Err(RuleError::IntraRegion { region: 1 }));
    }

    #[test]
    fn direction_subset_with_nnc_filter_is_invalid() {
        for filter in [ConnectionFilter::NncOnly, ConnectionFilter::NoAquiferNnc] {
            let r = record(DirectionSet::Z, filter);
            assert_eq!(
                r.validate(),
                Err(RuleError::UnsupportedCombination {
                    directions: DirectionSet::Z,
                    filter,
                })
            );
        }
        assert!(record(DirectionSet::Z, ConnectionFilter::NeighbourOnly)
            .validate()
            .is_ok());
    }

    #[test]
    fn non_finite_multiplier_is_invalid() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut r = record(DirectionSet::ALL, ConnectionFilter::All);
            r.multiplier = value;
            assert!(matches!(
                r.validate(),
                Err(RuleError::NonFiniteMultiplier { .. })
            ));
        }
    }

    #[test]
    fn wildcard_detection() {
        let mut r = record(DirectionSet::ALL, ConnectionFilter::All);
        assert!(!r.is_wildcard());
        r.target = RegionValue::Any;
        assert!(r.is_wildcard());
        assert_eq!(r.target.to_string(), "*");
    }
}
