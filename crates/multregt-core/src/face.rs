//! Face directions, direction sets, and connection descriptors.

use smallvec::SmallVec;
use std::fmt;

/// One of the six faces through which a cell touches a structural neighbour.
///
/// `XPlus` is the face towards increasing `i`, `XMinus` towards decreasing
/// `i`, and likewise for `Y` (`j`) and `Z` (`k`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaceDir {
    /// Towards increasing `i`.
    XPlus,
    /// Towards decreasing `i`.
    XMinus,
    /// Towards increasing `j`.
    YPlus,
    /// Towards decreasing `j`.
    YMinus,
    /// Towards increasing `k`.
    ZPlus,
    /// Towards decreasing `k`.
    ZMinus,
}

impl FaceDir {
    /// All six faces in canonical order.
    pub const ALL: [FaceDir; 6] = [
        FaceDir::XPlus,
        FaceDir::XMinus,
        FaceDir::YPlus,
        FaceDir::YMinus,
        FaceDir::ZPlus,
        FaceDir::ZMinus,
    ];

    /// The bit this face occupies in a [`DirectionSet`].
    pub const fn bit(self) -> u8 {
        match self {
            Self::XPlus => 1 << 0,
            Self::XMinus => 1 << 1,
            Self::YPlus => 1 << 2,
            Self::YMinus => 1 << 3,
            Self::ZPlus => 1 << 4,
            Self::ZMinus => 1 << 5,
        }
    }

    /// The same face seen from the other cell of the connection.
    pub const fn opposite(self) -> FaceDir {
        match self {
            Self::XPlus => Self::XMinus,
            Self::XMinus => Self::XPlus,
            Self::YPlus => Self::YMinus,
            Self::YMinus => Self::YPlus,
            Self::ZPlus => Self::ZMinus,
            Self::ZMinus => Self::ZPlus,
        }
    }
}

impl fmt::Display for FaceDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::XPlus => "X+",
            Self::XMinus => "X-",
            Self::YPlus => "Y+",
            Self::YMinus => "Y-",
            Self::ZPlus => "Z+",
            Self::ZMinus => "Z-",
        };
        f.write_str(s)
    }
}

/// A non-empty set of [`FaceDir`]s, stored as a 6-bit mask.
///
/// The empty set is unrepresentable through the public constructors:
/// a rule that applies through no face is meaningless.
///
/// Rules match directions per axis (see
/// [`MultRegtRecord::applies_to`](crate::MultRegtRecord::applies_to)), so a
/// single face such as `{X+}` behaves as the whole X axis there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionSet(u8);

impl DirectionSet {
    const MASK: u8 = 0b0011_1111;

    /// Every face.
    pub const ALL: DirectionSet = DirectionSet(Self::MASK);

    /// Both faces along X.
    pub const X: DirectionSet = DirectionSet(FaceDir::XPlus.bit() | FaceDir::XMinus.bit());
    /// Both faces along Y.
    pub const Y: DirectionSet = DirectionSet(FaceDir::YPlus.bit() | FaceDir::YMinus.bit());
    /// Both faces along Z.
    pub const Z: DirectionSet = DirectionSet(FaceDir::ZPlus.bit() | FaceDir::ZMinus.bit());

    /// Build a set from individual faces. Returns `None` if `faces` is empty.
    pub fn from_faces(faces: impl IntoIterator<Item = FaceDir>) -> Option<Self> {
        let bits = faces.into_iter().fold(0u8, |acc, f| acc | f.bit());
        Self::from_bits(bits)
    }

    /// Rebuild a set from its raw mask.
    ///
    /// Returns `None` for an empty mask or one with bits above the six faces.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits == 0 || bits & !Self::MASK != 0 {
            return None;
        }
        Some(Self(bits))
    }

    /// Raw 6-bit mask.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Set union.
    pub fn union(self, other: DirectionSet) -> DirectionSet {
        DirectionSet(self.0 | other.0)
    }

    /// Whether `face` is a member.
    #[inline]
    pub fn contains(self, face: FaceDir) -> bool {
        self.0 & face.bit() != 0
    }

    /// Whether the set holds all six faces.
    pub fn is_all(self) -> bool {
        self.0 == Self::MASK
    }

    /// Members in canonical order.
    pub fn faces(self) -> SmallVec<[FaceDir; 6]> {
        FaceDir::ALL
            .iter()
            .copied()
            .filter(|&f| self.contains(f))
            .collect()
    }
}

impl Default for DirectionSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for DirectionSet {
    /// Axis letters (`XZ`) when every axis is complete, faces (`X+,Y-`) otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axes = [(Self::X, 'X'), (Self::Y, 'Y'), (Self::Z, 'Z')];
        let closed = axes
            .iter()
            .all(|(axis, _)| self.0 & axis.0 == 0 || self.0 & axis.0 == axis.0);
        if closed {
            for (axis, letter) in axes {
                if self.0 & axis.0 != 0 {
                    write!(f, "{letter}")?;
                }
            }
            return Ok(());
        }
        let faces = self.faces();
        for (i, face) in faces.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

/// How two cells are connected, as seen by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connection {
    /// The cells are structural neighbours sharing the given face
    /// (seen from the first cell of the query).
    Face(FaceDir),
    /// A non-neighbour connection (fault juxtaposition, explicit NNC,
    /// aquifer). Carries no face direction.
    NonNeighbour,
}

impl Connection {
    /// The same connection seen from the other cell.
    pub fn reversed(self) -> Connection {
        match self {
            Self::Face(face) => Self::Face(face.opposite()),
            Self::NonNeighbour => Self::NonNeighbour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn opposite_is_involution() {
        for face in FaceDir::ALL {
            assert_ne!(face, face.opposite());
            assert_eq!(face, face.opposite().opposite());
        }
    }

    #[test]
    fn bits_are_distinct() {
        let mut seen = 0u8;
        for face in FaceDir::ALL {
            assert_eq!(seen & face.bit(), 0);
            seen |= face.bit();
        }
        assert_eq!(seen, DirectionSet::ALL.bits());
    }

    #[test]
    fn empty_set_unrepresentable() {
        assert!(DirectionSet::from_faces([]).is_none());
        assert!(DirectionSet::from_bits(0).is_none());
        assert!(DirectionSet::from_bits(0b0100_0000).is_none());
    }

    #[test]
    fn axis_sets() {
        assert!(DirectionSet::X.contains(FaceDir::XPlus));
        assert!(DirectionSet::X.contains(FaceDir::XMinus));
        assert!(!DirectionSet::X.contains(FaceDir::YPlus));
        assert!(DirectionSet::X
            .union(DirectionSet::Y)
            .union(DirectionSet::Z)
            .is_all());
    }

    #[test]
    fn display_axis_form() {
        assert_eq!(DirectionSet::ALL.to_string(), "XYZ");
        assert_eq!(DirectionSet::X.union(DirectionSet::Z).to_string(), "XZ");
    }

    #[test]
    fn display_face_form() {
        let set = DirectionSet::from_faces([FaceDir::XPlus, FaceDir::ZMinus]).unwrap();
        assert_eq!(set.to_string(), "X+,Z-");
    }

    #[test]
    fn connection_reversal() {
        assert_eq!(
            Connection::Face(FaceDir::YPlus).reversed(),
            Connection::Face(FaceDir::YMinus)
        );
        assert_eq!(Connection::NonNeighbour.reversed(), Connection::NonNeighbour);
    }

    proptest! {
        #[test]
        fn bits_round_trip(bits in 1u8..64) {
            let set = DirectionSet::from_bits(bits).unwrap();
            prop_assert_eq!(set.bits(), bits);
            let rebuilt = DirectionSet::from_faces(set.faces()).unwrap();
            prop_assert_eq!(rebuilt, set);
        }
    }
}
