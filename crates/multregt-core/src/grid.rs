//! Logical grid dimensions and global cell indexing.

use crate::error::GridError;
use crate::face::{Connection, FaceDir};
use std::fmt;

/// Extents of a logically Cartesian 3-D grid.
///
/// Cells are addressed by a global index in natural order: `i` varies
/// fastest, then `j`, then `k`, so `global = i + nx * (j + ny * k)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl GridDims {
    /// Create grid dimensions.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if any extent is zero, or
    /// `Err(GridError::CellCountOverflow)` if the product overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use multregt_core::GridDims;
    ///
    /// let dims = GridDims::new(3, 2, 4).unwrap();
    /// assert_eq!(dims.cell_count(), 24);
    /// assert_eq!(dims.global_index(1, 1, 2), 1 + 3 * (1 + 2 * 2));
    /// ```
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::EmptyGrid { nx, ny, nz });
        }
        nx.checked_mul(ny)
            .and_then(|n| n.checked_mul(nz))
            .ok_or(GridError::CellCountOverflow { nx, ny, nz })?;
        Ok(Self { nx, ny, nz })
    }

    /// Extent along X.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Extent along Y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Extent along Z.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// `[nx, ny, nz]`.
    pub fn as_array(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Global index of cell `(i, j, k)`.
    #[inline]
    pub fn global_index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny && k < self.nz);
        i + self.nx * (j + self.ny * k)
    }

    /// `(i, j, k)` of a global index.
    #[inline]
    pub fn ijk(&self, global: usize) -> [usize; 3] {
        debug_assert!(global < self.cell_count());
        let i = global % self.nx;
        let j = (global / self.nx) % self.ny;
        let k = global / (self.nx * self.ny);
        [i, j, k]
    }

    /// The face of `a` shared with `b` when the two cells are structural
    /// neighbours, `None` otherwise.
    pub fn face_between(&self, a: usize, b: usize) -> Option<FaceDir> {
        let [ia, ja, ka] = self.ijk(a);
        let [ib, jb, kb] = self.ijk(b);
        let di = ib as i64 - ia as i64;
        let dj = jb as i64 - ja as i64;
        let dk = kb as i64 - ka as i64;
        match (di, dj, dk) {
            (1, 0, 0) => Some(FaceDir::XPlus),
            (-1, 0, 0) => Some(FaceDir::XMinus),
            (0, 1, 0) => Some(FaceDir::YPlus),
            (0, -1, 0) => Some(FaceDir::YMinus),
            (0, 0, 1) => Some(FaceDir::ZPlus),
            (0, 0, -1) => Some(FaceDir::ZMinus),
            _ => None,
        }
    }

    /// Classify the connection between two cells from their positions alone.
    ///
    /// Structurally adjacent cells get [`Connection::Face`]; anything else is
    /// [`Connection::NonNeighbour`].
    pub fn connection_between(&self, a: usize, b: usize) -> Connection {
        match self.face_between(a, b) {
            Some(face) => Connection::Face(face),
            None => Connection::NonNeighbour,
        }
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn new_zero_extent_returns_error() {
        assert!(matches!(
            GridDims::new(0, 1, 1),
            Err(GridError::EmptyGrid { nx: 0, .. })
        ));
        assert!(GridDims::new(1, 0, 1).is_err());
        assert!(GridDims::new(1, 1, 0).is_err());
    }

    #[test]
    fn new_overflow_returns_error() {
        assert!(matches!(
            GridDims::new(usize::MAX, 2, 1),
            Err(GridError::CellCountOverflow { .. })
        ));
    }

    // ── Indexing tests ──────────────────────────────────────────

    #[test]
    fn natural_ordering_i_fastest() {
        let d = GridDims::new(3, 2, 2).unwrap();
        assert_eq!(d.global_index(0, 0, 0), 0);
        assert_eq!(d.global_index(1, 0, 0), 1);
        assert_eq!(d.global_index(0, 1, 0), 3);
        assert_eq!(d.global_index(0, 0, 1), 6);
        assert_eq!(d.ijk(11), [2, 1, 1]);
    }

    // ── Adjacency tests ─────────────────────────────────────────

    #[test]
    fn face_between_axis_neighbours() {
        let d = GridDims::new(3, 3, 3).unwrap();
        let c = d.global_index(1, 1, 1);
        assert_eq!(d.face_between(c, d.global_index(2, 1, 1)), Some(FaceDir::XPlus));
        assert_eq!(d.face_between(c, d.global_index(0, 1, 1)), Some(FaceDir::XMinus));
        assert_eq!(d.face_between(c, d.global_index(1, 2, 1)), Some(FaceDir::YPlus));
        assert_eq!(d.face_between(c, d.global_index(1, 0, 1)), Some(FaceDir::YMinus));
        assert_eq!(d.face_between(c, d.global_index(1, 1, 2)), Some(FaceDir::ZPlus));
        assert_eq!(d.face_between(c, d.global_index(1, 1, 0)), Some(FaceDir::ZMinus));
    }

    #[test]
    fn row_wrap_is_not_adjacent() {
        // (2,0,0) and (0,1,0) are consecutive global indices but not neighbours.
        let d = GridDims::new(3, 2, 1).unwrap();
        assert_eq!(d.connection_between(2, 3), Connection::NonNeighbour);
    }

    #[test]
    fn diagonal_is_non_neighbour() {
        let d = GridDims::new(3, 3, 1).unwrap();
        let a = d.global_index(0, 0, 0);
        let b = d.global_index(1, 1, 0);
        assert_eq!(d.connection_between(a, b), Connection::NonNeighbour);
    }

    proptest! {
        #[test]
        fn ijk_round_trip(nx in 1usize..8, ny in 1usize..8, nz in 1usize..8, seed in 0usize..512) {
            let d = GridDims::new(nx, ny, nz).unwrap();
            let g = seed % d.cell_count();
            let [i, j, k] = d.ijk(g);
            prop_assert_eq!(d.global_index(i, j, k), g);
        }

        #[test]
        fn connection_reversal_is_consistent(nx in 2usize..6, ny in 2usize..6, nz in 2usize..6, a in 0usize..216, b in 0usize..216) {
            let d = GridDims::new(nx, ny, nz).unwrap();
            let a = a % d.cell_count();
            let b = b % d.cell_count();
            prop_assume!(a != b);
            prop_assert_eq!(d.connection_between(b, a), d.connection_between(a, b).reversed());
        }
    }
}
