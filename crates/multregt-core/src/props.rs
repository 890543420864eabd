//! Read-only interface to the grid property store.

use crate::grid::GridDims;

/// Read access to named per-cell integer region arrays.
///
/// This is the narrow slice of the property store the scanner needs.
/// It is consulted only while a scanner is being built; the scanner
/// copies what it needs and never holds on to the implementor.
pub trait RegionProperties {
    /// Dimensions of the grid the arrays are defined on.
    fn dims(&self) -> GridDims;

    /// The integer array called `name`, one value per cell in global order.
    ///
    /// Returns `None` if no such array exists.
    fn region_array(&self, name: &str) -> Option<&[i32]>;

    /// The classification used when a rule does not name one.
    ///
    /// Decks use `FLUXNUM` unless their grid options select `MULTNUM`.
    fn default_region(&self) -> &str {
        "FLUXNUM"
    }
}
