//! Reusable deck and grid fixtures.
//!
//! - [`multregt_record`] builds one `MULTREGT` record from optional items.
//! - [`multregt_keyword`] wraps records in a keyword occurrence.
//! - [`patchwork_regions`] fills a grid with deterministic region values.

use multregt_core::GridDims;
use multregt_deck::{DeckKeyword, DeckLocation, DeckRecord, DeckValue};

/// Build a `MULTREGT` record. `None` items are written as defaulted.
pub fn multregt_record(
    src: Option<i32>,
    target: Option<i32>,
    multiplier: f64,
    directions: Option<&str>,
    filter: Option<&str>,
    region: Option<&str>,
) -> DeckRecord {
    let int = |v: Option<i32>| v.map_or(DeckValue::Defaulted, DeckValue::Int);
    let text = |v: Option<&str>| v.map_or(DeckValue::Defaulted, DeckValue::from);
    DeckRecord::new([
        int(src),
        int(target),
        DeckValue::Real(multiplier),
        text(directions),
        text(filter),
        text(region),
    ])
}

/// A `MULTREGT` keyword located at `CASE.DATA:1`.
pub fn multregt_keyword(records: Vec<DeckRecord>) -> DeckKeyword {
    DeckKeyword::new("MULTREGT", DeckLocation::new("CASE.DATA", 1), records)
}

/// Region values in `1..=regions`, laid out in rectangular patches with a
/// little per-cell noise so that every axis has region boundaries.
///
/// Deterministic in `seed`.
pub fn patchwork_regions(dims: GridDims, regions: i32, seed: u64) -> Vec<i32> {
    assert!(regions > 0, "need at least one region");
    let mut values = Vec::with_capacity(dims.cell_count());
    for g in 0..dims.cell_count() {
        let [i, j, k] = dims.ijk(g);
        let patch = (i / 3 + 5 * (j / 2) + 11 * k) as u64;
        let mut h = seed ^ patch.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        if g % 7 == 0 {
            h = h.wrapping_add(g as u64);
        }
        h ^= h >> 29;
        h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
        h ^= h >> 32;
        values.push((h % regions as u64) as i32 + 1);
    }
    values
}
