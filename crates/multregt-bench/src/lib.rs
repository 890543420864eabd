//! Benchmark profiles for the MULTREGT scanner.
//!
//! - [`reference_props`]: 100x100x10 grid (100K cells) with three region
//!   classifications
//! - [`reference_deck`]: a mix of concrete, wildcard and filtered rules
//!   over all three classifications
//! - [`connection_sample`]: deterministic cell pairs with their connection
//!   descriptors, the shape of a transmissibility-assembly sweep

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use multregt_core::{Connection, GridDims};
use multregt_deck::DeckKeyword;
use multregt_scanner::{MultRegtScanner, ScannerConfig, ScannerError};
use multregt_test_utils::{
    multregt_keyword, multregt_record, patchwork_regions, MockRegionProperties,
};

/// Reference grid: 100x100x10.
pub fn reference_dims() -> GridDims {
    GridDims::new(100, 100, 10).expect("reference grid is non-empty")
}

/// Region arrays over [`reference_dims`]: `FLUXNUM` with 12 regions,
/// `OPERNUM` with 5 and `MULTNUM` with 30.
pub fn reference_props(seed: u64) -> MockRegionProperties {
    let dims = reference_dims();
    MockRegionProperties::new(dims)
        .with_region("FLUXNUM", patchwork_regions(dims, 12, seed))
        .with_region("OPERNUM", patchwork_regions(dims, 5, seed.rotate_left(21)))
        .with_region("MULTNUM", patchwork_regions(dims, 30, seed.rotate_left(42)))
}

/// Two `MULTREGT` keywords, 40 records in total.
pub fn reference_deck() -> Vec<DeckKeyword> {
    let mut first = Vec::new();
    for r in 1..=11 {
        first.push(multregt_record(Some(r), Some(r + 1), 0.5, Some("XY"), None, None));
    }
    first.push(multregt_record(None, Some(12), 0.1, Some("Z"), Some("NONNC"), None));
    for r in 1..=4 {
        first.push(multregt_record(Some(r), Some(5), 0.0, None, Some("NNC"), Some("O")));
    }

    let mut second = Vec::new();
    for r in 1..=20 {
        let target = if r % 5 == 0 { None } else { Some(r + 10) };
        second.push(multregt_record(Some(r), target, 0.25, None, Some("ALL"), Some("M")));
    }
    second.push(multregt_record(Some(-1), Some(3), 2.0, Some("X"), None, Some("O")));
    for r in 1..=3 {
        second.push(multregt_record(Some(r), Some(r + 2), 0.75, Some("YZ"), None, None));
    }

    vec![multregt_keyword(first), multregt_keyword(second)]
}

/// Build the reference scanner.
pub fn reference_scanner(seed: u64) -> Result<MultRegtScanner, ScannerError> {
    let props = reference_props(seed);
    MultRegtScanner::new(&props, &reference_deck(), &ScannerConfig::default())
}

/// `n` deterministic connections over `dims`.
///
/// Roughly nine in ten are structural neighbours along a random axis; the
/// rest join random cell pairs as non-neighbour connections.
pub fn connection_sample(
    dims: GridDims,
    n: usize,
    seed: u64,
) -> Vec<(usize, usize, Connection)> {
    let cells = dims.cell_count() as u64;
    let mut state = seed | 1;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        state >> 17
    };

    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let a = (next() % cells) as usize;
        let [i, j, k] = dims.ijk(a);
        let b = match next() % 10 {
            0 => (next() % cells) as usize,
            1..=3 if i + 1 < dims.nx() => dims.global_index(i + 1, j, k),
            4..=6 if j + 1 < dims.ny() => dims.global_index(i, j + 1, k),
            7..=9 if k + 1 < dims.nz() => dims.global_index(i, j, k + 1),
            _ => continue,
        };
        if a == b {
            continue;
        }
        out.push((a, b, dims.connection_between(a, b)));
    }
    out
}
