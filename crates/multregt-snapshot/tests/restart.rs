//! Restart round trips: deck → scanner → restart file → scanner.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use multregt_core::{Connection, FaceDir, GridDims, RegionProperties};
use multregt_scanner::{MultRegtScanner, ScannerConfig};
use multregt_snapshot::{read_scanner, snapshot_hash, write_scanner, SnapshotError};
use multregt_test_utils::{
    multregt_keyword, multregt_record, patchwork_regions, MockRegionProperties,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

fn props(seed: u64) -> MockRegionProperties {
    let dims = GridDims::new(5, 4, 3).unwrap();
    MockRegionProperties::new(dims)
        .with_region("FLUXNUM", patchwork_regions(dims, 5, seed))
        .with_region("OPERNUM", patchwork_regions(dims, 3, seed.rotate_left(17)))
}

fn deck_scanner(props: &MockRegionProperties) -> MultRegtScanner {
    let keywords = [
        multregt_keyword(vec![
            multregt_record(Some(1), Some(2), 0.5, Some("XY"), None, None),
            multregt_record(Some(3), None, 0.1, Some("Z"), Some("NONNC"), None),
        ]),
        multregt_keyword(vec![
            multregt_record(Some(1), Some(3), 0.0, None, Some("NNC"), Some("O")),
            multregt_record(Some(-1), Some(2), 2.0, None, Some("ALL"), Some("O")),
        ]),
    ];
    MultRegtScanner::new(props, &keywords, &ScannerConfig::default()).unwrap()
}

fn assert_same_multipliers(a: &MultRegtScanner, b: &MultRegtScanner) {
    let dims = a.dims();
    let n = dims.cell_count();
    for x in 0..n {
        for y in 0..n {
            if x == y {
                continue;
            }
            let conn = dims.connection_between(x, y);
            assert_eq!(a.multiplier(x, y, conn), b.multiplier(x, y, conn));
        }
    }
}

// ── Round trips ─────────────────────────────────────────────────

#[test]
fn restart_through_memory() {
    let props = props(7);
    let original = deck_scanner(&props);
    let mut buf = Vec::new();
    write_scanner(&mut buf, &original).unwrap();

    drop(props);
    let restored = read_scanner(&mut buf.as_slice()).unwrap();
    assert_eq!(restored, original);
    assert_eq!(
        snapshot_hash(&restored.snapshot()),
        snapshot_hash(&original.snapshot())
    );
    assert_same_multipliers(&original, &restored);
}

#[test]
fn restart_through_file() {
    let props = props(11);
    let original = deck_scanner(&props);
    let path = std::env::temp_dir().join(format!("multregt-restart-{}.bin", std::process::id()));

    {
        let mut w = BufWriter::new(File::create(&path).unwrap());
        write_scanner(&mut w, &original).unwrap();
        w.flush().unwrap();
    }
    let restored = {
        let mut r = BufReader::new(File::open(&path).unwrap());
        read_scanner(&mut r).unwrap()
    };
    std::fs::remove_file(&path).unwrap();

    assert_eq!(restored, original);
    assert_same_multipliers(&original, &restored);
}

#[test]
fn restored_scanner_answers_known_query() {
    let props = MockRegionProperties::new(GridDims::new(3, 1, 1).unwrap())
        .with_region("FLUXNUM", vec![1, 1, 2]);
    let kw = multregt_keyword(vec![multregt_record(
        Some(1),
        Some(2),
        0.5,
        Some("X"),
        None,
        None,
    )]);
    let original = MultRegtScanner::new(&props, &[kw], &ScannerConfig::default()).unwrap();
    let mut buf = Vec::new();
    write_scanner(&mut buf, &original).unwrap();
    let restored = read_scanner(&mut buf.as_slice()).unwrap();

    assert_eq!(restored.multiplier(1, 2, Connection::Face(FaceDir::XPlus)), 0.5);
    assert_eq!(restored.multiplier(0, 1, Connection::Face(FaceDir::XPlus)), 1.0);
    assert_eq!(restored.default_region(), "FLUXNUM");
    assert_eq!(restored.region_values("FLUXNUM"), props.region_array("FLUXNUM"));
}

#[test]
fn garbage_is_rejected() {
    let err = read_scanner(&mut &b"not a restart file"[..]).unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidMagic));
}

proptest! {
    #[test]
    fn every_seed_round_trips(seed in any::<u64>()) {
        let props = props(seed);
        let original = deck_scanner(&props);
        let mut buf = Vec::new();
        write_scanner(&mut buf, &original).unwrap();
        let restored = read_scanner(&mut buf.as_slice()).unwrap();
        prop_assert_eq!(&restored, &original);
        prop_assert_eq!(restored.search_map(), original.search_map());
    }
}
