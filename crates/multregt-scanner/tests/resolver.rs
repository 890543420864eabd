//! Resolver properties over deck-built scanners.
//!
//! Each case builds a scanner from randomly generated `MULTREGT` records
//! on a patchwork grid and checks properties that must hold for every
//! connection in the grid.

use multregt_core::{Connection, GridDims, RegionPair, RegionProperties};
use multregt_deck::DeckRecord;
use multregt_scanner::{MultRegtScanner, ScannerConfig};
use multregt_test_utils::{
    multregt_keyword, multregt_record, patchwork_regions, MockRegionProperties,
};
use proptest::prelude::*;

const DIRECTIONS: [&str; 7] = ["X", "Y", "Z", "XY", "XZ", "YZ", "XYZ"];
const FILTERS: [&str; 4] = ["ALL", "NNC", "NONNC", "NOAQUNNC"];

// ── Helpers ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct DeckRule {
    src: Option<i32>,
    target: Option<i32>,
    multiplier: f64,
    directions: &'static str,
    filter: &'static str,
    region: &'static str,
}

impl DeckRule {
    fn to_record(&self) -> DeckRecord {
        multregt_record(
            self.src,
            self.target,
            self.multiplier,
            Some(self.directions),
            Some(self.filter),
            Some(self.region),
        )
    }
}

fn endpoint() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(-1)),
        6 => (1..=4i32).prop_map(Some),
    ]
}

fn deck_rule() -> impl Strategy<Value = DeckRule> {
    (
        endpoint(),
        endpoint(),
        0.05..2.0f64,
        0..DIRECTIONS.len(),
        0..FILTERS.len(),
        prop_oneof![Just("F"), Just("M")],
    )
        .prop_map(|(src, target, multiplier, d, f, region)| {
            let target = match (src, target) {
                (Some(s), Some(t)) if s >= 0 && s == t => None,
                _ => target,
            };
            let filter = FILTERS[f];
            let directions = if matches!(filter, "NNC" | "NOAQUNNC") {
                "XYZ"
            } else {
                DIRECTIONS[d]
            };
            DeckRule {
                src,
                target,
                multiplier,
                directions,
                filter,
                region,
            }
        })
}

fn props(seed: u64) -> MockRegionProperties {
    let dims = GridDims::new(4, 3, 2).unwrap();
    MockRegionProperties::new(dims)
        .with_region("FLUXNUM", patchwork_regions(dims, 4, seed))
        .with_region("MULTNUM", patchwork_regions(dims, 3, seed ^ 0xABCD))
}

fn build(props: &MockRegionProperties, rules: &[DeckRule]) -> MultRegtScanner {
    let kw = multregt_keyword(rules.iter().map(DeckRule::to_record).collect());
    MultRegtScanner::new(props, &[kw], &ScannerConfig::default()).unwrap()
}

/// Every structural neighbour pair `(a, b)` with `a < b`, plus the face of
/// `a` it crosses.
fn neighbour_pairs(dims: GridDims) -> Vec<(usize, usize, Connection)> {
    let n = dims.cell_count();
    let mut out = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            if let Connection::Face(face) = dims.connection_between(a, b) {
                out.push((a, b, Connection::Face(face)));
            }
        }
    }
    out
}

// ── Properties ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn multiplier_is_symmetric(
        seed in any::<u64>(),
        rules in prop::collection::vec(deck_rule(), 0..8),
    ) {
        let props = props(seed);
        let scanner = build(&props, &rules);
        let dims = props.dims();
        for (a, b, conn) in neighbour_pairs(dims) {
            prop_assert_eq!(
                scanner.multiplier(a, b, conn),
                scanner.multiplier(b, a, conn.reversed())
            );
            prop_assert_eq!(
                scanner.multiplier(a, b, Connection::NonNeighbour),
                scanner.multiplier(b, a, Connection::NonNeighbour)
            );
        }
    }

    #[test]
    fn multiplier_is_positive_product_of_rule_multipliers(
        seed in any::<u64>(),
        rules in prop::collection::vec(deck_rule(), 0..8),
    ) {
        let props = props(seed);
        let scanner = build(&props, &rules);
        for (a, b, conn) in neighbour_pairs(props.dims()) {
            let m = scanner.multiplier(a, b, conn);
            prop_assert!(m > 0.0);
            prop_assert!(m.is_finite());
        }
    }

    #[test]
    fn last_concrete_rule_wins(
        seed in any::<u64>(),
        first in 0.05..2.0f64,
        last in 0.05..2.0f64,
    ) {
        let props = props(seed);
        let fluxnum = props.region_array("FLUXNUM").unwrap().to_vec();
        let all = |src, target, multiplier| DeckRule {
            src,
            target,
            multiplier,
            directions: "XYZ",
            filter: "ALL",
            region: "F",
        };
        let rules = vec![
            all(Some(1), Some(2), first),
            all(None, None, 0.001),
            all(Some(2), Some(1), last),
        ];
        let scanner = build(&props, &rules);
        let table = &scanner.tables()[0];
        prop_assert_eq!(table.get(RegionPair::new(1, 2)).map(|id| id.0), Some(2));
        for (a, b, conn) in neighbour_pairs(props.dims()) {
            if RegionPair::new(fluxnum[a], fluxnum[b]) == RegionPair::new(1, 2) {
                prop_assert_eq!(scanner.multiplier(a, b, conn), last);
            }
        }
    }

    #[test]
    fn face_rule_leaves_other_axes_alone(
        seed in any::<u64>(),
        d in 0..DIRECTIONS.len(),
    ) {
        let props = props(seed);
        let rules = vec![DeckRule {
            src: None,
            target: None,
            multiplier: 0.5,
            directions: DIRECTIONS[d],
            filter: "NONNC",
            region: "F",
        }];
        let scanner = build(&props, &rules);
        let fluxnum = props.region_array("FLUXNUM").unwrap();
        let axes = scanner.records()[0].directions;
        for (a, b, conn) in neighbour_pairs(props.dims()) {
            let Connection::Face(face) = conn else { unreachable!() };
            let expected = if fluxnum[a] != fluxnum[b] && axes.contains(face) {
                0.5
            } else {
                1.0
            };
            prop_assert_eq!(scanner.multiplier(a, b, conn), expected);
            prop_assert_eq!(scanner.multiplier(a, b, Connection::NonNeighbour), 1.0);
        }
    }

    #[test]
    fn restore_preserves_every_multiplier(
        seed in any::<u64>(),
        rules in prop::collection::vec(deck_rule(), 0..8),
    ) {
        let props = props(seed);
        let scanner = build(&props, &rules);
        let restored = MultRegtScanner::restore(scanner.snapshot()).unwrap();
        prop_assert_eq!(&restored, &scanner);
        for (a, b, conn) in neighbour_pairs(props.dims()) {
            prop_assert_eq!(restored.multiplier(a, b, conn), scanner.multiplier(a, b, conn));
            prop_assert_eq!(
                restored.multiplier(a, b, Connection::NonNeighbour),
                scanner.multiplier(a, b, Connection::NonNeighbour)
            );
        }
    }
}
