//! Content hashing for scanner snapshots.
//!
//! FNV-1a over the snapshot's fields in encoding order. Not a
//! cryptographic hash; it only detects corruption and lets restart
//! machinery compare scanners without a field-by-field walk.

use multregt_core::{DirectionSet, RegionValue};
use multregt_scanner::ScannerSnapshot;

use crate::codec::filter_tag;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u32(hash: u64, v: u32) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

#[inline]
fn fnv1a_u64(hash: u64, v: u64) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

/// Length first, so adjacent strings cannot run into each other.
fn fnv1a_str(hash: u64, s: &str) -> u64 {
    fnv1a_bytes(fnv1a_u64(hash, s.len() as u64), s.as_bytes())
}

fn fnv1a_region(hash: u64, v: RegionValue) -> u64 {
    match v {
        RegionValue::Value(v) => fnv1a_u32(fnv1a_byte(hash, 0), v as u32),
        RegionValue::Any => fnv1a_byte(hash, 1),
    }
}

fn fnv1a_directions(hash: u64, d: DirectionSet) -> u64 {
    fnv1a_byte(hash, d.bits())
}

/// Hash every field of a snapshot.
///
/// Scanners that compare equal, and restored copies of them, hash equal.
/// Multipliers are hashed by bit pattern.
pub fn snapshot_hash(snapshot: &ScannerSnapshot) -> u64 {
    let mut hash = FNV_OFFSET;

    for extent in snapshot.dims.as_array() {
        hash = fnv1a_u64(hash, extent as u64);
    }
    hash = fnv1a_str(hash, &snapshot.default_region);

    hash = fnv1a_u64(hash, snapshot.records.len() as u64);
    for record in &snapshot.records {
        hash = fnv1a_str(hash, &record.region_name);
        hash = fnv1a_region(hash, record.src);
        hash = fnv1a_region(hash, record.target);
        hash = fnv1a_u64(hash, record.multiplier.to_bits());
        hash = fnv1a_directions(hash, record.directions);
        hash = fnv1a_byte(hash, filter_tag(record.filter));
    }

    hash = fnv1a_u64(hash, snapshot.regions.len() as u64);
    for (name, values) in &snapshot.regions {
        hash = fnv1a_str(hash, name);
        hash = fnv1a_u64(hash, values.len() as u64);
        for &v in values {
            hash = fnv1a_u32(hash, v as u32);
        }
    }

    hash = fnv1a_u64(hash, snapshot.search_map.len() as u64);
    for (name, entries) in &snapshot.search_map {
        hash = fnv1a_str(hash, name);
        hash = fnv1a_u64(hash, entries.len() as u64);
        for (pair, id) in entries {
            hash = fnv1a_u32(hash, pair.lo() as u32);
            hash = fnv1a_u32(hash, pair.hi() as u32);
            hash = fnv1a_u32(hash, id.0);
        }
    }

    hash
}
