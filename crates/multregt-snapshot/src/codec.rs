//! Binary encode/decode for restart files.
//!
//! All integers are little-endian. Strings are length-prefixed with a
//! `u32` length. Maps are written in key order, so equal snapshots encode
//! to identical bytes.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use multregt_core::{
    ConnectionFilter, DirectionSet, GridDims, MultRegtRecord, RegionPair, RegionValue, RuleId,
};
use multregt_scanner::{MultRegtScanner, ScannerSnapshot, SearchMap};
use tracing::debug;

use crate::error::SnapshotError;
use crate::hash::snapshot_hash;
use crate::{FORMAT_VERSION, MAGIC};

/// Upper bound on speculative preallocation from untrusted counts.
const MAX_PREALLOC: usize = 4096;

// ── Primitives ──────────────────────────────────────────────────

macro_rules! le_primitives {
    ($($ty:ty => $write:ident, $read:ident;)*) => {$(
        fn $write(w: &mut dyn Write, v: $ty) -> Result<(), SnapshotError> {
            w.write_all(&v.to_le_bytes())?;
            Ok(())
        }

        fn $read(r: &mut dyn Read) -> Result<$ty, SnapshotError> {
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            r.read_exact(&mut buf)?;
            Ok(<$ty>::from_le_bytes(buf))
        }
    )*};
}

le_primitives! {
    u8 => write_u8, read_u8;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    i32 => write_i32, read_i32;
    f64 => write_f64, read_f64;
}

/// Collection lengths are stored as u32.
fn write_count(w: &mut dyn Write, n: usize, what: &str) -> Result<(), SnapshotError> {
    let n = u32::try_from(n)
        .map_err(|_| SnapshotError::malformed(format!("too many {what} to encode: {n}")))?;
    write_u32(w, n)
}

fn write_str(w: &mut dyn Write, s: &str) -> Result<(), SnapshotError> {
    write_count(w, s.len(), "string bytes")?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn read_str(r: &mut dyn Read) -> Result<String, SnapshotError> {
    let len = read_u32(r)? as usize;
    let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
    r.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(SnapshotError::malformed(format!(
            "truncated string: got {} of {len} bytes",
            buf.len()
        )));
    }
    String::from_utf8(buf)
        .map_err(|e| SnapshotError::malformed(format!("invalid UTF-8 string: {e}")))
}

// ── Value encodings ─────────────────────────────────────────────

pub(crate) fn filter_tag(filter: ConnectionFilter) -> u8 {
    match filter {
        ConnectionFilter::NncOnly => 0,
        ConnectionFilter::NeighbourOnly => 1,
        ConnectionFilter::All => 2,
        ConnectionFilter::NoAquiferNnc => 3,
    }
}

fn filter_from_tag(tag: u8) -> Result<ConnectionFilter, SnapshotError> {
    match tag {
        0 => Ok(ConnectionFilter::NncOnly),
        1 => Ok(ConnectionFilter::NeighbourOnly),
        2 => Ok(ConnectionFilter::All),
        3 => Ok(ConnectionFilter::NoAquiferNnc),
        other => Err(SnapshotError::malformed(format!(
            "unknown connection filter tag {other}"
        ))),
    }
}

fn write_region_value(w: &mut dyn Write, v: RegionValue) -> Result<(), SnapshotError> {
    match v {
        RegionValue::Value(v) => {
            write_u8(w, 0)?;
            write_i32(w, v)
        }
        RegionValue::Any => write_u8(w, 1),
    }
}

fn read_region_value(r: &mut dyn Read) -> Result<RegionValue, SnapshotError> {
    match read_u8(r)? {
        0 => Ok(RegionValue::Value(read_i32(r)?)),
        1 => Ok(RegionValue::Any),
        other => Err(SnapshotError::malformed(format!(
            "invalid region presence tag {other}"
        ))),
    }
}

fn write_record(w: &mut dyn Write, record: &MultRegtRecord) -> Result<(), SnapshotError> {
    write_str(w, &record.region_name)?;
    write_region_value(w, record.src)?;
    write_region_value(w, record.target)?;
    write_f64(w, record.multiplier)?;
    write_u8(w, record.directions.bits())?;
    write_u8(w, filter_tag(record.filter))
}

fn read_record(r: &mut dyn Read) -> Result<MultRegtRecord, SnapshotError> {
    let region_name = read_str(r)?;
    let src = read_region_value(r)?;
    let target = read_region_value(r)?;
    let multiplier = read_f64(r)?;
    let bits = read_u8(r)?;
    let directions = DirectionSet::from_bits(bits)
        .ok_or_else(|| SnapshotError::malformed(format!("invalid direction bits {bits:#04x}")))?;
    let filter = filter_from_tag(read_u8(r)?)?;
    Ok(MultRegtRecord {
        src,
        target,
        multiplier,
        directions,
        filter,
        region_name,
    })
}

// ── Snapshot encode/decode ──────────────────────────────────────

/// Encode a snapshot, header and content-hash trailer included.
pub fn encode_snapshot(w: &mut dyn Write, snapshot: &ScannerSnapshot) -> Result<(), SnapshotError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    for extent in snapshot.dims.as_array() {
        write_u64(w, extent as u64)?;
    }
    write_str(w, &snapshot.default_region)?;

    write_count(w, snapshot.records.len(), "rules")?;
    for record in &snapshot.records {
        write_record(w, record)?;
    }

    write_count(w, snapshot.regions.len(), "region arrays")?;
    for (name, values) in &snapshot.regions {
        write_str(w, name)?;
        write_u64(w, values.len() as u64)?;
        for &v in values {
            write_i32(w, v)?;
        }
    }

    write_count(w, snapshot.search_map.len(), "tables")?;
    for (name, entries) in &snapshot.search_map {
        write_str(w, name)?;
        write_count(w, entries.len(), "table entries")?;
        for (pair, id) in entries {
            write_i32(w, pair.lo())?;
            write_i32(w, pair.hi())?;
            write_u32(w, id.0)?;
        }
    }

    write_u64(w, snapshot_hash(snapshot))?;
    Ok(())
}

/// Decode and verify a snapshot.
///
/// Checks the header, the structure of every section and the content-hash
/// trailer. Cross-references between sections are checked later by
/// [`MultRegtScanner::restore`].
pub fn decode_snapshot(r: &mut dyn Read) -> Result<ScannerSnapshot, SnapshotError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(SnapshotError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion { found: version });
    }

    let dims = read_dims(r)?;
    let cell_count = dims.cell_count();
    let default_region = read_str(r)?;

    let record_count = read_u32(r)? as usize;
    let mut records = Vec::with_capacity(record_count.min(MAX_PREALLOC));
    for _ in 0..record_count {
        records.push(read_record(r)?);
    }

    let region_count = read_u32(r)?;
    let mut regions = BTreeMap::new();
    for _ in 0..region_count {
        let name = read_str(r)?;
        let len = read_u64(r)?;
        if len != cell_count as u64 {
            return Err(SnapshotError::malformed(format!(
                "region array {name} has {len} values, grid has {cell_count} cells"
            )));
        }
        let mut values = Vec::with_capacity(cell_count.min(MAX_PREALLOC));
        for _ in 0..cell_count {
            values.push(read_i32(r)?);
        }
        if regions.insert(name, values).is_some() {
            return Err(SnapshotError::malformed("duplicate region array"));
        }
    }

    let table_count = read_u32(r)?;
    let mut search_map = SearchMap::new();
    for _ in 0..table_count {
        let name = read_str(r)?;
        let entry_count = read_u32(r)?;
        let mut entries = BTreeMap::new();
        for _ in 0..entry_count {
            let lo = read_i32(r)?;
            let hi = read_i32(r)?;
            let id = RuleId(read_u32(r)?);
            if lo >= hi {
                return Err(SnapshotError::malformed(format!(
                    "table {name}: region pair ({lo}, {hi}) is not ordered"
                )));
            }
            if entries.insert(RegionPair::new(lo, hi), id).is_some() {
                return Err(SnapshotError::malformed(format!(
                    "table {name}: duplicate region pair ({lo}, {hi})"
                )));
            }
        }
        if search_map.insert(name.clone(), entries).is_some() {
            return Err(SnapshotError::malformed(format!("duplicate table {name}")));
        }
    }

    let snapshot = ScannerSnapshot {
        dims,
        records,
        search_map,
        regions,
        default_region,
    };

    let recorded = read_u64(r)?;
    let computed = snapshot_hash(&snapshot);
    if recorded != computed {
        return Err(SnapshotError::ChecksumMismatch { recorded, computed });
    }
    Ok(snapshot)
}

fn read_dims(r: &mut dyn Read) -> Result<GridDims, SnapshotError> {
    let mut extents = [0usize; 3];
    for extent in &mut extents {
        let v = read_u64(r)?;
        *extent = usize::try_from(v)
            .map_err(|_| SnapshotError::malformed(format!("grid extent {v} out of range")))?;
    }
    let [nx, ny, nz] = extents;
    GridDims::new(nx, ny, nz).map_err(|e| SnapshotError::malformed(e.to_string()))
}

// ── Scanner persistence ─────────────────────────────────────────

/// Write a scanner's restart representation.
pub fn write_scanner(w: &mut dyn Write, scanner: &MultRegtScanner) -> Result<(), SnapshotError> {
    let snapshot = scanner.snapshot();
    encode_snapshot(w, &snapshot)?;
    debug!(
        grid = %snapshot.dims,
        rules = snapshot.records.len(),
        tables = snapshot.search_map.len(),
        "wrote MULTREGT restart data"
    );
    Ok(())
}

/// Read a scanner written by [`write_scanner`].
///
/// # Examples
///
/// ```
/// use multregt_core::GridDims;
/// use multregt_scanner::MultRegtScanner;
/// use multregt_snapshot::{read_scanner, write_scanner};
/// use multregt_test_utils::MockRegionProperties;
///
/// let props = MockRegionProperties::new(GridDims::new(2, 1, 1).unwrap());
/// let scanner = MultRegtScanner::from_records(&props, vec![], "FLUXNUM").unwrap();
///
/// let mut buf = Vec::new();
/// write_scanner(&mut buf, &scanner).unwrap();
/// let restored = read_scanner(&mut buf.as_slice()).unwrap();
/// assert_eq!(restored, scanner);
/// ```
pub fn read_scanner(r: &mut dyn Read) -> Result<MultRegtScanner, SnapshotError> {
    let snapshot = decode_snapshot(r)?;
    Ok(MultRegtScanner::restore(snapshot)?)
}
