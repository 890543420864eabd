//! Flattened scanner state for persistence and restart.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use multregt_core::{GridDims, MultRegtRecord, RegionPair, RuleId};
use tracing::debug;

use crate::error::ScannerError;
use crate::scanner::MultRegtScanner;
use crate::table::RegionTable;

/// Classification name to `(region pair → rule index)`.
///
/// Sorted maps, so the same scanner always flattens to the same layout.
pub type SearchMap = BTreeMap<String, BTreeMap<RegionPair, RuleId>>;

/// Everything needed to rebuild a [`MultRegtScanner`] without the deck or
/// the property store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerSnapshot {
    /// Grid dimensions.
    pub dims: GridDims,
    /// Rules in declaration order. [`RuleId`]s index into this.
    pub records: Vec<MultRegtRecord>,
    /// Lookup tables. Every classification the rules reference has an
    /// entry, even when no pair resolved to a rule.
    pub search_map: SearchMap,
    /// Materialised region arrays, one per classification.
    pub regions: BTreeMap<String, Vec<i32>>,
    /// Classification used by rules that did not name one.
    pub default_region: String,
}

impl MultRegtScanner {
    /// The lookup tables as a sorted map.
    pub fn search_map(&self) -> SearchMap {
        self.tables()
            .iter()
            .map(|t| (t.name().to_string(), t.iter().collect()))
            .collect()
    }

    /// Flatten the scanner.
    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            dims: self.dims(),
            records: self.records().to_vec(),
            search_map: self.search_map(),
            regions: self
                .regions()
                .map(|(name, values)| (name.to_string(), values.to_vec()))
                .collect(),
            default_region: self.default_region().to_string(),
        }
    }

    /// Rebuild a scanner from a snapshot.
    ///
    /// The result compares equal to the scanner the snapshot was taken
    /// from and returns the same multiplier for every query.
    ///
    /// # Errors
    ///
    /// [`ScannerError::InvalidSnapshot`] if the snapshot is inconsistent:
    /// bad grid size, a classification without its region array or table,
    /// a region array of the wrong length, a rule index out of range or
    /// pointing at another classification's rule, or entries no rule
    /// references.
    pub fn restore(snapshot: ScannerSnapshot) -> Result<Self, ScannerError> {
        let ScannerSnapshot {
            dims,
            records,
            mut search_map,
            mut regions,
            default_region,
        } = snapshot;

        let dims = GridDims::new(dims.nx(), dims.ny(), dims.nz()).map_err(invalid)?;
        if records.len() > u32::MAX as usize {
            return Err(invalid("too many rules"));
        }
        for (i, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|e| invalid(format!("rule {i}: {e}")))?;
        }
        let cell_count = dims.cell_count();

        let mut order: Vec<&str> = Vec::new();
        for record in &records {
            if !order.contains(&record.region_name.as_str()) {
                order.push(&record.region_name);
            }
        }

        let mut tables = Vec::with_capacity(order.len());
        for name in order {
            let values = regions
                .remove(name)
                .ok_or_else(|| invalid(format!("missing region array {name}")))?;
            if values.len() != cell_count {
                return Err(invalid(format!(
                    "region array {name} has {} values, grid has {cell_count} cells",
                    values.len()
                )));
            }
            let entries = search_map
                .remove(name)
                .ok_or_else(|| invalid(format!("missing table for {name}")))?;

            let mut pairs = IndexMap::with_capacity(entries.len());
            for (pair, id) in entries {
                if pair.lo() >= pair.hi() {
                    return Err(invalid(format!("{name}: malformed region pair {pair}")));
                }
                let Some(rule) = records.get(id.index()) else {
                    return Err(invalid(format!("{name}: rule {id} out of range")));
                };
                if rule.region_name != name {
                    return Err(invalid(format!(
                        "{name}: rule {id} belongs to {}",
                        rule.region_name
                    )));
                }
                pairs.insert(pair, id);
            }
            tables.push(RegionTable::from_parts(name.to_string(), values, pairs));
        }

        if let Some(name) = search_map.keys().next() {
            return Err(invalid(format!("table {name} is not referenced by any rule")));
        }
        if let Some(name) = regions.keys().next() {
            return Err(invalid(format!(
                "region array {name} is not referenced by any rule"
            )));
        }

        debug!(
            grid = %dims,
            rules = records.len(),
            classifications = tables.len(),
            "restored MULTREGT scanner"
        );
        Ok(Self::from_parts(dims, records, tables, default_region))
    }
}

fn invalid(reason: impl ToString) -> ScannerError {
    ScannerError::InvalidSnapshot {
        reason: reason.to_string(),
    }
}
