//! Per-classification lookup tables and the table builder.

use indexmap::IndexMap;
use multregt_core::{MultRegtRecord, RegionPair, RegionProperties, RegionValue, RuleId};
use multregt_deck::RecordLocation;
use tracing::{debug, warn};

use crate::error::ScannerError;

/// The lookup table for one region classification.
///
/// Owns a copy of the classification's per-cell values and maps each
/// unordered pair of distinct region values to the rule that governs it.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionTable {
    name: String,
    values: Vec<i32>,
    pairs: IndexMap<RegionPair, RuleId>,
}

impl RegionTable {
    pub(crate) fn from_parts(
        name: String,
        values: Vec<i32>,
        pairs: IndexMap<RegionPair, RuleId>,
    ) -> Self {
        Self {
            name,
            values,
            pairs,
        }
    }

    /// Classification name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region value of every cell, in global cell order.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Region value of one cell.
    #[inline]
    pub fn value(&self, cell: usize) -> i32 {
        self.values[cell]
    }

    /// The rule governing `pair`, if any.
    #[inline]
    pub fn get(&self, pair: RegionPair) -> Option<RuleId> {
        self.pairs.get(&pair).copied()
    }

    /// Number of region pairs with a rule.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair has a rule.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `(pair, rule)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionPair, RuleId)> + '_ {
        self.pairs.iter().map(|(&pair, &id)| (pair, id))
    }
}

/// Build one table per classification referenced by `records`.
///
/// Tables come out in order of first reference. `origins[i]`, when
/// present, locates `records[i]` for error reporting.
pub(crate) fn build_tables(
    props: &dyn RegionProperties,
    records: &[MultRegtRecord],
    origins: &[RecordLocation],
) -> Result<Vec<RegionTable>, ScannerError> {
    let cell_count = props.dims().cell_count();

    let mut groups: IndexMap<&str, Vec<RuleId>> = IndexMap::new();
    for (i, record) in records.iter().enumerate() {
        groups
            .entry(record.region_name.as_str())
            .or_default()
            .push(RuleId(i as u32));
    }

    let mut tables = Vec::with_capacity(groups.len());
    for (name, ids) in groups {
        let first = ids[0].index();
        let values = props
            .region_array(name)
            .ok_or_else(|| ScannerError::UnknownRegionArray {
                region: name.to_string(),
                at: origins.get(first).cloned(),
            })?;
        if values.len() != cell_count {
            return Err(ScannerError::RegionArraySize {
                region: name.to_string(),
                expected: cell_count,
                actual: values.len(),
            });
        }

        let pairs = resolve_pairs(name, values, records, &ids);
        debug!(
            classification = name,
            rules = ids.len(),
            pairs = pairs.len(),
            "built MULTREGT region table"
        );
        tables.push(RegionTable::from_parts(
            name.to_string(),
            values.to_vec(),
            pairs,
        ));
    }
    Ok(tables)
}

/// Decide the winning rule for every region pair of one classification.
///
/// Wildcard rules are applied first and concrete rules second, each in
/// declaration order, so a concrete rule beats every wildcard and a later
/// rule beats an earlier one of the same kind.
fn resolve_pairs(
    name: &str,
    values: &[i32],
    records: &[MultRegtRecord],
    ids: &[RuleId],
) -> IndexMap<RegionPair, RuleId> {
    let mut pairs = IndexMap::new();

    let (wildcards, concrete): (Vec<RuleId>, Vec<RuleId>) = ids
        .iter()
        .copied()
        .partition(|id| records[id.index()].is_wildcard());

    if !wildcards.is_empty() {
        let mut distinct = values.to_vec();
        distinct.sort_unstable();
        distinct.dedup();

        for id in wildcards {
            let record = &records[id.index()];
            let srcs = expand(record.src, &distinct);
            let targets = expand(record.target, &distinct);
            let mut claimed = 0usize;
            for &s in srcs.iter() {
                for &t in targets.iter() {
                    if s != t {
                        pairs.insert(RegionPair::new(s, t), id);
                        claimed += 1;
                    }
                }
            }
            if claimed == 0 {
                warn!(
                    classification = name,
                    rule = %id,
                    src = %record.src,
                    target = %record.target,
                    "MULTREGT wildcard rule matches no region pair"
                );
            }
        }
    }

    for id in concrete {
        let record = &records[id.index()];
        let (RegionValue::Value(s), RegionValue::Value(t)) = (record.src, record.target) else {
            continue;
        };
        if s == t {
            continue;
        }
        let pair = RegionPair::new(s, t);
        if let Some(previous) = pairs.insert(pair, id) {
            debug!(
                classification = name,
                %pair,
                previous = %previous,
                winner = %id,
                "MULTREGT rule superseded"
            );
        }
    }

    pairs
}

fn expand(endpoint: RegionValue, distinct: &[i32]) -> Vec<i32> {
    match endpoint {
        RegionValue::Value(v) => vec![v],
        RegionValue::Any => distinct.to_vec(),
    }
}
