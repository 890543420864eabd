//! Test utilities and mock types for MULTREGT development.
//!
//! Provides [`MockRegionProperties`], an in-memory implementation of
//! [`RegionProperties`], and deck fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{multregt_keyword, multregt_record, patchwork_regions};

use std::collections::HashMap;

use multregt_core::{GridDims, RegionProperties};

/// Mock implementation of [`RegionProperties`].
///
/// Backed by a `HashMap<String, Vec<i32>>`. Arrays are not checked
/// against the grid size, so tests can exercise the size check of the
/// code under test.
#[derive(Clone, Debug)]
pub struct MockRegionProperties {
    dims: GridDims,
    regions: HashMap<String, Vec<i32>>,
    default_region: String,
}

impl MockRegionProperties {
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            regions: HashMap::new(),
            default_region: "FLUXNUM".to_string(),
        }
    }

    /// Add or replace a region array.
    pub fn with_region(mut self, name: impl Into<String>, values: Vec<i32>) -> Self {
        self.regions.insert(name.into(), values);
        self
    }

    /// Override the classification reported by
    /// [`RegionProperties::default_region`].
    pub fn with_default_region(mut self, name: impl Into<String>) -> Self {
        self.default_region = name.into();
        self
    }

    pub fn set_region(&mut self, name: impl Into<String>, values: Vec<i32>) {
        self.regions.insert(name.into(), values);
    }
}

impl RegionProperties for MockRegionProperties {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn region_array(&self, name: &str) -> Option<&[i32]> {
        self.regions.get(name).map(Vec::as_slice)
    }

    fn default_region(&self) -> &str {
        &self.default_region
    }
}
