//! Scanner configuration and validation.

use multregt_core::RegionProperties;
use thiserror::Error;

/// Options for building a [`MultRegtScanner`](crate::MultRegtScanner)
/// from deck keywords.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Classification used by records that leave `REGION_DEF` defaulted.
    ///
    /// `None` defers to [`RegionProperties::default_region`], which is
    /// where the deck's grid options are reflected.
    pub default_region: Option<String>,
}

impl ScannerConfig {
    /// Config that forces a default classification.
    pub fn with_default_region(name: impl Into<String>) -> Self {
        Self {
            default_region: Some(name.into()),
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.default_region {
            Some(name) if name.trim().is_empty() => Err(ConfigError::EmptyDefaultRegion),
            _ => Ok(()),
        }
    }

    /// The default classification to use against `props`.
    pub fn resolve_default_region(&self, props: &dyn RegionProperties) -> String {
        match &self.default_region {
            Some(name) => name.trim().to_string(),
            None => props.default_region().to_string(),
        }
    }
}

/// Errors detected by [`ScannerConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `default_region` was given but is blank.
    #[error("default region name is empty")]
    EmptyDefaultRegion,
}
