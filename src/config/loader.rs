//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading PPh 21 rate
//! tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    BracketsConfig, PtkpConfig, RateTables, TaxYearMetadata, TerConfig,
};

/// Loads and provides access to a tax year's rate tables.
///
/// # Directory Structure
///
/// ```text
/// config/pph21_2025/
/// ├── tax_year.yaml   # Year metadata and default PTKP status
/// ├── ptkp.yaml       # Non-taxable amounts by status
/// ├── brackets.yaml   # Progressive brackets (Pasal 17)
/// └── ter.yaml        # TER monthly effective rates
/// ```
///
/// # Example
///
/// ```no_run
/// use pph21_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pph21_2025").unwrap();
/// println!("Loaded tables for {}", loader.tables().metadata().year);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: RateTables,
}

impl ConfigLoader {
    /// Loads and validates rate tables from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or the
    /// assembled tables violate their invariants.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TaxYearMetadata>(&path.join("tax_year.yaml"))?;
        let ptkp = Self::load_yaml::<PtkpConfig>(&path.join("ptkp.yaml"))?;
        let brackets = Self::load_yaml::<BracketsConfig>(&path.join("brackets.yaml"))?;
        let ter = Self::load_yaml::<TerConfig>(&path.join("ter.yaml"))?;

        let tables = RateTables::new(metadata, ptkp.statuses, brackets.brackets, ter.ter_brackets)?;

        info!(
            path = %path.display(),
            year = tables.metadata().year,
            ptkp_statuses = tables.ptkp().len(),
            brackets = tables.brackets().len(),
            ter_rows = tables.ter_brackets().len(),
            "Loaded rate tables"
        );

        Ok(Self { tables })
    }

    /// Wraps the built-in 2025 tables.
    pub fn builtin() -> Self {
        Self {
            tables: RateTables::indonesia_2025().clone(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rate tables.
    pub fn tables(&self) -> &RateTables {
        &self.tables
    }
}
