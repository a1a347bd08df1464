//! Rate-table configuration for the PPh 21 engine.
//!
//! Tables can be loaded from a directory of YAML files or taken from the
//! built-in 2025 set.
//!
//! # Example
//!
//! ```no_run
//! use pph21_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pph21_2025").unwrap();
//! println!("Loaded: {}", config.tables().metadata().name);
//! ```

mod builtin;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BracketsConfig, PtkpConfig, PtkpEntry, RateTables, TaxBracket, TaxYearMetadata, TerBracket,
    TerConfig,
};
