//! Catalog data files for the Stronghold planner.
//!
//! Defines the on-disk catalog format (RON, JSON, or TOML) and the loader
//! that resolves data files into [`stronghold_core::Catalog`] values.
//! Malformed entries are skipped with warnings, never fatal.

pub mod loader;
pub mod schema;

pub use loader::{
    CATALOG_BASE_NAME, CatalogLoadError, Format, LoadWarning, LoadedCatalog, detect_format,
    find_catalog_file, load_catalog_dir, load_catalog_file, parse_catalog,
};
