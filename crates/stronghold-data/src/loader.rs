//! Catalog loading: format detection, file discovery, lenient decoding,
//! and resolution into core types.
//!
//! A malformed entry never fails a load. Each item is decoded on its own;
//! entries that do not parse, carry an unknown category, or violate the
//! upgrade-ladder invariant are skipped and reported as [`LoadWarning`]s.
//! Categories and items are walked in name order, so the resolved catalog
//! (and everything downstream of it) is deterministic regardless of the
//! file's own ordering.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use stronghold_core::{Catalog, CatalogItem, Category, ItemKind, UnlockRule, UpgradeStep};

use crate::schema::ItemData;

/// Base name (without extension) the catalog file is discovered under.
pub const CATALOG_BASE_NAME: &str = "catalog";

// ===========================================================================
// Errors and warnings
// ===========================================================================

/// Errors that can occur during catalog loading. These are file-level
/// failures; entry-level problems surface as [`LoadWarning`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    /// No catalog file was found in the given directory.
    #[error("catalog file '{base}' not found in {dir}")]
    MissingCatalog { base: &'static str, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// The file as a whole failed to parse.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A recoverable problem found while loading. The offending entry was
/// skipped and loading continued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Category the entry appeared under.
    pub category: String,
    /// Item name, if the problem was scoped to one item.
    pub item: Option<String>,
    /// What went wrong.
    pub detail: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Some(item) => write!(f, "{}/{}: {}", self.category, item, self.detail),
            None => write!(f, "{}: {}", self.category, self.detail),
        }
    }
}

/// A resolved catalog plus the warnings produced while loading it.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub warnings: Vec<LoadWarning>,
}

// ===========================================================================
// Format detection and file discovery
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, CatalogLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(CatalogLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

/// Scan a directory for a catalog file with the given base name.
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_catalog_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, CatalogLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(CatalogLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load the catalog from a directory, discovering `catalog.{ron,toml,json}`.
pub fn load_catalog_dir(dir: &Path) -> Result<LoadedCatalog, CatalogLoadError> {
    let path = find_catalog_file(dir, CATALOG_BASE_NAME)?.ok_or_else(|| {
        CatalogLoadError::MissingCatalog {
            base: CATALOG_BASE_NAME,
            dir: dir.to_path_buf(),
        }
    })?;
    load_catalog_file(&path)
}

/// Load a catalog from a single file, format detected from the extension.
pub fn load_catalog_file(path: &Path) -> Result<LoadedCatalog, CatalogLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content, format, path)
}

/// Parse catalog text in the given format. `origin` is used for error
/// context only.
pub fn parse_catalog(
    content: &str,
    format: Format,
    origin: &Path,
) -> Result<LoadedCatalog, CatalogLoadError> {
    let parse_err = |detail: String| CatalogLoadError::Parse {
        file: origin.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => {
            let categories: BTreeMap<String, ron::Value> =
                ron::from_str(content).map_err(|e| parse_err(e.to_string()))?;
            Ok(build_catalog(
                &categories,
                &|v| v.clone().into_rust().map_err(|e| e.to_string()),
                &|v| v.clone().into_rust().map_err(|e| e.to_string()),
            ))
        }
        Format::Json => {
            let categories: BTreeMap<String, serde_json::Value> =
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?;
            Ok(build_catalog(
                &categories,
                &|v| serde_json::from_value(v.clone()).map_err(|e| e.to_string()),
                &|v| serde_json::from_value(v.clone()).map_err(|e| e.to_string()),
            ))
        }
        Format::Toml => {
            let categories: BTreeMap<String, toml::Value> =
                toml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
            Ok(build_catalog(
                &categories,
                &|v| v.clone().try_into().map_err(|e: toml::de::Error| e.to_string()),
                &|v| v.clone().try_into().map_err(|e: toml::de::Error| e.to_string()),
            ))
        }
    }
}

// ===========================================================================
// Entry-level decoding and resolution
// ===========================================================================

/// Walk decoded categories, decoding each item individually so one bad
/// entry cannot fail the rest.
fn build_catalog<V>(
    categories: &BTreeMap<String, V>,
    decode_items: &dyn Fn(&V) -> Result<BTreeMap<String, V>, String>,
    decode_item: &dyn Fn(&V) -> Result<ItemData, String>,
) -> LoadedCatalog {
    let mut catalog = Catalog::new();
    let mut warnings = Vec::new();

    for (category_name, raw_items) in categories {
        let Some(category) = parse_category(category_name) else {
            warnings.push(LoadWarning {
                category: category_name.clone(),
                item: None,
                detail: "unknown category".to_string(),
            });
            continue;
        };

        let items = match decode_items(raw_items) {
            Ok(items) => items,
            Err(detail) => {
                warnings.push(LoadWarning {
                    category: category_name.clone(),
                    item: None,
                    detail: format!("category is not a table of items: {detail}"),
                });
                continue;
            }
        };

        for (item_name, raw_item) in &items {
            match decode_item(raw_item) {
                Ok(data) => {
                    if let Some(item) =
                        resolve_item(category, category_name, item_name, &data, &mut warnings)
                    {
                        catalog.push(item);
                    }
                }
                Err(detail) => warnings.push(LoadWarning {
                    category: category_name.clone(),
                    item: Some(item_name.clone()),
                    detail,
                }),
            }
        }
    }

    LoadedCatalog { catalog, warnings }
}

/// Parse a category map key. Unknown names are reported, not fatal.
fn parse_category(name: &str) -> Option<Category> {
    match name.to_ascii_lowercase().as_str() {
        "buildings" => Some(Category::Buildings),
        "heroes" => Some(Category::Heroes),
        "troops" => Some(Category::Troops),
        "spells" => Some(Category::Spells),
        _ => None,
    }
}

/// Resolve one decoded item into a core [`CatalogItem`].
///
/// Items with no upgrades resolve to nothing (they contribute neither cost
/// nor time). Upgrade levels must be strictly increasing; a violation skips
/// the item with a warning. Walls are classified here, by name, exactly
/// once -- nothing downstream looks at names again.
fn resolve_item(
    category: Category,
    category_name: &str,
    name: &str,
    data: &ItemData,
    warnings: &mut Vec<LoadWarning>,
) -> Option<CatalogItem> {
    if data.upgrades.is_empty() {
        return None;
    }

    let increasing = data
        .upgrades
        .windows(2)
        .all(|pair| pair[0].level < pair[1].level);
    if !increasing {
        warnings.push(LoadWarning {
            category: category_name.to_string(),
            item: Some(name.to_string()),
            detail: "upgrade levels must be strictly increasing".to_string(),
        });
        return None;
    }

    let kind = if name.eq_ignore_ascii_case("wall") {
        ItemKind::Wall
    } else {
        ItemKind::Standard
    };

    Some(CatalogItem {
        name: name.to_string(),
        category,
        kind,
        unlock_rules: data
            .unlock_info
            .iter()
            .map(|info| UnlockRule {
                threshold_level: info.threshold_level,
                quantity: info.quantity,
            })
            .collect(),
        upgrades: data
            .upgrades
            .iter()
            .map(|step| UpgradeStep {
                level: step.level,
                required_threshold_level: step.required_threshold_level,
                cost: step.cost,
                resource: step.resource.into(),
                duration: step.duration,
            })
            .collect(),
    })
}

// ===========================================================================
// Tests
// ===========================================================================
