//! Serde data file structs for catalog definitions.
//!
//! These structs define the on-disk format for the progression catalog.
//! A catalog file is a map of category name to a map of item name to item
//! record, in RON, JSON, or TOML; the loader decodes entries individually
//! and resolves them into core types.

use serde::Deserialize;
use stronghold_core::Resource;

// ===========================================================================
// Item entries
// ===========================================================================

/// An item entry in a data file: unlock thresholds plus the upgrade ladder.
/// Both lists default to empty, matching sparse hand-written data.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    #[serde(default)]
    pub unlock_info: Vec<UnlockInfoData>,
    #[serde(default)]
    pub upgrades: Vec<UpgradeData>,
}

/// One unlock threshold entry.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UnlockInfoData {
    pub threshold_level: u32,
    pub quantity: u32,
}

/// One upgrade step entry. `resource` defaults to gold when omitted.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpgradeData {
    pub level: u32,
    pub required_threshold_level: u32,
    pub cost: u64,
    #[serde(default)]
    pub resource: ResourceData,
    pub duration: u64,
}

/// A resource kind name in a data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceData {
    #[default]
    Gold,
    Elixir,
    DarkElixir,
    GoldOrElixir,
}

impl From<ResourceData> for Resource {
    fn from(data: ResourceData) -> Self {
        match data {
            ResourceData::Gold => Resource::Gold,
            ResourceData::Elixir => Resource::Elixir,
            ResourceData::DarkElixir => Resource::DarkElixir,
            ResourceData::GoldOrElixir => Resource::GoldOrElixir,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
