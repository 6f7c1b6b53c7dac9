//! Catalog item model and availability resolution.
//!
//! A [`Catalog`] holds one [`CatalogItem`] per upgradable entity type in the
//! progression tree. Items are registered by a loader at startup and are
//! immutable afterwards; availability queries resolve how many instances
//! exist and how far they can be upgraded at a given progression level.

use serde::{Deserialize, Serialize};

use crate::fixed::Seconds;

// ---------------------------------------------------------------------------
// Resource kinds
// ---------------------------------------------------------------------------

/// What an upgrade step costs. `GoldOrElixir` steps leave the choice to the
/// player, so that bucket is tracked on its own and never split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Gold,
    Elixir,
    DarkElixir,
    GoldOrElixir,
}

impl Resource {
    /// All resource kinds, in reporting order.
    pub const ALL: [Resource; 4] = [
        Resource::Gold,
        Resource::Elixir,
        Resource::DarkElixir,
        Resource::GoldOrElixir,
    ];

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Gold => "gold",
            Resource::Elixir => "elixir",
            Resource::DarkElixir => "dark elixir",
            Resource::GoldOrElixir => "gold or elixir",
        }
    }
}

// ---------------------------------------------------------------------------
// Categories and their queue discipline
// ---------------------------------------------------------------------------

/// How tasks of a category occupy build capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueDiscipline {
    /// Any idle worker can take the task.
    Parallel,
    /// Tasks complete one at a time, regardless of worker count.
    Serial,
}

/// Item categories. The queue discipline is a declared capability of the
/// category; nothing downstream matches on category names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Buildings,
    Heroes,
    Troops,
    Spells,
}

impl Category {
    /// Whether upgrades of this category run on workers or in the single
    /// research queue.
    pub fn queue_discipline(&self) -> QueueDiscipline {
        match self {
            Category::Buildings | Category::Heroes => QueueDiscipline::Parallel,
            Category::Troops | Category::Spells => QueueDiscipline::Serial,
        }
    }
}

/// Distinguishes ordinary items from walls. Walls upgrade out-of-band:
/// their cost always lands in the elixir total and they never occupy a
/// worker. Classified once at load time, never by name at plan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Standard,
    Wall,
}

// ---------------------------------------------------------------------------
// Item definition
// ---------------------------------------------------------------------------

/// Grants `quantity` instances of an item once the player's progression
/// level reaches `threshold_level`. Later rules override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRule {
    pub threshold_level: u32,
    pub quantity: u32,
}

/// One upgrade step of an item. `level` values are unique and strictly
/// increasing within an item (validated at load).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeStep {
    pub level: u32,
    pub required_threshold_level: u32,
    pub cost: u64,
    pub resource: Resource,
    pub duration: Seconds,
}

/// An upgradable entity type: its availability thresholds and the full
/// ladder of upgrade steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub category: Category,
    pub kind: ItemKind,
    pub unlock_rules: Vec<UnlockRule>,
    pub upgrades: Vec<UpgradeStep>,
}

impl CatalogItem {
    /// Number of instances available at `level`, or 0 if not yet unlocked.
    ///
    /// Scans every rule; the last rule in iteration order whose threshold is
    /// met wins. The scan never breaks early, so an unsorted rule list still
    /// resolves to the latest-listed qualifying rule rather than the first
    /// match (latest-rule-wins, not highest-quantity-wins).
    pub fn quantity_at(&self, level: u32) -> u32 {
        let mut quantity = 0;
        for rule in &self.unlock_rules {
            if rule.threshold_level <= level {
                quantity = rule.quantity;
            }
        }
        quantity
    }

    /// Highest upgrade level attainable at `level`, or 0 if none.
    pub fn max_upgrade_level(&self, level: u32) -> u32 {
        self.upgrades
            .iter()
            .filter(|step| step.required_threshold_level <= level)
            .map(|step| step.level)
            .max()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The full progression catalog. Built once by a loader, read-only during
/// planning. Item order is preserved, which keeps task emission (and thus
/// scheduler tie-breaking) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Create a new, empty catalog.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item. Insertion order is significant.
    pub fn push(&mut self, item: CatalogItem) {
        self.items.push(item);
    }

    /// All items, in insertion order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
