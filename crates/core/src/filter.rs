//! Item filter - decides whether a slot's content may be picked for random
//! placement.
//!
//! Rules run in a fixed order and the first one that fires decides:
//! 1. empty slots and non-block items are rejected;
//! 2. a blacklist hit is rejected, whatever the whitelist says;
//! 3. a whitelist hit is admitted (skipping the category checks);
//! 4. with `whitelist_only`, anything the whitelist missed is rejected;
//! 5. the category checks (food, block entities, plants, liquids, clay);
//! 6. everything else is admitted.

use std::fmt;
use tracing::debug;

use crate::item::{ItemDescriptor, MaterialClass};
use crate::settings::FilterSettings;

/// Entity class keywords that identify storage block entities.
const STORAGE_ENTITY_MARKERS: &[&str] = &["chest", "container", "barrel", "vessel"];

/// Code path keywords that identify storage block entities.
const STORAGE_PATH_MARKERS: &[&str] = &["chest", "crate", "storagevessel"];

/// Code path keywords that identify clay and pottery.
const CLAY_PATH_MARKERS: &[&str] = &[
    "raw",
    "fired",
    "crock",
    "bowl",
    "planter",
    "flowerpot",
    "storagevessel",
    "jug",
    "watering",
    "mold",
];

/// Code path prefix for clay shingles.
const CLAY_PATH_PREFIX: &str = "item-shingle";

/// Path keywords always admitted by the clay check.
const CLAY_EXEMPTIONS: &[&str] = &["strawbedding", "rawclay"];

/// How an item was recognised as food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    /// Meal container block (pie, cooked meal).
    Meal,
    /// Cheese block, recognised by its code path.
    Cheese,
    /// Item with nutrition properties.
    Nutrition,
}

/// Why an item was admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowReason {
    /// Whitelisted while `whitelist_only` is set.
    WhitelistStrict,
    /// Whitelisted in permissive mode; category checks skipped.
    WhitelistPermissive,
    /// Named clay exemption (`rawclay`, `strawbedding`, empty path).
    ClayExemption,
    /// Passed every check.
    PassedFilters,
}

/// Why an item was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The slot is empty.
    EmptySlot,
    /// The stack is not a placeable block.
    NotABlock,
    /// Matched the blacklist.
    Blacklisted,
    /// Missed the whitelist while `whitelist_only` is set.
    NotWhitelisted,
    /// Food while `allow_food` is off.
    Food(FoodKind),
    /// Storage block entity while `allow_block_entities` is off.
    StorageBlockEntity,
    /// Other block entity while `allow_block_entities` is off.
    BlockEntity,
    /// Plant material while `allow_plants` is off.
    Plant,
    /// Liquid material while `allow_liquids` is off.
    Liquid,
    /// Clay or pottery while `allow_clay` is off.
    ClayOrPottery,
}

/// Outcome of evaluating one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The item may be picked.
    Allow(AllowReason),
    /// The item may not be picked.
    Deny(DenyReason),
}

impl Verdict {
    /// Whether the verdict admits the item.
    pub fn is_allowed(self) -> bool {
        matches!(self, Verdict::Allow(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Verdict::Allow(AllowReason::WhitelistStrict) => "allowed by whitelist (strict mode)",
            Verdict::Allow(AllowReason::WhitelistPermissive) => {
                "allowed by whitelist (permissive mode - skipping filters)"
            }
            Verdict::Allow(AllowReason::ClayExemption) => "allowed - clay exemption",
            Verdict::Allow(AllowReason::PassedFilters) => "allowed - passed all filters",
            Verdict::Deny(DenyReason::EmptySlot) => "rejected - empty slot",
            Verdict::Deny(DenyReason::NotABlock) => "rejected - not a block",
            Verdict::Deny(DenyReason::Blacklisted) => "blocked by blacklist",
            Verdict::Deny(DenyReason::NotWhitelisted) => {
                "rejected - not in whitelist (strict mode)"
            }
            Verdict::Deny(DenyReason::Food(FoodKind::Meal)) => "rejected - is food (meal)",
            Verdict::Deny(DenyReason::Food(FoodKind::Cheese)) => "rejected - is food (cheese)",
            Verdict::Deny(DenyReason::Food(FoodKind::Nutrition)) => {
                "rejected - is food (nutrition)"
            }
            Verdict::Deny(DenyReason::StorageBlockEntity) => "rejected - is storage block entity",
            Verdict::Deny(DenyReason::BlockEntity) => "rejected - is block entity",
            Verdict::Deny(DenyReason::Plant) => "rejected - is plant",
            Verdict::Deny(DenyReason::Liquid) => "rejected - is liquid",
            Verdict::Deny(DenyReason::ClayOrPottery) => "rejected - is clay/pottery",
        };
        f.write_str(text)
    }
}

/// Whether the slot content may be picked.
pub fn is_allowed(slot: Option<&ItemDescriptor>, settings: &FilterSettings) -> bool {
    evaluate(slot, settings).is_allowed()
}

/// Evaluate a slot and report why it was admitted or rejected.
///
/// Pure apart from the trace emitted when `debug_mode` is set.
pub fn evaluate(slot: Option<&ItemDescriptor>, settings: &FilterSettings) -> Verdict {
    let verdict = run_rules(slot, settings);
    if settings.debug_mode {
        if let Some(item) = slot {
            debug!(code = %item.code, "Item {}", verdict);
        }
    }
    verdict
}

fn run_rules(slot: Option<&ItemDescriptor>, settings: &FilterSettings) -> Verdict {
    let Some(item) = slot else {
        return Verdict::Deny(DenyReason::EmptySlot);
    };
    if !item.is_block {
        return Verdict::Deny(DenyReason::NotABlock);
    }

    let code = item.code.to_string();

    if !settings.blacklist.is_empty() && settings.blacklist.matches_any(&code) {
        return Verdict::Deny(DenyReason::Blacklisted);
    }

    if !settings.whitelist.is_empty() {
        if settings.whitelist.matches_any(&code) {
            return Verdict::Allow(if settings.whitelist_only {
                AllowReason::WhitelistStrict
            } else {
                AllowReason::WhitelistPermissive
            });
        }
        if settings.whitelist_only {
            return Verdict::Deny(DenyReason::NotWhitelisted);
        }
    }

    let food = food_kind(item);

    if !settings.allow_food {
        if let Some(kind) = food {
            return Verdict::Deny(DenyReason::Food(kind));
        }
    }

    // Food entities (pies, cheese wheels) are judged by `allow_food` alone.
    if !settings.allow_block_entities && food.is_none() {
        if is_storage_block_entity(item) {
            return Verdict::Deny(DenyReason::StorageBlockEntity);
        }
        // Signs and other non-storage entities.
        if item.entity_class.is_some() {
            return Verdict::Deny(DenyReason::BlockEntity);
        }
    }

    if !settings.allow_plants && item.material == MaterialClass::Plant {
        return Verdict::Deny(DenyReason::Plant);
    }

    if !settings.allow_liquids && item.material == MaterialClass::Liquid {
        return Verdict::Deny(DenyReason::Liquid);
    }

    if !settings.allow_clay {
        if let Some(verdict) = clay_verdict(item.code.path()) {
            return verdict;
        }
    }

    Verdict::Allow(AllowReason::PassedFilters)
}

/// Classify food: meal containers, cheese by path, then nutrition.
pub fn food_kind(item: &ItemDescriptor) -> Option<FoodKind> {
    if item.is_meal {
        Some(FoodKind::Meal)
    } else if item.code.path().contains("cheese") {
        Some(FoodKind::Cheese)
    } else if item.has_nutrition {
        Some(FoodKind::Nutrition)
    } else {
        None
    }
}

/// Storage block entity check. Only items that carry an entity class qualify.
pub fn is_storage_block_entity(item: &ItemDescriptor) -> bool {
    let Some(entity_class) = item.entity_class.as_deref() else {
        return false;
    };
    let entity_class = entity_class.to_lowercase();
    let path = item.code.path().to_lowercase();

    STORAGE_ENTITY_MARKERS
        .iter()
        .any(|marker| entity_class.contains(marker))
        || STORAGE_PATH_MARKERS
            .iter()
            .any(|marker| path.contains(marker))
}

fn clay_verdict(path: &str) -> Option<Verdict> {
    if path.is_empty() || CLAY_EXEMPTIONS.iter().any(|name| path.contains(name)) {
        return Some(Verdict::Allow(AllowReason::ClayExemption));
    }
    let is_pottery = CLAY_PATH_MARKERS.iter().any(|marker| path.contains(marker))
        || path.starts_with(CLAY_PATH_PREFIX);
    is_pottery.then_some(Verdict::Deny(DenyReason::ClayOrPottery))
}
