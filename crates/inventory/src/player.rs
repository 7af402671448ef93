//! A player's inventories and the active hotbar slot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::slots::{ItemStack, SlotCollection};

/// Number of hotbar slots.
pub const HOTBAR_SIZE: usize = 10;

/// Default backpack size used by [`PlayerInventory::default`].
pub const DEFAULT_BACKPACK_SIZE: usize = 24;

/// Default character inventory size used by [`PlayerInventory::default`].
pub const DEFAULT_CHARACTER_SIZE: usize = 15;

/// Errors produced by inventory lookups and swaps.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// No inventory with this identifier.
    #[error("unknown inventory '{0}'")]
    UnknownInventory(String),
    /// Slot index past the end of the inventory.
    #[error("slot {slot} out of range for {inventory} ({len} slots)")]
    SlotOutOfRange {
        /// Inventory addressed.
        inventory: InventoryId,
        /// Requested slot.
        slot: usize,
        /// Inventory size.
        len: usize,
    },
}

/// Inventories a player owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryId {
    /// The quick-access bar.
    Hotbar,
    /// Bag storage.
    Backpack,
    /// Worn items and personal storage.
    Character,
}

impl InventoryId {
    /// All inventories, in scan order.
    pub const ALL: [InventoryId; 3] = [
        InventoryId::Hotbar,
        InventoryId::Backpack,
        InventoryId::Character,
    ];

    /// Wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            InventoryId::Hotbar => "hotbar",
            InventoryId::Backpack => "backpack",
            InventoryId::Character => "character",
        }
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InventoryId {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InventoryId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| InventoryError::UnknownInventory(s.to_string()))
    }
}

/// Address of one slot in one of the player's inventories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    /// Inventory holding the slot.
    pub inventory: InventoryId,
    /// Slot index inside that inventory.
    pub slot: usize,
}

impl SlotRef {
    /// Build a slot address.
    pub fn new(inventory: InventoryId, slot: usize) -> Self {
        Self { inventory, slot }
    }

    /// Address a hotbar slot.
    pub fn hotbar(slot: usize) -> Self {
        Self::new(InventoryId::Hotbar, slot)
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.inventory, self.slot)
    }
}

/// The hotbar, backpack and character inventories plus the active hotbar slot.
///
/// The hotbar always has [`HOTBAR_SIZE`] slots and the active slot always
/// indexes into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInventory {
    hotbar: SlotCollection,
    backpack: SlotCollection,
    character: SlotCollection,
    active_slot: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerInventoryData {
    #[serde(default)]
    hotbar: SlotCollection,
    #[serde(default)]
    backpack: SlotCollection,
    #[serde(default)]
    character: SlotCollection,
    #[serde(default)]
    active_slot: usize,
}

impl<'de> Deserialize<'de> for PlayerInventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = PlayerInventoryData::deserialize(deserializer)?;
        if data.hotbar.len() > HOTBAR_SIZE {
            return Err(serde::de::Error::custom(format!(
                "Expected at most {} hotbar slots, got {}",
                HOTBAR_SIZE,
                data.hotbar.len()
            )));
        }
        if data.active_slot >= HOTBAR_SIZE {
            return Err(serde::de::Error::custom(format!(
                "Active slot {} out of range (hotbar has {} slots)",
                data.active_slot, HOTBAR_SIZE
            )));
        }

        let mut hotbar = data.hotbar;
        hotbar.resize(HOTBAR_SIZE);
        Ok(PlayerInventory {
            hotbar,
            backpack: data.backpack,
            character: data.character,
            active_slot: data.active_slot,
        })
    }
}

impl PlayerInventory {
    /// Create empty inventories with the given backpack and character sizes.
    pub fn new(backpack_size: usize, character_size: usize) -> Self {
        Self {
            hotbar: SlotCollection::with_size(HOTBAR_SIZE),
            backpack: SlotCollection::with_size(backpack_size),
            character: SlotCollection::with_size(character_size),
            active_slot: 0,
        }
    }

    /// Borrow one inventory.
    pub fn collection(&self, id: InventoryId) -> &SlotCollection {
        match id {
            InventoryId::Hotbar => &self.hotbar,
            InventoryId::Backpack => &self.backpack,
            InventoryId::Character => &self.character,
        }
    }

    fn collection_mut(&mut self, id: InventoryId) -> &mut SlotCollection {
        match id {
            InventoryId::Hotbar => &mut self.hotbar,
            InventoryId::Backpack => &mut self.backpack,
            InventoryId::Character => &mut self.character,
        }
    }

    /// The hotbar.
    pub fn hotbar(&self) -> &SlotCollection {
        &self.hotbar
    }

    /// Currently selected hotbar slot index.
    pub fn active_slot(&self) -> usize {
        self.active_slot
    }

    /// Select a hotbar slot. Returns `false` (and changes nothing) when out of range.
    pub fn set_active_slot(&mut self, slot: usize) -> bool {
        if slot < HOTBAR_SIZE {
            self.active_slot = slot;
            true
        } else {
            false
        }
    }

    /// The stack in the active hotbar slot.
    pub fn active_stack(&self) -> Option<&ItemStack> {
        self.hotbar.get(self.active_slot)
    }

    /// Get the stack at an address.
    pub fn get(&self, at: SlotRef) -> Option<&ItemStack> {
        self.collection(at.inventory).get(at.slot)
    }

    /// Put a stack at an address, replacing whatever was there.
    pub fn set(&mut self, at: SlotRef, stack: Option<ItemStack>) -> Result<(), InventoryError> {
        self.check(at)?;
        self.collection_mut(at.inventory).set(at.slot, stack);
        Ok(())
    }

    /// Swap the whole contents of two slots. Either side may be empty.
    pub fn swap(&mut self, a: SlotRef, b: SlotRef) -> Result<(), InventoryError> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Ok(());
        }

        let first = self.collection_mut(a.inventory).take(a.slot);
        let second = self.collection_mut(b.inventory).take(b.slot);
        self.collection_mut(a.inventory).set(a.slot, second);
        self.collection_mut(b.inventory).set(b.slot, first);
        Ok(())
    }

    fn check(&self, at: SlotRef) -> Result<(), InventoryError> {
        let len = self.collection(at.inventory).len();
        if at.slot < len {
            Ok(())
        } else {
            Err(InventoryError::SlotOutOfRange {
                inventory: at.inventory,
                slot: at.slot,
                len,
            })
        }
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new(DEFAULT_BACKPACK_SIZE, DEFAULT_CHARACTER_SIZE)
    }
}
