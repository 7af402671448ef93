#![warn(missing_docs)]
//! Inventory model for the player's hotbar, backpack and character slots.
//!
//! Slots hold whole [`ItemStack`]s; the rules only ever look at their
//! [`texbuild_core::ItemDescriptor`].

mod player;
mod slots;

pub use player::{
    InventoryError, InventoryId, PlayerInventory, SlotRef, DEFAULT_BACKPACK_SIZE,
    DEFAULT_CHARACTER_SIZE, HOTBAR_SIZE,
};
pub use slots::{ItemStack, SlotCollection};
