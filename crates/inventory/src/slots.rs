//! Item stacks and index-addressable slot collections.

use serde::{Deserialize, Serialize};
use texbuild_core::ItemDescriptor;

/// Represents a stack of items in an inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// What the stack holds.
    pub item: ItemDescriptor,
    /// Number of items in this stack.
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl ItemStack {
    /// Create a new item stack.
    pub fn new(item: ItemDescriptor, count: u32) -> Self {
        Self { item, count }
    }
}

/// Ordered collection of slots, each empty or holding one stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotCollection {
    slots: Vec<Option<ItemStack>>,
}

impl SlotCollection {
    /// Create a collection of `size` empty slots.
    pub fn with_size(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// Wrap existing slot contents.
    pub fn from_slots(slots: Vec<Option<ItemStack>>) -> Self {
        Self { slots }
    }

    /// Number of slots (empty ones included).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the collection has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get the stack in a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Get the descriptor of the item in a slot.
    pub fn descriptor(&self, slot: usize) -> Option<&ItemDescriptor> {
        self.get(slot).map(|stack| &stack.item)
    }

    /// Set a slot. Returns `false` when `slot` is out of range.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = stack;
                true
            }
            None => false,
        }
    }

    /// Take the stack out of a slot, leaving it empty.
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Iterate `(index, descriptor)` pairs in slot order.
    pub fn descriptors(&self) -> impl Iterator<Item = (usize, Option<&ItemDescriptor>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (index, slot.as_ref().map(|stack| &stack.item)))
    }

    /// Get the number of empty slots.
    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Truncate or pad with empty slots to exactly `size` slots.
    pub fn resize(&mut self, size: usize) {
        self.slots.resize(size, None);
    }
}
