//! Descriptor and inventory fixtures.

use texbuild_core::{ItemDescriptor, MaterialClass};
use texbuild_inventory::{
    InventoryId, ItemStack, PlayerInventory, SlotCollection, SlotRef, HOTBAR_SIZE,
};

/// A plain building block.
pub fn block(code: &str) -> ItemDescriptor {
    ItemDescriptor::block(code)
}

/// A non-block item such as a tool.
pub fn tool(code: &str) -> ItemDescriptor {
    ItemDescriptor::item(code)
}

/// A meal block with nutrition and an entity class, like a pie.
pub fn meal(code: &str) -> ItemDescriptor {
    ItemDescriptor::block(code)
        .as_meal()
        .with_nutrition()
        .with_entity_class("Pie")
}

/// A plant-material block.
pub fn plant(code: &str) -> ItemDescriptor {
    ItemDescriptor::block(code).with_material(MaterialClass::Plant)
}

/// A liquid-material block.
pub fn liquid(code: &str) -> ItemDescriptor {
    ItemDescriptor::block(code).with_material(MaterialClass::Liquid)
}

/// A block entity with the given class.
pub fn entity(code: &str, entity_class: &str) -> ItemDescriptor {
    ItemDescriptor::block(code).with_entity_class(entity_class)
}

/// Wrap each descriptor in a single-item stack.
pub fn slots(items: &[Option<ItemDescriptor>]) -> SlotCollection {
    SlotCollection::from_slots(
        items
            .iter()
            .map(|item| item.clone().map(|item| ItemStack::new(item, 1)))
            .collect(),
    )
}

/// A hotbar-sized collection, padded with empty slots.
pub fn hotbar(items: &[Option<ItemDescriptor>]) -> SlotCollection {
    let mut collection = slots(items);
    collection.resize(HOTBAR_SIZE);
    collection
}

/// Player inventories sized to the given backpack and character contents.
///
/// The hotbar is padded to its fixed size; the active slot is 0.
pub fn player_inventory(
    hotbar_items: &[Option<ItemDescriptor>],
    backpack_items: &[Option<ItemDescriptor>],
    character_items: &[Option<ItemDescriptor>],
) -> PlayerInventory {
    let mut inv = PlayerInventory::new(backpack_items.len(), character_items.len());
    let layout = [
        (InventoryId::Hotbar, hotbar_items),
        (InventoryId::Backpack, backpack_items),
        (InventoryId::Character, character_items),
    ];
    for (id, items) in layout {
        for (slot, item) in items.iter().enumerate().take(inv.collection(id).len()) {
            let stack = item.clone().map(|item| ItemStack::new(item, 1));
            // In range by construction.
            let _ = inv.set(SlotRef::new(id, slot), stack);
        }
    }
    inv
}

/// The code of the item at an address, as a string.
pub fn code_at(inv: &PlayerInventory, at: SlotRef) -> Option<String> {
    inv.get(at).map(|stack| stack.item.code.to_string())
}
