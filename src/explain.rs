//! Per-slot filter verdicts for an inventory snapshot.

use texbuild_core::{evaluate, FilterSettings};
use texbuild_inventory::{InventoryId, PlayerInventory, SlotRef};

/// One line per occupied slot, `inventory[slot] code: verdict`.
pub fn explain(inventory: &PlayerInventory, settings: &FilterSettings) -> Vec<String> {
    InventoryId::ALL
        .into_iter()
        .flat_map(move |id| {
            inventory
                .collection(id)
                .descriptors()
                .filter_map(move |(slot, item)| {
                    let item = item?;
                    let verdict = evaluate(Some(item), settings);
                    Some(format!("{} {}: {}", SlotRef::new(id, slot), item.code, verdict))
                })
        })
        .collect()
}
