//! Validation and application of inventory swap requests.

use texbuild_inventory::{InventoryError, InventoryId, PlayerInventory, SlotRef};
use texbuild_net::InventorySwapRequest;
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons a swap request is rejected. Rejections are final; clients never retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwapError {
    /// Message failed its size checks.
    #[error("malformed swap request: {0}")]
    Malformed(&'static str),
    /// Source inventory id not recognised.
    #[error("source inventory not found: {0}")]
    UnknownSourceInventory(String),
    /// Target inventory id not recognised.
    #[error("target inventory not found: {0}")]
    UnknownTargetInventory(String),
    /// Source slot negative or past the end of its inventory.
    #[error("invalid source slot: {0}")]
    InvalidSourceSlot(i32),
    /// Target slot negative or past the end of its inventory.
    #[error("invalid target slot: {0}")]
    InvalidTargetSlot(i32),
    /// The inventory refused the swap.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Resolve and validate both ends of a request.
pub fn resolve(
    inventory: &PlayerInventory,
    request: &InventorySwapRequest,
) -> Result<(SlotRef, SlotRef), SwapError> {
    request.verify().map_err(SwapError::Malformed)?;

    let source_inventory: InventoryId = request
        .source_inventory_id
        .parse()
        .map_err(|_| SwapError::UnknownSourceInventory(request.source_inventory_id.clone()))?;
    let target_inventory: InventoryId = request
        .target_inventory_id
        .parse()
        .map_err(|_| SwapError::UnknownTargetInventory(request.target_inventory_id.clone()))?;

    let source_slot = slot_index(inventory, source_inventory, request.source_slot_id)
        .ok_or(SwapError::InvalidSourceSlot(request.source_slot_id))?;
    let target_slot = slot_index(inventory, target_inventory, request.target_slot_id)
        .ok_or(SwapError::InvalidTargetSlot(request.target_slot_id))?;

    Ok((
        SlotRef::new(source_inventory, source_slot),
        SlotRef::new(target_inventory, target_slot),
    ))
}

fn slot_index(inventory: &PlayerInventory, id: InventoryId, raw: i32) -> Option<usize> {
    let slot = usize::try_from(raw).ok()?;
    (slot < inventory.collection(id).len()).then_some(slot)
}

/// Apply a swap request for `player`, logging a warning on rejection.
pub fn apply_swap(
    inventory: &mut PlayerInventory,
    player: &str,
    request: &InventorySwapRequest,
) -> Result<(), SwapError> {
    debug!(
        "Processing swap request from {}: {}[{}] <-> {}[{}]",
        player,
        request.source_inventory_id,
        request.source_slot_id,
        request.target_inventory_id,
        request.target_slot_id
    );

    let (source, target) = match resolve(inventory, request) {
        Ok(ends) => ends,
        Err(err) => {
            warn!("Rejected swap request from {}: {}", player, err);
            return Err(err);
        }
    };

    inventory.swap(source, target)?;

    debug!("Swap completed successfully for {}: {} <-> {}", player, source, target);
    Ok(())
}
