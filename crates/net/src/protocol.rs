//! Protocol message definitions for client-server communication.
//!
//! All messages use postcard serialization for compact binary encoding.

use serde::{Deserialize, Serialize};

/// Protocol version for compatibility checking.
pub const PROTOCOL_VERSION: u16 = 1;

/// Protocol magic bytes to identify the texbuild protocol.
pub const PROTOCOL_MAGIC: &[u8; 8] = b"TXBD\x00\x01\x00\x00";

/// Name of the channel both sides register.
pub const CHANNEL_NAME: &str = "texturedbuilding";

/// Maximum length of an inventory identifier (bytes).
pub const MAX_INVENTORY_ID_LEN: usize = 64;

/// Request to swap the contents of two slots, possibly in different inventories.
///
/// Slot ids are signed so that out-of-range values from a misbehaving client
/// survive decoding and get rejected by the server with a warning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventorySwapRequest {
    /// Inventory holding the source slot (`hotbar`, `backpack`, `character`).
    pub source_inventory_id: String,
    /// Source slot index.
    pub source_slot_id: i32,
    /// Inventory holding the target slot.
    pub target_inventory_id: String,
    /// Target slot index.
    pub target_slot_id: i32,
}

impl InventorySwapRequest {
    /// Build a request from its four fields.
    pub fn new(
        source_inventory_id: impl Into<String>,
        source_slot_id: i32,
        target_inventory_id: impl Into<String>,
        target_slot_id: i32,
    ) -> Self {
        Self {
            source_inventory_id: source_inventory_id.into(),
            source_slot_id,
            target_inventory_id: target_inventory_id.into(),
            target_slot_id,
        }
    }

    /// Verify field limits.
    pub fn verify(&self) -> Result<(), &'static str> {
        if self.source_inventory_id.len() > MAX_INVENTORY_ID_LEN {
            return Err("Source inventory id too long");
        }
        if self.target_inventory_id.len() > MAX_INVENTORY_ID_LEN {
            return Err("Target inventory id too long");
        }
        Ok(())
    }
}

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClientMessage {
    /// Ask whether the server runs a compatible swap service.
    AvailabilityCheck {
        /// The client's [`crate::compute_schema_hash`].
        schema_hash: u64,
    },

    /// Swap two slots (fire-and-forget; no reply).
    SwapRequest(InventorySwapRequest),
}

impl ClientMessage {
    /// Availability check carrying this build's schema hash.
    pub fn availability_check() -> Self {
        ClientMessage::AvailabilityCheck {
            schema_hash: crate::codec::compute_schema_hash(),
        }
    }

    /// Verify message limits and validity.
    ///
    /// This should be called on all received messages before acting on them.
    pub fn verify(&self) -> Result<(), &'static str> {
        match self {
            ClientMessage::SwapRequest(request) => request.verify(),
            ClientMessage::AvailabilityCheck { .. } => Ok(()),
        }
    }
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServerMessage {
    /// Answer to [`ClientMessage::AvailabilityCheck`].
    Available {
        /// Whether multi-inventory swaps are supported with the client's schema.
        available: bool,
    },
}
