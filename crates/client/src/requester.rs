//! Swap requests over the placement channel.

use texbuild_inventory::SlotRef;
use texbuild_net::{encode_client_message, ClientMessage, InventorySwapRequest};
use tracing::{debug, warn};

use crate::selector::SwapRequester;

/// Encodes swap requests into framed client messages.
///
/// Frames queue up until the host drains them onto its channel. Nothing is
/// awaited and failed encodes are dropped with a warning.
#[derive(Debug, Default)]
pub struct NetworkSwapRequester {
    outbound: Vec<Vec<u8>>,
}

impl NetworkSwapRequester {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames waiting to be sent.
    pub fn pending(&self) -> usize {
        self.outbound.len()
    }

    /// Take every queued frame, oldest first.
    pub fn drain(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.outbound)
    }
}

impl SwapRequester for NetworkSwapRequester {
    fn request_swap(&mut self, source: SlotRef, target: SlotRef) {
        let (Ok(source_slot), Ok(target_slot)) =
            (i32::try_from(source.slot), i32::try_from(target.slot))
        else {
            warn!("Slot index out of wire range: {} -> {}", source, target);
            return;
        };

        let request = InventorySwapRequest::new(
            source.inventory.as_str(),
            source_slot,
            target.inventory.as_str(),
            target_slot,
        );
        match encode_client_message(&ClientMessage::SwapRequest(request)) {
            Ok(frame) => {
                debug!("Queued swap request {} -> {}", source, target);
                self.outbound.push(frame);
            }
            Err(err) => warn!("Failed to encode swap request: {:#}", err),
        }
    }
}
