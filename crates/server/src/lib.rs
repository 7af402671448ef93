#![warn(missing_docs)]
//! Authoritative side of multi-inventory placement: answers availability
//! checks and applies swap requests to the player's inventories.

pub mod swap;

use anyhow::{Context, Result};
use texbuild_inventory::PlayerInventory;
use texbuild_net::{
    compute_schema_hash, decode_client_message, encode_server_message, ClientMessage,
    ServerMessage, CHANNEL_NAME,
};
use tracing::{debug, info, warn};

pub use swap::{apply_swap, resolve, SwapError};

/// Counters for handled swap requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapStats {
    /// Swaps applied.
    pub completed: u64,
    /// Swaps rejected.
    pub rejected: u64,
}

/// Message handler registered on the placement channel.
#[derive(Debug)]
pub struct SwapServer {
    stats: SwapStats,
    schema_hash: u64,
}

impl SwapServer {
    /// Create a handler for the placement channel.
    pub fn new() -> Self {
        info!(
            "Swap server ready on channel '{}' - multi-inventory placement enabled",
            CHANNEL_NAME
        );
        Self {
            stats: SwapStats::default(),
            schema_hash: compute_schema_hash(),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> SwapStats {
        self.stats
    }

    /// Handle one decoded client message, returning the reply to send (if any).
    pub fn handle_message(
        &mut self,
        inventory: &mut PlayerInventory,
        player: &str,
        msg: &ClientMessage,
    ) -> Option<ServerMessage> {
        match msg {
            ClientMessage::AvailabilityCheck { schema_hash } => {
                let available = *schema_hash == self.schema_hash;
                if available {
                    debug!("Sent mod availability to {}", player);
                } else {
                    warn!(
                        "Protocol mismatch with {}: schema {:016x}, expected {:016x}",
                        player, schema_hash, self.schema_hash
                    );
                }
                Some(ServerMessage::Available { available })
            }
            ClientMessage::SwapRequest(request) => {
                match apply_swap(inventory, player, request) {
                    Ok(()) => self.stats.completed += 1,
                    Err(_) => self.stats.rejected += 1,
                }
                None
            }
        }
    }

    /// Decode a client frame, handle it and encode the reply.
    ///
    /// Undecodable frames are an error; rejected swaps are not (they are
    /// logged and counted).
    pub fn handle_frame(
        &mut self,
        inventory: &mut PlayerInventory,
        player: &str,
        frame: &[u8],
    ) -> Result<Option<Vec<u8>>> {
        let msg = decode_client_message(frame)
            .with_context(|| format!("Undecodable frame from {player}"))?;
        if let Err(reason) = msg.verify() {
            warn!("Dropping invalid message from {}: {}", player, reason);
            self.stats.rejected += 1;
            return Ok(None);
        }

        self.handle_message(inventory, player, &msg)
            .map(|reply| encode_server_message(&reply))
            .transpose()
    }
}

impl Default for SwapServer {
    fn default() -> Self {
        Self::new()
    }
}
