//! Message encoding and decoding with framing.
//!
//! Provides length-prefixed encoding so messages can ride any byte channel
//! the host offers.

use crate::protocol::{ClientMessage, ServerMessage, PROTOCOL_MAGIC, PROTOCOL_VERSION};
use anyhow::{Context, Result};

/// Size of the length prefix plus the message type tag.
const HEADER_LEN: usize = 5;

/// Compute schema hash from protocol definitions.
///
/// This hash is used to ensure client and server have compatible protocol versions.
pub fn compute_schema_hash() -> u64 {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&PROTOCOL_VERSION.to_le_bytes());
    hasher.update(PROTOCOL_MAGIC);

    // Message type names (deterministic)
    hasher.update(b"ClientMessage");
    hasher.update(b"ServerMessage");
    hasher.update(b"InventorySwapRequest");

    let hash = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

/// Encode a client message with length prefix.
///
/// Frame format: [length: u32][message_type: u8][payload: bytes]
pub fn encode_client_message(msg: &ClientMessage) -> Result<Vec<u8>> {
    let payload = postcard::to_allocvec(msg).context("Failed to serialize client message")?;
    Ok(frame(client_message_type_tag(msg), &payload))
}

/// Encode a server message with length prefix.
///
/// Frame format: [length: u32][message_type: u8][payload: bytes]
pub fn encode_server_message(msg: &ServerMessage) -> Result<Vec<u8>> {
    let payload = postcard::to_allocvec(msg).context("Failed to serialize server message")?;
    Ok(frame(server_message_type_tag(msg), &payload))
}

/// Decode a client message from frame data.
///
/// Expects data to start with length prefix. The type tag must agree with
/// the decoded message.
pub fn decode_client_message(data: &[u8]) -> Result<ClientMessage> {
    let (tag, payload) = unframe(data)?;
    let msg: ClientMessage =
        postcard::from_bytes(payload).context("Failed to deserialize client message")?;
    check_tag(tag, client_message_type_tag(&msg))?;
    Ok(msg)
}

/// Decode a server message from frame data.
///
/// Expects data to start with length prefix. The type tag must agree with
/// the decoded message.
pub fn decode_server_message(data: &[u8]) -> Result<ServerMessage> {
    let (tag, payload) = unframe(data)?;
    let msg: ServerMessage =
        postcard::from_bytes(payload).context("Failed to deserialize server message")?;
    check_tag(tag, server_message_type_tag(&msg))?;
    Ok(msg)
}

fn frame(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());

    // Length (excluding length field itself)
    let length = (1 + payload.len()) as u32;
    frame.extend_from_slice(&length.to_le_bytes());
    frame.push(tag);
    frame.extend_from_slice(payload);

    frame
}

/// Split a frame into its type tag and payload.
fn unframe(data: &[u8]) -> Result<(u8, &[u8])> {
    if data.len() < HEADER_LEN {
        return Err(anyhow::anyhow!(
            "Frame too short: {} bytes (minimum {})",
            data.len(),
            HEADER_LEN
        ));
    }

    let length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if length == 0 {
        return Err(anyhow::anyhow!("Frame length must cover the type tag"));
    }

    let end = 4usize
        .checked_add(length)
        .ok_or_else(|| anyhow::anyhow!("Frame length overflows: {}", length))?;
    if data.len() < end {
        return Err(anyhow::anyhow!(
            "Incomplete frame: expected {} bytes, got {}",
            end,
            data.len()
        ));
    }

    Ok((data[4], &data[HEADER_LEN..end]))
}

fn check_tag(found: u8, expected: u8) -> Result<()> {
    if found != expected {
        return Err(anyhow::anyhow!(
            "Message type tag {} does not match payload (expected {})",
            found,
            expected
        ));
    }
    Ok(())
}

/// Get message type tag for client messages.
fn client_message_type_tag(msg: &ClientMessage) -> u8 {
    match msg {
        ClientMessage::AvailabilityCheck { .. } => 0,
        ClientMessage::SwapRequest(_) => 1,
    }
}

/// Get message type tag for server messages.
fn server_message_type_tag(msg: &ServerMessage) -> u8 {
    match msg {
        ServerMessage::Available { .. } => 0,
    }
}
