#![warn(missing_docs)]
//! Wire messages shared by the client and the server.

mod codec;
mod protocol;

pub use codec::{
    compute_schema_hash, decode_client_message, decode_server_message, encode_client_message,
    encode_server_message,
};
pub use protocol::{
    ClientMessage, InventorySwapRequest, ServerMessage, CHANNEL_NAME, MAX_INVENTORY_ID_LEN,
    PROTOCOL_MAGIC, PROTOCOL_VERSION,
};
