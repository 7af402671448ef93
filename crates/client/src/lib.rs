#![warn(missing_docs)]
//! Client side of random placement: the slot selector, the placement-click
//! controller and the swap requester that talks to the server.

mod placement;
mod requester;
pub mod selector;

pub use placement::{
    IgnoreReason, InteractionEvent, MouseButton, PlacementController, PlacementOutcome,
};
pub use requester::NetworkSwapRequester;
pub use selector::{eligible_slots, select_slot, Selection, SlotSelector, SwapRequester};
