//! Client and server wired together over encoded frames.

use rand::rngs::StdRng;
use rand::SeedableRng;
use texbuild_client::{
    InteractionEvent, NetworkSwapRequester, PlacementController, PlacementOutcome,
};
use texbuild_core::FilterSettings;
use texbuild_inventory::{InventoryId, SlotRef};
use texbuild_net::{compute_schema_hash, encode_client_message, ClientMessage};
use texbuild_server::SwapServer;
use texbuild_testkit::{block, code_at, player_inventory, tool};

#[test]
fn relocated_item_lands_in_active_slot() {
    let mut inv = player_inventory(
        &[Some(block("game:log-pine")), Some(tool("game:axe-flint"))],
        &[Some(block("game:planks-oak")), Some(block("game:log-birch"))],
        &[Some(block("game:log-oak"))],
    );
    let mut settings = FilterSettings::default();
    settings.set_whitelist("game:log-*");
    settings.whitelist_only = true;
    settings.set_blacklist("game:log-oak");

    let mut controller = PlacementController::new(settings, true);
    controller.set_random_mode(true);
    let mut server = SwapServer::new();

    // Handshake.
    let check = encode_client_message(&controller.availability_request()).unwrap();
    let reply = server
        .handle_frame(&mut inv, "tester", &check)
        .unwrap()
        .expect("availability reply");
    controller.on_server_frame(&reply).unwrap();
    assert!(controller.selector().multi_inventory_active());

    // Candidates: the held pine log and the birch log in the backpack.
    let source = SlotRef::new(InventoryId::Backpack, 1);
    let mut requester = NetworkSwapRequester::new();
    let mut rng = StdRng::seed_from_u64(7);
    let relocated = (0..64).any(|_| {
        match controller.on_interaction(InteractionEvent::place(), &mut inv, &mut rng, &mut requester) {
            PlacementOutcome::Selected(slot) => {
                assert_eq!(slot, 0);
                false
            }
            PlacementOutcome::Relocated { source: from, active } => {
                assert_eq!(from, source);
                assert_eq!(active, 0);
                true
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    });
    assert!(relocated);

    let frames = requester.drain();
    assert_eq!(frames.len(), 1);
    for frame in frames {
        assert!(server.handle_frame(&mut inv, "tester", &frame).unwrap().is_none());
    }
    assert_eq!(server.stats().completed, 1);
    assert_eq!(code_at(&inv, SlotRef::hotbar(0)).as_deref(), Some("game:log-birch"));
    assert_eq!(code_at(&inv, source).as_deref(), Some("game:log-pine"));
    assert_eq!(inv.active_slot(), 0);
}

#[test]
fn unconfirmed_server_keeps_hotbar_mode() {
    let mut inv = player_inventory(
        &[Some(block("game:planks-oak"))],
        &[Some(block("game:log-birch"))],
        &[],
    );
    let mut controller = PlacementController::new(FilterSettings::default(), true);
    controller.set_random_mode(true);

    let mut requester = NetworkSwapRequester::new();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let outcome =
            controller.on_interaction(InteractionEvent::place(), &mut inv, &mut rng, &mut requester);
        assert_eq!(outcome, PlacementOutcome::Selected(0));
    }
    assert_eq!(requester.pending(), 0);
}

#[test]
fn schema_mismatch_degrades_to_hotbar_mode() {
    let mut inv = player_inventory(
        &[Some(block("game:planks-oak"))],
        &[Some(block("game:log-birch"))],
        &[],
    );
    let mut controller = PlacementController::new(FilterSettings::default(), true);
    controller.set_random_mode(true);
    let mut server = SwapServer::new();

    // A client built against a different protocol revision.
    let stale = ClientMessage::AvailabilityCheck {
        schema_hash: compute_schema_hash().wrapping_add(1),
    };
    let reply = server
        .handle_frame(&mut inv, "tester", &encode_client_message(&stale).unwrap())
        .unwrap()
        .expect("availability reply");
    controller.on_server_frame(&reply).unwrap();
    assert!(!controller.selector().multi_inventory_active());

    let mut requester = NetworkSwapRequester::new();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let outcome =
            controller.on_interaction(InteractionEvent::place(), &mut inv, &mut rng, &mut requester);
        assert_eq!(outcome, PlacementOutcome::Selected(0));
    }
    assert_eq!(requester.pending(), 0);
}
