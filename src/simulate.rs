//! Offline placement simulation: client, codec and server in one process.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use texbuild_client::{
    InteractionEvent, NetworkSwapRequester, PlacementController, PlacementOutcome,
};
use texbuild_inventory::PlayerInventory;
use texbuild_net::encode_client_message;
use texbuild_server::{SwapServer, SwapStats};
use texbuild_testkit::{EventRecord, JsonlSink, SelectionHistogram};
use tracing::debug;

use crate::config::ClientConfig;

const PLAYER: &str = "simulator";

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub clicks: u64,
    pub seed: u64,
    /// Skip the availability handshake so the server never confirms support.
    pub offline: bool,
    /// Turn random mode on even when the settings file leaves it off.
    pub force_random_mode: bool,
}

/// What a simulation run produced.
#[derive(Debug)]
pub struct SimulationReport {
    /// Hotbar index in hand after each click; misses are clicks that changed nothing.
    pub histogram: SelectionHistogram,
    /// Clicks that requested a swap into the active slot.
    pub relocations: u64,
    /// Swap outcomes as seen by the server.
    pub server: SwapStats,
    /// Inventory after the last click.
    pub inventory: PlayerInventory,
}

/// Run `options.clicks` placement clicks against `inventory`.
///
/// Random mode starts as configured unless `force_random_mode` is set. Swap
/// frames are fed to an in-process server after every click, so each click
/// sees the previous swaps applied.
pub fn run(
    config: &ClientConfig,
    mut inventory: PlayerInventory,
    options: &SimulationOptions,
    trace: Option<&Path>,
) -> Result<SimulationReport> {
    let mut sink = trace.map(JsonlSink::create).transpose().context("Failed to open trace")?;

    let mut controller =
        PlacementController::new(config.settings.clone(), config.use_entire_inventory);
    controller.set_random_mode(config.random_mode_enabled || options.force_random_mode);
    let mut server = SwapServer::new();

    if !options.offline {
        let check = encode_client_message(&controller.availability_request())?;
        if let Some(reply) = server.handle_frame(&mut inventory, PLAYER, &check)? {
            controller.on_server_frame(&reply)?;
        }
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut requester = NetworkSwapRequester::new();
    let mut histogram = SelectionHistogram::new();
    let mut relocations = 0;

    for click in 0..options.clicks {
        let outcome = controller.on_interaction(
            InteractionEvent::place(),
            &mut inventory,
            &mut rng,
            &mut requester,
        );
        for frame in requester.drain() {
            server.handle_frame(&mut inventory, PLAYER, &frame)?;
        }

        let (kind, payload) = match outcome {
            PlacementOutcome::Ignored(reason) => {
                histogram.record(None);
                ("Ignored", format!("{reason:?}"))
            }
            PlacementOutcome::NoCandidate => {
                histogram.record(None);
                ("NoCandidate", String::new())
            }
            PlacementOutcome::Selected(slot) => {
                histogram.record(Some(slot));
                ("Selected", format!("hotbar[{slot}]"))
            }
            PlacementOutcome::Relocated { source, active } => {
                histogram.record(Some(active));
                relocations += 1;
                ("Relocated", format!("{source} -> hotbar[{active}]"))
            }
        };
        debug!("Click {}: {} {}", click, kind, payload);

        if let Some(sink) = sink.as_mut() {
            sink.write(&EventRecord {
                click,
                kind,
                payload: &payload,
            })?;
        }
    }

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }

    Ok(SimulationReport {
        histogram,
        relocations,
        server: server.stats(),
        inventory,
    })
}
