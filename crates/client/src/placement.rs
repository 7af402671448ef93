//! Placement-click handling.

use anyhow::{Context, Result};
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;
use texbuild_core::{evaluate, FilterSettings, SettingsError};
use texbuild_inventory::{PlayerInventory, SlotRef};
use texbuild_net::{decode_server_message, ClientMessage, ServerMessage};
use tracing::{debug, info};

use crate::selector::{Selection, SlotSelector, SwapRequester};

/// Mouse button behind an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary (break) button.
    Left,
    /// Middle (pick) button.
    Middle,
    /// Secondary (place) button.
    Right,
}

/// A mouse-down the host forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionEvent {
    /// Button pressed.
    pub button: MouseButton,
    /// Whether the cursor points at a block face something can be placed on.
    pub has_placement_target: bool,
    /// Whether the game is paused.
    pub game_paused: bool,
}

impl InteractionEvent {
    /// Right click on a placement target while the game runs.
    pub fn place() -> Self {
        Self {
            button: MouseButton::Right,
            has_placement_target: true,
            game_paused: false,
        }
    }
}

/// Why a click left the inventory untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Not the place button.
    WrongButton,
    /// Game paused.
    Paused,
    /// Random placement mode is off.
    ModeDisabled,
    /// Nothing in the active hotbar slot.
    EmptyHand,
    /// The held item is itself excluded by the filter.
    HeldItemExcluded,
    /// No block under the cursor.
    NoPlacementTarget,
}

/// Result of one placement click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Click did not qualify.
    Ignored(IgnoreReason),
    /// Qualified, but no slot passed the filter.
    NoCandidate,
    /// Active hotbar slot switched to this index.
    Selected(usize),
    /// A swap into the active slot was requested.
    Relocated {
        /// Slot the chosen item comes from.
        source: SlotRef,
        /// Unchanged active hotbar index.
        active: usize,
    },
}

/// Client-side driver: owns the settings snapshot, the mode toggle and the
/// availability state.
#[derive(Debug)]
pub struct PlacementController {
    settings: Arc<FilterSettings>,
    random_mode: bool,
    selector: SlotSelector,
}

impl PlacementController {
    /// Create a controller with random mode off.
    pub fn new(settings: FilterSettings, use_entire_inventory: bool) -> Self {
        Self {
            settings: Arc::new(settings),
            random_mode: false,
            selector: SlotSelector::new(use_entire_inventory),
        }
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> Arc<FilterSettings> {
        Arc::clone(&self.settings)
    }

    /// Swap in a whole new snapshot, e.g. after a config reload.
    pub fn replace_settings(&mut self, settings: FilterSettings) {
        self.settings = Arc::new(settings);
    }

    /// Apply one setting change by its persisted key.
    ///
    /// The current snapshot is left untouched when the change is rejected.
    pub fn apply_setting(&mut self, key: &str, value: &Value) -> Result<(), SettingsError> {
        let mut next = FilterSettings::clone(&self.settings);
        next.apply(key, value)?;
        debug!("Setting '{}' updated to {}", key, value);
        self.settings = Arc::new(next);
        Ok(())
    }

    /// Whether random placement mode is on.
    pub fn random_mode(&self) -> bool {
        self.random_mode
    }

    /// Turn random placement mode on or off.
    pub fn set_random_mode(&mut self, enabled: bool) {
        self.random_mode = enabled;
    }

    /// Flip random placement mode and return the status line for the HUD.
    pub fn toggle_random_mode(&mut self) -> String {
        self.random_mode = !self.random_mode;
        let status = format!(
            "Random Placement Mode: {}",
            if self.random_mode { "ON" } else { "OFF" }
        );
        info!("{}", status);
        status
    }

    /// Slot selector state.
    pub fn selector(&self) -> &SlotSelector {
        &self.selector
    }

    /// Request or drop multi-inventory mode.
    pub fn set_use_entire_inventory(&mut self, enabled: bool) {
        self.selector.set_use_entire_inventory(enabled);
    }

    /// Message to send once the channel connects. Carries the schema hash so
    /// an incompatible server answers "unavailable".
    pub fn availability_request(&self) -> ClientMessage {
        ClientMessage::availability_check()
    }

    /// Handle a decoded server message.
    pub fn on_server_message(&mut self, msg: &ServerMessage) {
        match msg {
            ServerMessage::Available { available } => {
                self.selector.set_remote_available(*available);
                if *available {
                    info!("Server supports multi-inventory placement");
                } else {
                    debug!("Server does not support multi-inventory placement");
                }
            }
        }
    }

    /// Decode and handle a raw server frame.
    pub fn on_server_frame(&mut self, frame: &[u8]) -> Result<()> {
        let msg = decode_server_message(frame).context("Undecodable server frame")?;
        self.on_server_message(&msg);
        Ok(())
    }

    /// Handle a mouse-down. Selection happens before the host places the
    /// block, so the placed block comes from the newly chosen slot.
    pub fn on_interaction<R, S>(
        &self,
        event: InteractionEvent,
        inventory: &mut PlayerInventory,
        rng: &mut R,
        requester: &mut S,
    ) -> PlacementOutcome
    where
        R: Rng + ?Sized,
        S: SwapRequester + ?Sized,
    {
        if event.button != MouseButton::Right {
            return PlacementOutcome::Ignored(IgnoreReason::WrongButton);
        }
        if event.game_paused {
            return PlacementOutcome::Ignored(IgnoreReason::Paused);
        }
        if !self.random_mode {
            return PlacementOutcome::Ignored(IgnoreReason::ModeDisabled);
        }

        // One snapshot for the whole click.
        let settings = Arc::clone(&self.settings);

        let Some(held) = inventory.active_stack() else {
            return PlacementOutcome::Ignored(IgnoreReason::EmptyHand);
        };
        let verdict = evaluate(Some(&held.item), &settings);
        if !verdict.is_allowed() {
            if settings.debug_mode {
                debug!("Held item {} not randomized: {}", held.item.code, verdict);
            }
            return PlacementOutcome::Ignored(IgnoreReason::HeldItemExcluded);
        }
        if !event.has_placement_target {
            return PlacementOutcome::Ignored(IgnoreReason::NoPlacementTarget);
        }

        match self.selector.select(inventory, &settings, rng, requester) {
            None => PlacementOutcome::NoCandidate,
            Some(Selection::Hotbar(slot)) => {
                inventory.set_active_slot(slot);
                PlacementOutcome::Selected(slot)
            }
            Some(Selection::Relocated { source, active }) => {
                PlacementOutcome::Relocated { source, active }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use texbuild_net::{compute_schema_hash, encode_server_message};
    use texbuild_testkit::{block, meal, player_inventory};

    struct NoSwaps;

    impl SwapRequester for NoSwaps {
        fn request_swap(&mut self, source: SlotRef, target: SlotRef) {
            panic!("unexpected swap {source} -> {target}");
        }
    }

    fn enabled() -> PlacementController {
        let mut controller = PlacementController::new(FilterSettings::default(), false);
        controller.set_random_mode(true);
        controller
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn toggle_reports_status() {
        let mut controller = PlacementController::new(FilterSettings::default(), false);
        assert_eq!(controller.toggle_random_mode(), "Random Placement Mode: ON");
        assert!(controller.random_mode());
        assert_eq!(controller.toggle_random_mode(), "Random Placement Mode: OFF");
        assert!(!controller.random_mode());
    }

    #[test]
    fn ignores_clicks_that_do_not_qualify() {
        let mut inv = player_inventory(&[Some(block("game:log-oak"))], &[], &[]);
        let controller = enabled();

        let mut event = InteractionEvent::place();
        event.button = MouseButton::Left;
        assert_eq!(
            controller.on_interaction(event, &mut inv, &mut rng(), &mut NoSwaps),
            PlacementOutcome::Ignored(IgnoreReason::WrongButton)
        );

        let mut event = InteractionEvent::place();
        event.game_paused = true;
        assert_eq!(
            controller.on_interaction(event, &mut inv, &mut rng(), &mut NoSwaps),
            PlacementOutcome::Ignored(IgnoreReason::Paused)
        );

        let mut event = InteractionEvent::place();
        event.has_placement_target = false;
        assert_eq!(
            controller.on_interaction(event, &mut inv, &mut rng(), &mut NoSwaps),
            PlacementOutcome::Ignored(IgnoreReason::NoPlacementTarget)
        );

        let disabled = PlacementController::new(FilterSettings::default(), false);
        assert_eq!(
            disabled.on_interaction(InteractionEvent::place(), &mut inv, &mut rng(), &mut NoSwaps),
            PlacementOutcome::Ignored(IgnoreReason::ModeDisabled)
        );
    }

    #[test]
    fn empty_or_excluded_hand_is_left_alone() {
        let controller = enabled();

        let mut inv = player_inventory(&[None, Some(block("game:log-oak"))], &[], &[]);
        assert_eq!(
            controller.on_interaction(InteractionEvent::place(), &mut inv, &mut rng(), &mut NoSwaps),
            PlacementOutcome::Ignored(IgnoreReason::EmptyHand)
        );

        let mut inv = player_inventory(
            &[Some(meal("game:pie-perfect")), Some(block("game:log-oak"))],
            &[],
            &[],
        );
        assert_eq!(
            controller.on_interaction(InteractionEvent::place(), &mut inv, &mut rng(), &mut NoSwaps),
            PlacementOutcome::Ignored(IgnoreReason::HeldItemExcluded)
        );
        assert_eq!(inv.active_slot(), 0);
    }

    #[test]
    fn switches_active_slot() {
        let controller = enabled();
        let mut inv = player_inventory(
            &[Some(block("game:log-oak")), None, None, Some(block("game:planks-oak"))],
            &[],
            &[],
        );
        let mut rng = rng();
        for _ in 0..20 {
            match controller.on_interaction(InteractionEvent::place(), &mut inv, &mut rng, &mut NoSwaps) {
                PlacementOutcome::Selected(slot) => {
                    assert!(slot == 0 || slot == 3);
                    assert_eq!(inv.active_slot(), slot);
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }

    #[test]
    fn apply_setting_builds_fresh_snapshot() {
        let mut controller = enabled();
        let before = controller.settings();

        controller.apply_setting("blacklist", &json!("game:log-*, game:planks-*")).unwrap();
        let after = controller.settings();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(before.blacklist.is_empty());
        assert_eq!(after.blacklist.len(), 2);

        assert!(controller.apply_setting("allowEverything", &json!(true)).is_err());
        assert!(Arc::ptr_eq(&after, &controller.settings()));
    }

    #[test]
    fn availability_frame_enables_multi_inventory() {
        let mut controller = PlacementController::new(FilterSettings::default(), true);
        assert_eq!(
            controller.availability_request(),
            ClientMessage::AvailabilityCheck {
                schema_hash: compute_schema_hash()
            }
        );
        assert!(!controller.selector().multi_inventory_active());

        let frame = encode_server_message(&ServerMessage::Available { available: true }).unwrap();
        controller.on_server_frame(&frame).unwrap();
        assert!(controller.selector().multi_inventory_active());

        assert!(controller.on_server_frame(&[0xff]).is_err());
        assert!(controller.selector().multi_inventory_active());
    }
}
