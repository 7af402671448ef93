//! Random slot selection.
//!
//! Every slot the filter admits is equally likely to be picked. In
//! multi-inventory mode the backpack and character inventories join the pool;
//! picking from them asks the server to swap the item into the active hotbar
//! slot instead of moving the selection.

use rand::seq::SliceRandom;
use rand::Rng;
use texbuild_core::{evaluate, FilterSettings};
use texbuild_inventory::{InventoryId, PlayerInventory, SlotCollection, SlotRef};
use tracing::debug;

/// One-way capability to ask the remote side for a slot swap.
///
/// Requests are fire-and-forget: nothing is returned and nothing is awaited.
pub trait SwapRequester {
    /// Swap the contents of `source` and `target`.
    fn request_swap(&mut self, source: SlotRef, target: SlotRef);
}

/// Successful selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Switch the active hotbar slot to this index.
    Hotbar(usize),
    /// The chosen item lives outside the hotbar; a swap into the active slot
    /// was requested and the active index stays put.
    Relocated {
        /// Where the chosen item currently is.
        source: SlotRef,
        /// The unchanged active hotbar index.
        active: usize,
    },
}

impl Selection {
    /// Hotbar index the caller should end up on.
    pub fn slot(self) -> usize {
        match self {
            Selection::Hotbar(slot) => slot,
            Selection::Relocated { active, .. } => active,
        }
    }
}

/// Indices of every slot the filter admits, in slot order.
pub fn eligible_slots(slots: &SlotCollection, settings: &FilterSettings) -> Vec<usize> {
    slots
        .descriptors()
        .filter_map(|(index, item)| {
            let verdict = evaluate(item, settings);
            if verdict.is_allowed() {
                return Some(index);
            }
            if settings.debug_mode {
                if let Some(item) = item {
                    debug!("Slot {} skipped: {} ({})", index, item.code, verdict);
                }
            }
            None
        })
        .collect()
}

/// Pick one admitted slot uniformly at random, or `None` when nothing qualifies.
pub fn select_slot<R: Rng + ?Sized>(
    slots: &SlotCollection,
    settings: &FilterSettings,
    rng: &mut R,
) -> Option<usize> {
    eligible_slots(slots, settings).choose(rng).copied()
}

/// Chooses the slot for the next placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotSelector {
    use_entire_inventory: bool,
    remote_available: bool,
}

impl SlotSelector {
    /// Create a selector. Multi-inventory mode also needs the server to
    /// confirm support, see [`SlotSelector::set_remote_available`].
    pub fn new(use_entire_inventory: bool) -> Self {
        Self {
            use_entire_inventory,
            remote_available: false,
        }
    }

    /// Whether multi-inventory mode was requested.
    pub fn use_entire_inventory(&self) -> bool {
        self.use_entire_inventory
    }

    /// Request or drop multi-inventory mode.
    pub fn set_use_entire_inventory(&mut self, enabled: bool) {
        self.use_entire_inventory = enabled;
    }

    /// Whether the server confirmed swap support.
    pub fn remote_available(&self) -> bool {
        self.remote_available
    }

    /// Record the server's availability answer.
    pub fn set_remote_available(&mut self, available: bool) {
        self.remote_available = available;
    }

    /// Whether the next selection scans more than the hotbar.
    pub fn multi_inventory_active(&self) -> bool {
        self.use_entire_inventory && self.remote_available
    }

    /// Choose a slot. `None` means "leave the active slot alone".
    pub fn select<R, S>(
        &self,
        inventory: &PlayerInventory,
        settings: &FilterSettings,
        rng: &mut R,
        requester: &mut S,
    ) -> Option<Selection>
    where
        R: Rng + ?Sized,
        S: SwapRequester + ?Sized,
    {
        if settings.debug_mode {
            debug!("Whitelist: {}", settings.whitelist);
            debug!("WhitelistOnly: {}", settings.whitelist_only);
            debug!("Blacklist: {}", settings.blacklist);
        }

        if !self.multi_inventory_active() {
            return select_slot(inventory.hotbar(), settings, rng).map(Selection::Hotbar);
        }

        let pool: Vec<SlotRef> = InventoryId::ALL
            .into_iter()
            .flat_map(|id| {
                eligible_slots(inventory.collection(id), settings)
                    .into_iter()
                    .map(move |slot| SlotRef::new(id, slot))
            })
            .collect();

        let chosen = *pool.choose(rng)?;
        if chosen.inventory == InventoryId::Hotbar {
            return Some(Selection::Hotbar(chosen.slot));
        }

        let active = inventory.active_slot();
        requester.request_swap(chosen, SlotRef::hotbar(active));
        if settings.debug_mode {
            debug!("Requested swap {} -> hotbar[{}]", chosen, active);
        }
        Some(Selection::Relocated {
            source: chosen,
            active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use texbuild_testkit::{
        block, entity, hotbar, liquid, meal, player_inventory, plant, tool, SelectionHistogram,
    };

    #[derive(Default)]
    struct RecordingRequester {
        requests: Vec<(SlotRef, SlotRef)>,
    }

    impl SwapRequester for RecordingRequester {
        fn request_swap(&mut self, source: SlotRef, target: SlotRef) {
            self.requests.push((source, target));
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x7e7b)
    }

    #[test]
    fn all_denied_yields_no_candidate() {
        let slots = hotbar(&[
            Some(tool("game:axe-flint")),
            Some(meal("game:pie-perfect")),
            None,
            Some(plant("game:flower-catmint")),
            Some(liquid("game:water-still-7")),
            Some(entity("game:sign-ground-north", "Sign")),
        ]);
        let settings = FilterSettings::default();
        assert!(eligible_slots(&slots, &settings).is_empty());
        assert_eq!(select_slot(&slots, &settings, &mut rng()), None);
    }

    #[test]
    fn empty_collection_yields_no_candidate() {
        let slots = SlotCollection::default();
        assert_eq!(select_slot(&slots, &FilterSettings::default(), &mut rng()), None);
    }

    #[test]
    fn single_eligible_slot_is_always_chosen() {
        let slots = hotbar(&[
            Some(tool("game:axe-flint")),
            None,
            None,
            None,
            None,
            None,
            Some(block("game:cobblestone-granite")),
        ]);
        let settings = FilterSettings::default();
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(select_slot(&slots, &settings, &mut rng), Some(6));
        }
    }

    #[test]
    fn selection_converges_to_uniform() {
        let slots = hotbar(&[
            Some(block("game:cobblestone-granite")),
            Some(tool("game:axe-flint")),
            Some(block("game:cobblestone-andesite")),
            None,
            Some(block("game:cobblestone-basalt")),
            Some(block("game:cobblestone-peridotite")),
        ]);
        let settings = FilterSettings::default();
        let mut rng = rng();
        let mut histogram = SelectionHistogram::new();
        for _ in 0..20_000 {
            histogram.record(select_slot(&slots, &settings, &mut rng));
        }

        assert_eq!(histogram.misses(), 0);
        assert_eq!(histogram.selected_indices(), vec![0, 2, 4, 5]);
        assert!(histogram.max_deviation_from_uniform(&[0, 2, 4, 5]) < 0.02);
    }

    #[test]
    fn hotbar_mode_ignores_backpack() {
        let inv = player_inventory(
            &[Some(tool("game:axe-flint"))],
            &[Some(block("game:log-oak"))],
            &[],
        );
        let mut selector = SlotSelector::new(true);
        let mut requester = RecordingRequester::default();

        // Not confirmed by the server yet: hotbar only.
        let picked = selector.select(&inv, &FilterSettings::default(), &mut rng(), &mut requester);
        assert_eq!(picked, None);
        assert!(requester.requests.is_empty());

        selector.set_remote_available(true);
        selector.set_use_entire_inventory(false);
        let picked = selector.select(&inv, &FilterSettings::default(), &mut rng(), &mut requester);
        assert_eq!(picked, None);
    }

    #[test]
    fn multi_inventory_requests_swap_into_active_slot() {
        let mut inv = player_inventory(
            &[Some(tool("game:axe-flint")), Some(block("game:planks-oak"))],
            &[None, None, Some(block("game:log-oak"))],
            &[],
        );
        inv.set_active_slot(1);
        let mut selector = SlotSelector::new(true);
        selector.set_remote_available(true);

        let mut settings = FilterSettings::default();
        settings.set_whitelist("game:log-*");
        settings.whitelist_only = true;

        let mut requester = RecordingRequester::default();
        let picked = selector.select(&inv, &settings, &mut rng(), &mut requester);

        let source = SlotRef::new(InventoryId::Backpack, 2);
        assert_eq!(picked, Some(Selection::Relocated { source, active: 1 }));
        assert_eq!(picked.map(Selection::slot), Some(1));
        assert_eq!(requester.requests, vec![(source, SlotRef::hotbar(1))]);
    }

    #[test]
    fn multi_inventory_pool_spans_all_inventories() {
        let inv = player_inventory(
            &[Some(block("game:planks-oak"))],
            &[Some(block("game:log-oak"))],
            &[Some(block("game:log-birch"))],
        );
        let mut selector = SlotSelector::new(true);
        selector.set_remote_available(true);
        let settings = FilterSettings::default();

        let mut rng = rng();
        let mut requester = RecordingRequester::default();
        let mut hotbar_hits = 0;
        for _ in 0..3_000 {
            match selector.select(&inv, &settings, &mut rng, &mut requester) {
                Some(Selection::Hotbar(0)) => hotbar_hits += 1,
                Some(Selection::Relocated { .. }) => {}
                other => panic!("unexpected selection {other:?}"),
            }
        }

        let backpack = requester
            .requests
            .iter()
            .filter(|(source, _)| source.inventory == InventoryId::Backpack)
            .count();
        let character = requester.requests.len() - backpack;
        for hits in [hotbar_hits, backpack, character] {
            assert!((800..1200).contains(&hits), "skewed pool: {hits}");
        }
    }
}
