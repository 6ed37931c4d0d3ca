//! Interfaces to the host simulation.
//!
//! The engine never owns world objects. Containers and dropped items are
//! addressed through [`RefHandle`]s that must be re-resolved at every use,
//! static definitions are borrowed from the [`World`], and the rules for theft
//! and pickpocketing come from a [`FormulaProvider`].

use loot_data::{FormDef, FormId, RefDef, RefId};

use crate::entry::InventoryEntry;
use crate::payload::RenderContext;

/// Stable, possibly stale handle to a placed reference.
///
/// Holding a handle keeps nothing alive. Call [`RefHandle::get`] right before
/// each use and treat `None` as "the reference is gone".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RefHandle(RefId);

impl RefHandle {
    pub const NULL: RefHandle = RefHandle(0);

    pub fn new(id: RefId) -> Self {
        Self(id)
    }

    pub fn id(self) -> RefId {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Resolve the handle against the world.
    pub fn get(self, world: &dyn World) -> Option<&RefDef> {
        if self.is_null() { None } else { world.resolve(self) }
    }
}

impl From<&RefDef> for RefHandle {
    fn from(reference: &RefDef) -> Self {
        Self(reference.handle)
    }
}

/// Actor values the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorValue {
    Pickpocket,
}

/// Read access to the running simulation, plus the few host calls the engine makes.
pub trait World {
    /// Handle of the player's actor reference.
    fn player(&self) -> RefHandle;

    /// Look up a live reference; `None` once it has been deleted or unloaded.
    fn resolve(&self, handle: RefHandle) -> Option<&RefDef>;

    /// Look up a static form definition.
    fn form(&self, id: FormId) -> Option<&FormDef>;

    /// Allocate the inventory entry at `index` in the container's inventory.
    ///
    /// Returns `None` once `index` runs past the last entry. The caller owns
    /// the returned entry.
    fn inventory_entry_at(&self, container: &RefDef, index: usize) -> Option<InventoryEntry>;

    /// Handles of the loose item references attached to the container.
    fn dropped_items(&self, container: &RefDef) -> Vec<RefHandle> {
        container.dropped.iter().copied().map(RefHandle::new).collect()
    }

    /// Allocate a fresh inventory entry for `count` of `object`.
    fn create_entry(&self, object: FormId, count: i32) -> InventoryEntry {
        InventoryEntry::new(object, count)
    }

    /// Bring an actor's enchanted-weapon state up to date before it is displayed.
    fn refresh_enchanted_weapons(&self, actor: &RefDef);

    /// Detection level `actor` has on `target`; zero means undetected.
    fn detection_level(&self, actor: &RefDef, target: &RefDef) -> i32;

    fn actor_value(&self, actor: &RefDef, value: ActorValue) -> f32;

    /// Actor value clamped to its valid range.
    fn clamped_actor_value(&self, actor: &RefDef, value: ActorValue) -> f32;
}

/// Host gameplay formulas. The engine passes arguments through and trusts the results.
pub trait FormulaProvider {
    /// Whether `player` may take an item of `value` owned by `owner` (an NPC or faction).
    fn is_allowed_to_take(&self, player: &RefDef, owner: FormId, value: i32) -> bool;

    /// Steal difficulty of `count` items from the entry.
    fn steal_value(&self, entry: &InventoryEntry, item: &FormDef, count: i32, is_pickpocket: bool) -> i32;

    /// Pickpocket success chance as a whole percentage.
    #[allow(clippy::too_many_arguments)]
    fn pickpocket_success(
        &self,
        player_skill: f32,
        victim_skill: f32,
        steal_value: i32,
        weight: f32,
        player: &RefDef,
        victim: &RefDef,
        detected: bool,
        item: &FormDef,
    ) -> i32;
}

/// Everything an item stack needs to reach back into the host.
#[derive(Clone, Copy)]
pub struct LootEnv<'a> {
    pub world: &'a dyn World,
    pub formulas: &'a dyn FormulaProvider,
    pub render: &'a RenderContext,
}

impl<'a> LootEnv<'a> {
    pub fn new(world: &'a dyn World, formulas: &'a dyn FormulaProvider, render: &'a RenderContext) -> Self {
        Self {
            world,
            formulas,
            render,
        }
    }

    /// The player's reference, if it is loaded.
    pub fn player(&self) -> Option<&'a RefDef> {
        self.world.player().get(self.world)
    }
}
