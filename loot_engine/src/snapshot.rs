//! Container snapshots.
//!
//! A snapshot is every item stack the player can see in a container: the
//! regular inventory slots in slot order, followed by the loose item
//! references attached to the container. The two sources are not merged, so
//! the same item can show up once from each.

use log::{debug, trace};
use loot_data::FormDef;

use crate::host::{LootEnv, RefHandle};
use crate::stack::ItemStack;

/// Build the item stacks of `container` whose forms pass `filter`.
///
/// A null or stale container yields an empty list. Entries rejected by the
/// filter are released before the next one is requested.
pub fn load_container_inventory<'a>(
    env: LootEnv<'a>,
    container: RefHandle,
    filter: impl Fn(&FormDef) -> bool,
) -> Vec<ItemStack<'a>> {
    let world = env.world;
    let Some(reference) = container.get(world) else {
        trace!("container {container:?} is not loaded; nothing to show");
        return Vec::new();
    };

    if reference.is_living_actor() {
        world.refresh_enchanted_weapons(reference);
    }

    let mut stacks = Vec::new();

    for entry in (0..).map_while(|index| world.inventory_entry_at(reference, index)) {
        let Some(object) = world.form(entry.object()) else {
            debug!("slot entry {:08X} has no form; skipped", entry.object());
            continue;
        };
        if !filter(object) {
            continue;
        }
        stacks.extend(ItemStack::new(env, entry, container, None));
    }

    for handle in world.dropped_items(reference) {
        let Some(dropped) = handle.get(world) else {
            trace!("dropped item {handle:?} is gone; skipped");
            continue;
        };
        let Some(object) = world.form(dropped.base) else {
            debug!("dropped item {handle:?} has no base form {:08X}; skipped", dropped.base);
            continue;
        };
        if !filter(object) {
            continue;
        }
        let entry = world.create_entry(object.id, dropped.count);
        stacks.extend(ItemStack::new(env, entry, container, Some(handle)));
    }

    debug!("container {:08X}: {} stacks", container.id(), stacks.len());
    stacks
}
