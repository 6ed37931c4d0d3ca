//! Item stacks: one inventory entry plus everything needed to describe it.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::fmt;

use log::debug;
use loot_data::{FormDef, FormType, RefDef, SoulLevel};
use serde_json::Value;
use variantly::Variantly;

use crate::classify::{self, EnchantmentType, EquipState, FormInfo, ItemType};
use crate::entry::InventoryEntry;
use crate::host::{LootEnv, RefHandle};
use crate::icons;
use crate::payload::{self, Payload};

/// Where an item stack was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum StackOrigin {
    /// A regular inventory slot.
    Slot,
    /// A loose item reference attached to the container.
    Dropped(RefHandle),
}

/// One stack of items in a container, ready to be described to the UI.
///
/// The stack owns its inventory entry and releases it when dropped. The
/// container and any dropped-item reference are held as handles and resolved
/// again each time they are needed.
pub struct ItemStack<'a> {
    env: LootEnv<'a>,
    object: &'a FormDef,
    entry: InventoryEntry,
    container: RefHandle,
    origin: StackOrigin,
    data: OnceCell<Payload>,
}

impl fmt::Debug for ItemStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStack")
            .field("object", &format_args!("{:08X}", self.object.id))
            .field("count", &self.entry.count())
            .field("container", &self.container)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl<'a> ItemStack<'a> {
    /// Wrap `entry` in a stack.
    ///
    /// Returns `None`, releasing the entry, when its form does not resolve or
    /// nothing is left in it.
    pub fn new(env: LootEnv<'a>, entry: InventoryEntry, container: RefHandle, drop_ref: Option<RefHandle>) -> Option<Self> {
        let Some(object) = env.world.form(entry.object()) else {
            debug!("entry form {:08X} did not resolve; entry released", entry.object());
            return None;
        };
        if entry.count() <= 0 {
            debug!("entry {:08X} is empty ({}); entry released", object.id, entry.count());
            return None;
        }

        Some(Self {
            env,
            object,
            entry,
            container,
            origin: drop_ref.map_or(StackOrigin::Slot, StackOrigin::Dropped),
            data: OnceCell::new(),
        })
    }

    pub fn object(&self) -> &'a FormDef {
        self.object
    }

    pub fn entry(&self) -> &InventoryEntry {
        &self.entry
    }

    pub fn count(&self) -> i32 {
        self.entry.count()
    }

    pub fn container(&self) -> RefHandle {
        self.container
    }

    pub fn origin(&self) -> StackOrigin {
        self.origin
    }

    /// Handle of the dropped-item reference this stack was built from.
    pub fn drop_ref(&self) -> Option<RefHandle> {
        self.origin.dropped()
    }

    pub fn name(&self) -> &str {
        self.entry.display_name(self.object)
    }

    fn resolved_drop_ref(&self) -> Option<&'a RefDef> {
        self.drop_ref().and_then(|handle| handle.get(self.env.world))
    }

    pub fn item_type(&self) -> ItemType {
        classify::item_type(self.object)
    }

    pub fn enchantment_type(&self) -> EnchantmentType {
        classify::enchantment_type(self.env.world, self.object, self.resolved_drop_ref())
    }

    pub fn equip_state(&self) -> EquipState {
        classify::equip_state(&self.entry, self.object)
    }

    pub fn is_stealing(&self) -> Option<bool> {
        classify::is_stealing(&self.env, &self.entry, self.object, self.container)
    }

    pub fn pickpocket_chance(&self) -> Option<i32> {
        classify::pickpocket_chance(&self.env, &self.entry, self.object, self.container)
    }

    pub fn keywords(&self) -> BTreeSet<String> {
        classify::keywords(self.env.world, self.object)
    }

    pub fn form_info(&self) -> FormInfo {
        classify::form_info(self.env.world, self.object)
    }

    /// Soul level, for soul gems only.
    pub fn soul_level(&self) -> Option<SoulLevel> {
        (self.object.form_type == FormType::SoulGem).then(|| self.entry.soul_level(self.object))
    }

    /// Weight of one item at display precision.
    pub fn weight(&self) -> Option<f64> {
        classify::truncate_precision(widen(self.object.weight), false)
    }

    /// Value of one item at display precision.
    pub fn value(&self) -> Option<f64> {
        classify::truncate_precision(f64::from(self.entry.value(self.object)), false)
    }

    /// The UI payload. Built on first use, then returned unchanged.
    pub fn data(&self) -> &Payload {
        self.data.get_or_init(|| {
            let mut data = self.env.render.create_object();
            self.set_vanilla_data(&mut data);
            if self.env.render.extended_data {
                self.set_extended_data(&mut data);
            }
            if self.env.render.icons {
                self.set_icon(&mut data);
            }
            data
        })
    }

    fn set_vanilla_data(&self, data: &mut Payload) {
        data.insert(payload::TEXT.into(), self.name().into());
        data.insert(payload::COUNT.into(), self.count().into());
        data.insert(payload::EQUIP_STATE.into(), self.equip_state().code().into());
        data.insert(payload::FILTER_FLAG.into(), self.item_type().filter_flag().into());
        data.insert(payload::FAVORITE.into(), self.entry.extras().favorite.into());
        data.insert(payload::ENABLED.into(), true.into());

        if let Some(soul) = self.soul_level() {
            data.insert(payload::SOUL_LEVEL.into(), soul.code().into());
        }

        if let Some(stealing) = self.is_stealing() {
            data.insert(payload::IS_STEALING.into(), stealing.into());
        }
    }

    fn set_extended_data(&self, data: &mut Payload) {
        data.insert(payload::FORM_TYPE.into(), self.object.form_type.code().into());
        data.insert(payload::FORM_ID.into(), self.object.id.into());
        data.insert(payload::ITEM_TYPE.into(), self.item_type().code().into());
        data.insert(payload::ENCHANTMENT_TYPE.into(), self.enchantment_type().code().into());

        if let Some(weight) = self.weight() {
            data.insert(payload::WEIGHT.into(), weight.into());
        }
        if let Some(value) = self.value() {
            data.insert(payload::VALUE.into(), value.into());
        }
        if let Some(chance) = self.pickpocket_chance() {
            data.insert(payload::PICKPOCKET_CHANCE.into(), chance.into());
        }

        data.insert(payload::KEYWORDS.into(), classify::keywords_value(&self.keywords()));
        data.insert(payload::FORM.into(), self.form_info().to_value());
    }

    fn set_icon(&self, data: &mut Payload) {
        let icon = icons::select_icon(self.env.world, self.object);
        data.insert(payload::ICON_LABEL.into(), icon.label.into());
        data.insert(payload::ICON_COLOR.into(), Value::from(icon.color));
    }
}

/// Widen through the shortest decimal form, so 1.005f32 stays 1.005.
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or_else(|_| f64::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loot_data::{RefDef, RefKind};

    use crate::entry::EntryLedger;
    use crate::payload::RenderContext;
    use crate::sim::{SimFormulas, SimWorld};

    const PLAYER: u32 = 0x14;
    const CHEST: u32 = 0x100;

    fn world() -> SimWorld {
        let mut world = SimWorld::empty();
        world.insert_form(FormDef::new(0x7, "Player", FormType::Npc));
        world.insert_form(FormDef::new(0x12EB7, "IronSword", FormType::Weapon).with_name("Iron Sword").with_value(25));
        world.insert_ref(RefDef::new(PLAYER, 0x7, RefKind::Actor { dead: false }));
        world.insert_ref(RefDef::new(CHEST, 0x20, RefKind::Container));
        world.set_player(PLAYER);
        world
    }

    #[test]
    fn unresolvable_form_releases_entry() {
        let world = world();
        let formulas = SimFormulas::default();
        let render = RenderContext::vanilla();
        let env = LootEnv::new(&world, &formulas, &render);
        let ledger = EntryLedger::new();

        let entry = InventoryEntry::leased(0xBAD, 1, &ledger);
        assert_eq!(ledger.outstanding(), 1);
        assert!(ItemStack::new(env, entry, RefHandle::new(CHEST), None).is_none());
        assert_eq!(ledger.outstanding(), 0);
    }

    #[test]
    fn empty_entry_is_rejected() {
        let world = world();
        let formulas = SimFormulas::default();
        let render = RenderContext::vanilla();
        let env = LootEnv::new(&world, &formulas, &render);
        let ledger = EntryLedger::new();

        let entry = InventoryEntry::leased(0x12EB7, 0, &ledger);
        assert!(ItemStack::new(env, entry, RefHandle::new(CHEST), None).is_none());
        assert_eq!(ledger.outstanding(), 0);
    }

    #[test]
    fn payload_is_built_once() {
        let world = world();
        let formulas = SimFormulas::default();
        let render = RenderContext::default();
        let env = LootEnv::new(&world, &formulas, &render);

        let stack = ItemStack::new(env, InventoryEntry::new(0x12EB7, 2), RefHandle::new(CHEST), None).unwrap();
        let first = stack.data() as *const Payload;
        let second = stack.data() as *const Payload;
        assert_eq!(first, second);
        assert_eq!(stack.data()["text"], "Iron Sword");
        assert_eq!(stack.data()["count"], 2);
        assert_eq!(stack.data()["value"], 25.0);
        assert!(stack.data().contains_key("iconLabel"));
    }

    #[test]
    fn vanilla_render_omits_extended_fields() {
        let world = world();
        let formulas = SimFormulas::default();
        let render = RenderContext::vanilla();
        let env = LootEnv::new(&world, &formulas, &render);

        let stack = ItemStack::new(env, InventoryEntry::new(0x12EB7, 1), RefHandle::new(CHEST), None).unwrap();
        let data = stack.data();
        assert!(data.contains_key("filterFlag"));
        assert!(!data.contains_key("formType"));
        assert!(!data.contains_key("iconLabel"));
        assert!(!data.contains_key("soulLVL"));
    }

    #[test]
    fn drop_origin_keeps_handle() {
        let world = world();
        let formulas = SimFormulas::default();
        let render = RenderContext::vanilla();
        let env = LootEnv::new(&world, &formulas, &render);

        let handle = RefHandle::new(0x300);
        let stack = ItemStack::new(env, InventoryEntry::new(0x12EB7, 1), RefHandle::new(CHEST), Some(handle)).unwrap();
        assert!(stack.origin().is_dropped());
        assert_eq!(stack.drop_ref(), Some(handle));
    }
}
