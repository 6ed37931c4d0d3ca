//! In-memory reference host.
//!
//! [`SimWorld`] serves scene data loaded from RON (or built in code) through
//! the [`World`] trait. Every inventory entry it hands out is leased from its
//! [`EntryLedger`], so tests and the inspector can check that nothing leaks.

pub mod formulas;

pub use formulas::SimFormulas;

use std::cell::RefCell;
use std::collections::HashMap;

use log::info;
use loot_data::{FormDef, FormId, RefDef, RefId, SceneDef};

use crate::entry::{EntryLedger, InventoryEntry};
use crate::host::{ActorValue, RefHandle, World};

/// Highest value an actor skill can take.
pub const SKILL_CAP: f32 = 100.0;

/// A world backed by plain maps.
#[derive(Debug, Default)]
pub struct SimWorld {
    player: RefHandle,
    forms: HashMap<FormId, FormDef>,
    refs: HashMap<RefId, RefDef>,
    ledger: EntryLedger,
    refreshed: RefCell<Vec<RefHandle>>,
}

impl SimWorld {
    /// A world with no forms, no references and a null player.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_scene(scene: SceneDef) -> Self {
        let mut world = Self::empty();
        world.player = RefHandle::new(scene.player);
        for form in scene.forms {
            world.insert_form(form);
        }
        for reference in scene.refs {
            world.insert_ref(reference);
        }
        info!("{} forms and {} references added to SimWorld", world.forms.len(), world.refs.len());
        world
    }

    pub fn set_player(&mut self, handle: RefId) {
        self.player = RefHandle::new(handle);
    }

    /// Add or replace a form definition.
    pub fn insert_form(&mut self, form: FormDef) {
        self.forms.insert(form.id, form);
    }

    /// Add or replace a placed reference.
    pub fn insert_ref(&mut self, reference: RefDef) {
        self.refs.insert(reference.handle, reference);
    }

    /// Remove a reference from the world; its handles go stale.
    pub fn despawn(&mut self, handle: RefHandle) -> Option<RefDef> {
        self.refs.remove(&handle.id())
    }

    pub fn ref_mut(&mut self, handle: RefHandle) -> Option<&mut RefDef> {
        self.refs.get_mut(&handle.id())
    }

    pub fn form_by_editor_id(&self, editor_id: &str) -> Option<&FormDef> {
        self.forms.values().find(|form| form.editor_id == editor_id)
    }

    /// All references, ordered by handle.
    pub fn references(&self) -> Vec<&RefDef> {
        let mut refs: Vec<_> = self.refs.values().collect();
        refs.sort_by_key(|reference| reference.handle);
        refs
    }

    pub fn ledger(&self) -> &EntryLedger {
        &self.ledger
    }

    /// Actors whose enchanted weapons were refreshed, in call order.
    pub fn refreshed(&self) -> Vec<RefHandle> {
        self.refreshed.borrow().clone()
    }
}

impl World for SimWorld {
    fn player(&self) -> RefHandle {
        self.player
    }

    fn resolve(&self, handle: RefHandle) -> Option<&RefDef> {
        self.refs.get(&handle.id())
    }

    fn form(&self, id: FormId) -> Option<&FormDef> {
        self.forms.get(&id)
    }

    fn inventory_entry_at(&self, container: &RefDef, index: usize) -> Option<InventoryEntry> {
        container
            .inventory
            .get(index)
            .map(|def| InventoryEntry::from_def(def, &self.ledger))
    }

    fn create_entry(&self, object: FormId, count: i32) -> InventoryEntry {
        InventoryEntry::leased(object, count, &self.ledger)
    }

    fn refresh_enchanted_weapons(&self, actor: &RefDef) {
        self.refreshed.borrow_mut().push(RefHandle::from(actor));
    }

    fn detection_level(&self, actor: &RefDef, _target: &RefDef) -> i32 {
        actor.detection
    }

    fn actor_value(&self, actor: &RefDef, value: ActorValue) -> f32 {
        match value {
            ActorValue::Pickpocket => actor.pickpocket,
        }
    }

    fn clamped_actor_value(&self, actor: &RefDef, value: ActorValue) -> f32 {
        self.actor_value(actor, value).clamp(0.0, SKILL_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loot_data::{EntryDef, FormType, RefKind};

    fn scene() -> SceneDef {
        let mut chest = RefDef::new(0x100, 0x20, RefKind::Container);
        chest.inventory = vec![EntryDef::new(0x12EB7, 1), EntryDef::new(0x12EB7, 2)];
        let mut player = RefDef::new(0x14, 0x7, RefKind::Actor { dead: false });
        player.pickpocket = 140.0;
        SceneDef {
            player: 0x14,
            forms: vec![
                FormDef::new(0x7, "Player", FormType::Npc),
                FormDef::new(0x12EB7, "IronSword", FormType::Weapon),
            ],
            refs: vec![chest, player],
        }
    }

    #[test]
    fn slot_enumeration_leases_entries() {
        let world = SimWorld::from_scene(scene());
        let chest = world.resolve(RefHandle::new(0x100)).unwrap();

        let first = world.inventory_entry_at(chest, 0).unwrap();
        let second = world.inventory_entry_at(chest, 1).unwrap();
        assert!(world.inventory_entry_at(chest, 2).is_none());
        assert_eq!(second.count(), 2);
        assert_eq!(world.ledger().outstanding(), 2);

        drop((first, second));
        assert_eq!(world.ledger().outstanding(), 0);
    }

    #[test]
    fn despawned_handles_go_stale() {
        let mut world = SimWorld::from_scene(scene());
        let chest = RefHandle::new(0x100);
        assert!(chest.get(&world).is_some());
        world.despawn(chest);
        assert!(chest.get(&world).is_none());
        assert!(RefHandle::NULL.get(&world).is_none());
    }

    #[test]
    fn player_skill_is_clamped() {
        let world = SimWorld::from_scene(scene());
        let player = world.player().get(&world).unwrap();
        assert_eq!(world.actor_value(player, ActorValue::Pickpocket), 140.0);
        assert_eq!(world.clamped_actor_value(player, ActorValue::Pickpocket), SKILL_CAP);
    }

    #[test]
    fn editor_id_lookup() {
        let world = SimWorld::from_scene(scene());
        assert_eq!(world.form_by_editor_id("IronSword").map(|form| form.id), Some(0x12EB7));
        assert!(world.form_by_editor_id("SteelSword").is_none());
    }
}
