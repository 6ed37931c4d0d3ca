//! Theft and pickpocket formulas for the reference host.

use loot_data::{FormDef, FormId, RefDef};

use crate::entry::InventoryEntry;
use crate::host::FormulaProvider;

/// Simple, predictable gameplay formulas.
///
/// * An item may be taken if its owner is the player's own NPC form or a
///   faction the player belongs to.
/// * The steal value of a stack is its total value.
/// * Pickpocket chance starts at `base_chance`, moves by half the skill
///   difference, drops by one point per `value_per_point` of steal value and
///   two points per unit of weight, and is halved when the player is
///   detected. The result is clamped to `0..=max_chance`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimFormulas {
    pub base_chance: f32,
    pub value_per_point: f32,
    pub max_chance: i32,
}

impl Default for SimFormulas {
    fn default() -> Self {
        Self {
            base_chance: 50.0,
            value_per_point: 10.0,
            max_chance: 90,
        }
    }
}

impl FormulaProvider for SimFormulas {
    fn is_allowed_to_take(&self, player: &RefDef, owner: FormId, _value: i32) -> bool {
        owner == player.base || player.factions.contains(&owner)
    }

    fn steal_value(&self, entry: &InventoryEntry, item: &FormDef, count: i32, _is_pickpocket: bool) -> i32 {
        entry.value(item).max(0).saturating_mul(count.max(0))
    }

    fn pickpocket_success(
        &self,
        player_skill: f32,
        victim_skill: f32,
        steal_value: i32,
        weight: f32,
        _player: &RefDef,
        _victim: &RefDef,
        detected: bool,
        _item: &FormDef,
    ) -> i32 {
        let mut chance = self.base_chance + (player_skill - victim_skill) / 2.0;
        chance -= steal_value as f32 / self.value_per_point;
        chance -= weight * 2.0;
        if detected {
            chance /= 2.0;
        }
        (chance.round() as i32).clamp(0, self.max_chance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loot_data::{FormType, RefKind};

    fn player() -> RefDef {
        let mut player = RefDef::new(0x14, 0x7, RefKind::Actor { dead: false });
        player.factions = vec![0x5C84E];
        player
    }

    #[test]
    fn own_and_faction_items_are_allowed() {
        let formulas = SimFormulas::default();
        let player = player();
        assert!(formulas.is_allowed_to_take(&player, 0x7, 10));
        assert!(formulas.is_allowed_to_take(&player, 0x5C84E, 10));
        assert!(!formulas.is_allowed_to_take(&player, 0x1BB9E, 10));
    }

    #[test]
    fn steal_value_covers_the_stack() {
        let formulas = SimFormulas::default();
        let gem = FormDef::new(0x63B42, "GemRuby", FormType::Misc).with_value(100);
        let entry = InventoryEntry::new(gem.id, 3);
        assert_eq!(formulas.steal_value(&entry, &gem, 3, true), 300);
    }

    #[test]
    fn pickpocket_chance_is_clamped() {
        let formulas = SimFormulas::default();
        let player = player();
        let victim = RefDef::new(0x200, 0x1BB9E, RefKind::Actor { dead: false });
        let item = FormDef::new(0xF, "Gold001", FormType::Misc);

        let easy = formulas.pickpocket_success(100.0, 0.0, 0, 0.0, &player, &victim, false, &item);
        assert_eq!(easy, 90);

        let hard = formulas.pickpocket_success(0.0, 100.0, 5000, 10.0, &player, &victim, true, &item);
        assert_eq!(hard, 0);

        let spotted = formulas.pickpocket_success(50.0, 50.0, 100, 0.0, &player, &victim, true, &item);
        assert_eq!(spotted, 20);
    }
}
