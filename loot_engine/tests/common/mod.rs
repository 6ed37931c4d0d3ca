#![allow(dead_code)]

use loot_data::{EntryDef, FormDef, FormType, RefDef, RefKind};
use loot_engine::known_forms::MAGIC_DISALLOW_ENCHANTING;
use loot_engine::sim::SimWorld;

pub const PLAYER: u32 = 0x14;
pub const CHEST: u32 = 0x100;
pub const UNOWNED_CHEST: u32 = 0x101;
pub const MERCHANT: u32 = 0x200;
pub const CORPSE: u32 = 0x300;
pub const DROPPED_SWORD_A: u32 = 0x301;
pub const DROPPED_SWORD_B: u32 = 0x302;

pub const PLAYER_NPC: u32 = 0x7;
pub const MERCHANT_NPC: u32 = 0x1BB9E;
pub const BANDIT_NPC: u32 = 0x13BBF;
pub const PLAYER_FACTION: u32 = 0xDB1;
pub const CHEST_BASE: u32 = 0x20;

pub const IRON_SWORD: u32 = 0x12EB7;
pub const RUBY: u32 = 0x63B42;
pub const SOUL_GEM: u32 = 0x2E4E3;

pub fn entry(form: u32, count: i32) -> EntryDef {
    EntryDef::new(form, count)
}

/// A small market: a merchant's chest, the merchant, an unowned chest and a
/// bandit corpse with two identical swords lying next to it.
pub fn market() -> SimWorld {
    let mut world = SimWorld::empty();

    world.insert_form(FormDef::new(
        MAGIC_DISALLOW_ENCHANTING.id,
        MAGIC_DISALLOW_ENCHANTING.editor_id,
        FormType::Keyword,
    ));
    world.insert_form(FormDef::new(PLAYER_NPC, "Player", FormType::Npc));
    world.insert_form(FormDef::new(MERCHANT_NPC, "Belethor", FormType::Npc));
    world.insert_form(FormDef::new(BANDIT_NPC, "BanditMelee", FormType::Npc));
    world.insert_form(FormDef::new(PLAYER_FACTION, "PlayerFaction", FormType::Faction));
    world.insert_form(FormDef::new(CHEST_BASE, "MerchantChest", FormType::Container));
    world.insert_form(
        FormDef::new(IRON_SWORD, "IronSword", FormType::Weapon)
            .with_name("Iron Sword")
            .with_weight(9.0)
            .with_value(25),
    );
    world.insert_form(
        FormDef::new(RUBY, "GemRuby", FormType::Misc)
            .with_name("Ruby")
            .with_weight(0.1)
            .with_value(100),
    );
    world.insert_form(
        FormDef::new(SOUL_GEM, "SoulGemGreater", FormType::SoulGem)
            .with_name("Greater Soul Gem")
            .with_value(200),
    );

    let mut player = RefDef::new(PLAYER, PLAYER_NPC, RefKind::Actor { dead: false });
    player.pickpocket = 80.0;
    player.factions = vec![PLAYER_FACTION];
    player.inventory = vec![entry(IRON_SWORD, 1)];
    world.insert_ref(player);
    world.set_player(PLAYER);

    let mut chest = RefDef::new(CHEST, CHEST_BASE, RefKind::Container);
    chest.owner = Some(MERCHANT_NPC);
    chest.inventory = vec![entry(IRON_SWORD, 1), entry(RUBY, 2), entry(SOUL_GEM, 1)];
    world.insert_ref(chest);

    let mut unowned = RefDef::new(UNOWNED_CHEST, CHEST_BASE, RefKind::Container);
    unowned.inventory = vec![entry(RUBY, 1)];
    world.insert_ref(unowned);

    let mut merchant = RefDef::new(MERCHANT, MERCHANT_NPC, RefKind::Actor { dead: false });
    merchant.pickpocket = 20.0;
    merchant.inventory = vec![entry(RUBY, 1)];
    world.insert_ref(merchant);

    let mut corpse = RefDef::new(CORPSE, BANDIT_NPC, RefKind::Actor { dead: true });
    corpse.inventory = vec![entry(RUBY, 1)];
    corpse.dropped = vec![DROPPED_SWORD_A, DROPPED_SWORD_B];
    world.insert_ref(corpse);

    world.insert_ref(RefDef::new(DROPPED_SWORD_A, IRON_SWORD, RefKind::Item));
    world.insert_ref(RefDef::new(DROPPED_SWORD_B, IRON_SWORD, RefKind::Item));

    world
}
