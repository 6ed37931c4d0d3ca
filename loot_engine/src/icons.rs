//! Icon selection for loot menu entries.
//!
//! Each item gets a skin icon label and a tint. The bucket from
//! [`classify::item_type`] picks the family; keywords refine it within the
//! family, first match wins.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use loot_data::{FormDef, FormType, SoulLevel};

use crate::classify::{self, ItemType};
use crate::host::World;

/// An icon label from the skin's icon sheet and the color to tint it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub label: &'static str,
    pub color: u32,
}

impl Icon {
    const fn new(label: &'static str, color: u32) -> Self {
        Self { label, color }
    }
}

const WHITE: u32 = 0xFF_FF_FF;
const MAGIC: u32 = 0x8F_C5_FF;
const FOOD: u32 = 0xBF_E6_8A;
const POISON: u32 = 0xAD_D8_4F;
const HEALTH: u32 = 0xDB_2E_73;
const MAGICKA: u32 = 0x2E_9F_DB;
const STAMINA: u32 = 0x51_DB_2E;
const GOLD: u32 = 0xCC_CC_33;

pub const DEFAULT_ICON: Icon = Icon::new("default_misc", WHITE);

const ARROW: Icon = Icon::new("weapon_arrow", WHITE);
const SPELL_TOME: Icon = Icon::new("book_tome", MAGIC);
const BOOK: Icon = Icon::new("book_read", WHITE);
const INGREDIENT: Icon = Icon::new("ingredient", WHITE);
const KEY: Icon = Icon::new("misc_key", WHITE);
const SCROLL: Icon = Icon::new("book_scroll", MAGIC);
const TORCH: Icon = Icon::new("misc_torch", WHITE);

lazy_static! {
    static ref WEAPON_ICONS: Vec<(&'static str, Icon)> = vec![
        ("WeapTypeSword", Icon::new("weapon_sword", WHITE)),
        ("WeapTypeGreatsword", Icon::new("weapon_greatsword", WHITE)),
        ("WeapTypeWarAxe", Icon::new("weapon_waraxe", WHITE)),
        ("WeapTypeBattleaxe", Icon::new("weapon_battleaxe", WHITE)),
        ("WeapTypeMace", Icon::new("weapon_mace", WHITE)),
        ("WeapTypeWarhammer", Icon::new("weapon_hammer", WHITE)),
        ("WeapTypeDagger", Icon::new("weapon_dagger", WHITE)),
        ("WeapTypeBow", Icon::new("weapon_bow", WHITE)),
        ("WeapTypeStaff", Icon::new("weapon_staff", MAGIC)),
        ("WeapTypeCrossbow", Icon::new("weapon_crossbow", WHITE)),
    ];
    static ref ARMOR_ICONS: Vec<(&'static str, Icon)> = vec![
        ("ArmorShield", Icon::new("armor_shield", WHITE)),
        ("ArmorJewelry", Icon::new("armor_amulet", WHITE)),
        ("ArmorHeavy", Icon::new("armor_heavy", WHITE)),
        ("ArmorLight", Icon::new("armor_light", WHITE)),
        ("ArmorClothing", Icon::new("armor_clothing", WHITE)),
    ];
    static ref POTION_ICONS: Vec<(&'static str, Icon)> = vec![
        ("MagicAlchRestoreHealth", Icon::new("potion_health", HEALTH)),
        ("MagicAlchRestoreMagicka", Icon::new("potion_magic", MAGICKA)),
        ("MagicAlchRestoreStamina", Icon::new("potion_stam", STAMINA)),
        ("MagicAlchResistFire", Icon::new("potion_fire", WHITE)),
        ("MagicAlchResistFrost", Icon::new("potion_frost", WHITE)),
        ("MagicAlchResistShock", Icon::new("potion_shock", WHITE)),
    ];
    static ref MISC_ICONS: Vec<(&'static str, Icon)> = vec![
        ("VendorItemGem", Icon::new("misc_gem", WHITE)),
        ("VendorItemOreIngot", Icon::new("misc_ingot", WHITE)),
        ("VendorItemAnimalHide", Icon::new("misc_leather", WHITE)),
        ("VendorItemAnimalPart", Icon::new("misc_remains", WHITE)),
        ("VendorItemClutter", Icon::new("misc_clutter", WHITE)),
        ("VendorItemFirewood", Icon::new("misc_wood", WHITE)),
        ("VendorItemTool", Icon::new("misc_tool", WHITE)),
        ("VendorItemDaedricArtifact", Icon::new("misc_artifact", MAGIC)),
    ];
}

/// First table entry whose keyword the item carries.
fn by_keyword(table: &[(&'static str, Icon)], keywords: &BTreeSet<String>) -> Option<Icon> {
    table
        .iter()
        .find(|(keyword, _)| keywords.contains(*keyword))
        .map(|(_, icon)| *icon)
}

fn soul_gem_icon(item: &FormDef) -> Icon {
    let Some(gem) = item.as_soul_gem() else {
        return Icon::new("misc_soulgem", WHITE);
    };
    let label = match (gem.capacity, gem.soul) {
        (SoulLevel::Grand, _) if item.editor_id.contains("Black") => "soulgem_black",
        (_, SoulLevel::None) => "soulgem_empty",
        (capacity, soul) if soul < capacity => "soulgem_partial",
        _ => "soulgem_full",
    };
    Icon::new(label, MAGIC)
}

/// Choose the icon for an item definition.
pub fn select_icon(world: &dyn World, item: &FormDef) -> Icon {
    let keywords = classify::keywords(world, item);

    match classify::item_type(item) {
        ItemType::Weapon if item.form_type == FormType::Ammo => ARROW,
        ItemType::Weapon => by_keyword(&WEAPON_ICONS, &keywords).unwrap_or(Icon::new("weapon_sword", WHITE)),
        ItemType::Armor => by_keyword(&ARMOR_ICONS, &keywords).unwrap_or(Icon::new("armor_clothing", WHITE)),
        ItemType::MagicItem if item.form_type == FormType::Book => SPELL_TOME,
        ItemType::MagicItem => match item.as_alchemy() {
            Some(alchemy) if alchemy.poison => Icon::new("potion_poison", POISON),
            _ => by_keyword(&POTION_ICONS, &keywords).unwrap_or(Icon::new("potion_default", MAGIC)),
        },
        ItemType::Book => BOOK,
        ItemType::Food => Icon::new("food_default", FOOD),
        ItemType::Ingredient => INGREDIENT,
        ItemType::Key => KEY,
        ItemType::SoulGem => soul_gem_icon(item),
        ItemType::Misc if item.form_type == FormType::Light => TORCH,
        ItemType::Misc if item.editor_id == "Gold001" => Icon::new("misc_gold", GOLD),
        ItemType::Misc => by_keyword(&MISC_ICONS, &keywords).unwrap_or(DEFAULT_ICON),
        ItemType::None if item.form_type == FormType::Scroll => SCROLL,
        ItemType::None => DEFAULT_ICON,
    }
}
