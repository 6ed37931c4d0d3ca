//! Classification of item stacks.
//!
//! Everything here is a pure function of the stack's form, its entry, the
//! references it came from, and whatever the host reports. No state is kept
//! between calls apart from the process-wide keyword cache in
//! [`crate::known_forms`].

use std::collections::BTreeSet;

use log::{debug, warn};
use loot_data::{FormDef, FormId, FormType, RefDef};
use serde_json::{Map, Value};
use variantly::Variantly;

use crate::entry::InventoryEntry;
use crate::host::{ActorValue, LootEnv, RefHandle, World};
use crate::known_forms;
use crate::payload;

/// Coarse category the loot menu sorts and filters by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Variantly)]
pub enum ItemType {
    None,
    Armor,
    Weapon,
    Book,
    Ingredient,
    Misc,
    Key,
    Food,
    MagicItem,
    SoulGem,
}

impl ItemType {
    pub fn code(self) -> u8 {
        match self {
            ItemType::None => 0,
            ItemType::Armor => 1,
            ItemType::Weapon => 2,
            ItemType::Book => 3,
            ItemType::Ingredient => 4,
            ItemType::Misc => 5,
            ItemType::Key => 6,
            ItemType::Food => 7,
            ItemType::MagicItem => 8,
            ItemType::SoulGem => 9,
        }
    }

    /// Inventory tab bit the item is listed under.
    pub fn filter_flag(self) -> u32 {
        match self {
            ItemType::None => 0,
            ItemType::Weapon => 0x1,
            ItemType::Armor => 0x2,
            ItemType::MagicItem => 0x4,
            ItemType::Food => 0x8,
            ItemType::Ingredient => 0x10,
            ItemType::Book => 0x20,
            ItemType::Key => 0x40,
            ItemType::Misc | ItemType::SoulGem => 0x80,
        }
    }
}

/// What the player knows about an item's enchantment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnchantmentType {
    None,
    Known,
    Unknown,
    CannotDisenchant,
}

impl EnchantmentType {
    pub fn code(self) -> u8 {
        match self {
            EnchantmentType::None => 0,
            EnchantmentType::Known => 1,
            EnchantmentType::Unknown => 2,
            EnchantmentType::CannotDisenchant => 3,
        }
    }
}

/// Which hand or slot a stack is equipped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipState {
    None,
    Worn,
    LeftHand,
    RightHand,
    BothHands,
}

impl EquipState {
    pub fn code(self) -> u8 {
        match self {
            EquipState::None => 0,
            EquipState::Worn => 1,
            EquipState::LeftHand => 2,
            EquipState::RightHand => 3,
            EquipState::BothHands => 4,
        }
    }
}

/// Bucket a form by its structural kind, refining books and alchemy items
/// through their subtype data when it is present.
pub fn item_type(item: &FormDef) -> ItemType {
    match item.form_type {
        FormType::Armor => ItemType::Armor,
        FormType::Weapon | FormType::Ammo => ItemType::Weapon,
        FormType::Book => match item.as_book() {
            Some(book) if book.teaches_spell => ItemType::MagicItem,
            Some(_) => ItemType::Book,
            None => {
                debug!("book {:08X} has no book data; classified as a plain book", item.id);
                ItemType::Book
            },
        },
        FormType::Ingredient => ItemType::Ingredient,
        FormType::Misc | FormType::Light => ItemType::Misc,
        FormType::KeyMaster => ItemType::Key,
        FormType::AlchemyItem => match item.as_alchemy() {
            Some(alchemy) if alchemy.food => ItemType::Food,
            Some(_) => ItemType::MagicItem,
            None => {
                debug!("alchemy item {:08X} has no alchemy data; classified as magic", item.id);
                ItemType::MagicItem
            },
        },
        FormType::SoulGem => ItemType::SoulGem,
        _ => ItemType::None,
    }
}

fn enchantment_form(world: &dyn World, id: FormId) -> Option<&FormDef> {
    world.form(id).filter(|form| form.form_type == FormType::Enchantment)
}

/// Resolve the enchantment knowledge state of an item.
///
/// An enchantment attached to the dropped reference replaces the form's own.
/// The enchantment's own keyword and known flag are checked first; its base
/// enchantment is consulted only when both come up empty.
pub fn enchantment_type(world: &dyn World, item: &FormDef, drop_ref: Option<&RefDef>) -> EnchantmentType {
    let disallow = known_forms::disallow_enchanting(world);

    let mut enchantment = item
        .as_enchantable()
        .and_then(|data| data.enchantment)
        .and_then(|id| enchantment_form(world, id));

    if let Some(id) = drop_ref.and_then(|reference| reference.enchantment) {
        enchantment = enchantment_form(world, id);
    }

    let Some(enchantment) = enchantment else {
        return EnchantmentType::None;
    };

    let forbids_learning = |form: &FormDef| disallow.is_some_and(|keyword| form.has_keyword(keyword));

    if forbids_learning(enchantment) {
        return EnchantmentType::CannotDisenchant;
    }
    if enchantment.known {
        return EnchantmentType::Known;
    }

    let base = enchantment
        .as_enchantment()
        .and_then(|data| data.base)
        .and_then(|id| enchantment_form(world, id));
    if let Some(base) = base {
        if forbids_learning(base) {
            return EnchantmentType::CannotDisenchant;
        }
        if base.known {
            return EnchantmentType::Known;
        }
    }

    EnchantmentType::Unknown
}

pub fn equip_state(entry: &InventoryEntry, item: &FormDef) -> EquipState {
    let extras = entry.extras();
    match item.form_type {
        FormType::Weapon => match (extras.worn, extras.worn_left) {
            (true, true) => EquipState::BothHands,
            (true, false) => EquipState::RightHand,
            (false, true) => EquipState::LeftHand,
            (false, false) => EquipState::None,
        },
        _ if extras.worn || extras.worn_left => EquipState::Worn,
        _ => EquipState::None,
    }
}

/// Owner of a stack: the stack's own override, else the actor holding it,
/// else the container's static owner.
pub fn resolve_owner(entry: &InventoryEntry, container: Option<&RefDef>) -> Option<FormId> {
    entry.owner().or_else(|| {
        let container = container?;
        if container.is_actor() {
            Some(container.base)
        } else {
            container.owner
        }
    })
}

/// Whether taking the stack counts as stealing.
///
/// `None` when the container is the player: there is nothing to report.
pub fn is_stealing(env: &LootEnv<'_>, entry: &InventoryEntry, item: &FormDef, container: RefHandle) -> Option<bool> {
    if container == env.world.player() {
        return None;
    }

    let Some(owner) = resolve_owner(entry, container.get(env.world)) else {
        return Some(false);
    };

    let Some(player) = env.player() else {
        warn!("player reference did not resolve; {:08X} reported as not stolen", item.id);
        return Some(false);
    };

    Some(!env.formulas.is_allowed_to_take(player, owner, entry.value(item)))
}

/// Pickpocket success chance for the whole stack; `None` unless the
/// container is a living actor.
pub fn pickpocket_chance(
    env: &LootEnv<'_>,
    entry: &InventoryEntry,
    item: &FormDef,
    container: RefHandle,
) -> Option<i32> {
    let world = env.world;
    let victim = container.get(world).filter(|reference| reference.is_living_actor())?;
    let player = env.player()?;

    let count = entry.count();
    let value = env.formulas.steal_value(entry, item, count, true);
    let detected = world.detection_level(victim, player) != 0;
    let player_skill = world.clamped_actor_value(player, ActorValue::Pickpocket);
    let victim_skill = world.actor_value(victim, ActorValue::Pickpocket);

    Some(env.formulas.pickpocket_success(
        player_skill,
        victim_skill,
        value,
        item.weight,
        player,
        victim,
        detected,
        item,
    ))
}

/// Editor ids of the item's keywords. Unresolvable keywords and keywords
/// without an editor id are skipped.
pub fn keywords(world: &dyn World, item: &FormDef) -> BTreeSet<String> {
    if !item.form_type.supports_keywords() {
        return BTreeSet::new();
    }

    item.keywords
        .iter()
        .filter_map(|id| world.form(*id))
        .filter(|keyword| keyword.form_type == FormType::Keyword)
        .map(|keyword| keyword.editor_id.as_str())
        .filter(|editor_id| !editor_id.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Keyword set as the UI object `{ editorId: true }`.
pub fn keywords_value(keywords: &BTreeSet<String>) -> Value {
    Value::Object(
        keywords
            .iter()
            .map(|keyword| (keyword.clone(), Value::Bool(true)))
            .collect(),
    )
}

/// Type and id of a form, with the contents of form lists expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    pub form_type: FormType,
    pub form_id: FormId,
    /// Present only for form lists.
    pub forms: Option<Vec<FormInfo>>,
}

impl FormInfo {
    pub fn to_value(&self) -> Value {
        let mut data = Map::new();
        data.insert(payload::FORM_TYPE.into(), self.form_type.code().into());
        data.insert(payload::FORM_ID.into(), self.form_id.into());
        if let Some(forms) = &self.forms {
            data.insert(
                payload::FORMS.into(),
                Value::Array(forms.iter().map(FormInfo::to_value).collect()),
            );
        }
        Value::Object(data)
    }
}

/// Build the form info tree for `form`.
///
/// Lists are expanded one level of recursion per nesting level with no depth
/// limit; scenes are validated to be free of list cycles on load.
pub fn form_info(world: &dyn World, form: &FormDef) -> FormInfo {
    let forms = form.as_list().map(|list| {
        list.forms
            .iter()
            .filter_map(|id| world.form(*id))
            .map(|child| form_info(world, child))
            .collect()
    });

    FormInfo {
        form_type: form.form_type,
        form_id: form.id,
        forms,
    }
}

/// Round half away from zero to the nearest whole number.
pub fn round_value(value: f64) -> f64 {
    if value >= 0.0 {
        (value + 0.5).floor()
    } else {
        (value - 0.5).ceil()
    }
}

/// Round to two decimal places for display.
///
/// Returns `None` for non-positive values unless `allow_negative` is set.
pub fn truncate_precision(value: f64, allow_negative: bool) -> Option<f64> {
    if value <= 0.0 && !allow_negative {
        return None;
    }

    Some(round_value(shift_decimal(value, 2)) / 100.0)
}

/// Multiply by a power of ten on the decimal representation, so 1.005 becomes
/// exactly 100.5 rather than the nearest binary product just below it.
fn shift_decimal(value: f64, places: i32) -> f64 {
    format!("{value}e{places}")
        .parse()
        .unwrap_or_else(|_| value * 10f64.powi(places))
}
