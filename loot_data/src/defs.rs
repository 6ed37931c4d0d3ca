use serde::{Deserialize, Serialize};

/// Identifier of a static form (item, keyword, enchantment, NPC, faction...).
pub type FormId = u32;

/// Identifier of a placed object reference in a scene.
pub type RefId = u32;

/// Complete scene data loaded by the reference host.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SceneDef {
    /// Handle of the player's actor reference.
    pub player: RefId,
    #[serde(default)]
    pub forms: Vec<FormDef>,
    #[serde(default)]
    pub refs: Vec<RefDef>,
}

/// Structural kind of a form definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    Armor,
    Weapon,
    Ammo,
    Book,
    Ingredient,
    Misc,
    Light,
    KeyMaster,
    AlchemyItem,
    SoulGem,
    Scroll,
    Enchantment,
    Keyword,
    FormList,
    Npc,
    Faction,
    Container,
}

impl FormType {
    /// Numeric code reported to the UI as `formType`.
    ///
    /// Matches the host's record type numbering so skins written against the
    /// host menus keep working.
    pub fn code(self) -> u8 {
        match self {
            FormType::Keyword => 4,
            FormType::Faction => 11,
            FormType::Enchantment => 21,
            FormType::Scroll => 23,
            FormType::Armor => 26,
            FormType::Book => 27,
            FormType::Container => 28,
            FormType::Ingredient => 30,
            FormType::Light => 31,
            FormType::Misc => 32,
            FormType::Weapon => 41,
            FormType::Ammo => 42,
            FormType::Npc => 43,
            FormType::KeyMaster => 45,
            FormType::AlchemyItem => 46,
            FormType::SoulGem => 52,
            FormType::FormList => 91,
        }
    }

    /// Returns true if forms of this type carry a keyword list.
    pub fn supports_keywords(self) -> bool {
        !matches!(
            self,
            FormType::Light | FormType::FormList | FormType::Faction | FormType::Container | FormType::Keyword
        )
    }

    /// Returns true if forms of this type can be placed in an inventory.
    pub fn is_inventory_object(self) -> bool {
        matches!(
            self,
            FormType::Armor
                | FormType::Weapon
                | FormType::Ammo
                | FormType::Book
                | FormType::Ingredient
                | FormType::Misc
                | FormType::Light
                | FormType::KeyMaster
                | FormType::AlchemyItem
                | FormType::SoulGem
                | FormType::Scroll
        )
    }
}

/// Filled or empty state of a soul gem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum SoulLevel {
    #[default]
    None,
    Petty,
    Lesser,
    Common,
    Greater,
    Grand,
}

impl SoulLevel {
    /// Numeric soul level reported to the UI as `soulLVL`.
    pub fn code(self) -> u8 {
        match self {
            SoulLevel::None => 0,
            SoulLevel::Petty => 1,
            SoulLevel::Lesser => 2,
            SoulLevel::Common => 3,
            SoulLevel::Greater => 4,
            SoulLevel::Grand => 5,
        }
    }
}

/// Armor and weapon data: the innate enchantment, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnchantableData {
    #[serde(default)]
    pub enchantment: Option<FormId>,
}

/// Book data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BookData {
    /// Reading the book teaches a spell (a spell tome).
    #[serde(default)]
    pub teaches_spell: bool,
}

/// Potion, poison and food data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AlchemyData {
    #[serde(default)]
    pub food: bool,
    #[serde(default)]
    pub poison: bool,
}

/// Soul gem data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SoulGemData {
    pub capacity: SoulLevel,
    /// Soul the gem ships with (pre-filled gems).
    #[serde(default)]
    pub soul: SoulLevel,
}

/// Enchantment data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnchantmentData {
    /// Templated enchantments point at the base enchantment they were made from.
    #[serde(default)]
    pub base: Option<FormId>,
}

/// A named list of other forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListData {
    pub forms: Vec<FormId>,
}

/// Subtype-specific representation of a form.
///
/// Nothing forces the detail to agree with [`FormDef::form_type`]; consumers
/// downcast through the `as_*` accessors and must cope with a miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormDetail {
    Enchantable(EnchantableData),
    Book(BookData),
    Alchemy(AlchemyData),
    SoulGem(SoulGemData),
    Enchantment(EnchantmentData),
    List(ListData),
}

/// A static form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDef {
    pub id: FormId,
    #[serde(default)]
    pub editor_id: String,
    #[serde(default)]
    pub name: String,
    pub form_type: FormType,
    #[serde(default)]
    pub weight: f32,
    #[serde(default)]
    pub value: i32,
    /// The "known" record flag (enchantments the player has learned).
    #[serde(default)]
    pub known: bool,
    #[serde(default)]
    pub keywords: Vec<FormId>,
    #[serde(default)]
    pub detail: Option<FormDetail>,
}

impl FormDef {
    pub fn new(id: FormId, editor_id: impl Into<String>, form_type: FormType) -> Self {
        Self {
            id,
            editor_id: editor_id.into(),
            name: String::new(),
            form_type,
            weight: 0.0,
            value: 0,
            known: false,
            keywords: Vec::new(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: &[FormId]) -> Self {
        self.keywords = keywords.to_vec();
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: FormDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    #[must_use]
    pub fn known(mut self) -> Self {
        self.known = true;
        self
    }

    /// Returns true if the keyword id is attached to this form.
    pub fn has_keyword(&self, keyword: FormId) -> bool {
        self.keywords.contains(&keyword)
    }

    pub fn as_enchantable(&self) -> Option<&EnchantableData> {
        match &self.detail {
            Some(FormDetail::Enchantable(data)) => Some(data),
            _ => None,
        }
    }

    pub fn as_book(&self) -> Option<&BookData> {
        match &self.detail {
            Some(FormDetail::Book(data)) => Some(data),
            _ => None,
        }
    }

    pub fn as_alchemy(&self) -> Option<&AlchemyData> {
        match &self.detail {
            Some(FormDetail::Alchemy(data)) => Some(data),
            _ => None,
        }
    }

    pub fn as_soul_gem(&self) -> Option<&SoulGemData> {
        match &self.detail {
            Some(FormDetail::SoulGem(data)) => Some(data),
            _ => None,
        }
    }

    pub fn as_enchantment(&self) -> Option<&EnchantmentData> {
        match &self.detail {
            Some(FormDetail::Enchantment(data)) if self.form_type == FormType::Enchantment => Some(data),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListData> {
        match &self.detail {
            Some(FormDetail::List(data)) if self.form_type == FormType::FormList => Some(data),
            _ => None,
        }
    }
}

/// What a placed reference is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefKind {
    /// Chests, barrels, sacks.
    Container,
    /// NPCs and the player. Dead actors keep their inventory as a corpse.
    Actor { dead: bool },
    /// A loose item in the world (used for dropped-item piles).
    Item,
}

/// A placed object reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefDef {
    pub handle: RefId,
    /// The base form this reference was placed from.
    pub base: FormId,
    pub kind: RefKind,
    /// Static owner (NPC or faction) of the reference, if any.
    #[serde(default)]
    pub owner: Option<FormId>,
    /// Stack count of a loose item reference.
    #[serde(default = "default_count")]
    pub count: i32,
    /// Enchantment attached to this particular reference.
    #[serde(default)]
    pub enchantment: Option<FormId>,
    #[serde(default)]
    pub inventory: Vec<EntryDef>,
    /// Loose item references attached to this reference (dropped on death, etc).
    #[serde(default)]
    pub dropped: Vec<RefId>,
    /// Pickpocket skill of an actor.
    #[serde(default)]
    pub pickpocket: f32,
    /// Detection level this actor currently has on the player.
    #[serde(default)]
    pub detection: i32,
    /// Factions an actor belongs to.
    #[serde(default)]
    pub factions: Vec<FormId>,
}

impl RefDef {
    pub fn new(handle: RefId, base: FormId, kind: RefKind) -> Self {
        Self {
            handle,
            base,
            kind,
            owner: None,
            count: default_count(),
            enchantment: None,
            inventory: Vec::new(),
            dropped: Vec::new(),
            pickpocket: 0.0,
            detection: 0,
            factions: Vec::new(),
        }
    }

    pub fn is_actor(&self) -> bool {
        matches!(self.kind, RefKind::Actor { .. })
    }

    pub fn is_living_actor(&self) -> bool {
        matches!(self.kind, RefKind::Actor { dead: false })
    }
}

/// One stack in a reference's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EntryDef {
    pub form: FormId,
    #[serde(default = "default_count")]
    pub count: i32,
    /// Ownership override for this stack.
    #[serde(default)]
    pub owner: Option<FormId>,
    #[serde(default)]
    pub worn: bool,
    #[serde(default)]
    pub worn_left: bool,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub quest_item: bool,
    /// Soul captured in this stack (soul gems).
    #[serde(default)]
    pub soul: Option<SoulLevel>,
    /// Player-given or tempered display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl EntryDef {
    pub fn new(form: FormId, count: i32) -> Self {
        Self {
            form,
            count,
            ..Self::default()
        }
    }
}

fn default_count() -> i32 {
    1
}
