//! Host forms the engine looks up by their fixed ids.

use std::sync::OnceLock;

use loot_data::{FormDef, FormId, FormType};

use crate::host::World;

/// A form every host ships with at a fixed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownForm {
    pub id: FormId,
    pub editor_id: &'static str,
    pub form_type: FormType,
}

impl KnownForm {
    /// Look the form up, rejecting a form of the wrong type at that id.
    pub fn lookup<'w>(&self, world: &'w dyn World) -> Option<&'w FormDef> {
        world.form(self.id).filter(|form| form.form_type == self.form_type)
    }
}

/// Keyword on enchantments that can never be learned by disenchanting.
pub const MAGIC_DISALLOW_ENCHANTING: KnownForm = KnownForm {
    id: 0x000C_27BD,
    editor_id: "MagicDisallowEnchanting",
    form_type: FormType::Keyword,
};

static DISALLOW_ENCHANTING: OnceLock<FormId> = OnceLock::new();

/// Id of the disallow-enchanting keyword, looked up once per process.
///
/// A failed lookup is not cached, so a host that loads its data late is
/// picked up on the next call.
pub fn disallow_enchanting(world: &dyn World) -> Option<FormId> {
    if let Some(id) = DISALLOW_ENCHANTING.get() {
        return Some(*id);
    }
    let found = MAGIC_DISALLOW_ENCHANTING.lookup(world)?.id;
    Some(*DISALLOW_ENCHANTING.get_or_init(|| found))
}
