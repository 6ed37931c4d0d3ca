//! Presentation payloads handed to the UI.
//!
//! A payload is a flat JSON object of primitives, plus the nested form-info
//! tree and keyword object for stacks that expose them. Field names are the
//! ones the loot menu skin reads.

use serde_json::{Map, Value};

use crate::config::ViewConfig;

/// One item stack as the UI sees it.
pub type Payload = Map<String, Value>;

pub const TEXT: &str = "text";
pub const COUNT: &str = "count";
pub const EQUIP_STATE: &str = "equipState";
pub const FILTER_FLAG: &str = "filterFlag";
pub const FAVORITE: &str = "favorite";
pub const ENABLED: &str = "enabled";
pub const SOUL_LEVEL: &str = "soulLVL";
pub const IS_STEALING: &str = "isStealing";

pub const FORM_TYPE: &str = "formType";
pub const FORM_ID: &str = "formId";
pub const ITEM_TYPE: &str = "itemType";
pub const ENCHANTMENT_TYPE: &str = "enchantmentType";
pub const WEIGHT: &str = "weight";
pub const VALUE: &str = "value";
pub const PICKPOCKET_CHANCE: &str = "pickpocketChance";
pub const KEYWORDS: &str = "keywords";
pub const FORM: &str = "form";
pub const FORMS: &str = "forms";
pub const ICON_LABEL: &str = "iconLabel";
pub const ICON_COLOR: &str = "iconColor";

/// Rendering options that shape the payload objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Attach classification data (types, enchantment state, keywords...).
    pub extended_data: bool,
    /// Attach an icon label and color.
    pub icons: bool,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            extended_data: true,
            icons: true,
        }
    }
}

impl From<&ViewConfig> for RenderContext {
    fn from(view: &ViewConfig) -> Self {
        Self {
            extended_data: view.extended_data,
            icons: view.icons,
        }
    }
}

impl RenderContext {
    /// Vanilla fields only.
    pub fn vanilla() -> Self {
        Self {
            extended_data: false,
            icons: false,
        }
    }

    /// A new empty payload object.
    pub fn create_object(&self) -> Payload {
        let mut capacity = 8;
        if self.extended_data {
            capacity += 10;
        }
        if self.icons {
            capacity += 2;
        }
        Payload::with_capacity(capacity)
    }
}
