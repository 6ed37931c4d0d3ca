#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const LOOT_ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod classify;
pub mod config;
pub mod entry;
pub mod error;
pub mod host;
pub mod icons;
pub mod known_forms;
pub mod loader;
pub mod payload;
pub mod recent_loot;
pub mod sim;
pub mod snapshot;
pub mod stack;
pub mod style;

// Re-exports for convenience
pub use classify::{EnchantmentType, EquipState, FormInfo, ItemType};
pub use config::{LootConfig, load_config};
pub use entry::{EntryExtras, EntryLedger, InventoryEntry};
pub use error::WidgetError;
pub use host::{ActorValue, FormulaProvider, LootEnv, RefHandle, World};
pub use loader::load_scene;
pub use payload::{Payload, RenderContext};
pub use recent_loot::{LootWidget, RecentLoot};
pub use snapshot::load_container_inventory;
pub use stack::{ItemStack, StackOrigin};
