//! The recent-loot notification widget.
//!
//! Whenever the player picks something up, the host calls
//! [`RecentLoot::add_message`]. The item is described with the same payload the
//! loot menu uses and handed to the widget, which owns the message queue,
//! its timing and its animation.

use log::{debug, error};
use loot_data::FormId;
use serde_json::Value;

use crate::config::RecentLootConfig;
use crate::entry::EntryExtras;
use crate::error::WidgetError;
use crate::host::LootEnv;
use crate::stack::ItemStack;

/// A UI object that accepts method calls with JSON arguments.
pub trait LootWidget {
    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<(), WidgetError>;
}

/// Drives a [`LootWidget`] showing the items the player just picked up.
#[derive(Debug)]
pub struct RecentLoot<W> {
    widget: W,
    config: RecentLootConfig,
}

impl<W: LootWidget> RecentLoot<W> {
    pub fn new(widget: W, config: RecentLootConfig) -> Self {
        Self { widget, config }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn config(&self) -> &RecentLootConfig {
        &self.config
    }

    /// Push the settings to the widget.
    pub fn initialize(&mut self) {
        let args = [
            Value::from(self.config.max_messages),
            Value::from(self.config.message_duration),
            Value::from(self.config.opacity * 100.0),
            Value::from(self.config.direction.code()),
        ];
        self.call("loadConfig", &args);
    }

    /// Per-frame tick.
    pub fn update(&mut self, _delta_time: f32) {
        self.call("update", &[]);
    }

    pub fn dispose(&mut self) {
        self.call("cleanUp", &[]);
    }

    /// Show `count` of `object`, just added to the player's inventory.
    ///
    /// `extras` carries the per-stack data of the picked up item, if it had
    /// any. A widget failure is logged and the message dropped.
    pub fn add_message(&mut self, env: LootEnv<'_>, object: FormId, name: &str, count: u32, extras: Option<EntryExtras>) {
        if !self.config.enabled {
            return;
        }

        let mut entry = env.world.create_entry(object, i32::try_from(count).unwrap_or(i32::MAX));
        if let Some(extras) = extras {
            entry = entry.with_extras(extras);
        }

        let Some(stack) = ItemStack::new(env, entry, env.world.player(), None) else {
            debug!("no message for {object:08X}: nothing to describe");
            return;
        };

        let args = [
            Value::from(name),
            Value::from(count),
            Value::Null,
            Value::Null,
            Value::Object(stack.data().clone()),
        ];
        self.call("addMessage", &args);
    }

    fn call(&mut self, method: &str, args: &[Value]) {
        if let Err(e) = self.widget.invoke(method, args) {
            error!("recent loot widget call '{method}' failed: {e}");
        }
    }
}
