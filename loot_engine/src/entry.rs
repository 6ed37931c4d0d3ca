//! Owned inventory entries.
//!
//! An [`InventoryEntry`] is the engine's copy of one inventory stack. Entries
//! handed out by the host carry an [`EntryLease`] so the host can account for
//! every entry it allocated; the lease is returned when the entry is dropped,
//! whichever path drops it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use loot_data::{EntryDef, FormDef, FormId, SoulLevel};

/// Counts the inventory entries a host has handed out and not yet had back.
#[derive(Debug, Clone, Default)]
pub struct EntryLedger {
    outstanding: Arc<AtomicUsize>,
}

impl EntryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lease(&self) -> EntryLease {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        EntryLease {
            outstanding: Arc::clone(&self.outstanding),
        }
    }

    /// Number of leased entries still alive.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }
}

/// Proof of one allocation against an [`EntryLedger`]; released on drop.
#[derive(Debug)]
pub struct EntryLease {
    outstanding: Arc<AtomicUsize>,
}

impl Drop for EntryLease {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Per-stack data layered on top of the base form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryExtras {
    /// Ownership override; wins over the container's owner.
    pub owner: Option<FormId>,
    pub worn: bool,
    pub worn_left: bool,
    pub favorite: bool,
    pub quest_item: bool,
    pub soul: Option<SoulLevel>,
    pub name: Option<String>,
}

impl From<&EntryDef> for EntryExtras {
    fn from(def: &EntryDef) -> Self {
        Self {
            owner: def.owner,
            worn: def.worn,
            worn_left: def.worn_left,
            favorite: def.favorite,
            quest_item: def.quest_item,
            soul: def.soul,
            name: def.name.clone(),
        }
    }
}

/// One inventory stack, exclusively owned by whoever holds it.
#[derive(Debug)]
pub struct InventoryEntry {
    object: FormId,
    count: i32,
    extras: EntryExtras,
    lease: Option<EntryLease>,
}

impl InventoryEntry {
    /// An entry with no host accounting attached.
    pub fn new(object: FormId, count: i32) -> Self {
        Self {
            object,
            count,
            extras: EntryExtras::default(),
            lease: None,
        }
    }

    /// An entry accounted against `ledger` until dropped.
    pub fn leased(object: FormId, count: i32, ledger: &EntryLedger) -> Self {
        Self {
            lease: Some(ledger.lease()),
            ..Self::new(object, count)
        }
    }

    pub fn from_def(def: &EntryDef, ledger: &EntryLedger) -> Self {
        Self::leased(def.form, def.count, ledger).with_extras(EntryExtras::from(def))
    }

    #[must_use]
    pub fn with_extras(mut self, extras: EntryExtras) -> Self {
        self.extras = extras;
        self
    }

    pub fn object(&self) -> FormId {
        self.object
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn extras(&self) -> &EntryExtras {
        &self.extras
    }

    pub fn owner(&self) -> Option<FormId> {
        self.extras.owner
    }

    pub fn is_leased(&self) -> bool {
        self.lease.is_some()
    }

    /// Display name: a custom name on the stack, else the form's name.
    pub fn display_name<'a>(&'a self, item: &'a FormDef) -> &'a str {
        self.extras.name.as_deref().unwrap_or(&item.name)
    }

    /// Value of a single item from this stack.
    pub fn value(&self, item: &FormDef) -> i32 {
        item.value
    }

    /// Soul held by this stack: a captured soul, else whatever the gem ships with.
    pub fn soul_level(&self, item: &FormDef) -> SoulLevel {
        self.extras
            .soul
            .or_else(|| item.as_soul_gem().map(|gem| gem.soul))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loot_data::{FormDetail, FormType, SoulGemData};

    #[test]
    fn lease_is_returned_when_entry_drops() {
        let ledger = EntryLedger::new();
        let first = InventoryEntry::leased(0x12EB7, 1, &ledger);
        let second = InventoryEntry::leased(0x12EB7, 2, &ledger);
        assert_eq!(ledger.outstanding(), 2);

        drop(first);
        assert_eq!(ledger.outstanding(), 1);
        drop(second);
        assert_eq!(ledger.outstanding(), 0);
    }

    #[test]
    fn unleased_entries_do_not_touch_ledger() {
        let ledger = EntryLedger::new();
        let entry = InventoryEntry::new(0x12EB7, 1);
        assert!(!entry.is_leased());
        assert_eq!(ledger.outstanding(), 0);
    }

    #[test]
    fn from_def_copies_extras() {
        let ledger = EntryLedger::new();
        let def = EntryDef {
            form: 0x12EB7,
            count: 3,
            owner: Some(0x1BB9E),
            favorite: true,
            name: Some("Fine Iron Sword".into()),
            ..EntryDef::default()
        };
        let entry = InventoryEntry::from_def(&def, &ledger);
        assert_eq!(entry.count(), 3);
        assert_eq!(entry.owner(), Some(0x1BB9E));
        assert!(entry.extras().favorite);
        assert!(entry.is_leased());

        let sword = FormDef::new(0x12EB7, "IronSword", FormType::Weapon).with_name("Iron Sword");
        assert_eq!(entry.display_name(&sword), "Fine Iron Sword");
    }

    #[test]
    fn soul_level_prefers_captured_soul() {
        let gem = FormDef::new(0x2E4E2, "SoulGemGrandFilled", FormType::SoulGem).with_detail(FormDetail::SoulGem(
            SoulGemData {
                capacity: SoulLevel::Grand,
                soul: SoulLevel::Grand,
            },
        ));
        let plain = InventoryEntry::new(gem.id, 1);
        assert_eq!(plain.soul_level(&gem), SoulLevel::Grand);

        let captured = InventoryEntry::new(gem.id, 1).with_extras(EntryExtras {
            soul: Some(SoulLevel::Petty),
            ..EntryExtras::default()
        });
        assert_eq!(captured.soul_level(&gem), SoulLevel::Petty);
    }
}
