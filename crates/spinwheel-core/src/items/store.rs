//! The two item lists and the active-mode selector.
//!
//! Every list holds at least one item and never holds the same text twice.
//! List order is insertion order and decides each item's position on the
//! wheel, so the store refuses all mutation while a spin is in progress.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::item::{Item, Mode};
use crate::error::WheelError;

const DEFAULT_REWARD_ITEMS: [&str; 3] = ["과자 1개", "박수 받기", "청소 면제"];
const DEFAULT_PENALTY_ITEMS: [&str; 4] = ["노래부르기", "춤추기", "애교 10번", "스쿼드 30개"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredLists")]
pub struct ItemStore {
    reward: Vec<Item>,
    penalty: Vec<Item>,
    active: Mode,
    /// Spin phase holding the lists, set by the wheel until the spin resolves.
    #[serde(skip)]
    locked_by: Option<&'static str>,
}

/// Serialized form, checked by [`ItemStore::new`] before it becomes a store.
#[derive(Deserialize)]
struct StoredLists {
    reward: Vec<Item>,
    penalty: Vec<Item>,
    #[serde(default)]
    active: Mode,
}

impl TryFrom<StoredLists> for ItemStore {
    type Error = WheelError;

    fn try_from(stored: StoredLists) -> Result<Self, Self::Error> {
        let mut store = ItemStore::new(stored.reward, stored.penalty)?;
        store.active = stored.active;
        Ok(store)
    }
}

impl ItemStore {
    /// Build a store from two pre-validated lists. Active mode starts at Reward.
    pub fn new(reward: Vec<Item>, penalty: Vec<Item>) -> Result<Self, WheelError> {
        check_list(&reward)?;
        check_list(&penalty)?;
        Ok(Self {
            reward,
            penalty,
            active: Mode::Reward,
            locked_by: None,
        })
    }

    /// Parse raw texts into items, then build the store.
    pub fn from_texts<S: AsRef<str>>(reward: &[S], penalty: &[S]) -> Result<Self, WheelError> {
        Self::new(parse_list(reward)?, parse_list(penalty)?)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn items(&self, mode: Mode) -> &[Item] {
        match mode {
            Mode::Reward => &self.reward,
            Mode::Penalty => &self.penalty,
        }
    }

    pub fn active_mode(&self) -> Mode {
        self.active
    }

    pub fn active_items(&self) -> &[Item] {
        self.items(self.active)
    }

    /// Number of segments on the wheel for the active list.
    pub fn segment_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.active_items().len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn is_locked(&self) -> bool {
        self.locked_by.is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_active_mode(&mut self, mode: Mode) -> Result<(), WheelError> {
        self.ensure_unlocked("switch mode")?;
        self.active = mode;
        debug!(%mode, "active mode switched");
        Ok(())
    }

    /// Append `text` to the end of the `mode` list.
    pub fn add_item(&mut self, mode: Mode, text: &str) -> Result<Item, WheelError> {
        self.ensure_unlocked("add an item")?;
        let item = Item::parse(text)?;
        let list = self.list_mut(mode);
        if list.contains(&item) {
            return Err(WheelError::Duplicate(item.as_str().to_string()));
        }
        list.push(item.clone());
        debug!(%mode, item = %item, len = list.len(), "item added");
        Ok(item)
    }

    /// Remove the item at `index`, keeping the relative order of the rest.
    pub fn remove_item(&mut self, mode: Mode, index: usize) -> Result<Item, WheelError> {
        self.ensure_unlocked("remove an item")?;
        let list = self.list_mut(mode);
        let len = list.len();
        if len <= 1 {
            return Err(WheelError::MinimumSizeViolation);
        }
        if index >= len {
            return Err(WheelError::IndexOutOfRange { index, len });
        }
        let removed = list.remove(index);
        debug!(%mode, index, item = %removed, "item removed");
        Ok(removed)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Refuse mutation while the wheel is in `state`.
    pub(crate) fn lock(&mut self, state: &'static str) {
        self.locked_by = Some(state);
    }

    pub(crate) fn unlock(&mut self) {
        self.locked_by = None;
    }

    fn ensure_unlocked(&self, operation: &'static str) -> Result<(), WheelError> {
        match self.locked_by {
            Some(state) => Err(WheelError::InvalidTransition { operation, state }),
            None => Ok(()),
        }
    }

    fn list_mut(&mut self, mode: Mode) -> &mut Vec<Item> {
        match mode {
            Mode::Reward => &mut self.reward,
            Mode::Penalty => &mut self.penalty,
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        let parse = |texts: &[&str]| -> Vec<Item> {
            texts.iter().filter_map(|t| Item::parse(t).ok()).collect()
        };
        Self {
            reward: parse(&DEFAULT_REWARD_ITEMS),
            penalty: parse(&DEFAULT_PENALTY_ITEMS),
            active: Mode::Reward,
            locked_by: None,
        }
    }
}

/// Texts of the built-in lists, used to seed the configuration file.
pub(crate) fn default_texts(mode: Mode) -> Vec<String> {
    let texts: &[&str] = match mode {
        Mode::Reward => &DEFAULT_REWARD_ITEMS,
        Mode::Penalty => &DEFAULT_PENALTY_ITEMS,
    };
    texts.iter().map(|t| t.to_string()).collect()
}

/// Parse a whole list, enforcing the same rules the store keeps.
pub(crate) fn parse_list<S: AsRef<str>>(texts: &[S]) -> Result<Vec<Item>, WheelError> {
    let items = texts
        .iter()
        .map(|t| Item::parse(t.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    check_list(&items)?;
    Ok(items)
}

fn check_list(items: &[Item]) -> Result<(), WheelError> {
    if items.is_empty() {
        return Err(WheelError::MinimumSizeViolation);
    }
    for (i, item) in items.iter().enumerate() {
        if items[..i].contains(item) {
            return Err(WheelError::Duplicate(item.as_str().to_string()));
        }
    }
    Ok(())
}
