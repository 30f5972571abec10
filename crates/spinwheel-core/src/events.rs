use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::items::{Item, Mode};
use crate::spin::SpinState;

/// Every state change on the wheel produces an Event.
/// Renderers and feedback sinks subscribe to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SpinStarted {
        mode: Mode,
        segment_count: usize,
        at: DateTime<Utc>,
    },
    /// Stop requested. The preview is already the final answer, but the
    /// spin is not over until `SpinResolved`.
    SpinStopping {
        mode: Mode,
        preview_index: usize,
        preview_item: Item,
        final_angle: f64,
        deceleration_ms: u64,
        at: DateTime<Utc>,
    },
    SpinResolved {
        mode: Mode,
        index: usize,
        item: Item,
        rotation: f64,
        at: DateTime<Utc>,
    },
    ItemAdded {
        mode: Mode,
        index: usize,
        item: Item,
        at: DateTime<Utc>,
    },
    ItemRemoved {
        mode: Mode,
        index: usize,
        item: Item,
        at: DateTime<Utc>,
    },
    /// Active list switched. Any result on display is stale.
    ModeChanged {
        mode: Mode,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SpinState,
        mode: Mode,
        items: Vec<Item>,
        rotation: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::SpinStarted { .. } => "spin_started",
            Event::SpinStopping { .. } => "spin_stopping",
            Event::SpinResolved { .. } => "spin_resolved",
            Event::ItemAdded { .. } => "item_added",
            Event::ItemRemoved { .. } => "item_removed",
            Event::ModeChanged { .. } => "mode_changed",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}

/// Observer of wheel events.
pub trait EventListener {
    fn on_event(&mut self, event: &Event);
}

impl<F> EventListener for F
where
    F: FnMut(&Event),
{
    fn on_event(&mut self, event: &Event) {
        self(event)
    }
}
