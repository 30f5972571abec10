//! The wheel session: one item store and one spin engine, kept in step.
//!
//! Adapters drive the wheel only through this type. It captures the segment
//! count when a spin starts, locks the lists until the spin resolves, and
//! turns every successful command into an [`Event`] that is returned to the
//! caller and handed to each subscribed listener.

use std::fmt;

use chrono::Utc;
use tracing::warn;

use crate::config::Config;
use crate::error::{CoreError, WheelError};
use crate::events::{Event, EventListener};
use crate::items::{Item, ItemStore, Mode};
use crate::spin::{SpinEngine, TickOutcome};

pub struct Wheel {
    store: ItemStore,
    engine: SpinEngine,
    listeners: Vec<Box<dyn EventListener>>,
}

impl fmt::Debug for Wheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wheel")
            .field("store", &self.store)
            .field("engine", &self.engine)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Wheel {
    pub fn new(store: ItemStore, engine: SpinEngine) -> Self {
        Self {
            store,
            engine,
            listeners: Vec::new(),
        }
    }

    /// Build a wheel from the configured item lists and spin tunables.
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        config.validate()?;
        let store = ItemStore::from_texts(
            config.items.reward.as_slice(),
            config.items.penalty.as_slice(),
        )?;
        Ok(Self::new(store, SpinEngine::new(config.spin.clone())))
    }

    pub fn subscribe(&mut self, listener: impl EventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn engine(&self) -> &SpinEngine {
        &self.engine
    }

    pub fn items(&self, mode: Mode) -> &[Item] {
        self.store.items(mode)
    }

    pub fn active_mode(&self) -> Mode {
        self.store.active_mode()
    }

    /// Index of the segment currently under the pointer, following the
    /// eased on-screen angle. Used for tick cues while the wheel moves.
    pub fn segment_under_pointer(&self) -> usize {
        crate::resolver::resolve(self.engine.display_rotation(), self.store.segment_count())
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.engine.state().clone(),
            mode: self.store.active_mode(),
            items: self.store.active_items().to_vec(),
            rotation: self.engine.display_rotation(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Result<Event, WheelError> {
        let segment_count = self.store.segment_count();
        self.engine
            .start(segment_count)
            .inspect_err(|e| warn!(error = %e, "start rejected"))?;
        self.store.lock(self.engine.state().name());
        Ok(self.emit(Event::SpinStarted {
            mode: self.store.active_mode(),
            segment_count: segment_count.get(),
            at: Utc::now(),
        }))
    }

    pub fn request_stop(&mut self) -> Result<Event, WheelError> {
        let plan = self
            .engine
            .request_stop()
            .inspect_err(|e| warn!(error = %e, "stop rejected"))?;
        self.store.lock(self.engine.state().name());
        let preview_item = self.active_item(plan.resolved_index)?;
        Ok(self.emit(Event::SpinStopping {
            mode: self.store.active_mode(),
            preview_index: plan.resolved_index,
            preview_item,
            final_angle: plan.final_angle,
            deceleration_ms: plan.deceleration_ms,
            at: Utc::now(),
        }))
    }

    /// Cooperative per-frame step. Resolves the spin, exactly once, on the
    /// first tick after the deceleration deadline.
    pub fn tick(&mut self) -> Option<Event> {
        match self.engine.tick() {
            TickOutcome::DeadlineDue => match self.on_deadline_elapsed() {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(error = %e, "spin could not be resolved");
                    None
                }
            },
            _ => None,
        }
    }

    pub fn on_deadline_elapsed(&mut self) -> Result<Event, WheelError> {
        let index = self
            .engine
            .on_deadline_elapsed()
            .inspect_err(|e| warn!(error = %e, "resolution rejected"))?;
        self.store.unlock();
        let item = self.active_item(index)?;
        Ok(self.emit(Event::SpinResolved {
            mode: self.store.active_mode(),
            index,
            item,
            rotation: self.engine.current_rotation(),
            at: Utc::now(),
        }))
    }

    pub fn set_active_mode(&mut self, mode: Mode) -> Result<Event, WheelError> {
        self.store
            .set_active_mode(mode)
            .inspect_err(|e| warn!(error = %e, "mode switch rejected"))?;
        Ok(self.emit(Event::ModeChanged {
            mode,
            at: Utc::now(),
        }))
    }

    pub fn add_item(&mut self, mode: Mode, text: &str) -> Result<Event, WheelError> {
        let item = self
            .store
            .add_item(mode, text)
            .inspect_err(|e| warn!(error = %e, %mode, "add rejected"))?;
        let index = self.store.items(mode).len() - 1;
        Ok(self.emit(Event::ItemAdded {
            mode,
            index,
            item,
            at: Utc::now(),
        }))
    }

    pub fn remove_item(&mut self, mode: Mode, index: usize) -> Result<Event, WheelError> {
        let item = self
            .store
            .remove_item(mode, index)
            .inspect_err(|e| warn!(error = %e, %mode, index, "remove rejected"))?;
        Ok(self.emit(Event::ItemRemoved {
            mode,
            index,
            item,
            at: Utc::now(),
        }))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn active_item(&self, index: usize) -> Result<Item, WheelError> {
        let items = self.store.active_items();
        items
            .get(index)
            .cloned()
            .ok_or(WheelError::IndexOutOfRange {
                index,
                len: items.len(),
            })
    }

    fn emit(&mut self, event: Event) -> Event {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
        event
    }
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(ItemStore::default(), SpinEngine::new(Default::default()))
    }
}
