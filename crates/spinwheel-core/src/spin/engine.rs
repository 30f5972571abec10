//! Spin engine implementation.
//!
//! A cooperative state machine. It owns no threads and no timers: the
//! driver calls `tick()` once per display frame, and either watches
//! `tick()` for [`TickOutcome::DeadlineDue`] or runs its own timer before
//! calling `on_deadline_elapsed()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Spinning -> Decelerating -> Resolved -> Spinning -> ...
//! ```
//!
//! The winning index is fixed when the stop is requested. Deceleration only
//! animates toward it.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::random::{ExtraSpinSource, RandomSpins};
use super::spin_config::SpinConfig;
use crate::error::WheelError;
use crate::resolver::{normalize, resolve};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SpinState {
    Idle,
    /// Free-spinning with no stopping point chosen yet.
    Spinning { segment_count: usize },
    /// Stop requested; the result is known but the wheel is still slowing down.
    Decelerating {
        from_angle: f64,
        final_angle: f64,
        resolved_index: usize,
        segment_count: usize,
        started_at_ms: u64,
        deadline_ms: u64,
    },
    Resolved { index: usize },
}

impl SpinState {
    pub fn name(&self) -> &'static str {
        match self {
            SpinState::Idle => "idle",
            SpinState::Spinning { .. } => "spinning",
            SpinState::Decelerating { .. } => "decelerating",
            SpinState::Resolved { .. } => "resolved",
        }
    }

    /// Spinning or decelerating: the item lists must not change.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            SpinState::Spinning { .. } | SpinState::Decelerating { .. }
        )
    }
}

/// What `request_stop()` committed to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopPlan {
    pub resolved_index: usize,
    /// Cumulative target angle, including the extra turns.
    pub final_angle: f64,
    pub deadline_ms: u64,
    pub deceleration_ms: u64,
}

/// Result of one cooperative tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Idle or resolved; nothing moves.
    Idle,
    /// Free spin advanced to this angle.
    Rotated(f64),
    /// Slowing down; time progress in [0, 1).
    Decelerating(f64),
    /// The deceleration deadline has passed and the spin can be resolved.
    DeadlineDue,
}

/// Core spin engine.
pub struct SpinEngine {
    config: SpinConfig,
    state: SpinState,
    /// Resting angle in [0, 360), carried into the next spin.
    current_rotation: f64,
    clock: Box<dyn Clock>,
    spins: Box<dyn ExtraSpinSource>,
}

impl fmt::Debug for SpinEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("current_rotation", &self.current_rotation)
            .finish_non_exhaustive()
    }
}

impl SpinEngine {
    /// Engine on the wall clock, drawing extra spins from `config.seed`
    /// (or entropy when unset).
    pub fn new(config: SpinConfig) -> Self {
        let spins = RandomSpins::new(config.seed);
        Self::with_sources(config, SystemClock, spins)
    }

    pub fn with_sources(
        config: SpinConfig,
        clock: impl Clock + 'static,
        spins: impl ExtraSpinSource + 'static,
    ) -> Self {
        Self {
            config,
            state: SpinState::Idle,
            current_rotation: 0.0,
            clock: Box::new(clock),
            spins: Box::new(spins),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn current_rotation(&self) -> f64 {
        self.current_rotation
    }

    pub fn is_in_progress(&self) -> bool {
        self.state.is_in_progress()
    }

    /// The winning index once it is known: while decelerating (preview)
    /// and after resolution.
    pub fn resolved_index(&self) -> Option<usize> {
        match self.state {
            SpinState::Decelerating { resolved_index, .. } => Some(resolved_index),
            SpinState::Resolved { index } => Some(index),
            _ => None,
        }
    }

    /// Time progress of the slow-down, 0.0 .. 1.0. `None` outside deceleration.
    pub fn deceleration_progress(&self) -> Option<f64> {
        match self.state {
            SpinState::Decelerating {
                started_at_ms,
                deadline_ms,
                ..
            } => {
                let total = deadline_ms.saturating_sub(started_at_ms);
                if total == 0 {
                    return Some(1.0);
                }
                let elapsed = self.clock.now_ms().saturating_sub(started_at_ms);
                Some((elapsed as f64 / total as f64).min(1.0))
            }
            _ => None,
        }
    }

    /// Angle the wheel should be drawn at right now, in [0, 360).
    pub fn display_rotation(&self) -> f64 {
        match self.state {
            SpinState::Decelerating {
                from_angle,
                final_angle,
                ..
            } => {
                let progress = self.deceleration_progress().unwrap_or(1.0);
                let travel = self.config.easing.ease(progress);
                normalize(from_angle + (final_angle - from_angle) * travel)
            }
            _ => self.current_rotation,
        }
    }

    pub fn deadline_due(&self) -> bool {
        match self.state {
            SpinState::Decelerating { deadline_ms, .. } => self.clock.now_ms() >= deadline_ms,
            _ => false,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin free-spinning. Valid from `Idle` or `Resolved`.
    ///
    /// `segment_count` is held fixed until the spin resolves.
    pub fn start(&mut self, segment_count: NonZeroUsize) -> Result<(), WheelError> {
        match self.state {
            SpinState::Idle | SpinState::Resolved { .. } => {
                self.state = SpinState::Spinning {
                    segment_count: segment_count.get(),
                };
                debug!(segment_count = segment_count.get(), from = self.current_rotation, "spin started");
                Ok(())
            }
            _ => Err(self.invalid("start a spin")),
        }
    }

    /// Stop free-spinning and commit to a result. Valid from `Spinning`.
    pub fn request_stop(&mut self) -> Result<StopPlan, WheelError> {
        let segment_count = match self.state {
            SpinState::Spinning { segment_count } => segment_count,
            _ => return Err(self.invalid("stop the wheel")),
        };
        // The state change alone cancels free-spin accumulation in `tick()`.
        let count = NonZeroUsize::new(segment_count).unwrap_or(NonZeroUsize::MIN);

        let extra_spins = self
            .spins
            .extra_spins(self.config.min_extra_spins, self.config.max_extra_spins);
        let from_angle = self.current_rotation;
        let final_angle = from_angle + extra_spins * 360.0;
        let resolved_index = resolve(normalize(final_angle), count);

        let started_at_ms = self.clock.now_ms();
        let deadline_ms = started_at_ms + self.config.deceleration_ms;
        self.state = SpinState::Decelerating {
            from_angle,
            final_angle,
            resolved_index,
            segment_count,
            started_at_ms,
            deadline_ms,
        };
        debug!(extra_spins, final_angle, resolved_index, "stop requested");

        Ok(StopPlan {
            resolved_index,
            final_angle,
            deadline_ms,
            deceleration_ms: self.config.deceleration_ms,
        })
    }

    /// Cooperative per-frame step.
    ///
    /// Advances the free spin while `Spinning`. While `Decelerating` it only
    /// reports progress; resolution stays with `on_deadline_elapsed()`.
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            SpinState::Spinning { .. } => {
                self.current_rotation =
                    normalize(self.current_rotation + self.config.tick_increment_deg);
                TickOutcome::Rotated(self.current_rotation)
            }
            SpinState::Decelerating { .. } => {
                if self.deadline_due() {
                    TickOutcome::DeadlineDue
                } else {
                    TickOutcome::Decelerating(self.deceleration_progress().unwrap_or(0.0))
                }
            }
            _ => TickOutcome::Idle,
        }
    }

    /// Finish the spin once the deceleration time has passed. Valid from
    /// `Decelerating`; returns the index fixed at stop time.
    pub fn on_deadline_elapsed(&mut self) -> Result<usize, WheelError> {
        let (final_angle, index) = match self.state {
            SpinState::Decelerating {
                final_angle,
                resolved_index,
                ..
            } => (final_angle, resolved_index),
            _ => return Err(self.invalid("finish the spin")),
        };
        self.current_rotation = normalize(final_angle);
        self.state = SpinState::Resolved { index };
        info!(index, rotation = self.current_rotation, "spin resolved");
        Ok(index)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn invalid(&self, operation: &'static str) -> WheelError {
        WheelError::InvalidTransition {
            operation,
            state: self.state.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin::{FixedSpins, ManualClock};

    fn engine(spins: f64) -> (SpinEngine, ManualClock) {
        let clock = ManualClock::new(10_000);
        let engine = SpinEngine::with_sources(SpinConfig::default(), clock.clone(), FixedSpins(spins));
        (engine, clock)
    }

    fn three() -> NonZeroUsize {
        NonZeroUsize::new(3).unwrap()
    }

    #[test]
    fn full_lifecycle() {
        let (mut engine, clock) = engine(5.0);
        assert_eq!(engine.state(), &SpinState::Idle);

        engine.start(three()).unwrap();
        assert!(engine.is_in_progress());

        let plan = engine.request_stop().unwrap();
        assert_eq!(plan.final_angle, 1800.0);
        assert_eq!(plan.resolved_index, 0);
        assert_eq!(plan.deadline_ms, 12_000);
        assert_eq!(engine.resolved_index(), Some(0));
        assert_eq!(engine.state().name(), "decelerating");

        clock.advance(2_000);
        assert_eq!(engine.tick(), TickOutcome::DeadlineDue);
        assert_eq!(engine.on_deadline_elapsed(), Ok(0));
        assert_eq!(engine.state(), &SpinState::Resolved { index: 0 });
        assert_eq!(engine.current_rotation(), 0.0);
        assert!(!engine.is_in_progress());
    }

    #[test]
    fn ticks_accumulate_modulo_full_turn() {
        let (mut engine, _) = engine(5.0);
        assert_eq!(engine.tick(), TickOutcome::Idle);
        engine.start(three()).unwrap();
        for _ in 0..25 {
            engine.tick();
        }
        // 25 * 15 = 375 -> 15
        assert_eq!(engine.current_rotation(), 15.0);
        assert_eq!(engine.tick(), TickOutcome::Rotated(30.0));
    }

    #[test]
    fn stop_cancels_free_spin() {
        let (mut engine, clock) = engine(5.0);
        engine.start(three()).unwrap();
        engine.tick();
        engine.request_stop().unwrap();
        clock.advance(500);
        assert!(matches!(engine.tick(), TickOutcome::Decelerating(p) if (p - 0.25).abs() < 1e-9));
        assert_eq!(engine.current_rotation(), 15.0);
    }

    #[test]
    fn carried_rotation_changes_the_result() {
        // 8 ticks = 120 degrees; 120 + 5 turns -> normalized 240 -> index 2 of 3.
        let (mut engine, clock) = engine(5.0);
        engine.start(three()).unwrap();
        for _ in 0..8 {
            engine.tick();
        }
        assert_eq!(engine.request_stop().unwrap().resolved_index, 2);
        clock.advance(2_000);
        engine.on_deadline_elapsed().unwrap();
        assert_eq!(engine.current_rotation(), 120.0);
    }

    #[test]
    fn transition_guards() {
        let (mut engine, clock) = engine(5.0);
        assert!(matches!(
            engine.request_stop(),
            Err(WheelError::InvalidTransition { state: "idle", .. })
        ));
        assert!(engine.on_deadline_elapsed().is_err());

        engine.start(three()).unwrap();
        assert!(matches!(
            engine.start(three()),
            Err(WheelError::InvalidTransition { state: "spinning", .. })
        ));
        assert!(engine.on_deadline_elapsed().is_err());

        engine.request_stop().unwrap();
        assert!(engine.start(three()).is_err());
        assert!(engine.request_stop().is_err());

        clock.advance(2_000);
        engine.on_deadline_elapsed().unwrap();
        // Resolution fires once.
        assert!(engine.on_deadline_elapsed().is_err());
        assert!(engine.request_stop().is_err());
        // Resolved accepts a new start.
        assert!(engine.start(three()).is_ok());
    }

    #[test]
    fn display_rotation_eases_toward_target() {
        let (mut engine, clock) = engine(5.25);
        engine.start(three()).unwrap();
        engine.request_stop().unwrap();
        assert_eq!(engine.display_rotation(), 0.0);

        clock.advance(1_000);
        let halfway = engine.display_rotation();
        assert!((0.0..360.0).contains(&halfway));

        clock.advance(1_000);
        // 5.25 turns -> rests at 90 degrees.
        assert!((engine.display_rotation() - 90.0).abs() < 1e-6);
        assert_eq!(engine.deceleration_progress(), Some(1.0));
        engine.on_deadline_elapsed().unwrap();
        assert_eq!(engine.display_rotation(), 90.0);
        assert_eq!(engine.deceleration_progress(), None);
    }
}
