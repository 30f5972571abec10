//! # Spinwheel Core Library
//!
//! The logic behind a two-list selection wheel: labelled segments spin,
//! slow down along an eased curve, and a winner is resolved from the final
//! angle. Front ends render the wheel and play sounds; everything that has
//! to stay consistent lives here.
//!
//! ## Architecture
//!
//! - **Item store**: the reward and penalty lists plus the active-mode
//!   selector, with their invariants (never empty, no duplicates, short labels)
//! - **Resolver**: pure mapping from a rotation angle to a segment index
//! - **Spin engine**: a cooperative state machine; the caller drives it by
//!   calling `tick()` once per frame
//! - **Wheel**: the session facade that keeps store and engine in step and
//!   publishes [`Event`]s to subscribed listeners
//!
//! ## Key Components
//!
//! - [`Wheel`]: command surface for front ends
//! - [`SpinEngine`]: spin lifecycle state machine
//! - [`ItemStore`]: the two item lists
//! - [`resolve`]: angle-to-segment resolution
//! - [`Config`]: tunables and starting lists, stored as TOML

pub mod config;
pub mod easing;
pub mod error;
pub mod events;
pub mod items;
pub mod resolver;
pub mod spin;
pub mod wheel;

pub use config::{Config, ItemsConfig};
pub use easing::CubicBezier;
pub use error::{ConfigError, CoreError, WheelError};
pub use events::{Event, EventListener};
pub use items::{Item, ItemStore, Mode, MAX_ITEM_CHARS};
pub use resolver::{resolve, segment_angle, segment_start};
pub use spin::{
    Clock, ExtraSpinSource, FixedSpins, ManualClock, RandomSpins, SpinConfig, SpinEngine,
    SpinState, StopPlan, SystemClock, TickOutcome,
};
pub use wheel::Wheel;
