mod clock;
mod engine;
mod random;
mod spin_config;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{SpinEngine, SpinState, StopPlan, TickOutcome};
pub use random::{ExtraSpinSource, FixedSpins, RandomSpins};
pub use spin_config::SpinConfig;
