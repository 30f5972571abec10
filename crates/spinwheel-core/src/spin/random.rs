//! Where the number of extra rotations comes from.
//!
//! Each full rotation passes every segment once, so any large random number
//! of turns keeps the outcome fair; the randomness only has to be uniform.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

pub trait ExtraSpinSource {
    /// A number of full rotations drawn from `[min, max)`.
    fn extra_spins(&mut self, min: f64, max: f64) -> f64;
}

/// Uniform draws from a PCG generator.
#[derive(Debug, Clone)]
pub struct RandomSpins {
    rng: Mcg128Xsl64,
}

impl RandomSpins {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl ExtraSpinSource for RandomSpins {
    fn extra_spins(&mut self, min: f64, max: f64) -> f64 {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

/// Always returns the same value. For tests and replays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpins(pub f64);

impl ExtraSpinSource for FixedSpins {
    fn extra_spins(&mut self, _min: f64, _max: f64) -> f64 {
        self.0
    }
}
