//! CSS-style cubic-bezier easing.
//!
//! The curve runs from (0, 0) to (1, 1) with two control points. `x` is time
//! progress and `y` is travel progress; easing a time fraction means solving
//! the curve for the parameter `t` whose `x(t)` matches, then reading `y(t)`.

use serde::{Deserialize, Serialize};

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_EPSILON: f64 = 1e-7;
const BISECTION_ITERATIONS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Fast start, long gentle settle. Used for the wheel's deceleration.
    pub const DECELERATE: CubicBezier = CubicBezier::new(0.17, 0.67, 0.12, 0.99);

    pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

    /// Control-point x values must stay in [0, 1] for `x(t)` to be monotonic.
    pub fn is_valid(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        in_unit(self.x1) && in_unit(self.x2) && self.y1.is_finite() && self.y2.is_finite()
    }

    /// Travel progress for time progress `progress`, clamped to [0, 1].
    pub fn ease(&self, progress: f64) -> f64 {
        if progress.is_nan() || progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(progress);
        sample(self.y1, self.y2, t)
    }

    fn solve_t(&self, x: f64) -> f64 {
        // Newton-Raphson first; it converges in a few steps on most curves.
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = sample(self.x1, self.x2, t) - x;
            if err.abs() < NEWTON_EPSILON {
                return t;
            }
            let slope = slope(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        // Fall back to bisection where the slope flattens out.
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = sample(self.x1, self.x2, t);
            if (value - x).abs() < NEWTON_EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::DECELERATE
    }
}

// B(t) = 3(1-t)^2 t p1 + 3(1-t) t^2 p2 + t^3, with p0 = 0 and p3 = 1.
fn sample(p1: f64, p2: f64, t: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

fn slope(p1: f64, p2: f64, t: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
