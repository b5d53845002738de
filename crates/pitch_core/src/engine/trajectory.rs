//! Pitch Flight Sampling
//!
//! Constant-acceleration projectile motion from the release point to the
//! front of home plate. `y` is the distance to the plate and decreases
//! toward zero; `T` (time to plate) is the first positive root of
//! `y0 + vy0·t + ½·ay·t² = 0`.

use crate::config::TrajectoryConfig;
use nalgebra::Vector3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest `|y(T)|` (ft) accepted as a plate crossing, per foot of release distance
const PLATE_TOLERANCE: f64 = 1e-6;

/// Release position, initial velocity and constant acceleration (ft, s)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Kinematics {
    #[schemars(with = "[f64; 3]")]
    pub release: Vector3<f64>,
    #[schemars(with = "[f64; 3]")]
    pub velocity: Vector3<f64>,
    #[schemars(with = "[f64; 3]")]
    pub acceleration: Vector3<f64>,
}

impl Kinematics {
    /// Position after `t` seconds
    pub fn position_at(&self, t: f64) -> Vector3<f64> {
        self.release + self.velocity * t + self.acceleration * (0.5 * t * t)
    }

    /// Velocity after `t` seconds
    pub fn velocity_at(&self, t: f64) -> Vector3<f64> {
        self.velocity + self.acceleration * t
    }

    /// Time to plate for this pitch
    pub fn time_to_plate(&self, negligible: f64) -> f64 {
        time_to_plate_with(
            self.release.y,
            self.velocity.y,
            self.acceleration.y,
            negligible,
        )
    }
}

/// One point of a pitch's flight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TrajectorySample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TrajectorySample {
    fn at(kinematics: &Kinematics, t: f64) -> Self {
        let p = kinematics.position_at(t);
        Self {
            t,
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let span = b.t - a.t;
        if span <= 0.0 {
            return *b;
        }
        let r = (t - a.t) / span;
        Self {
            t,
            x: a.x + (b.x - a.x) * r,
            y: a.y + (b.y - a.y) * r,
            z: a.z + (b.z - a.z) * r,
        }
    }

    /// Renderer coordinates: x right, y up, z toward the pitcher
    pub fn to_scene(&self) -> [f64; 3] {
        [self.x, self.z, -self.y]
    }
}

/// Time to plate with the default negligibility threshold
pub fn time_to_plate(y0: f64, vy0: f64, ay: f64) -> f64 {
    time_to_plate_with(y0, vy0, ay, TrajectoryConfig::default().negligible)
}

/// Solve `y0 + vy0·t + ½·ay·t² = 0` for the smallest positive `t`.
///
/// Degenerate inputs (no real root, no positive root) fall back to the
/// linear estimate `−y0/vy0`, clamped at zero. Never fails.
pub fn time_to_plate_with(y0: f64, vy0: f64, ay: f64, negligible: f64) -> f64 {
    let a = 0.5 * ay;
    let b = vy0;
    let c = y0;

    let linear = || {
        if b.abs() < negligible {
            0.0
        } else {
            (-c / b).max(0.0)
        }
    };

    if a.abs() < negligible {
        return linear();
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return linear();
    }

    // q-form avoids cancellation between -b and sqrt(disc)
    let sqrt_disc = disc.sqrt();
    let q = -0.5 * (b + b.signum() * sqrt_disc);
    let (r1, r2) = if q.abs() < negligible {
        let r = -b / (2.0 * a);
        (r, r)
    } else {
        (q / a, c / q)
    };

    [r1, r2]
        .into_iter()
        .filter(|t| t.is_finite() && *t > 0.0)
        .min_by(|x, y| x.total_cmp(y))
        .unwrap_or_else(linear)
}

/// Lazy sample sequence from release to plate crossing
///
/// Yields `t = 0, step, 2·step, …` strictly below `T`, then one exact sample
/// at `T`. When the kinematics never reach the plate (`T` from the linear
/// fallback, or zero) the flight is sampled over at least
/// `step·(min_samples − 1)` and [`TrajectoryIter::reaches_plate`] is false.
#[derive(Debug, Clone)]
pub struct TrajectoryIter {
    kinematics: Kinematics,
    step: f64,
    t_end: f64,
    reaches_plate: bool,
    index: usize,
    finished: bool,
}

impl TrajectoryIter {
    pub fn new(kinematics: &Kinematics, config: &TrajectoryConfig) -> Self {
        let root = kinematics.time_to_plate(config.negligible);
        let tolerance = PLATE_TOLERANCE * kinematics.release.y.abs().max(1.0);
        let reaches_plate = root > 0.0 && kinematics.position_at(root).y.abs() <= tolerance;

        let min_intervals = config.min_samples.saturating_sub(1).max(1) as f64;
        let t_end = if reaches_plate {
            root
        } else {
            root.max(config.time_step_s * min_intervals)
        };
        let step = if t_end / config.time_step_s < min_intervals {
            t_end / min_intervals
        } else {
            config.time_step_s
        };
        Self {
            kinematics: *kinematics,
            step,
            t_end,
            reaches_plate,
            index: 0,
            finished: false,
        }
    }

    /// End of the sampled flight (s)
    pub fn time_to_plate(&self) -> f64 {
        self.t_end
    }

    /// Whether the final sample lies on the plate plane
    pub fn reaches_plate(&self) -> bool {
        self.reaches_plate
    }

    fn boundary_eps(&self) -> f64 {
        self.step * 1e-6
    }
}

impl Iterator for TrajectoryIter {
    type Item = TrajectorySample;

    fn next(&mut self) -> Option<TrajectorySample> {
        if self.finished {
            return None;
        }
        // no usable time base: release point only
        if self.t_end <= 0.0 || self.step <= 0.0 {
            self.finished = true;
            return Some(TrajectorySample::at(&self.kinematics, 0.0));
        }

        let t = self.index as f64 * self.step;
        if t < self.t_end - self.boundary_eps() {
            self.index += 1;
            return Some(TrajectorySample::at(&self.kinematics, t));
        }

        self.finished = true;
        Some(TrajectorySample::at(&self.kinematics, self.t_end))
    }
}

/// Materialized flight of one pitch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Trajectory {
    /// Time to plate (s); the sampled span when the plate is never reached
    pub duration: f64,
    /// False for degenerate kinematics that never cross the plate plane
    pub reaches_plate: bool,
    pub samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn sample(kinematics: &Kinematics, config: &TrajectoryConfig) -> Self {
        let iter = TrajectoryIter::new(kinematics, config);
        let duration = iter.time_to_plate();
        let reaches_plate = iter.reaches_plate();
        Self {
            duration,
            reaches_plate,
            samples: iter.collect(),
        }
    }

    pub fn release(&self) -> Option<&TrajectorySample> {
        self.samples.first()
    }

    pub fn plate_crossing(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    /// Linearly interpolated sample at `t`, clamped to the flight window.
    pub fn position_at(&self, t: f64) -> Option<TrajectorySample> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        if t.is_nan() || t <= first.t {
            return Some(*first);
        }
        if t >= last.t {
            return Some(*last);
        }
        // first index whose t exceeds the query
        let upper = self.samples.partition_point(|s| s.t <= t);
        let a = &self.samples[upper - 1];
        let b = &self.samples[upper];
        Some(TrajectorySample::lerp(a, b, t))
    }
}
