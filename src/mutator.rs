//! Mutation operators: one bounded random perturbation per vehicle attribute.
//!
//! Each mutator carries a firing probability (consulted by the transformer's
//! coin-flip path, ignored by its forced path) and a bounded distribution
//! used for two draw flavors:
//!
//! - `Random` — a fresh uniform draw over [min, max], used when generating a
//!   candidate from scratch;
//! - `Directed` — the current value plus a Gaussian step N(mean, std), the
//!   sum clamped into [min, max], used for local search around a champion.
//!
//! Both concrete mutators guarantee the mutated attribute actually changes;
//! when a degenerate configuration makes that impossible they return an
//! error instead of silently handing back the input.

use rand::rngs::SmallRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{ConfigError, MutationError};
use crate::geometry::translate_to_origin;
use crate::sampler::{find_origin_in_polygon, SamplerSettings};
use crate::scenario::Vehicle;

/// Which distribution draw a mutation uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    /// Uniform over the configured [min, max].
    Random,
    /// Current value + clamped Gaussian step.
    Directed,
}

/// Bounded distribution descriptor {mean, std, min, max}, validated once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedNormal {
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

impl BoundedNormal {
    pub fn new(mean: f64, std_dev: f64, min: f64, max: f64) -> Result<Self, ConfigError> {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(ConfigError::InvalidStdDev(std_dev));
        }
        if !mean.is_finite() || !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        Ok(Self {
            mean,
            std_dev,
            min,
            max,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Uniform draw over [min, max].
    pub fn random(&self, rng: &mut SmallRng) -> f64 {
        rng.random_range(self.min..=self.max)
    }

    /// `current` plus a Gaussian step, clamped into [min, max].
    pub fn directed(&self, current: f64, rng: &mut SmallRng) -> f64 {
        let normal = Normal::new(self.mean, self.std_dev).expect("std_dev validated positive");
        (current + normal.sample(rng)).clamp(self.min, self.max)
    }

    pub fn draw(&self, current: f64, mode: DrawMode, rng: &mut SmallRng) -> f64 {
        match mode {
            DrawMode::Random => self.random(rng),
            DrawMode::Directed => self.directed(current, rng),
        }
    }
}

/// A single bounded perturbation strategy applied to one vehicle attribute.
///
/// Mutation happens in place on the vehicle handed in; the transformer owns
/// the clone-before-mutate discipline, so a mutator never sees the caller's
/// baseline scenario.
pub trait Mutator: std::fmt::Debug {
    /// Chance this mutator fires on the transformer's coin-flip path.
    fn probability(&self) -> f64;

    /// Stable label for logs and experiment records.
    fn name(&self) -> &'static str;

    fn mutate(
        &self,
        vehicle: &mut Vehicle,
        rng: &mut SmallRng,
        mode: DrawMode,
    ) -> Result<(), MutationError>;
}

/// Redraw attempts before a speed mutation concedes the range is degenerate.
const SPEED_REDRAW_LIMIT: usize = 64;

/// Overwrites every trajectory sample's speed with one freshly drawn value.
#[derive(Debug)]
pub struct SpeedMutator {
    probability: f64,
    distribution: BoundedNormal,
}

impl SpeedMutator {
    pub fn new(probability: f64, distribution: BoundedNormal) -> Self {
        Self {
            probability,
            distribution,
        }
    }
}

impl Mutator for SpeedMutator {
    fn probability(&self) -> f64 {
        self.probability
    }

    fn name(&self) -> &'static str {
        "speed"
    }

    fn mutate(
        &self,
        vehicle: &mut Vehicle,
        rng: &mut SmallRng,
        mode: DrawMode,
    ) -> Result<(), MutationError> {
        let current = vehicle.movement.mean_speed();
        for _ in 0..SPEED_REDRAW_LIMIT {
            let speed = self.distribution.draw(current, mode, rng);
            if speed != current {
                vehicle.movement.set_speed(speed);
                return Ok(());
            }
        }
        // Continuous draws only repeat the current value when the range has
        // collapsed onto it (e.g. a clamp at min == current on every draw).
        Err(MutationError::DegenerateSpeed { current })
    }
}

/// Rigidly translates a trajectory to a new origin inside the vehicle's road
/// polygon, at a displacement drawn from the configured distribution.
#[derive(Debug)]
pub struct InitialPointMutator {
    probability: f64,
    distribution: BoundedNormal,
    settings: SamplerSettings,
}

impl InitialPointMutator {
    pub fn new(probability: f64, distribution: BoundedNormal, settings: SamplerSettings) -> Self {
        Self {
            probability,
            distribution,
            settings,
        }
    }
}

impl Mutator for InitialPointMutator {
    fn probability(&self) -> f64 {
        self.probability
    }

    fn name(&self) -> &'static str {
        "initial_point"
    }

    fn mutate(
        &self,
        vehicle: &mut Vehicle,
        rng: &mut SmallRng,
        mode: DrawMode,
    ) -> Result<(), MutationError> {
        // A single-sample trajectory is a parked vehicle: nothing to translate.
        if vehicle.movement.len() <= 1 {
            return Ok(());
        }

        let points = vehicle.movement.driving_points();
        let origin = points[0];

        // The displacement, not the coordinate, is what the distribution
        // describes: a directed draw steps from zero.
        let distribution = self.distribution;
        let mut draw = move |rng: &mut SmallRng| distribution.draw(0.0, mode, rng);

        let new_origin = find_origin_in_polygon(
            &vehicle.road_polygon,
            origin,
            &mut draw,
            &self.settings,
            rng,
        )?;

        let translated = translate_to_origin(&points, new_origin);
        vehicle.movement.set_driving_points(&translated);
        Ok(())
    }
}
