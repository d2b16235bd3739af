//! Scenario transformation: applies mutators across a scenario's vehicles.
//!
//! Both entry points clone the scenario before touching anything — the
//! caller's baseline is never mutated, which is what lets one baseline serve
//! as the comparison anchor across every trial of an experiment.

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use crate::error::{ConfigError, MutationError};
use crate::mutator::{DrawMode, Mutator};
use crate::scenario::CrashScenario;

/// Orchestrates an ordered list of mutators over a scenario.
pub struct Transformer {
    mutators: Vec<Box<dyn Mutator>>,
}

impl Transformer {
    pub fn new(mutators: Vec<Box<dyn Mutator>>) -> Result<Self, ConfigError> {
        if mutators.is_empty() {
            return Err(ConfigError::NoMutators);
        }
        Ok(Self { mutators })
    }

    pub fn mutators(&self) -> &[Box<dyn Mutator>] {
        &self.mutators
    }

    /// Clone the scenario and apply exactly one randomly chosen mutator to
    /// exactly one randomly chosen vehicle, unconditionally.
    ///
    /// The mutator's probability gate is ignored on this path: the result
    /// always differs from the baseline in exactly one vehicle.
    pub fn mutate_random_from(
        &self,
        scenario: &CrashScenario,
        rng: &mut SmallRng,
    ) -> Result<CrashScenario, MutationError> {
        if scenario.vehicles.is_empty() {
            return Err(MutationError::EmptyScenario);
        }
        let mut candidate = scenario.clone();
        let vehicle_idx = rng.random_range(0..candidate.vehicles.len());
        let mutator_idx = rng.random_range(0..self.mutators.len());
        let mutator = &self.mutators[mutator_idx];

        debug!(
            vehicle = %candidate.vehicles[vehicle_idx].name,
            mutator = mutator.name(),
            "forced single mutation"
        );
        mutator.mutate(&mut candidate.vehicles[vehicle_idx], rng, DrawMode::Random)?;
        Ok(candidate)
    }

    /// Clone the scenario and flip an independent coin per (vehicle,
    /// mutator) pair: each mutator fires only when its draw lands under its
    /// configured probability.
    ///
    /// With all probabilities at zero the clone comes back numerically
    /// identical to the baseline.
    pub fn mutate_from(
        &self,
        scenario: &CrashScenario,
        rng: &mut SmallRng,
    ) -> Result<CrashScenario, MutationError> {
        let mut candidate = scenario.clone();
        for vehicle in &mut candidate.vehicles {
            for mutator in &self.mutators {
                if rng.random::<f64>() < mutator.probability() {
                    debug!(vehicle = %vehicle.name, mutator = mutator.name(), "mutation fired");
                    mutator.mutate(vehicle, rng, DrawMode::Directed)?;
                }
            }
        }
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::{BoundedNormal, InitialPointMutator, SpeedMutator};
    use crate::sampler::SamplerSettings;
    use crate::scenario::{Movement, Road, Vehicle};
    use glam::DVec2;
    use rand::SeedableRng;

    fn two_vehicle_scenario() -> CrashScenario {
        let road = Road::new(
            "main",
            vec![DVec2::new(-100.0, 0.0), DVec2::new(100.0, 0.0)],
            10.0,
        );
        let poly = road.drivable_polygon().unwrap();
        let v1 = Vehicle::new(
            "v1",
            Movement::from_samples(&[(0.0, 0.0, 30.0), (10.0, 0.0, 30.0)]),
            poly.clone(),
        );
        let v2 = Vehicle::new(
            "v2",
            Movement::from_samples(&[(50.0, 0.0, 40.0), (60.0, 0.0, 40.0)]),
            poly,
        );
        CrashScenario::new("case", vec![road], vec![v1, v2], None)
    }

    fn speed_mutator(probability: f64) -> Box<dyn Mutator> {
        Box::new(SpeedMutator::new(
            probability,
            BoundedNormal::new(0.0, 15.0, 10.0, 50.0).unwrap(),
        ))
    }

    fn point_mutator(probability: f64) -> Box<dyn Mutator> {
        Box::new(InitialPointMutator::new(
            probability,
            BoundedNormal::new(0.0, 1.0, -5.0, 5.0).unwrap(),
            SamplerSettings::default(),
        ))
    }

    #[test]
    fn test_new_rejects_empty_mutator_list() {
        assert_eq!(Transformer::new(vec![]).err(), Some(ConfigError::NoMutators));
    }

    #[test]
    fn test_mutate_from_leaves_baseline_untouched() {
        let scenario = two_vehicle_scenario();
        let baseline = scenario.clone();
        let transformer = Transformer::new(vec![speed_mutator(1.0), point_mutator(1.0)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(31);

        let candidate = transformer.mutate_from(&scenario, &mut rng).unwrap();

        assert_eq!(scenario, baseline);
        assert_ne!(candidate.vehicles[0].movement, scenario.vehicles[0].movement);
    }

    #[test]
    fn test_mutate_from_probability_zero_is_identity() {
        let scenario = two_vehicle_scenario();
        let transformer = Transformer::new(vec![speed_mutator(0.0), point_mutator(0.0)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(12);

        let candidate = transformer.mutate_from(&scenario, &mut rng).unwrap();
        assert_eq!(candidate, scenario);
    }

    #[test]
    fn test_mutate_random_from_changes_exactly_one_vehicle() {
        let scenario = two_vehicle_scenario();
        let transformer = Transformer::new(vec![speed_mutator(0.0)]).unwrap();

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let candidate = transformer.mutate_random_from(&scenario, &mut rng).unwrap();
            let changed = scenario
                .vehicles
                .iter()
                .zip(&candidate.vehicles)
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 1, "seed {seed}: expected exactly one mutated vehicle");
        }
    }

    #[test]
    fn test_mutate_random_from_rejects_empty_scenario() {
        let mut scenario = two_vehicle_scenario();
        scenario.vehicles.clear();
        let transformer = Transformer::new(vec![speed_mutator(0.5)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            transformer.mutate_random_from(&scenario, &mut rng).err(),
            Some(MutationError::EmptyScenario)
        );
    }
}
