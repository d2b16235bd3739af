//! Mutator configuration: declarative specs validated into runtime mutators.
//!
//! Specs mirror the JSON shape search configurations are written in:
//!
//! ```json
//! {
//!     "type": "speed",
//!     "probability": 0.5,
//!     "params": { "mean": 0, "std": 15, "min": 10, "max": 50 }
//! }
//! ```
//!
//! Validation happens once, at build time: a probability outside [0, 1] or a
//! malformed distribution never reaches a mutator.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mutator::{BoundedNormal, InitialPointMutator, Mutator, SpeedMutator};
use crate::sampler::SamplerSettings;
use crate::transform::Transformer;

/// Bounded distribution descriptor as written in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub mean: f64,
    #[serde(rename = "std")]
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl DistributionParams {
    pub fn build(&self) -> Result<BoundedNormal, ConfigError> {
        BoundedNormal::new(self.mean, self.std_dev, self.min, self.max)
    }
}

/// Which mutation operator a spec configures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutatorKind {
    Speed,
    InitialPoint,
}

/// One declarative mutator configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutatorSpec {
    #[serde(rename = "type")]
    pub kind: MutatorKind,
    pub probability: f64,
    pub params: DistributionParams,
    /// Retry-schedule override for the initial-point mutator; defaults
    /// apply when omitted. Ignored by other kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampler: Option<SamplerSettings>,
}

impl MutatorSpec {
    pub fn new(kind: MutatorKind, probability: f64, params: DistributionParams) -> Self {
        Self {
            kind,
            probability,
            params,
            sampler: None,
        }
    }

    /// Validate and instantiate the configured mutator.
    pub fn build(&self) -> Result<Box<dyn Mutator>, ConfigError> {
        if !self.probability.is_finite() || !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::Probability {
                value: self.probability,
            });
        }
        let distribution = self.params.build()?;
        Ok(match self.kind {
            MutatorKind::Speed => Box::new(SpeedMutator::new(self.probability, distribution)),
            MutatorKind::InitialPoint => Box::new(InitialPointMutator::new(
                self.probability,
                distribution,
                self.sampler.unwrap_or_default(),
            )),
        })
    }
}

/// Build a transformer from an ordered list of specs.
pub fn build_transformer(specs: &[MutatorSpec]) -> Result<Transformer, ConfigError> {
    let mutators = specs
        .iter()
        .map(MutatorSpec::build)
        .collect::<Result<Vec<_>, _>>()?;
    Transformer::new(mutators)
}
