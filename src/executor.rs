//! Boundary contract for the external simulation executor.
//!
//! The engine never drives a simulator itself; it hands a candidate scenario
//! to an implementation of [`ScenarioExecutor`] and gets back a per-vehicle
//! damage report. Implementations live outside this crate (process drivers
//! around a physics simulator); tests use scripted stubs. The only
//! obligation on implementors is shape: `execute` must be safe to call
//! repeatedly across trials, each time with a fresh scenario clone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ExecutorError;
use crate::scenario::CrashScenario;

/// One damaged component as named by the simulator's damage model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamagedPart {
    pub name: String,
    /// Damage magnitude, simulator units.
    pub damage: f64,
}

/// Per-vehicle damage lists plus the overall crash flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Vehicle name → damaged components. Ordered map so repeated runs
    /// serialize identically.
    pub damage: BTreeMap<String, Vec<DamagedPart>>,
    pub crashed: bool,
}

/// Result of one simulator run.
///
/// A timeout is a valid (if low-value) outcome, not an error: the scenario
/// simply produced no crash within the executor's wall-clock budget, and it
/// scores as "no damage observed" on every vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    Completed(SimulationOutput),
    TimedOut,
}

/// External simulation boundary.
pub trait ScenarioExecutor {
    fn execute(&mut self, scenario: &CrashScenario) -> Result<ExecutionOutcome, ExecutorError>;
}
