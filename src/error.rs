//! Error taxonomy for the reconstruction search core.
//!
//! Every component fails fast at its boundary: nothing in this crate swallows
//! an error and substitutes a default score, because a suppressed failure
//! would silently corrupt the statistical comparison between search
//! configurations. The search loop ([`crate::search`]) is the only place that
//! downgrades a failure, and it does so visibly: a mutation attempt that runs
//! out of geometry is recorded as a skipped epoch, never as a score.

use thiserror::Error;

/// Malformed mutator or transformer configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Mutation probabilities are coin-flip gates and must lie in [0, 1].
    #[error("mutation probability {value} outside [0, 1]")]
    Probability { value: f64 },

    /// Distribution bounds must be finite with min < max.
    #[error("distribution bounds invalid: min={min}, max={max}")]
    InvalidBounds { min: f64, max: f64 },

    /// Standard deviation must be finite and strictly positive.
    #[error("distribution std dev must be positive and finite, got {0}")]
    InvalidStdDev(f64),

    /// A transformer with no mutators can never produce a candidate.
    #[error("a transformer requires at least one mutator")]
    NoMutators,
}

/// Point-sampling failures against a road polygon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The retry ceiling was reached with no candidate inside the polygon.
    #[error("no valid candidate point after {rounds} sampling rounds")]
    Exhausted { rounds: usize },

    /// Fewer than 3 vertices, non-finite coordinates, or zero area: no
    /// interior point can ever be found, so sampling must not start.
    #[error("polygon is degenerate (fewer than 3 vertices or zero area)")]
    DegeneratePolygon,
}

/// A mutation attempt that could not honor its change-guarantee.
///
/// Returned instead of silently handing back an unmutated vehicle: callers
/// rely on "the mutated value differs" when deciding whether a candidate is
/// worth executing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The speed distribution kept reproducing the current speed. Only
    /// reachable when the configured range collapses onto it (min == max ==
    /// current); with a non-degenerate range the redraw loop exits after one
    /// or two draws.
    #[error("speed distribution cannot produce a value different from {current}")]
    DegenerateSpeed { current: f64 },

    /// A scenario without vehicles has nothing to mutate.
    #[error("scenario has no vehicles to mutate")]
    EmptyScenario,
}

/// Malformed scoring or effect-size input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// The simulator output lacks a damage entry for a reported vehicle.
    #[error("simulator output is missing vehicle {0:?}")]
    MissingVehicle(String),

    /// A damage entry names a part outside the known part dictionary.
    #[error("unknown vehicle part name {0:?}")]
    UnknownPart(String),

    /// Scoring needs a police report attached to the scenario.
    #[error("scenario carries no police report to score against")]
    MissingReport,

    /// Effect-size inputs must be paired observation-for-observation.
    #[error("samples must be equal length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("samples must be non-empty")]
    EmptySample,

    #[error("samples must contain only finite values")]
    NonFiniteSample,

    /// Variance needs at least two observations per sample.
    #[error("need at least two observations per sample, got {0}")]
    TooFewObservations(usize),
}

/// Failure reported by an external simulation executor.
///
/// Note that a simulator *timeout* is not an error: it arrives as
/// [`crate::executor::ExecutionOutcome::TimedOut`] and scores as "no crash
/// observed".
#[derive(Debug, Clone, PartialEq, Error)]
#[error("simulator execution failed: {0}")]
pub struct ExecutorError(pub String);

/// Top-level failure of a search run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
