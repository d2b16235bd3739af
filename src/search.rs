//! Repeated-trial search over the simulation boundary.
//!
//! An experiment evaluates candidates one at a time, synchronously: mutate,
//! execute `repetitions` simulator runs, score each against the police
//! report, and take the mean as the candidate's fitness. Two methods:
//!
//! - **Random** — every epoch draws a fresh candidate from the *baseline*
//!   via the forced single-mutation path; the best candidate seen so far is
//!   only ever recorded, never mutated further.
//! - **One-plus-one** — every epoch mutates the current champion via the
//!   per-(vehicle, mutator) coin-flip path and replaces it when the
//!   candidate's fitness is at least the champion's.
//!
//! The run stops early once the champion reaches the report's expected
//! score. A mutation attempt that exhausts its geometry aborts that epoch's
//! candidate and is recorded as skipped — it is never replaced by a default
//! score, which would quietly bias the strategy comparison downstream.

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ScoringError, SearchError};
use crate::executor::ScenarioExecutor;
use crate::report::{score_outcome, PoliceReport};
use crate::scenario::CrashScenario;
use crate::transform::Transformer;

/// Candidate-generation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    Random,
    OnePlusOne,
}

impl SearchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Random => "random",
            SearchMethod::OnePlusOne => "one_plus_one",
        }
    }
}

/// One evaluated (or skipped) epoch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub epoch: usize,
    /// Mean score of the candidate's repetitions; `None` when the mutation
    /// attempt failed and the epoch was skipped.
    pub candidate_fitness: Option<f64>,
    /// Champion fitness after this epoch.
    pub best_fitness: f64,
    pub mutation_failed: bool,
}

/// Everything a finished run reports back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub records: Vec<EpochRecord>,
    pub best: CrashScenario,
    pub best_fitness: f64,
    /// The report's expected (maximum) score.
    pub target: f64,
    pub reached_target: bool,
}

impl SearchOutcome {
    /// Evaluated candidate fitnesses in epoch order, skipped epochs removed.
    ///
    /// These are the per-trial samples the effect-size analysis consumes
    /// when comparing search configurations.
    pub fn fitness_samples(&self) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.candidate_fitness)
            .collect()
    }
}

/// One search run: a method, an epoch budget, and a repetition count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    pub method: SearchMethod,
    /// Candidate evaluations after the baseline.
    pub epochs: usize,
    /// Simulator runs averaged into one fitness value.
    pub repetitions: usize,
}

impl Experiment {
    pub fn new(
        name: impl Into<String>,
        method: SearchMethod,
        epochs: usize,
        repetitions: usize,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            epochs,
            repetitions: repetitions.max(1),
        }
    }

    /// Run the search from `baseline`, which is never mutated.
    pub fn run(
        &self,
        baseline: &CrashScenario,
        transformer: &Transformer,
        executor: &mut dyn ScenarioExecutor,
        rng: &mut SmallRng,
    ) -> Result<SearchOutcome, SearchError> {
        let report = baseline
            .report
            .clone()
            .ok_or(ScoringError::MissingReport)?;
        let target = f64::from(report.expected_score());

        let mut best = baseline.clone();
        let mut best_fitness = self.fitness(&best, &report, executor)?;
        let mut records = vec![EpochRecord {
            epoch: 0,
            candidate_fitness: Some(best_fitness),
            best_fitness,
            mutation_failed: false,
        }];
        let mut reached_target = best_fitness >= target;

        for epoch in 1..=self.epochs {
            if reached_target {
                break;
            }

            let candidate = match self.method {
                SearchMethod::Random => transformer.mutate_random_from(baseline, rng),
                SearchMethod::OnePlusOne => transformer.mutate_from(&best, rng),
            };
            let candidate = match candidate {
                Ok(candidate) => candidate,
                Err(err) => {
                    warn!(experiment = %self.name, epoch, %err, "mutation attempt aborted");
                    records.push(EpochRecord {
                        epoch,
                        candidate_fitness: None,
                        best_fitness,
                        mutation_failed: true,
                    });
                    continue;
                }
            };

            let fitness = self.fitness(&candidate, &report, executor)?;
            let accept = match self.method {
                SearchMethod::Random => fitness > best_fitness,
                SearchMethod::OnePlusOne => fitness >= best_fitness,
            };
            if accept {
                best = candidate;
                best_fitness = fitness;
            }
            records.push(EpochRecord {
                epoch,
                candidate_fitness: Some(fitness),
                best_fitness,
                mutation_failed: false,
            });
            info!(
                experiment = %self.name,
                method = self.method.as_str(),
                epoch,
                fitness,
                best_fitness,
                "epoch complete"
            );
            reached_target = best_fitness >= target;
        }

        Ok(SearchOutcome {
            records,
            best,
            best_fitness,
            target,
            reached_target,
        })
    }

    /// Mean score over `repetitions` executions of one candidate.
    fn fitness(
        &self,
        scenario: &CrashScenario,
        report: &PoliceReport,
        executor: &mut dyn ScenarioExecutor,
    ) -> Result<f64, SearchError> {
        let repetitions = self.repetitions.max(1);
        let mut total = 0.0;
        for _ in 0..repetitions {
            let outcome = executor.execute(scenario)?;
            let score = score_outcome(&outcome, report)?;
            total += f64::from(score.total());
        }
        Ok(total / repetitions as f64)
    }
}
