//! Police-report damage matching and fitness scoring.
//!
//! Vehicle parts are named inconsistently between the simulator's damage
//! model and a police report's category scheme; category D resolves this
//! with a two-sided decode into the fixed vocabulary of side-qualified
//! region codes ([`crate::constants::CAT_D_PARTS`]):
//!
//! - a full two-character code (`"FL"`) stands for itself;
//! - a bare side (`"L"`) expands to all three components on that side;
//! - a bare component (`"F"`) only becomes scoreable when side information
//!   exists elsewhere in the same list — report-side components are
//!   re-expressed with every side observed among the full codes, and
//!   simulator-side components expand to both sides only when the damage
//!   list carries no side information at all. A report component with no
//!   observed side is conservatively discarded; this is a known scoring gap
//!   inherited from the report data itself, which simply does not say which
//!   side was hit.
//!
//! Scoring is a pure per-part set comparison: one point for every part
//! correctly predicted crashed and one for every part correctly predicted
//! intact, out of the vocabulary size. Order of evaluation never matters.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::constants::{part_code, CAT_D_COMPONENTS, CAT_D_PARTS, CAT_D_SIDES};
use crate::error::ScoringError;
use crate::executor::ExecutionOutcome;

/// Fitness triple for one or more vehicle reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Parts correctly predicted as crashed.
    pub crash_points: u32,
    /// Parts correctly predicted as intact.
    pub non_crash_points: u32,
    /// Vocabulary size: the best achievable total.
    pub max_points: u32,
}

impl Score {
    pub fn total(&self) -> u32 {
        self.crash_points + self.non_crash_points
    }

    /// True when every part was predicted correctly.
    pub fn is_perfect(&self) -> bool {
        self.total() == self.max_points
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Self) {
        self.crash_points += rhs.crash_points;
        self.non_crash_points += rhs.non_crash_points;
        self.max_points += rhs.max_points;
    }
}

/// A part named by the police report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartTarget {
    pub name: String,
}

/// Category scheme used by a report entry.
///
/// Categories share nothing beyond the decode/score contract, so the seam is
/// a tagged variant rather than a trait hierarchy; only category D exists in
/// the data this engine consumes today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportCategory {
    #[default]
    D,
}

impl ReportCategory {
    /// The fixed part vocabulary this category scores against.
    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            ReportCategory::D => &CAT_D_PARTS,
        }
    }

    /// Score simulator damage codes against report target names.
    pub fn score(&self, outputs: &[String], targets: &[String]) -> Result<Score, ScoringError> {
        match self {
            ReportCategory::D => score_category_d(outputs, targets),
        }
    }
}

/// Expected damage for one vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleReport {
    pub vehicle: String,
    #[serde(default)]
    pub category: ReportCategory,
    pub parts: Vec<PartTarget>,
}

/// The police report a reconstruction is scored against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoliceReport {
    pub vehicles: Vec<VehicleReport>,
}

impl PoliceReport {
    /// The best achievable score: full vocabulary credit per vehicle entry.
    pub fn expected_score(&self) -> u32 {
        self.vehicles
            .iter()
            .map(|vr| vr.category.vocabulary().len() as u32)
            .sum()
    }
}

fn is_known_code(code: &str) -> bool {
    if CAT_D_PARTS.contains(&code) {
        return true;
    }
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => CAT_D_SIDES.contains(&c) || CAT_D_COMPONENTS.contains(&c),
        _ => false,
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Decode report target names into vocabulary codes.
fn canonicalize_targets(targets: &[String]) -> Result<Vec<String>, ScoringError> {
    // Sides observed among the full codes decide how bare components are
    // re-expressed.
    let mut observed_sides: Vec<char> = Vec::new();
    for name in targets {
        if name.len() == 2 && is_known_code(name) {
            let side = name.chars().nth(1).expect("two-character code");
            if !observed_sides.contains(&side) {
                observed_sides.push(side);
            }
        }
    }

    let mut decoded = Vec::new();
    for name in targets {
        if !is_known_code(name) {
            return Err(ScoringError::UnknownPart(name.clone()));
        }
        let first = name.chars().next().expect("non-empty code");
        if name.len() == 2 {
            push_unique(&mut decoded, name.clone());
        } else if CAT_D_SIDES.contains(&first) {
            for component in CAT_D_COMPONENTS {
                push_unique(&mut decoded, format!("{component}{first}"));
            }
        } else {
            // Bare component: attach every observed side; with none, the
            // entry is discarded (see module docs).
            for &side in &observed_sides {
                push_unique(&mut decoded, format!("{first}{side}"));
            }
        }
    }
    Ok(decoded)
}

/// Decode simulator damage codes into vocabulary codes (mirror decode).
fn canonicalize_outputs(outputs: &[String]) -> Result<Vec<String>, ScoringError> {
    let mut decoded = Vec::new();
    let mut bare_components: Vec<char> = Vec::new();

    for code in outputs {
        if !is_known_code(code) {
            return Err(ScoringError::UnknownPart(code.clone()));
        }
        let first = code.chars().next().expect("non-empty code");
        if code.len() == 2 {
            push_unique(&mut decoded, code.clone());
        } else if CAT_D_SIDES.contains(&first) {
            for component in CAT_D_COMPONENTS {
                push_unique(&mut decoded, format!("{component}{first}"));
            }
        } else if !bare_components.contains(&first) {
            bare_components.push(first);
        }
    }

    // With no side information anywhere in the damage list, a damaged
    // component class implies both of its sides were exercised.
    if decoded.is_empty() {
        for component in bare_components {
            push_unique(&mut decoded, format!("{component}L"));
            push_unique(&mut decoded, format!("{component}R"));
        }
    }
    Ok(decoded)
}

/// Category-D scoring: per-part comparison over the fixed vocabulary.
fn score_category_d(outputs: &[String], targets: &[String]) -> Result<Score, ScoringError> {
    let expected_crashed = canonicalize_targets(targets)?;
    let predicted_crashed = canonicalize_outputs(outputs)?;

    let mut score = Score {
        crash_points: 0,
        non_crash_points: 0,
        max_points: CAT_D_PARTS.len() as u32,
    };
    for part in CAT_D_PARTS {
        let expected = expected_crashed.iter().any(|p| p == part);
        let predicted = predicted_crashed.iter().any(|p| p == part);
        if expected && predicted {
            score.crash_points += 1;
        } else if !expected && !predicted {
            score.non_crash_points += 1;
        }
    }
    Ok(score)
}

/// Score one simulator outcome against the police report.
///
/// Each vehicle entry is scored independently and the triples summed. A
/// timed-out run scores as "no damage observed" on every vehicle; a
/// completed run missing a reported vehicle fails fast — silently
/// under-scoring would corrupt any statistical comparison built on top.
pub fn score_outcome(
    outcome: &ExecutionOutcome,
    report: &PoliceReport,
) -> Result<Score, ScoringError> {
    let mut total = Score::default();
    for entry in &report.vehicles {
        let codes: Vec<String> = match outcome {
            ExecutionOutcome::TimedOut => Vec::new(),
            ExecutionOutcome::Completed(output) => {
                let parts = output
                    .damage
                    .get(&entry.vehicle)
                    .ok_or_else(|| ScoringError::MissingVehicle(entry.vehicle.clone()))?;
                parts
                    .iter()
                    .map(|part| {
                        part_code(&part.name)
                            .map(str::to_string)
                            .ok_or_else(|| ScoringError::UnknownPart(part.name.clone()))
                    })
                    .collect::<Result<_, _>>()?
            }
        };
        let targets: Vec<String> = entry.parts.iter().map(|p| p.name.clone()).collect();
        total += entry.category.score(&codes, &targets)?;
    }
    Ok(total)
}
