//! Effect-size and significance statistics for comparing search strategies.
//!
//! Two complementary measures, always reported together because they answer
//! different questions:
//!
//! - [`vargha_delaney`] — the probability that a randomly chosen treatment
//!   observation exceeds a randomly chosen control observation (Vargha and
//!   Delaney, 2000), computed through the rank-sum identity
//!   `A = (2·R1 − m(m+1)) / (2·m·n)` to avoid floating-point cancellation,
//!   with tie-aware average ranks. Magnitude labels use the thresholds from
//!   Hess and Kromrey (2004).
//! - [`t_test`] — independent two-sample Student's t with pooled variance
//!   and a two-sided p-value, judged at the fixed
//!   [`crate::constants::SIGNIFICANCE_ALPHA`].
//!
//! A large effect can be insignificant on tiny samples and a significant
//! difference can be negligible in size; neither statistic substitutes for
//! the other.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAGNITUDE_THRESHOLDS, SIGNIFICANCE_ALPHA};
use crate::error::ScoringError;

/// Qualitative label for |2·(A − 0.5)|.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Magnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl Magnitude {
    pub fn as_str(&self) -> &'static str {
        match self {
            Magnitude::Negligible => "negligible",
            Magnitude::Small => "small",
            Magnitude::Medium => "medium",
            Magnitude::Large => "large",
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One effect-size comparison between two trial distributions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    /// A-estimate in [0, 1]; 0.5 means no stochastic difference.
    pub estimate: f64,
    pub magnitude: Magnitude,
}

/// Result of the independent two-sample mean comparison.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TTest {
    pub statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

impl TTest {
    /// Whether the two distributions differ at the fixed alpha.
    pub fn significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_ALPHA
    }
}

fn check_finite(samples: &[f64]) -> Result<(), ScoringError> {
    if samples.iter().any(|v| !v.is_finite()) {
        return Err(ScoringError::NonFiniteSample);
    }
    Ok(())
}

/// Average ranks (1-based) over a pooled sample, ties shared.
fn rank_average(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Tied block spans ranks i+1 ..= j+1; everyone gets the mean.
        let shared = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = shared;
        }
        i = j + 1;
    }
    ranks
}

/// Vargha–Delaney A between equal-length samples.
pub fn vargha_delaney(treatment: &[f64], control: &[f64]) -> Result<EffectSize, ScoringError> {
    if treatment.len() != control.len() {
        return Err(ScoringError::LengthMismatch {
            left: treatment.len(),
            right: control.len(),
        });
    }
    if treatment.is_empty() {
        return Err(ScoringError::EmptySample);
    }
    check_finite(treatment)?;
    check_finite(control)?;

    let m = treatment.len() as f64;
    let n = control.len() as f64;

    let pooled: Vec<f64> = treatment.iter().chain(control).copied().collect();
    let ranks = rank_average(&pooled);
    let r1: f64 = ranks[..treatment.len()].iter().sum();

    let estimate = (2.0 * r1 - m * (m + 1.0)) / (2.0 * m * n);
    let scaled = ((estimate - 0.5) * 2.0).abs();
    let level = MAGNITUDE_THRESHOLDS.iter().filter(|&&t| t < scaled).count();
    let magnitude = [
        Magnitude::Negligible,
        Magnitude::Small,
        Magnitude::Medium,
        Magnitude::Large,
    ][level];

    Ok(EffectSize { estimate, magnitude })
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn sample_variance(samples: &[f64], mean: f64) -> f64 {
    samples.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64
}

/// Independent two-sample Student's t-test (pooled variance, two-sided).
///
/// Identical samples (zero pooled variance, zero mean gap) report t = 0 and
/// p = 1; a non-zero mean gap over zero variance reports an infinite
/// statistic and p = 0.
pub fn t_test(a: &[f64], b: &[f64]) -> Result<TTest, ScoringError> {
    let smaller = a.len().min(b.len());
    if smaller < 2 {
        return Err(ScoringError::TooFewObservations(smaller));
    }
    check_finite(a)?;
    check_finite(b)?;

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (m1, m2) = (mean(a), mean(b));
    let (v1, v2) = (sample_variance(a, m1), sample_variance(b, m2));

    let df = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
    let std_err = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();

    let gap = m1 - m2;
    let (statistic, p_value) = if std_err == 0.0 {
        if gap == 0.0 {
            (0.0, 1.0)
        } else {
            (f64::INFINITY.copysign(gap), 0.0)
        }
    } else {
        let t = gap / std_err;
        // Two-sided p through the t/Beta identity:
        // p = I_x(df/2, 1/2) with x = df / (df + t²).
        let x = df / (df + t * t);
        (t, regularized_incomplete_beta(df / 2.0, 0.5, x))
    };

    Ok(TTest {
        statistic,
        degrees_of_freedom: df,
        p_value,
    })
}

// ── Special functions for the t-distribution tail ──────────────────────────

/// ln Γ(x) via the Lanczos approximation (g = 7, 9 coefficients).
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 8] = [
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x < 0.5 {
        // Reflection formula keeps the approximation in its valid range.
        return std::f64::consts::PI.ln()
            - (std::f64::consts::PI * x).sin().ln()
            - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut acc = 0.999_999_999_999_809_9;
    for (i, &c) in COEFFS.iter().enumerate() {
        acc += c / (x + i as f64 + 1.0);
    }
    let t = x + 7.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Continued fraction for the incomplete beta function (Lentz's method).
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 200;
    const EPS: f64 = 3.0e-14;
    const TINY: f64 = 1.0e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Regularized incomplete beta I_x(a, b).
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}
