//! Geometric point sampling with a bounded retry schedule.
//!
//! Candidate origins for a displaced vehicle are drawn on a ring of a given
//! radius around the current origin, then filtered by road-polygon
//! containment. When a whole round of candidates misses the polygon, the
//! radius is widened slightly; after a fixed number of failed rounds it is
//! re-drawn from the caller's distribution instead of growing further, so the
//! search cannot fixate on an unreachable radius. The total number of rounds
//! is capped: running out is a reported [`GeometryError::Exhausted`], never a
//! hang.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GeometryError;
use crate::geometry::Polygon;

/// Tunable retry schedule for [`find_origin_in_polygon`].
///
/// The defaults mirror behavior that was tuned empirically against real
/// road layouts; treat them as configuration, not as load-bearing magic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    /// Ring candidates generated per round.
    pub candidates_per_round: usize,
    /// Failed rounds before the radius is re-drawn from the distribution.
    pub reset_interval: usize,
    /// Absolute ceiling on rounds before giving up.
    pub max_rounds: usize,
    /// Per-round radius widening between resets (same unit as coordinates).
    pub relaxation_step: f64,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            candidates_per_round: 50,
            reset_interval: 50,
            max_rounds: 500,
            relaxation_step: 0.5,
        }
    }
}

/// Generate `count` points on a ring of radius `distance` around `center`.
///
/// Angles are stratified: the full circle is split into `count` sectors and
/// each point is jittered uniformly within its own sector, so candidates
/// cover all directions even for small counts. `distance` may be negative or
/// zero; a negative radius mirrors each point through the center, which
/// leaves the covered ring identical.
pub fn sample_ring(center: DVec2, distance: f64, count: usize, rng: &mut SmallRng) -> Vec<DVec2> {
    let sector = TAU / count.max(1) as f64;
    (0..count)
        .map(|k| {
            let angle = sector * k as f64 + rng.random::<f64>() * sector;
            center + DVec2::new(angle.cos(), angle.sin()) * distance
        })
        .collect()
}

/// Search for a new origin strictly inside `polygon`, at roughly
/// `draw_distance` away from `center`.
///
/// `draw_distance` is invoked once up front and again at every reset, so the
/// radius always comes from the caller's configured distribution. Candidates
/// equal to `center` itself are rejected: the caller wants a *new* origin.
pub fn find_origin_in_polygon(
    polygon: &Polygon,
    center: DVec2,
    draw_distance: &mut dyn FnMut(&mut SmallRng) -> f64,
    settings: &SamplerSettings,
    rng: &mut SmallRng,
) -> Result<DVec2, GeometryError> {
    let mut distance = draw_distance(rng);

    for round in 1..=settings.max_rounds {
        let candidates = sample_ring(center, distance, settings.candidates_per_round, rng);
        let inside: Vec<DVec2> = candidates
            .into_iter()
            .filter(|p| *p != center && polygon.contains(*p))
            .collect();

        if !inside.is_empty() {
            let pick = rng.random_range(0..inside.len());
            return Ok(inside[pick]);
        }

        if round % settings.reset_interval == 0 {
            distance = draw_distance(rng);
            warn!(round, "origin sampling re-drew its displacement radius");
        } else {
            // Widen the ring a little so the next round probes an annulus
            // slightly farther out (or farther in, for negative radii).
            distance += if distance < 0.0 {
                -settings.relaxation_step
            } else {
                settings.relaxation_step
            };
        }
    }

    Err(GeometryError::Exhausted {
        rounds: settings.max_rounds,
    })
}
