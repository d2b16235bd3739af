//! 2D mechanics: polygons, containment, polyline offsetting and translation.
//!
//! Road surfaces are closed polygons built by buffering a centerline
//! sideways by the road width (mitre joins, flat caps). A polygon is only
//! ever used as a containment oracle — it is constructed once per road and
//! never mutated afterwards.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Mitre joins on sharp bends are clamped to this multiple of the half-width
/// so a near-reversal in the centerline cannot produce an offset spike.
const MITRE_LIMIT: f64 = 4.0;

/// A closed 2D region stored as a single outer ring.
///
/// The ring is implicitly closed: the last vertex connects back to the
/// first. Construction rejects degenerate input (fewer than 3 vertices,
/// non-finite coordinates, zero area) so downstream sampling can assume an
/// interior exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    ring: Vec<DVec2>,
}

impl Polygon {
    pub fn new(ring: Vec<DVec2>) -> Result<Self, GeometryError> {
        if ring.len() < 3 || ring.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::DegeneratePolygon);
        }
        let poly = Self { ring };
        if poly.area() <= f64::EPSILON {
            return Err(GeometryError::DegeneratePolygon);
        }
        Ok(poly)
    }

    pub fn ring(&self) -> &[DVec2] {
        &self.ring
    }

    /// Unsigned area via the shoelace formula.
    pub fn area(&self) -> f64 {
        let n = self.ring.len();
        let mut twice_area = 0.0;
        for i in 0..n {
            let a = self.ring[i];
            let b = self.ring[(i + 1) % n];
            twice_area += a.x * b.y - b.x * a.y;
        }
        (twice_area / 2.0).abs()
    }

    /// Exact point-in-polygon test (crossing number), no tolerance.
    ///
    /// Points exactly on the boundary count as outside, matching the
    /// containment semantics the mutators rely on: an accepted origin must
    /// have clear interior on all sides.
    pub fn contains(&self, p: DVec2) -> bool {
        let n = self.ring.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.ring[i];
            let b = self.ring[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Buffer a centerline sideways by `half_width` into a closed polygon.
///
/// Each vertex is offset along the averaged normal of its adjacent segments
/// (a mitre join, clamped by [`MITRE_LIMIT`]); the two offset polylines are
/// then stitched into one ring. Ends are flat: the polygon terminates at the
/// first and last centerline vertices rather than extending beyond them.
pub fn buffer_polyline(nodes: &[DVec2], half_width: f64) -> Result<Polygon, GeometryError> {
    if nodes.len() < 2 || half_width <= 0.0 || !half_width.is_finite() {
        return Err(GeometryError::DegeneratePolygon);
    }

    let n = nodes.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);

    for i in 0..n {
        let dir_in = if i > 0 {
            (nodes[i] - nodes[i - 1]).normalize_or_zero()
        } else {
            DVec2::ZERO
        };
        let dir_out = if i + 1 < n {
            (nodes[i + 1] - nodes[i]).normalize_or_zero()
        } else {
            DVec2::ZERO
        };
        let tangent = (dir_in + dir_out).normalize_or_zero();
        let tangent = if tangent == DVec2::ZERO {
            // Either a duplicated vertex or a perfect reversal; fall back to
            // whichever adjacent direction exists.
            if dir_out != DVec2::ZERO {
                dir_out
            } else if dir_in != DVec2::ZERO {
                dir_in
            } else {
                return Err(GeometryError::DegeneratePolygon);
            }
        } else {
            tangent
        };

        let normal = tangent.perp();
        // Mitre scale keeps the offset edges parallel to their segments on
        // bends: width / cos(half turn angle), clamped.
        let reference = if dir_out != DVec2::ZERO { dir_out } else { dir_in };
        let cos_half = normal.dot(reference.perp()).abs().max(1.0 / MITRE_LIMIT);
        let offset = normal * (half_width / cos_half);

        left.push(nodes[i] + offset);
        right.push(nodes[i] - offset);
    }

    right.reverse();
    left.extend(right);
    Polygon::new(left)
}

/// Rigidly translate a point sequence so it starts at `new_origin`.
///
/// Every point moves by the same vector, preserving the path's shape and
/// inter-point distances.
pub fn translate_to_origin(points: &[DVec2], new_origin: DVec2) -> Vec<DVec2> {
    match points.first() {
        Some(&origin) => {
            let delta = new_origin - origin;
            points.iter().map(|&p| p + delta).collect()
        }
        None => Vec::new(),
    }
}

/// Total length of a polyline.
pub fn polyline_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
