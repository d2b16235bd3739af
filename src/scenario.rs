//! Core data model: crash scenarios, roads, vehicles, and their movement.
//!
//! A [`CrashScenario`] is assembled once from an input description and stays
//! immutable from the search engine's point of view: every mutation entry
//! point deep-clones the whole scenario graph first (`Clone` here is a full
//! deep copy — the model holds no shared references). The original scenario
//! therefore remains usable as the unmutated baseline across any number of
//! trials.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{buffer_polyline, Polygon};
use crate::report::PoliceReport;

/// One driving-action sample: a position and the speed to hold there.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryNode {
    pub position: DVec2,
    /// Target speed at this sample, km/h.
    pub speed: f64,
}

/// Ordered trajectory of one vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    trajectory: Vec<TrajectoryNode>,
}

impl Movement {
    pub fn new(trajectory: Vec<TrajectoryNode>) -> Self {
        Self { trajectory }
    }

    /// Build from raw (x, y, speed) samples.
    pub fn from_samples(samples: &[(f64, f64, f64)]) -> Self {
        Self {
            trajectory: samples
                .iter()
                .map(|&(x, y, speed)| TrajectoryNode {
                    position: DVec2::new(x, y),
                    speed,
                })
                .collect(),
        }
    }

    pub fn trajectory(&self) -> &[TrajectoryNode] {
        &self.trajectory
    }

    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    /// The trajectory as bare points, speeds stripped.
    pub fn driving_points(&self) -> Vec<DVec2> {
        self.trajectory.iter().map(|node| node.position).collect()
    }

    /// First trajectory point, if any.
    pub fn first_point(&self) -> Option<DVec2> {
        self.trajectory.first().map(|node| node.position)
    }

    /// Replace every sample's position, keeping its speed.
    ///
    /// `points` must pair up one-to-one with the existing samples.
    pub fn set_driving_points(&mut self, points: &[DVec2]) {
        debug_assert_eq!(points.len(), self.trajectory.len());
        for (node, &point) in self.trajectory.iter_mut().zip(points) {
            node.position = point;
        }
    }

    /// Overwrite every sample's speed with a single value.
    pub fn set_speed(&mut self, speed: f64) {
        for node in &mut self.trajectory {
            node.speed = speed;
        }
    }

    pub fn speeds(&self) -> Vec<f64> {
        self.trajectory.iter().map(|node| node.speed).collect()
    }

    pub fn mean_speed(&self) -> f64 {
        if self.trajectory.is_empty() {
            return 0.0;
        }
        self.trajectory.iter().map(|node| node.speed).sum::<f64>() / self.trajectory.len() as f64
    }
}

/// One road segment: a centerline and the half-width that defines its
/// drivable region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub name: String,
    /// Centerline nodes.
    pub nodes: Vec<DVec2>,
    /// Buffer half-width: lateral distance from centerline to boundary.
    pub width: f64,
}

impl Road {
    pub fn new(name: impl Into<String>, nodes: Vec<DVec2>, width: f64) -> Self {
        Self {
            name: name.into(),
            nodes,
            width,
        }
    }

    /// The drivable region as a closed polygon (containment oracle only).
    pub fn drivable_polygon(&self) -> Result<Polygon, GeometryError> {
        buffer_polyline(&self.nodes, self.width)
    }
}

/// One vehicle in a scenario, owned exclusively by its [`CrashScenario`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    pub movement: Movement,
    /// Initial heading, degrees.
    pub rotation: f64,
    /// Staggered start: the vehicle waits until the inter-vehicle distance
    /// drops below this value. -1.0 starts immediately.
    pub distance_to_trigger: f64,
    /// Render identity only; never consulted by the search engine.
    pub color: String,
    /// Drivable region for this vehicle, attached at scenario assembly.
    pub road_polygon: Polygon,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, movement: Movement, road_polygon: Polygon) -> Self {
        Self {
            name: name.into(),
            movement,
            rotation: 0.0,
            distance_to_trigger: -1.0,
            color: "White".to_string(),
            road_polygon,
        }
    }
}

/// Full description of one crash reconstruction attempt: roads, vehicles,
/// and the police report the outcome is scored against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrashScenario {
    pub name: String,
    pub roads: Vec<Road>,
    pub vehicles: Vec<Vehicle>,
    pub report: Option<PoliceReport>,
}

impl CrashScenario {
    pub fn new(
        name: impl Into<String>,
        roads: Vec<Road>,
        vehicles: Vec<Vehicle>,
        report: Option<PoliceReport>,
    ) -> Self {
        Self {
            name: name.into(),
            roads,
            vehicles,
            report,
        }
    }

    /// Pick the drivable polygon for a vehicle starting at `origin`: the
    /// first road whose region contains it, else the first road outright.
    ///
    /// Callers guarantee that every vehicle's initial point lies on some
    /// road; the fallback only matters for inputs that violate that
    /// guarantee, and it keeps assembly total rather than guessing harder.
    pub fn polygon_for_origin(roads: &[Road], origin: DVec2) -> Result<Polygon, GeometryError> {
        let mut first: Option<Polygon> = None;
        for road in roads {
            let poly = road.drivable_polygon()?;
            if poly.contains(origin) {
                return Ok(poly);
            }
            if first.is_none() {
                first = Some(poly);
            }
        }
        first.ok_or(GeometryError::DegeneratePolygon)
    }

    pub fn vehicle(&self, name: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.name == name)
    }
}
