//! End-to-end mutation pipeline tests: config → transformer → scenario.

use crashrecon::config::{build_transformer, DistributionParams, MutatorKind, MutatorSpec};
use crashrecon::report::{PartTarget, PoliceReport, ReportCategory, VehicleReport};
use crashrecon::scenario::{CrashScenario, Movement, Road, Vehicle};
use glam::DVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn crossing_scenario() -> CrashScenario {
    let ew = Road::new(
        "east-west",
        vec![DVec2::new(-120.0, 0.0), DVec2::new(120.0, 0.0)],
        9.0,
    );
    let ns = Road::new(
        "north-south",
        vec![DVec2::new(0.0, -120.0), DVec2::new(0.0, 120.0)],
        9.0,
    );

    let striker = Vehicle::new(
        "striker",
        Movement::from_samples(&[
            (-80.0, 0.0, 35.0),
            (-40.0, 0.0, 35.0),
            (0.0, 0.0, 35.0),
        ]),
        CrashScenario::polygon_for_origin(&[ew.clone()], DVec2::new(-80.0, 0.0)).unwrap(),
    );
    let victim = Vehicle::new(
        "victim",
        Movement::from_samples(&[(0.0, -60.0, 25.0), (0.0, -20.0, 25.0), (0.0, 0.0, 25.0)]),
        CrashScenario::polygon_for_origin(&[ns.clone()], DVec2::new(0.0, -60.0)).unwrap(),
    );

    let report = PoliceReport {
        vehicles: vec![
            VehicleReport {
                vehicle: "striker".to_string(),
                category: ReportCategory::D,
                parts: vec![PartTarget {
                    name: "F".to_string(),
                }],
            },
            VehicleReport {
                vehicle: "victim".to_string(),
                category: ReportCategory::D,
                parts: vec![PartTarget {
                    name: "L".to_string(),
                }],
            },
        ],
    };

    CrashScenario::new("crossing", vec![ew, ns], vec![striker, victim], Some(report))
}

fn specs(speed_prob: f64, point_prob: f64) -> Vec<MutatorSpec> {
    vec![
        MutatorSpec::new(
            MutatorKind::Speed,
            speed_prob,
            DistributionParams {
                mean: 0.0,
                std_dev: 15.0,
                min: 10.0,
                max: 50.0,
            },
        ),
        MutatorSpec::new(
            MutatorKind::InitialPoint,
            point_prob,
            DistributionParams {
                mean: 0.0,
                std_dev: 1.0,
                min: -5.0,
                max: 5.0,
            },
        ),
    ]
}

#[test]
fn baseline_survives_any_number_of_mutations() {
    let scenario = crossing_scenario();
    let baseline = scenario.clone();
    let transformer = build_transformer(&specs(1.0, 1.0)).unwrap();
    let mut rng = SmallRng::seed_from_u64(2024);

    for _ in 0..25 {
        transformer.mutate_from(&scenario, &mut rng).unwrap();
        transformer.mutate_random_from(&scenario, &mut rng).unwrap();
    }
    assert_eq!(scenario, baseline);
}

#[test]
fn probability_zero_round_trip_is_identity() {
    let scenario = crossing_scenario();
    let transformer = build_transformer(&specs(0.0, 0.0)).unwrap();
    let mut rng = SmallRng::seed_from_u64(5);

    let clone = transformer.mutate_from(&scenario, &mut rng).unwrap();
    for (original, cloned) in scenario.vehicles.iter().zip(&clone.vehicles) {
        assert_eq!(original.movement.speeds(), cloned.movement.speeds());
        assert_eq!(
            original.movement.driving_points(),
            cloned.movement.driving_points()
        );
    }
}

#[test]
fn forced_mutation_changes_exactly_one_vehicle() {
    let scenario = crossing_scenario();
    let transformer = build_transformer(&specs(0.3, 0.3)).unwrap();

    for seed in 0..40 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let candidate = transformer.mutate_random_from(&scenario, &mut rng).unwrap();
        let changed = scenario
            .vehicles
            .iter()
            .zip(&candidate.vehicles)
            .filter(|(a, b)| a.movement != b.movement)
            .count();
        assert_eq!(changed, 1, "seed {seed}");
    }
}

#[test]
fn mutated_origins_stay_on_their_roads() {
    let scenario = crossing_scenario();
    let transformer = build_transformer(&specs(0.0, 1.0)).unwrap();
    let mut rng = SmallRng::seed_from_u64(88);

    for _ in 0..10 {
        let candidate = transformer.mutate_from(&scenario, &mut rng).unwrap();
        for vehicle in &candidate.vehicles {
            let origin = vehicle.movement.first_point().unwrap();
            assert!(
                vehicle.road_polygon.contains(origin),
                "{} drifted off its road: {origin:?}",
                vehicle.name
            );
        }
    }
}

#[test]
fn speed_mutation_keeps_trajectory_geometry() {
    let scenario = crossing_scenario();
    let transformer = build_transformer(&[specs(1.0, 0.0)[0].clone()]).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);

    let candidate = transformer.mutate_from(&scenario, &mut rng).unwrap();
    for (original, mutated) in scenario.vehicles.iter().zip(&candidate.vehicles) {
        assert_eq!(
            original.movement.driving_points(),
            mutated.movement.driving_points()
        );
        let speeds = mutated.movement.speeds();
        assert!(speeds.windows(2).all(|w| w[0] == w[1]));
        assert_ne!(speeds[0], original.movement.speeds()[0]);
    }
}

#[test]
fn parked_vehicle_is_never_displaced() {
    let mut scenario = crossing_scenario();
    scenario.vehicles[1].movement = Movement::from_samples(&[(0.0, -60.0, 0.0)]);
    let parked = scenario.vehicles[1].clone();

    let transformer = build_transformer(&[specs(0.0, 1.0)[1].clone()]).unwrap();
    let mut rng = SmallRng::seed_from_u64(14);

    for _ in 0..10 {
        let candidate = transformer.mutate_from(&scenario, &mut rng).unwrap();
        assert_eq!(candidate.vehicles[1], parked);
    }
}
