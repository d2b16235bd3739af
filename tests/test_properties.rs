//! Property-based tests for the mutation and scoring mechanics.

use crashrecon::geometry::{polyline_length, translate_to_origin};
use crashrecon::mutator::BoundedNormal;
use crashrecon::report::ReportCategory;
use crashrecon::sampler::sample_ring;
use crashrecon::stats::vargha_delaney;
use glam::DVec2;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Strategy: a valid (min, max) interval with positive width.
fn bounds_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-100.0..100.0f64, 0.5..80.0f64).prop_map(|(min, span)| (min, min + span))
}

/// Strategy: a list of category-D codes (full, side, or component).
fn code_list_strategy() -> impl Strategy<Value = Vec<String>> {
    let codes = prop::sample::select(vec![
        "FL", "FR", "ML", "MR", "BL", "BR", "L", "R", "F", "M", "B",
    ]);
    prop::collection::vec(codes.prop_map(str::to_string), 0..6)
}

proptest! {
    // 1. Both draw flavors always land inside the configured bounds.
    #[test]
    fn draws_respect_bounds(
        seed in 0u64..5000,
        (min, max) in bounds_strategy(),
        mean in -20.0..20.0f64,
        std in 0.1..25.0f64,
        current in -150.0..150.0f64,
    ) {
        let dist = BoundedNormal::new(mean, std, min, max).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let random = dist.random(&mut rng);
        prop_assert!(random >= min && random <= max);
        let directed = dist.directed(current, &mut rng);
        prop_assert!(directed >= min && directed <= max);
    }

    // 2. Ring samples sit exactly |distance| from the reference point.
    #[test]
    fn ring_samples_at_requested_radius(
        seed in 0u64..5000,
        distance in -60.0..60.0f64,
        cx in -100.0..100.0f64,
        cy in -100.0..100.0f64,
        count in 1usize..80,
    ) {
        let center = DVec2::new(cx, cy);
        let mut rng = SmallRng::seed_from_u64(seed);
        let points = sample_ring(center, distance, count, &mut rng);
        prop_assert_eq!(points.len(), count);
        for p in points {
            prop_assert!((p.distance(center) - distance.abs()).abs() < 1e-9);
        }
    }

    // 3. Rigid translation preserves path length and the new origin.
    #[test]
    fn translation_is_rigid(
        points in prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..12),
        ox in -200.0..200.0f64,
        oy in -200.0..200.0f64,
    ) {
        let path: Vec<DVec2> = points.iter().map(|&(x, y)| DVec2::new(x, y)).collect();
        let origin = DVec2::new(ox, oy);
        let moved = translate_to_origin(&path, origin);
        prop_assert_eq!(moved[0], origin);
        prop_assert!((polyline_length(&path) - polyline_length(&moved)).abs() < 1e-6);
    }

    // 4. Every decodable output/target combination scores inside its bounds,
    //    independent of list order.
    #[test]
    fn score_is_bounded_and_order_independent(
        outputs in code_list_strategy(),
        targets in code_list_strategy(),
    ) {
        let score = ReportCategory::D.score(&outputs, &targets).unwrap();
        prop_assert_eq!(score.max_points, 6);
        prop_assert!(score.crash_points + score.non_crash_points <= score.max_points);

        let mut reversed_outputs = outputs.clone();
        reversed_outputs.reverse();
        let mut reversed_targets = targets.clone();
        reversed_targets.reverse();
        let reversed = ReportCategory::D.score(&reversed_outputs, &reversed_targets).unwrap();
        prop_assert_eq!(score, reversed);
    }

    // 5. The A estimate always lands in [0, 1] and self-comparison is 0.5.
    #[test]
    fn effect_size_estimate_in_unit_interval(
        samples in prop::collection::vec(0.0..6.0f64, 2..20),
        others in prop::collection::vec(0.0..6.0f64, 2..20),
    ) {
        let n = samples.len().min(others.len());
        let (a, b) = (&samples[..n], &others[..n]);
        let effect = vargha_delaney(a, b).unwrap();
        prop_assert!((0.0..=1.0).contains(&effect.estimate));

        let self_effect = vargha_delaney(a, a).unwrap();
        prop_assert!((self_effect.estimate - 0.5).abs() < 1e-9);
    }
}
