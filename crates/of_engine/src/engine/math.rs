//! Geometry and random-number helpers shared by every subsystem.
//!
//! Pure functions; the only side effect is drawing from the injected RNG.

use rand::Rng;

use crate::models::{BallPosition, Pitch, PitchEnd, Point, SubTick};

use super::constants::penalty_box;

// ===========================================
// Rounding
// ===========================================

/// Half-up rounding (`-2.5 -> -2`, `2.5 -> 3`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    round_half_up(value * scale) / scale
}

// ===========================================
// Random draws
// ===========================================

/// Inclusive uniform integer in `[min, max]`. Returns `min` for an empty range.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// [`random_int`] over rounded float bounds.
pub fn random_in<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    random_int(rng, round_half_up(min) as i64, round_half_up(max) as i64) as f64
}

/// `strength * randomInt(1, 5)`
pub fn power<R: Rng + ?Sized>(rng: &mut R, strength: f64) -> f64 {
    strength * random_int(rng, 1, 5) as f64
}

// ===========================================
// Clamps and intervals
// ===========================================

pub fn clamp_max(value: f64, max: f64) -> f64 {
    if value > max {
        max
    } else {
        value
    }
}

pub fn clamp_min(value: f64, min: f64) -> f64 {
    if value < min {
        min
    } else {
        value
    }
}

/// Strict `lo < value < hi`.
pub fn between(value: f64, lo: f64, hi: f64) -> bool {
    value > lo && value < hi
}

pub fn is_even(n: u8) -> bool {
    n % 2 == 0
}

pub fn is_odd(n: u8) -> bool {
    n % 2 == 1
}

// ===========================================
// Ball flight geometry
// ===========================================

/// Parabolic arc from `from` to `to`, one sample per unit of y travel (at least one).
///
/// The apex is `sqrt(|(d/2)^2 - (power/2)^2|)` for planar distance `d`; samples
/// rise linearly to the apex and fall back at the same rate.
pub fn trajectory(from: Point, to: Point, power: f64) -> Vec<BallPosition> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let distance = round_half_up((dx * dx + dy * dy).sqrt());
    let apex = ((distance / 2.0).powi(2) - (power / 2.0).powi(2)).abs().sqrt();

    let steps = (round_half_up(dy.abs()) as usize).max(1);
    let step_x = dx / steps as f64;
    let step_y = dy / steps as f64;
    let step_h = apex / (steps as f64 / 2.0);

    let mut samples = Vec::with_capacity(steps);
    let mut rising = true;
    let mut elevation = 0.0;
    for i in 1..=steps {
        if rising {
            elevation = round_to(elevation + step_h, 5);
            if elevation >= apex {
                rising = false;
                elevation = apex;
            }
        } else {
            elevation = round_to(elevation - step_h, 5);
        }
        samples.push(BallPosition {
            x: round_to(from.x + step_x * i as f64, 5),
            y: from.y + step_y * i as f64,
            z: elevation,
        });
    }
    samples
}

pub fn sum_from_one_to(n: usize) -> f64 {
    (n * (n + 1)) as f64 / 2.0
}

/// Split `number` into `n` decreasing parts weighted `n, n-1, ..., 1`.
///
/// `split_number_into_n(24.0, 8) == [5, 5, 4, 3, 3, 2, 1, 1]`.
pub fn split_number_into_n(number: f64, n: usize) -> Vec<f64> {
    let total_weight = sum_from_one_to(n);
    (0..n)
        .map(|i| round_half_up((n - i) as f64 * (number / total_weight)))
        .collect()
}

/// Walk `old` forward by the paired increments, ending exactly on `new`.
pub fn merge_arrays(
    length: usize,
    old: Point,
    new: Point,
    xs: &[f64],
    ys: &[f64],
    powers: &[f64],
) -> Vec<SubTick> {
    let mut steps = Vec::with_capacity(length.max(1));
    let mut cursor = old;
    for i in 0..length.saturating_sub(1) {
        cursor = cursor.offset(xs[i], ys[i]);
        steps.push(SubTick { x: cursor.x, y: cursor.y, power: powers[i] });
    }
    let last_power = powers.last().copied().unwrap_or(0.0);
    steps.push(SubTick { x: new.x, y: new.y, power: last_power });
    steps
}

// ===========================================
// Penalty box geometry
// ===========================================

fn in_box_x(pitch: &Pitch, x: f64) -> bool {
    between(
        x,
        pitch.width / 4.0 - penalty_box::X_MARGIN,
        pitch.width - pitch.width / 4.0 + penalty_box::X_MARGIN,
    )
}

pub fn in_top_penalty(pitch: &Pitch, p: Point) -> bool {
    in_box_x(pitch, p.x) && between(p.y, -1.0, pitch.height / 6.0 + penalty_box::Y_MARGIN)
}

pub fn in_bottom_penalty(pitch: &Pitch, p: Point) -> bool {
    in_box_x(pitch, p.x)
        && between(p.y, pitch.height - pitch.height / 6.0 - penalty_box::Y_MARGIN, pitch.height + 1.0)
}

pub fn in_penalty_box(pitch: &Pitch, end: PitchEnd, p: Point) -> bool {
    match end {
        PitchEnd::Top => in_top_penalty(pitch, p),
        PitchEnd::Bottom => in_bottom_penalty(pitch, p),
    }
}

/// Uniform spot inside the penalty box at `end`, used to scatter players at corners.
pub fn random_penalty_position<R: Rng + ?Sized>(rng: &mut R, pitch: &Pitch, end: PitchEnd) -> Point {
    let x = random_in(
        rng,
        pitch.width / 4.0 + penalty_box::SCATTER_INSET,
        pitch.width - pitch.width / 4.0 - penalty_box::SCATTER_INSET,
    );
    let depth = random_in(rng, 0.0, pitch.height / 6.0 + penalty_box::SCATTER_INSET);
    Point::new(x, pitch.depth_from(end, depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_pitch;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_split_number_into_n() {
        assert_eq!(split_number_into_n(24.0, 8), vec![5.0, 5.0, 4.0, 3.0, 3.0, 2.0, 1.0, 1.0]);
        assert_eq!(split_number_into_n(10.0, 1), vec![10.0]);
        assert_eq!(split_number_into_n(0.0, 3), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_split_negative_rounds_half_up() {
        let parts = split_number_into_n(-100.0, 10);
        assert_eq!(parts[0], -18.0);
        assert_eq!(parts[2], -15.0);
        assert!(parts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_merge_arrays_fixed_split() {
        let xs = [-10.0; 10];
        let ys = [5.0, 5.0, 4.0, 3.0, 3.0, 3.0, 2.0, 2.0, 2.0, 1.0];
        let powers = [2.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let merged = merge_arrays(
            10,
            Point::new(337.0, 527.0),
            Point::new(237.0, 557.0),
            &xs,
            &ys,
            &powers,
        );
        assert_eq!(merged.len(), 10);
        assert_eq!(merged[0], SubTick { x: 327.0, y: 532.0, power: 2.0 });
        assert_eq!(merged[1], SubTick { x: 317.0, y: 537.0, power: 2.0 });
        assert_eq!(merged[9], SubTick { x: 237.0, y: 557.0, power: 1.0 });
    }

    #[test]
    fn test_between_is_strict() {
        assert!(between(5.0, 4.0, 6.0));
        assert!(!between(4.0, 4.0, 6.0));
        assert!(!between(6.0, 4.0, 6.0));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
    }

    #[test]
    fn test_parity() {
        assert!(is_odd(1) && !is_even(1));
        assert!(is_even(2) && !is_odd(2));
    }

    #[test]
    fn test_trajectory_samples_follow_y_travel() {
        let path = trajectory(Point::new(100.0, 100.0), Point::new(110.0, 140.0), 60.0);
        assert_eq!(path.len(), 40);
        let last = path.last().unwrap();
        assert!((last.x - 110.0).abs() < 1e-6);
        assert!((last.y - 140.0).abs() < 1e-6);

        let apex = path.iter().map(|s| s.z).fold(f64::MIN, f64::max);
        let distance = round_half_up((10.0f64.powi(2) + 40.0f64.powi(2)).sqrt());
        let expected = ((distance / 2.0).powi(2) - 30.0f64.powi(2)).abs().sqrt();
        assert!((apex - expected).abs() < 1e-6);
    }

    #[test]
    fn test_trajectory_flat_pass_has_one_sample() {
        let path = trajectory(Point::new(100.0, 100.0), Point::new(150.0, 100.0), 20.0);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].x, 150.0);
    }

    #[test]
    fn test_penalty_boxes() {
        let pitch = sample_pitch();
        assert!(in_top_penalty(&pitch, Point::new(340.0, 50.0)));
        assert!(!in_top_penalty(&pitch, Point::new(340.0, 400.0)));
        assert!(!in_top_penalty(&pitch, Point::new(20.0, 50.0)));
        assert!(in_bottom_penalty(&pitch, Point::new(340.0, 1000.0)));
        assert!(!in_bottom_penalty(&pitch, Point::new(340.0, 50.0)));
    }

    #[test]
    fn test_random_penalty_position_lands_in_box() {
        let pitch = sample_pitch();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let top = random_penalty_position(&mut rng, &pitch, PitchEnd::Top);
            assert!(in_top_penalty(&pitch, top), "{top}");
            let bottom = random_penalty_position(&mut rng, &pitch, PitchEnd::Bottom);
            assert!(in_bottom_penalty(&pitch, bottom), "{bottom}");
        }
    }

    #[test]
    fn test_power_is_strength_multiple() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let p = power(&mut rng, 40.0);
            assert!([40.0, 80.0, 120.0, 160.0, 200.0].contains(&p));
        }
    }

    proptest! {
        #[test]
        fn prop_random_int_inclusive(min in -500i64..500, span in 0i64..500, seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let v = random_int(&mut rng, min, min + span);
            prop_assert!(v >= min && v <= min + span);
        }

        #[test]
        fn prop_split_sums_to_number(number in 1u32..2000, n in 1usize..60) {
            let parts = split_number_into_n(number as f64, n);
            prop_assert_eq!(parts.len(), n);
            let sum: f64 = parts.iter().sum();
            // Each part is off by at most half a unit after rounding.
            prop_assert!((sum - number as f64).abs() <= n as f64 / 2.0 + 1e-9);
            prop_assert!(parts.windows(2).all(|w| w[0] >= w[1]));
        }

        #[test]
        fn prop_trajectory_ends_on_target(
            fx in 0.0f64..680.0, fy in 0.0f64..1050.0,
            tx in 0.0f64..680.0, ty in 0.0f64..1050.0,
            power in 1.0f64..500.0,
        ) {
            let path = trajectory(Point::new(fx, fy), Point::new(tx, ty), power);
            prop_assert!(!path.is_empty());
            let last = path[path.len() - 1];
            prop_assert!((last.x - tx).abs() < 1e-3);
            prop_assert!((last.y - ty).abs() < 1e-6);
        }
    }
}
