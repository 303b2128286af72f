//! # Layout Mathematics
//!
//! Polar placement and random direction helpers.

use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Point at `distance` from the origin along `angle` (radians, counter-clockwise from +x).
pub fn polar(angle: f64, distance: f64) -> DVec2 {
    DVec2::new(angle.cos() * distance, angle.sin() * distance)
}

/// Uniform angle in `[0, 2π)`.
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..TAU)
}

/// Uniformly distributed unit vector.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    polar(random_angle(rng), 1.0)
}

/// Sign of `value`, or a random sign when it is zero.
pub fn sign_or_random<R: Rng + ?Sized>(value: f64, rng: &mut R) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_polar_straight_up() {
        let point = polar(FRAC_PI_2, 30.0);
        assert!(point.x.abs() < 1e-9);
        assert!((point.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_random_unit_vector_is_normalized() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sign_or_random() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sign_or_random(0.3, &mut rng), 1.0);
        assert_eq!(sign_or_random(-2.0, &mut rng), -1.0);
        let sign = sign_or_random(0.0, &mut rng);
        assert!(sign == 1.0 || sign == -1.0);
    }
}
