//! Random sampling helpers shared by the camera and the materials.
//!
//! Everything here draws from a caller-supplied `RngCore`, so seeding and
//! determinism stay with whoever owns the generator.

use lumen_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform sample in [min, max).
#[inline]
pub fn gen_range_f64(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        gen_range_f64(rng, min, max),
        gen_range_f64(rng, min, max),
        gen_range_f64(rng, min, max),
    )
}

/// Generate a random unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling keeps the distribution uniform over the sphere
    loop {
        let v = random_vec3(rng, -1.0, 1.0);
        let len_sq = v.length_squared();
        if len_sq > 1e-160 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f64(rng) - 0.5, gen_f64(rng) - 0.5, 0.0)
}

/// Mix a render seed with a pixel position into an independent stream seed.
///
/// SplitMix64 finalizer over the packed coordinates.
pub fn pixel_seed(seed: u64, x: u32, y: u32) -> u64 {
    let mut z = seed ^ ((u64::from(y) << 32) | u64::from(x));
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_unit_vector_covers_all_octants() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen_negative = [false; 3];
        for _ in 0..200 {
            let v = random_unit_vector(&mut rng);
            seen_negative[0] |= v.x < 0.0;
            seen_negative[1] |= v.y < 0.0;
            seen_negative[2] |= v.z < 0.0;
        }
        assert_eq!(seen_negative, [true; 3]);
    }

    #[test]
    fn test_sample_square_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let s = sample_square(&mut rng);
            assert!((-0.5..0.5).contains(&s.x));
            assert!((-0.5..0.5).contains(&s.y));
            assert_eq!(s.z, 0.0);
        }
    }

    #[test]
    fn test_pixel_seed_distinct() {
        let a = pixel_seed(1, 0, 0);
        let b = pixel_seed(1, 1, 0);
        let c = pixel_seed(1, 0, 1);
        let d = pixel_seed(2, 0, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_ne!(a, d);
        assert_eq!(a, pixel_seed(1, 0, 0));
    }
}
