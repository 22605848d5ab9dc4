//! Random symmetric positive definite systems
//!
//! `A = M * M^T` with `M` and `b` uniform on `[0, 1)`. A generator owns its
//! RNG, so two generators built from the same seed produce the same systems.

use crate::matrix::gram;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded source of test systems
#[derive(Debug, Clone)]
pub struct DataGenerator {
    rng: StdRng,
}

impl DataGenerator {
    /// Generator seeded with `seed`
    pub fn new(seed: u64) -> Self {
        log::info!("Seeding data generator with {}", seed);
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator drawing from an existing RNG
    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Draw the next system `(A, b)` of the given size.
    ///
    /// `A` is symmetric positive semi-definite by construction and positive
    /// definite with probability one.
    pub fn generate(&mut self, size: usize) -> (Array2<f64>, Array1<f64>) {
        log::info!("Generating {}x{} system", size, size);

        let m = Array2::from_shape_simple_fn((size, size), || self.rng.random::<f64>());
        let b = Array1::from_shape_simple_fn(size, || self.rng.random::<f64>());

        (gram(&m.view()), b)
    }
}

/// One system from a fresh generator seeded with `seed`
pub fn generate_data(size: usize, seed: u64) -> (Array2<f64>, Array1<f64>) {
    DataGenerator::new(seed).generate(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::check_requirements;
    use crate::matrix::Tolerance;

    #[test]
    fn test_same_seed_same_data() {
        let (a1, b1) = generate_data(8, 20);
        let (a2, b2) = generate_data(8, 20);
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);

        let (a3, _) = generate_data(8, 21);
        assert_ne!(a1, a3);
    }

    #[test]
    fn test_successive_draws_differ() {
        let mut generator = DataGenerator::new(7);
        let (a1, _) = generator.generate(4);
        let (a2, _) = generator.generate(4);
        assert_ne!(a1, a2);
    }

    #[test]
    fn test_generated_matrix_is_spd() {
        let (a, b) = generate_data(16, 3);
        assert_eq!(a.dim(), (16, 16));
        assert_eq!(b.len(), 16);
        assert!(check_requirements(&a.view(), &Tolerance::symmetry()));
        assert!(b.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_from_rng_matches_seed() {
        let mut seeded = DataGenerator::new(42);
        let mut wrapped = DataGenerator::from_rng(StdRng::seed_from_u64(42));
        assert_eq!(seeded.generate(5), wrapped.generate(5));
    }

    #[test]
    fn test_empty_system() {
        let (a, b) = generate_data(0, 1);
        assert!(a.is_empty());
        assert!(b.is_empty());
    }
}
