use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Uniform};

use super::{Result, VecGen};

/// Builds the random number generator handed to the vector generators.
///
/// # Arguments
/// * `seed` - An explicit seed, if `None` the wall-clock time is used.
///
/// # Returns
/// A seeded `StdRng`.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
    });

    info!("seeding input generator with {seed}");
    StdRng::seed_from_u64(seed)
}

/// Multiples of a tenth in `[0, 99.9]`, all equally likely.
#[derive(Debug, Clone, Copy)]
pub struct Tenths;

impl Distribution<f64> for Tenths {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(0..1000u32) as f64 / 10.
    }
}

/// A vector generator that follows a certain probabilistic distribution.
pub struct RandVecGen<R: Rng, D: Distribution<f64>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f64>> RandVecGen<R, D> {
    /// Creates a new `RandVecGen` vector generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }
}

impl<R: Rng> RandVecGen<R, Uniform<f64>> {
    /// Creates a new `RandVecGen` vector generator with a uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high or non finite).
    pub fn uniform(rng: R, low: f64, high: f64) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?))
    }
}

impl<R: Rng> RandVecGen<R, Tenths> {
    /// Creates a new `RandVecGen` vector generator sampling multiples of a tenth in `[0, 99.9]`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    pub fn tenths(rng: R) -> Self {
        Self::new(rng, Tenths)
    }
}

impl<R: Rng, D: Distribution<f64>> VecGen for RandVecGen<R, D> {
    fn fill(&mut self, out: &mut [f64]) -> bool {
        for value in out.iter_mut() {
            *value = self.distribution.sample(&mut self.rng);
        }

        true
    }
}
