//! Seedable random number generation.
//!
//! Simulation code never touches a global generator: every call that
//! needs randomness takes an explicit `&mut R where R: Rng`, normally a
//! [`MersenneTwister`] created from a configured seed.

use fi_core::Real;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// 64-bit Mersenne Twister (MT19937-64).
pub type MersenneTwister = rand_mt::Mt64;

/// Create a Mersenne Twister seeded with `seed`.
pub fn mersenne_twister(seed: u64) -> MersenneTwister {
    MersenneTwister::new(seed)
}

/// Draw one standard normal deviate from `rng`.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Real {
    StandardNormal.sample(rng)
}

/// Draw one `N(mean, std_dev²)` deviate from `rng`.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: Real, std_dev: Real) -> Real {
    mean + std_dev * standard_normal(rng)
}
