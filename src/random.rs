//! Seeded random sources.
//!
//! Every ant gets its own generator, seeded from the run's root seed and
//! its position in the run. No generator is ever shared between workers.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator used throughout the crate.
pub type AcoRng = ChaCha8Rng;

/// Which part of the run a derived stream belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WarmUp = 1,
    Construction = 2,
    LocalSearch = 3,
}

/// Creates a generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> AcoRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Derives the seed for one ant in one phase of one iteration.
///
/// Combines the root seed with the iteration index, ant index and phase.
/// Each component passes through a splitmix64 finalizer before it is
/// folded in, so `(iteration, ant)` pairs that a plain XOR would collapse
/// (e.g. `(0, 1)` and `(1, 0)`) map to different streams.
pub fn derive_seed(root: u64, iteration: usize, ant: usize, phase: Phase) -> u64 {
    let mut h = splitmix64(root);
    h = splitmix64(h ^ splitmix64(iteration as u64));
    h = splitmix64(h ^ splitmix64((ant as u64).wrapping_add(0x5851_F42D_4C95_7F2D)));
    splitmix64(h ^ phase as u64)
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
