//! Seedable randomness for maze generation and enemy spawning.
//!
//! # Determinism
//!
//! Every random choice in the core draws from a single [`MazeRng`] threaded
//! through [`MazeGenerator`](super::MazeGenerator). Given the same seed, the
//! same configuration and the same inputs, a session replays identically.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source used throughout the core.
pub type MazeRng = ChaCha8Rng;

/// Builds a [`MazeRng`] from a 64-bit seed.
pub fn seeded_rng(seed: u64) -> MazeRng {
    MazeRng::seed_from_u64(seed)
}

/// Compute a deterministic seed from session components.
///
/// # Arguments
///
/// * `session_seed` - Base seed set when the session is created
/// * `epoch` - Restart counter, so each restart gets a fresh but replayable maze
pub fn compute_seed(session_seed: u64, epoch: u64) -> u64 {
    // SplitMix64-style mixing
    let mut hash = session_seed ^ epoch.wrapping_mul(0x9e3779b97f4a7c15);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;

    hash
}
