//! Seed resolution.
//!
//! Requests carry a signed seed where [`RANDOM_SEED`] means "pick one for
//! me". The engine only ever sees a concrete non-negative seed; the resolved
//! value is echoed back to the caller so a result can be reproduced.

use rand::Rng;

/// Sentinel seed value meaning "draw a random seed".
pub const RANDOM_SEED: i64 = -1;

/// Largest seed the service will draw on its own.
pub const MAX_SEED: u64 = u32::MAX as u64;

/// Resolve a requested seed into the concrete seed to generate with.
///
/// An explicit non-negative seed passes through unchanged; [`RANDOM_SEED`]
/// draws uniformly from `0..=MAX_SEED`.
pub fn resolve(requested: i64) -> u64 {
    if requested == RANDOM_SEED {
        rand::rng().random_range(0..=MAX_SEED)
    } else {
        requested as u64
    }
}
