//! Deterministic RNG stream derivation for turn resolution.
//!
//! Production draws never come from ambient randomness: each resolution
//! uses a stream derived from (root seed, survivor name, day), so a whole
//! deployment replays from a single seed and tests inject fixed seeds.
//! Streams for different survivors are independent by construction.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;

/// RNG stream for one survivor's turn on a given day.
#[must_use]
pub fn turn_rng(root_seed: u64, name: &str, day: u32) -> SmallRng {
    let mut mac = Hmac::<Sha256>::new_from_slice(&root_seed.to_le_bytes())
        .expect("64-bit seed is valid key");
    mac.update(name.as_bytes());
    mac.update(&day.to_le_bytes());
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    SmallRng::seed_from_u64(u64::from_le_bytes(seed_bytes))
}
