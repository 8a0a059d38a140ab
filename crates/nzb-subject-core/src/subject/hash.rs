//! # Rolling Hash
//!
//! Cheap, order-sensitive accumulator shared by the XML name dispatch and
//! subject token identification.
//!
//! It is not collision-proof. Two different strings can land on the same
//! value, so every keyword hit is confirmed against the literal bytes
//! before it is trusted (see [`super::classify`]).

/// Seed value, and the hash of the empty string.
pub const HASH_EMPTY: u64 = 0xDEAD_BEEF;

/// Multiplier of the mixing step.
const MULTIPLIER: u64 = 47;

/// Incremental form of [`rolling_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingHash {
    state: u64,
}

impl Default for RollingHash {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingHash {
    /// Starts a new hash at the seed.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: HASH_EMPTY }
    }

    /// Mixes one byte into the hash.
    #[inline]
    pub fn mix(&mut self, byte: u8) {
        self.state = mix(self.state, byte);
    }

    /// Mixes every byte of `bytes`, in order.
    pub fn mix_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.mix(byte);
        }
    }

    /// Restarts at the seed.
    pub fn reset(&mut self) {
        self.state = HASH_EMPTY;
    }

    /// Final value. Zero is reserved for "unset" and is reported as 1.
    #[must_use]
    pub const fn finish(&self) -> u64 {
        if self.state == 0 { 1 } else { self.state }
    }
}

#[inline]
const fn mix(state: u64, byte: u8) -> u64 {
    state ^ state.wrapping_mul(MULTIPLIER).wrapping_add(byte as u64)
}

/// Hashes `bytes` in one go. Usable in constant expressions.
#[must_use]
pub const fn rolling_hash(bytes: &[u8]) -> u64 {
    let mut state = HASH_EMPTY;
    let mut i = 0;
    while i < bytes.len() {
        state = mix(state, bytes[i]);
        i += 1;
    }
    if state == 0 { 1 } else { state }
}
