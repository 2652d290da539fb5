//! Deterministic Name Hashing
//!
//! Compact identifiers for generated definitions are derived from the
//! definition name. Saves reference definitions by these identifiers, so the
//! hash must produce the same output for the same name across runs, builds
//! and platforms.
//!
//! Unlike `std::collections::hash_map::DefaultHasher`, which uses random
//! keys, everything here is a fixed FNV-1a pass followed by a 64-bit
//! finalizer.
//!
//! # Example
//!
//! ```
//! use roe_core::hash::{name_hash, short_hash};
//!
//! let h1 = name_hash("Seed_Fish_Trout");
//! let h2 = name_hash("Seed_Fish_Trout");
//! assert_eq!(h1, h2);
//!
//! // The compact identifier is the low 16 bits
//! assert_eq!(short_hash("Seed_Fish_Trout").raw(), (h1 & 0xFFFF) as u16);
//! ```

use crate::identity::ShortHash;

/// Seed mixed into every name hash
pub const DEFAULT_NAME_SEED: u64 = 0x726f_655f_7365_6564;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit finalizer (splitmix64 output stage)
///
/// Spreads the entropy of every input bit over the whole word so that the
/// low 16 bits used for compact identifiers are well distributed.
pub fn mix64(value: u64) -> u64 {
    let mut z = value;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Hash a byte slice with a seed
///
/// # Example
///
/// ```
/// use roe_core::hash::hash_bytes_with_seed;
///
/// let h1 = hash_bytes_with_seed(b"hello", 7);
/// let h2 = hash_bytes_with_seed(b"hello", 7);
/// assert_eq!(h1, h2);
/// assert_ne!(h1, hash_bytes_with_seed(b"hello", 8));
/// ```
pub fn hash_bytes_with_seed(bytes: &[u8], seed: u64) -> u64 {
    let mut h = FNV_OFFSET_BASIS ^ mix64(seed);
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    mix64(h ^ bytes.len() as u64)
}

/// Hash a definition name
pub fn name_hash(name: &str) -> u64 {
    hash_bytes_with_seed(name.as_bytes(), DEFAULT_NAME_SEED)
}

/// Compact identifier derived from a definition name, before collision handling
pub fn short_hash(name: &str) -> ShortHash {
    ShortHash((name_hash(name) & 0xFFFF) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_hash_deterministic() {
        assert_eq!(name_hash("Seed_Fish_Trout"), name_hash("Seed_Fish_Trout"));
    }

    #[test]
    fn test_name_hash_different_names() {
        assert_ne!(name_hash("Seed_Fish_Trout"), name_hash("Seed_Fish_Salmon"));
        assert_ne!(name_hash("ab"), name_hash("ba"));
    }

    #[test]
    fn test_hash_bytes_different_seeds() {
        assert_ne!(hash_bytes_with_seed(b"trout", 100), hash_bytes_with_seed(b"trout", 200));
    }

    #[test]
    fn test_hash_bytes_empty() {
        assert_eq!(hash_bytes_with_seed(b"", 1), hash_bytes_with_seed(b"", 1));
        assert_ne!(hash_bytes_with_seed(b"", 1), hash_bytes_with_seed(b"\0", 1));
    }

    #[test]
    fn test_short_hash_is_low_bits() {
        let full = name_hash("Fish_Tuna");
        assert_eq!(short_hash("Fish_Tuna"), ShortHash((full & 0xFFFF) as u16));
    }

    #[test]
    fn test_mix64_spreads_single_bit() {
        assert_ne!(mix64(1), mix64(2));
        assert_eq!(mix64(0), 0);
    }
}
