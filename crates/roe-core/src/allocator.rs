//! Compact identifier allocation
//!
//! Every definition carries a 16-bit [`ShortHash`]. Generated definitions
//! derive theirs from the definition name and linearly probe past any
//! identifier already in use. The allocator is built from one snapshot of the
//! database per generation pass; identifiers it hands out are reserved for the
//! lifetime of the allocator and never released.

use crate::hash::name_hash;
use crate::{DefDatabase, ShortHash};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, error, info};

/// Size of the compact identifier space
pub const SHORT_HASH_SPACE: u32 = 1 << 16;

/// Function mapping a definition name to a hash; the low 16 bits are used
pub type NameHasher = fn(&str) -> u64;

/// Collision-free allocator over the 16-bit identifier space
///
/// # Example
///
/// ```
/// use roe_core::{IdentifierAllocator, ShortHash};
///
/// let mut a = IdentifierAllocator::from_used([ShortHash(1), ShortHash(2)]);
/// let mut b = IdentifierAllocator::from_used([ShortHash(1), ShortHash(2)]);
///
/// // Same snapshot and name, same identifier
/// assert_eq!(a.allocate("Seed_Fish_Trout"), b.allocate("Seed_Fish_Trout"));
/// ```
#[derive(Clone)]
pub struct IdentifierAllocator {
    used: HashSet<u16>,
    hasher: NameHasher,
}

impl fmt::Debug for IdentifierAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierAllocator")
            .field("reserved", &self.used.len())
            .finish_non_exhaustive()
    }
}

impl IdentifierAllocator {
    /// Snapshot every identifier currently assigned in the database
    ///
    /// Take one snapshot per generation pass, before the first allocation.
    pub fn collect_existing(db: &DefDatabase) -> Self {
        let allocator = Self::from_used(db.short_hashes());
        info!(
            identifiers = allocator.used.len(),
            "collected existing short hashes"
        );
        allocator
    }

    /// Build an allocator from an explicit set of used identifiers
    pub fn from_used(used: impl IntoIterator<Item = ShortHash>) -> Self {
        Self {
            used: used.into_iter().map(|h| h.raw()).collect(),
            hasher: name_hash,
        }
    }

    /// Replace the name hasher
    pub fn with_hasher(mut self, hasher: NameHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Allocate an identifier for `name`
    ///
    /// Starts at `hash(name) mod 65536` and probes upwards, wrapping at the
    /// end of the space. If all 65536 identifiers are taken the base value
    /// is returned anyway and an error is logged.
    pub fn allocate(&mut self, name: &str) -> ShortHash {
        let base = ((self.hasher)(name) & 0xFFFF) as u16;
        let mut candidate = base;
        let mut attempts: u32 = 0;

        while self.used.contains(&candidate) && attempts < SHORT_HASH_SPACE {
            candidate = candidate.wrapping_add(1);
            attempts += 1;
        }

        if attempts >= SHORT_HASH_SPACE {
            error!(
                def = name,
                base,
                "no free short hash after {} attempts, reusing base",
                SHORT_HASH_SPACE
            );
            self.used.insert(base);
            return ShortHash(base);
        }

        self.used.insert(candidate);
        if attempts > 0 {
            debug!(def = name, hash = candidate, attempts, "resolved short hash collision");
        }
        ShortHash(candidate)
    }

    /// Check if an identifier is already taken
    pub fn is_reserved(&self, hash: ShortHash) -> bool {
        self.used.contains(&hash.raw())
    }

    /// Number of identifiers taken
    pub fn reserved_count(&self) -> usize {
        self.used.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ThingDef;

    fn fixed(_: &str) -> u64 {
        0x1_0042
    }

    fn top(_: &str) -> u64 {
        0xFFFF
    }

    #[test]
    fn test_free_base_is_used() {
        let mut allocator = IdentifierAllocator::from_used([]).with_hasher(fixed);
        assert_eq!(allocator.allocate("Seed_A"), ShortHash(0x42));
        assert!(allocator.is_reserved(ShortHash(0x42)));
    }

    #[test]
    fn test_colliding_names_get_distinct_ids() {
        let mut allocator = IdentifierAllocator::from_used([]).with_hasher(fixed);
        let a = allocator.allocate("Seed_A");
        let b = allocator.allocate("Seed_B");
        let c = allocator.allocate("Seed_C");
        assert_eq!(a, ShortHash(0x42));
        assert_eq!(b, ShortHash(0x43));
        // Third collider probes past both
        assert_eq!(c, ShortHash(0x44));
    }

    #[test]
    fn test_probes_past_existing() {
        let mut allocator =
            IdentifierAllocator::from_used([ShortHash(0x42), ShortHash(0x43)]).with_hasher(fixed);
        assert_eq!(allocator.allocate("Seed_A"), ShortHash(0x44));
        assert_eq!(allocator.reserved_count(), 3);
    }

    #[test]
    fn test_probe_wraps_around() {
        let mut allocator = IdentifierAllocator::from_used([ShortHash(0xFFFF)]).with_hasher(top);
        assert_eq!(allocator.allocate("Seed_A"), ShortHash(0));
    }

    #[test]
    fn test_deterministic() {
        let used = [ShortHash(5), ShortHash(900), ShortHash(31000)];
        let mut a = IdentifierAllocator::from_used(used);
        let mut b = IdentifierAllocator::from_used(used);
        for name in ["Seed_Fish_Trout", "Seed_Fish_Cod", "Seed_Fish_Pike"] {
            assert_eq!(a.allocate(name), b.allocate(name));
        }
    }

    #[test]
    fn test_exhaustion_falls_back_to_base() {
        let mut allocator =
            IdentifierAllocator::from_used((0..=u16::MAX).map(ShortHash)).with_hasher(fixed);
        assert_eq!(allocator.allocate("Seed_A"), ShortHash(0x42));
        assert_eq!(allocator.reserved_count(), SHORT_HASH_SPACE as usize);
    }

    #[test]
    fn test_collect_existing_snapshot() {
        let mut db = DefDatabase::new();
        db.add_thing(ThingDef::new("A", "a").with_short_hash(0x42)).unwrap();
        db.add_thing(ThingDef::new("B", "b").with_short_hash(0x43)).unwrap();

        let mut allocator = IdentifierAllocator::collect_existing(&db).with_hasher(fixed);
        assert!(allocator.is_reserved(ShortHash(0x42)));
        assert_eq!(allocator.allocate("Seed_A"), ShortHash(0x44));
    }
}
