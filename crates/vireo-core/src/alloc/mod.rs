//! Hashed collection aliases used across Vireo.
//!
//! Widget and input bookkeeping is keyed by small integer ids, so the
//! collections use AHash instead of SipHash.

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert(7u64, "widget");
        assert_eq!(map.get(&7), Some(&"widget"));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42u32);
        assert!(set.contains(&42));
        assert!(!set.contains(&41));
    }
}
