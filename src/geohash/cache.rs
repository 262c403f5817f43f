use std::{collections::VecDeque, sync::Arc};

use ahash::AHashSet;

use crate::error::GeohashError;
use crate::geohash::hash::{Geohash, encode_identifier};

/// Bounded identifier interner. Every `Geohash` handed out for the same
/// normalized identifier shares one `Arc<str>` while that entry is cached;
/// once `capacity` entries exist, the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct GeohashCache {
    capacity: usize,
    entries: AHashSet<Arc<str>>,
    order: VecDeque<Arc<str>>,
}

impl Default for GeohashCache {
    fn default() -> Self { Self::with_capacity(Self::DEFAULT_CAPACITY) }
}

impl GeohashCache {
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// A cache holding at most `capacity` identifiers (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: AHashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    #[inline] pub fn capacity(&self) -> usize { self.capacity }
    #[inline] pub fn len(&self) -> usize { self.entries.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Validate `identifier` and return the shared instance for it.
    pub fn get(&mut self, identifier: &str) -> Result<Geohash, GeohashError> {
        if let Some(id) = self.entries.get(identifier) {
            return Ok(Geohash::from_normalized(id.clone()));
        }
        let hash = Geohash::new(identifier)?;
        Ok(self.intern(hash))
    }

    /// Encode a position and return the shared instance for the result.
    pub fn encode(&mut self, longitude: f64, latitude: f64, precision: usize) -> Geohash {
        let id = encode_identifier(longitude, latitude, precision);
        match self.entries.get(id.as_str()) {
            Some(shared) => Geohash::from_normalized(shared.clone()),
            None => self.intern(Geohash::from_normalized(id.into())),
        }
    }

    /// Store `hash` (or return the already-cached copy of it).
    pub fn intern(&mut self, hash: Geohash) -> Geohash {
        if let Some(shared) = self.entries.get(hash.as_str()) {
            return Geohash::from_normalized(shared.clone());
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else { break };
            self.entries.remove(&oldest);
        }
        let id = hash.shared().clone();
        self.entries.insert(id.clone());
        self.order.push_back(id);
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_requests_share_storage() {
        let mut cache = GeohashCache::default();
        let a = cache.get("EZS42").unwrap();
        let b = cache.get("ezs42").unwrap();
        let c = cache.encode(-5.6, 42.6, 5);
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(a.shared(), b.shared()));
        assert!(Arc::ptr_eq(a.shared(), c.shared()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let mut cache = GeohashCache::with_capacity(2);
        let first = cache.get("u").unwrap();
        cache.get("v").unwrap();
        cache.get("w").unwrap();
        assert_eq!(cache.len(), 2);

        // "u" was evicted, so a new request gets fresh storage.
        let again = cache.get("u").unwrap();
        assert_eq!(first, again);
        assert!(!Arc::ptr_eq(first.shared(), again.shared()));
    }

    #[test]
    fn invalid_identifiers_are_not_cached() {
        let mut cache = GeohashCache::default();
        assert!(cache.get("ezsa2").is_err());
        assert!(cache.get("").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = GeohashCache::default();
        cache.encode(0.0, 0.0, 3);
        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
