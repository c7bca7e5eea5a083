//! Unordered links between two systems, used for hyperlanes and wormholes.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::solar_system::SolarSystemId;

/// An undirected connection. `Connection::new(a, b) == Connection::new(b, a)`.
///
/// The endpoints keep the orientation they were created with (the exporter
/// writes `from = a to = b`), but equality, ordering and hashing all go
/// through [`Connection::key`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Connection {
    pub a: SolarSystemId,
    pub b: SolarSystemId,
}

impl Connection {
    pub fn new(a: SolarSystemId, b: SolarSystemId) -> Self {
        Self { a, b }
    }

    /// Orientation-free key: `(min, max)`.
    pub fn key(&self) -> (SolarSystemId, SolarSystemId) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    pub fn touches(&self, id: SolarSystemId) -> bool {
        self.a == id || self.b == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    pub fn other(&self, id: SolarSystemId) -> Option<SolarSystemId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Connection {}

impl Hash for Connection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Connection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Connection {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::{BTreeSet, HashSet};

    fn hash_of(c: &Connection) -> u64 {
        let mut h = DefaultHasher::new();
        c.hash(&mut h);
        h.finish()
    }

    fn conn(a: u32, b: u32) -> Connection {
        Connection::new(SolarSystemId(a), SolarSystemId(b))
    }

    #[test]
    fn test_symmetric_equality() {
        assert_eq!(conn(1, 2), conn(2, 1));
        assert_ne!(conn(1, 2), conn(1, 3));
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        assert_eq!(hash_of(&conn(4, 9)), hash_of(&conn(9, 4)));
        let set: HashSet<_> = [conn(4, 9), conn(9, 4), conn(4, 5)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ordered_set_dedupes_reversed() {
        let set: BTreeSet<_> = [conn(2, 1), conn(1, 2), conn(0, 5)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap().key(), (SolarSystemId(0), SolarSystemId(5)));
    }

    #[test]
    fn test_other_endpoint() {
        let c = conn(3, 8);
        assert_eq!(c.other(SolarSystemId(3)), Some(SolarSystemId(8)));
        assert_eq!(c.other(SolarSystemId(8)), Some(SolarSystemId(3)));
        assert_eq!(c.other(SolarSystemId(1)), None);
        assert!(c.touches(SolarSystemId(8)));
    }
}
