//! Circular nebulas.

use std::cmp::Ordering;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::ModelError;

/// A nebula centred on `coordinate`. The radius is always > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nebula {
    pub coordinate: Coordinate,
    radius: NonZeroU32,
}

impl Nebula {
    pub fn new(coordinate: Coordinate, radius: i64) -> Result<Self, ModelError> {
        let radius = u32::try_from(radius)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ModelError::NonPositiveRadius(radius))?;
        Ok(Self { coordinate, radius })
    }

    pub fn radius(&self) -> u32 {
        self.radius.get()
    }

    /// Whether two nebula discs overlap.
    pub fn overlaps(&self, other: &Nebula) -> bool {
        self.coordinate.distance_to(&other.coordinate) < (self.radius() + other.radius()) as f64
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        self.coordinate.distance_to(point) <= self.radius() as f64
    }
}

impl PartialOrd for Nebula {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical project order: by centre, then radius.
impl Ord for Nebula {
    fn cmp(&self, other: &Self) -> Ordering {
        self.coordinate
            .cmp(&other.coordinate)
            .then_with(|| self.radius.cmp(&other.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_radius() {
        let c = Coordinate::new(10.0, 10.0);
        assert_eq!(Nebula::new(c, 0), Err(ModelError::NonPositiveRadius(0)));
        assert_eq!(Nebula::new(c, -5), Err(ModelError::NonPositiveRadius(-5)));
        assert_eq!(Nebula::new(c, 40).unwrap().radius(), 40);
    }

    #[test]
    fn test_deserialize_rejects_zero_radius() {
        let bad = r#"{"coordinate":{"x":1.0,"y":1.0},"radius":0}"#;
        assert!(serde_json::from_str::<Nebula>(bad).is_err());
        let good = r#"{"coordinate":{"x":1.0,"y":1.0},"radius":12}"#;
        assert_eq!(serde_json::from_str::<Nebula>(good).unwrap().radius(), 12);
    }

    #[test]
    fn test_overlap() {
        let a = Nebula::new(Coordinate::new(0.0, 0.0), 50).unwrap();
        let b = Nebula::new(Coordinate::new(90.0, 0.0), 50).unwrap();
        let c = Nebula::new(Coordinate::new(100.0, 0.0), 50).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // touching is not overlapping
    }
}
