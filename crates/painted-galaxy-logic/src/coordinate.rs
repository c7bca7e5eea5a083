//! Canvas-space coordinates and distance math.
//!
//! Canvas space has its origin in the top-left corner. The exported scenario
//! uses a centred origin with the x axis mirrored.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::constants::canvas;

/// A point on the canvas.
///
/// Equality and hashing compare the exact bit patterns of `x` and `y`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Convert to the scenario's coordinate space.
    pub fn to_export(&self) -> Coordinate {
        Coordinate {
            x: -(self.x - canvas::WIDTH as f64 / 2.0),
            y: self.y - canvas::HEIGHT as f64 / 2.0,
        }
    }

    /// Inverse of [`Coordinate::to_export`].
    pub fn from_export(exported: &Coordinate) -> Coordinate {
        Coordinate {
            x: -exported.x + canvas::WIDTH as f64 / 2.0,
            y: exported.y + canvas::HEIGHT as f64 / 2.0,
        }
    }

    /// Whether the point lies on the canvas.
    pub fn is_on_canvas(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x < canvas::WIDTH as f64
            && self.y < canvas::HEIGHT as f64
    }

    /// Stable lookup key (exact bits of both axes).
    pub fn key(&self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
