//! Star systems and their spawn flags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Identifier of a solar system, unique within a project.
///
/// Placement hands these out densely in creation order, so id order and
/// creation order agree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SolarSystemId(pub u32);

impl fmt::Display for SolarSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a system may host a starting empire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnType {
    #[default]
    Disabled,
    Enabled,
    /// Only ever set by hand; the spawn generator leaves these alone.
    Preferred,
}

impl SpawnType {
    /// Enabled and preferred systems are both potential home systems.
    pub fn is_spawn(self) -> bool {
        !matches!(self, SpawnType::Disabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolarSystem {
    pub id: SolarSystemId,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub spawn_type: SpawnType,
}

impl SolarSystem {
    /// A new system with spawning disabled.
    pub fn new(id: SolarSystemId, coordinate: Coordinate) -> Self {
        Self {
            id,
            coordinate,
            spawn_type: SpawnType::Disabled,
        }
    }

    /// Copy of this system with a different spawn flag.
    pub fn with_spawn_type(self, spawn_type: SpawnType) -> Self {
        Self { spawn_type, ..self }
    }
}
