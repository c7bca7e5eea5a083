//! Generator configuration.
//!
//! Both settings structs are serde types with per-field defaults, so a JSON
//! file only needs to mention the values it overrides. Out-of-range numbers
//! are clamped rather than rejected, matching how the editor sliders behave.
//!
//! ```
//! use painted_galaxy_logic::settings::GeneratorSettings;
//!
//! let settings: GeneratorSettings =
//!     serde_json::from_str(r#"{ "hyperlane_connectivity": 3.0 }"#).unwrap();
//! assert_eq!(settings.number_of_systems, 600);
//! assert_eq!(settings.hyperlane_connectivity, 1.0);
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{canvas, nebulas};

/// Parameters shared by the four generators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Requested number of systems; placement may produce fewer.
    pub number_of_systems: u32,
    /// Exclusion radius around every placed system, in pixels.
    #[serde(deserialize_with = "non_negative")]
    pub min_distance_between_systems: f64,
    /// Probability of keeping a non-MST triangulation edge (0–1).
    #[serde(deserialize_with = "unit_interval")]
    pub hyperlane_connectivity: f64,
    /// Edges longer than this are dropped (MST edges survive unless
    /// `allow_disconnected`). Capped at [`canvas::MAX_CONNECTION_LENGTH`].
    #[serde(deserialize_with = "connection_length")]
    pub hyperlane_max_distance: f64,
    pub allow_disconnected: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            number_of_systems: 600,
            min_distance_between_systems: 10.0,
            hyperlane_connectivity: 0.5,
            hyperlane_max_distance: 100.0,
            allow_disconnected: false,
        }
    }
}

impl GeneratorSettings {
    /// Bring every field back into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            min_distance_between_systems: clamp_non_negative(self.min_distance_between_systems),
            hyperlane_connectivity: clamp_unit(self.hyperlane_connectivity),
            hyperlane_max_distance: clamp_connection_length(self.hyperlane_max_distance),
            ..self
        }
    }

    pub fn with_connectivity(self, connectivity: f64) -> Self {
        Self {
            hyperlane_connectivity: clamp_unit(connectivity),
            ..self
        }
    }
}

/// Parameters for random nebula placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaSettings {
    pub count: u32,
    pub min_radius: u32,
    /// Exclusive upper bound.
    pub max_radius: u32,
    /// Candidate centres closer than this to a placed nebula are discarded.
    pub min_distance: f64,
}

impl Default for NebulaSettings {
    fn default() -> Self {
        Self {
            count: nebulas::NUM_RANDOM_NEBULAS,
            min_radius: nebulas::RANDOM_NEBULA_MIN_RADIUS,
            max_radius: nebulas::RANDOM_NEBULA_MAX_RADIUS,
            min_distance: nebulas::RANDOM_NEBULA_MIN_DISTANCE,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

fn clamp_connection_length(value: f64) -> f64 {
    clamp_non_negative(value).min(canvas::MAX_CONNECTION_LENGTH)
}

fn unit_interval<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_unit)
}

fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_non_negative)
}

fn connection_length<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_connection_length)
}
