//! The project: one complete galaxy map.
//!
//! A `Project` is an immutable value. Nothing outside this crate can change
//! one in place; edits go through [`crate::applier::apply_actions`], which
//! returns a new project and leaves the input untouched.
//!
//! Collection order is canonical so that undoing a batch reproduces the
//! original value exactly:
//! - systems stay sorted by id, which is their creation order,
//! - hyperlanes and wormholes are sets ordered by their orientation-free key,
//! - nebulas are ordered by centre, then radius.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::action::Action;
use crate::connection::Connection;
use crate::error::ModelError;
use crate::nebula::Nebula;
use crate::settings::GeneratorSettings;
use crate::solar_system::{SolarSystem, SolarSystemId};

/// Opaque encoded image blob holding the painted density map.
///
/// Cheap to clone; the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas(Arc<[u8]>);

impl Canvas {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Arc::from(bytes.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_bytes(Vec::new())
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Canvas({} bytes)", self.0.len())
    }
}

impl Serialize for Canvas {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Canvas {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<u8>::deserialize(deserializer).map(Canvas::from_bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    name: String,
    canvas: Canvas,
    #[serde(deserialize_with = "sorted_solar_systems")]
    solar_systems: Vec<SolarSystem>,
    #[serde(deserialize_with = "sorted_nebulas")]
    nebulas: Vec<Nebula>,
    hyperlanes: BTreeSet<Connection>,
    wormholes: BTreeSet<Connection>,
    #[serde(default)]
    generator_settings: GeneratorSettings,
}

impl Project {
    /// An empty map with default generator settings.
    pub fn new(name: impl Into<String>, canvas: Canvas) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyProjectName);
        }
        Ok(Self {
            name,
            canvas,
            solar_systems: Vec::new(),
            nebulas: Vec::new(),
            hyperlanes: BTreeSet::new(),
            wormholes: BTreeSet::new(),
            generator_settings: GeneratorSettings::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Systems in creation order.
    pub fn solar_systems(&self) -> &[SolarSystem] {
        &self.solar_systems
    }

    pub fn nebulas(&self) -> &[Nebula] {
        &self.nebulas
    }

    pub fn hyperlanes(&self) -> &BTreeSet<Connection> {
        &self.hyperlanes
    }

    pub fn wormholes(&self) -> &BTreeSet<Connection> {
        &self.wormholes
    }

    pub fn generator_settings(&self) -> &GeneratorSettings {
        &self.generator_settings
    }

    pub fn solar_system(&self, id: SolarSystemId) -> Option<&SolarSystem> {
        self.position_of(id).ok().map(|idx| &self.solar_systems[idx])
    }

    /// Id one past the largest id in use.
    pub fn next_solar_system_id(&self) -> SolarSystemId {
        self.solar_systems
            .last()
            .map(|s| SolarSystemId(s.id.0 + 1))
            .unwrap_or_default()
    }

    /// Copy of the project under a new name.
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyProjectName);
        }
        Ok(Self {
            name,
            ..self.clone()
        })
    }

    /// Copy of the project with different generator settings (clamped).
    pub fn with_generator_settings(&self, settings: GeneratorSettings) -> Self {
        Self {
            generator_settings: settings.clamped(),
            ..self.clone()
        }
    }

    /// Batch that removes a system together with every hyperlane and
    /// wormhole touching it, so no connection is left dangling.
    ///
    /// Returns an empty batch if the system does not exist.
    pub fn delete_solar_system_actions(&self, id: SolarSystemId) -> Vec<Action> {
        let Some(solar_system) = self.solar_system(id) else {
            return Vec::new();
        };
        let mut actions: Vec<Action> = self
            .hyperlanes
            .iter()
            .filter(|c| c.touches(id))
            .map(|&connection| Action::DeleteHyperlane { connection })
            .collect();
        actions.extend(
            self.wormholes
                .iter()
                .filter(|c| c.touches(id))
                .map(|&connection| Action::DeleteWormhole { connection }),
        );
        actions.push(Action::DeleteSolarSystem {
            solar_system: *solar_system,
        });
        actions
    }

    /// Connections (hyperlanes first, then wormholes) referencing a
    /// system that no longer exists.
    pub fn dangling_connections(&self) -> Vec<Connection> {
        self.hyperlanes
            .iter()
            .chain(self.wormholes.iter())
            .filter(|c| self.solar_system(c.a).is_none() || self.solar_system(c.b).is_none())
            .copied()
            .collect()
    }

    fn position_of(&self, id: SolarSystemId) -> Result<usize, usize> {
        self.solar_systems.binary_search_by_key(&id, |s| s.id)
    }

    // ── Edits used by the applier (owned accumulator only) ──────────────

    pub(crate) fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Insert keeping id order. A system whose id is taken is ignored.
    pub(crate) fn insert_solar_system(&mut self, solar_system: SolarSystem) {
        if let Err(idx) = self.position_of(solar_system.id) {
            self.solar_systems.insert(idx, solar_system);
        }
    }

    pub(crate) fn remove_solar_system(&mut self, id: SolarSystemId) {
        if let Ok(idx) = self.position_of(id) {
            self.solar_systems.remove(idx);
        }
    }

    pub(crate) fn replace_solar_system(&mut self, solar_system: SolarSystem) {
        if let Ok(idx) = self.position_of(solar_system.id) {
            self.solar_systems[idx] = solar_system;
        }
    }

    pub(crate) fn hyperlanes_mut(&mut self) -> &mut BTreeSet<Connection> {
        &mut self.hyperlanes
    }

    pub(crate) fn wormholes_mut(&mut self) -> &mut BTreeSet<Connection> {
        &mut self.wormholes
    }

    pub(crate) fn insert_nebula(&mut self, nebula: Nebula) {
        let idx = self.nebulas.partition_point(|n| *n <= nebula);
        self.nebulas.insert(idx, nebula);
    }

    /// Remove one nebula equal to `nebula`.
    pub(crate) fn remove_nebula(&mut self, nebula: &Nebula) {
        if let Some(idx) = self.nebulas.iter().position(|n| n == nebula) {
            self.nebulas.remove(idx);
        }
    }
}

/// Restore id order on load; the first system wins on duplicate ids.
fn sorted_solar_systems<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<SolarSystem>, D::Error> {
    let mut systems = Vec::<SolarSystem>::deserialize(deserializer)?;
    systems.sort_by_key(|s| s.id);
    systems.dedup_by_key(|s| s.id);
    Ok(systems)
}

fn sorted_nebulas<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Nebula>, D::Error> {
    let mut nebulas = Vec::<Nebula>::deserialize(deserializer)?;
    nebulas.sort();
    Ok(nebulas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applier::apply_actions;
    use crate::coordinate::Coordinate;

    fn system(id: u32, x: f64, y: f64) -> SolarSystem {
        SolarSystem::new(SolarSystemId(id), Coordinate::new(x, y))
    }

    fn project_with(systems: &[SolarSystem], lanes: &[(u32, u32)]) -> Project {
        let mut actions: Vec<Action> = systems
            .iter()
            .map(|&solar_system| Action::CreateSolarSystem { solar_system })
            .collect();
        actions.extend(lanes.iter().map(|&(a, b)| Action::CreateHyperlane {
            connection: Connection::new(SolarSystemId(a), SolarSystemId(b)),
        }));
        let empty = Project::new("test", Canvas::default()).unwrap();
        apply_actions(&empty, &actions)
    }

    #[test]
    fn test_rejects_empty_name() {
        assert_eq!(
            Project::new("  ", Canvas::default()),
            Err(ModelError::EmptyProjectName)
        );
    }

    #[test]
    fn test_next_id_follows_last() {
        let p = project_with(&[system(0, 0.0, 0.0), system(4, 1.0, 1.0)], &[]);
        assert_eq!(p.next_solar_system_id(), SolarSystemId(5));
        let empty = Project::new("e", Canvas::default()).unwrap();
        assert_eq!(empty.next_solar_system_id(), SolarSystemId(0));
    }

    #[test]
    fn test_cascading_delete_removes_touching_connections() {
        let p = project_with(
            &[system(0, 0.0, 0.0), system(1, 10.0, 0.0), system(2, 5.0, 10.0)],
            &[(0, 1), (1, 2), (2, 0)],
        );
        let actions = p.delete_solar_system_actions(SolarSystemId(1));
        assert_eq!(actions.len(), 3);
        assert!(matches!(actions.last(), Some(Action::DeleteSolarSystem { .. })));

        let after = apply_actions(&p, &actions);
        assert_eq!(after.solar_systems().len(), 2);
        assert_eq!(after.hyperlanes().len(), 1);
        assert!(after.dangling_connections().is_empty());
    }

    #[test]
    fn test_plain_delete_leaves_dangling_connection_visible() {
        let p = project_with(&[system(0, 0.0, 0.0), system(1, 10.0, 0.0)], &[(0, 1)]);
        let after = apply_actions(
            &p,
            &[Action::DeleteSolarSystem {
                solar_system: system(1, 10.0, 0.0),
            }],
        );
        assert_eq!(
            after.dangling_connections(),
            vec![Connection::new(SolarSystemId(0), SolarSystemId(1))]
        );
    }

    #[test]
    fn test_delete_missing_system_is_empty_batch() {
        let p = project_with(&[system(0, 0.0, 0.0)], &[]);
        assert!(p.delete_solar_system_actions(SolarSystemId(9)).is_empty());
    }

    #[test]
    fn test_with_generator_settings_clamps() {
        let p = Project::new("p", Canvas::default()).unwrap();
        let q = p.with_generator_settings(GeneratorSettings {
            hyperlane_connectivity: 2.0,
            ..GeneratorSettings::default()
        });
        assert_eq!(q.generator_settings().hyperlane_connectivity, 1.0);
        assert_eq!(p.generator_settings().hyperlane_connectivity, 0.5);
    }

    #[test]
    fn test_deserialize_restores_id_order() {
        let json = r#"{
            "name": "loaded",
            "canvas": [],
            "solar_systems": [
                {"id": 2, "coordinate": {"x": 2.0, "y": 2.0}},
                {"id": 0, "coordinate": {"x": 0.0, "y": 0.0}},
                {"id": 2, "coordinate": {"x": 9.0, "y": 9.0}}
            ],
            "nebulas": [],
            "hyperlanes": [{"a": 2, "b": 0}],
            "wormholes": []
        }"#;
        let p: Project = serde_json::from_str(json).unwrap();
        let ids: Vec<u32> = p.solar_systems().iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(p.solar_system(SolarSystemId(2)).unwrap().coordinate.x, 2.0);
        assert_eq!(p.generator_settings(), &GeneratorSettings::default());
        assert!(p.dangling_connections().is_empty());
    }

    #[test]
    fn test_canvas_clone_shares_bytes() {
        let c = Canvas::from_bytes(vec![1u8, 2, 3]);
        let d = c.clone();
        assert_eq!(c, d);
        assert_eq!(d.as_bytes(), &[1, 2, 3]);
        assert_eq!(format!("{:?}", d), "Canvas(3 bytes)");
    }
}
