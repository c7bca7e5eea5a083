//! Property-based tests for the action model and applier.
//!
//! 1. Undoing a batch of applicable actions restores the project exactly.
//! 2. Undoing a single applicable action restores the project exactly.
//! 3. `invert` is its own inverse.
//! 4. Connection equality and hashing ignore orientation.
//! 5. Applying never changes the input project.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use painted_galaxy_logic::action::Action;
use painted_galaxy_logic::applier::{apply_actions, undo_actions};
use painted_galaxy_logic::connection::Connection;
use painted_galaxy_logic::coordinate::Coordinate;
use painted_galaxy_logic::nebula::Nebula;
use painted_galaxy_logic::project::{Canvas, Project};
use painted_galaxy_logic::solar_system::{SolarSystem, SolarSystemId, SpawnType};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// One step of a random edit script: an action kind plus two raw numbers
/// used to pick targets and values.
type Step = (u8, u32, u32);

fn script(max_len: usize) -> impl Strategy<Value = Vec<Step>> {
    proptest::collection::vec((0u8..10, any::<u32>(), any::<u32>()), 0..=max_len)
}

fn spawn_type(n: u32) -> SpawnType {
    match n % 3 {
        0 => SpawnType::Disabled,
        1 => SpawnType::Enabled,
        _ => SpawnType::Preferred,
    }
}

fn coordinate(a: u32, b: u32) -> Coordinate {
    Coordinate::new((a % 1000) as f64, (b % 1000) as f64)
}

/// Turn a step into an action that is applicable to `project`, if any.
fn applicable(project: &Project, (kind, x, y): Step) -> Option<Action> {
    let systems = project.solar_systems();
    let pick_system = |n: u32| systems.get(n as usize % systems.len().max(1)).copied();
    let pair = |x: u32, y: u32| -> Option<Connection> {
        if systems.len() < 2 {
            return None;
        }
        let a = systems[x as usize % systems.len()].id;
        let b = systems[y as usize % systems.len()].id;
        (a != b).then(|| Connection::new(a, b))
    };
    let nth = |set: &std::collections::BTreeSet<Connection>, n: u32| {
        set.iter().nth(n as usize % set.len().max(1)).copied()
    };

    match kind {
        0 => Some(Action::SetCanvas {
            old_value: project.canvas().clone(),
            new_value: Canvas::from_bytes(x.to_le_bytes().to_vec()),
        }),
        1 => Some(Action::CreateSolarSystem {
            solar_system: SolarSystem::new(project.next_solar_system_id(), coordinate(x, y))
                .with_spawn_type(spawn_type(y)),
        }),
        2 => pick_system(x).map(|solar_system| Action::DeleteSolarSystem { solar_system }),
        3 => pick_system(x).map(|old_value| Action::UpdateSolarSystem {
            old_value,
            new_value: SolarSystem {
                coordinate: coordinate(y, x),
                ..old_value.with_spawn_type(spawn_type(y))
            },
        }),
        4 => pair(x, y)
            .filter(|c| !project.hyperlanes().contains(c))
            .map(|connection| Action::CreateHyperlane { connection }),
        5 => nth(project.hyperlanes(), x).map(|connection| Action::DeleteHyperlane { connection }),
        6 => pair(x, y)
            .filter(|c| !project.wormholes().contains(c))
            .map(|connection| Action::CreateWormhole { connection }),
        7 => nth(project.wormholes(), x).map(|connection| Action::DeleteWormhole { connection }),
        8 => Nebula::new(coordinate(x, y), (y % 80) as i64 + 1)
            .ok()
            .map(|nebula| Action::CreateNebula { nebula }),
        _ => project
            .nebulas()
            .get(x as usize % project.nebulas().len().max(1))
            .map(|&nebula| Action::DeleteNebula { nebula }),
    }
}

/// Build a project and a batch by interpreting two scripts: the first
/// seeds the starting project, the second produces the batch under test.
fn project_and_batch(seed: &[Step], batch: &[Step]) -> (Project, Vec<Action>) {
    let mut project = Project::new("props", Canvas::default()).unwrap();
    for &step in seed {
        if let Some(action) = applicable(&project, step) {
            project = apply_actions(&project, &[action]);
        }
    }
    let start = project.clone();
    let mut actions = Vec::new();
    for &step in batch {
        if let Some(action) = applicable(&project, step) {
            project = apply_actions(&project, std::slice::from_ref(&action));
            actions.push(action);
        }
    }
    (start, actions)
}

fn hash_of(c: &Connection) -> u64 {
    let mut h = DefaultHasher::new();
    c.hash(&mut h);
    h.finish()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Batch round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn batch_undo_restores_project(seed in script(30), batch in script(40)) {
        let (start, actions) = project_and_batch(&seed, &batch);
        let applied = apply_actions(&start, &actions);
        prop_assert_eq!(undo_actions(&applied, &actions), start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Single-action round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_undo_restores_project(seed in script(30), step in (0u8..10, any::<u32>(), any::<u32>())) {
        let (start, actions) = project_and_batch(&seed, &[step]);
        for action in &actions {
            let applied = apply_actions(&start, std::slice::from_ref(action));
            prop_assert_eq!(&undo_actions(&applied, std::slice::from_ref(action)), &start);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. invert is an involution
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn invert_twice_is_identity(seed in script(20), batch in script(20)) {
        let (_, actions) = project_and_batch(&seed, &batch);
        for action in &actions {
            prop_assert_eq!(&action.invert().invert(), action);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Connection symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn connection_is_orientation_free(a in any::<u32>(), b in any::<u32>()) {
        let ab = Connection::new(SolarSystemId(a), SolarSystemId(b));
        let ba = Connection::new(SolarSystemId(b), SolarSystemId(a));
        prop_assert_eq!(ab, ba);
        prop_assert_eq!(hash_of(&ab), hash_of(&ba));
        prop_assert_eq!(ab.cmp(&ba), std::cmp::Ordering::Equal);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Inputs are never mutated
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn apply_leaves_input_untouched(seed in script(20), batch in script(20)) {
        let (start, actions) = project_and_batch(&seed, &batch);
        let before = start.clone();
        let _ = apply_actions(&start, &actions);
        prop_assert_eq!(start, before);
    }
}

#[test]
fn create_then_delete_leaves_empty_project() {
    let empty = Project::new("scenario", Canvas::default()).unwrap();
    let s1 = SolarSystem::new(SolarSystemId(1), Coordinate::new(3.0, 4.0));
    let created = apply_actions(&empty, &[Action::CreateSolarSystem { solar_system: s1 }]);
    let deleted = apply_actions(&created, &[Action::DeleteSolarSystem { solar_system: s1 }]);
    assert!(deleted.solar_systems().is_empty());
    assert_eq!(deleted, empty);
}
