//! Spawn placement: pick a spread-out set of home systems on the hyperlane graph.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::action::Action;
use crate::constants::spawns;
use crate::graph::SystemGraph;
use crate::project::Project;
use crate::solar_system::{SolarSystemId, SpawnType};

/// Number of spawns wanted for a map of `system_count` systems.
///
/// ```
/// use painted_galaxy_logic::generator::target_spawn_count;
///
/// assert_eq!(target_spawn_count(600), 27);
/// assert_eq!(target_spawn_count(10), 0);
/// ```
pub fn target_spawn_count(system_count: usize) -> usize {
    (system_count as f64 / 200.0
        * spawns::MAX_AI_EMPIRES_PER_200_SYSTEMS
        * spawns::SPAWNS_PER_MAX_AI_EMPIRE)
        .round() as usize
}

/// Systems at the end of a branch: degree 0 or 1, plus every node reached
/// from one of those through a chain of nodes with degree ≤ 2.
pub fn dead_ends(graph: &SystemGraph) -> HashSet<SolarSystemId> {
    let mut marked = HashSet::new();
    for &id in graph.nodes() {
        if graph.degree(id) > 1 || !marked.insert(id) {
            continue;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            for &next in graph.neighbors(current) {
                if graph.degree(next) <= 2 && marked.insert(next) {
                    stack.push(next);
                }
            }
        }
    }
    marked
}

/// Choose spawn systems and return the `spawn_type` updates that apply them.
///
/// A contiguous window of systems (in creation order) starting at a random
/// offset is taken as the provisional set. Each provisional spawn is then
/// moved once to the non-dead-end system farthest (in hyperlane hops) from
/// all the others, ties broken at random. Systems marked
/// [`SpawnType::Preferred`] are never updated.
pub fn generate_spawns(project: &Project, rng: &mut impl Rng) -> Vec<Action> {
    let systems = project.solar_systems();
    let graph = SystemGraph::new(
        systems.iter().map(|s| s.id),
        project.hyperlanes().iter().map(|c| (c.a, c.b)),
    );
    let dead = dead_ends(&graph);

    let count = target_spawn_count(systems.len()).min(systems.len());
    let span = systems.len() - count;
    let start = if span == 0 { 0 } else { rng.gen_range(0..span) };
    let mut chosen: Vec<SolarSystemId> = systems[start..start + count].iter().map(|s| s.id).collect();

    let mut moved = 0;
    for index in 0..chosen.len() {
        let current = chosen[index];
        let others: Vec<SolarSystemId> = chosen.iter().copied().filter(|&id| id != current).collect();

        let mut max_distance = 0;
        let mut farthest: Vec<SolarSystemId> = Vec::new();
        for (id, distance) in graph.bfs_from(&others) {
            if distance == 0 || dead.contains(&id) {
                continue;
            }
            if distance > max_distance {
                max_distance = distance;
                farthest.clear();
                farthest.push(id);
            } else if distance == max_distance {
                farthest.push(id);
            }
        }

        if max_distance > 0 && !farthest.is_empty() {
            let target = farthest[rng.gen_range(0..farthest.len())];
            if target != current {
                moved += 1;
            }
            chosen[index] = target;
        }
    }

    debug!(
        "spawns: {} of {} systems, {} dead ends, {} relocated",
        chosen.len(),
        systems.len(),
        dead.len(),
        moved
    );

    let selected: HashSet<SolarSystemId> = chosen.into_iter().collect();
    systems
        .iter()
        .filter_map(|&system| {
            let wanted = match (selected.contains(&system.id), system.spawn_type) {
                (_, SpawnType::Preferred) => return None,
                (true, SpawnType::Enabled) | (false, SpawnType::Disabled) => return None,
                (true, _) => SpawnType::Enabled,
                (false, _) => SpawnType::Disabled,
            };
            Some(Action::UpdateSolarSystem {
                old_value: system,
                new_value: system.with_spawn_type(wanted),
            })
        })
        .collect()
}
