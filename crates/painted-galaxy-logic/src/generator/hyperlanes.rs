//! Hyperlane network: Delaunay triangulation, MST backbone, random pruning.

use std::collections::{BTreeMap, HashSet};

use log::debug;
use rand::Rng;

use super::delete_hyperlanes;
use crate::action::Action;
use crate::connection::Connection;
use crate::coordinate::Coordinate;
use crate::graph::{minimum_spanning_tree, WeightedEdge};
use crate::project::Project;
use crate::solar_system::SolarSystemId;
use crate::triangulation::triangulation_edges;

/// Replace all hyperlanes with a pruned triangulation of the systems.
///
/// Starting from the Delaunay edges:
/// - an edge longer than `hyperlane_max_distance` is dropped, unless it is
///   part of the minimum spanning tree and `allow_disconnected` is off;
/// - each remaining non-MST edge survives with probability
///   `hyperlane_connectivity`.
///
/// With `allow_disconnected` off the MST is always kept, so the network
/// stays connected. Fewer than 3 systems yields an empty batch.
pub fn generate_hyperlanes(project: &Project, rng: &mut impl Rng) -> Vec<Action> {
    let systems = project.solar_systems();
    if systems.len() < 3 {
        return Vec::new();
    }
    let settings = project.generator_settings();

    // Systems sharing a coordinate collapse onto the last one listed.
    let mut by_coordinate: BTreeMap<Coordinate, SolarSystemId> = BTreeMap::new();
    for s in systems {
        by_coordinate.insert(s.coordinate, s.id);
    }
    let (points, ids): (Vec<Coordinate>, Vec<SolarSystemId>) = by_coordinate.into_iter().unzip();

    let edges: Vec<WeightedEdge> = triangulation_edges(&points)
        .into_iter()
        .map(|(i, j)| WeightedEdge {
            a: ids[i],
            b: ids[j],
            distance: points[i].distance_to(&points[j]),
        })
        .collect();
    let in_mst = minimum_spanning_tree(&edges);

    let mut seen = HashSet::new();
    let mut created = Vec::new();
    for (edge, &is_mst) in edges.iter().zip(&in_mst) {
        let too_long = edge.distance > settings.hyperlane_max_distance
            && (!is_mst || settings.allow_disconnected);
        // Always draw so the random sequence does not depend on edge length.
        let culled = !is_mst && rng.gen::<f64>() > settings.hyperlane_connectivity;
        if too_long || culled {
            continue;
        }
        let connection = Connection::new(edge.a, edge.b);
        if seen.insert(connection) {
            created.push(Action::CreateHyperlane { connection });
        }
    }

    debug!(
        "hyperlanes: {} triangulation edges, {} kept",
        edges.len(),
        created.len()
    );

    delete_hyperlanes(project).chain(created).collect()
}
