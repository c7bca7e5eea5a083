//! Undirected system graphs: minimum spanning trees and hop distances.
//!
//! `SystemGraph` holds an adjacency list keyed by system id and provides
//! degree queries and multi-source BFS. [`minimum_spanning_tree`] is
//! Kruskal's algorithm over a weighted edge list.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::solar_system::SolarSystemId;

/// A weighted undirected edge between two systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub a: SolarSystemId,
    pub b: SolarSystemId,
    pub distance: f64,
}

/// Disjoint-set forest with path halving and union by size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns false if `a` and `b` were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}

/// Kruskal's MST. Returns one flag per input edge: `true` if it is in the
/// tree (a forest, if the graph is disconnected). Equal weights keep their
/// input order.
pub fn minimum_spanning_tree(edges: &[WeightedEdge]) -> Vec<bool> {
    let mut ids: HashMap<SolarSystemId, usize> = HashMap::new();
    for e in edges {
        let next = ids.len();
        ids.entry(e.a).or_insert(next);
        let next = ids.len();
        ids.entry(e.b).or_insert(next);
    }

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&i, &j| edges[i].distance.total_cmp(&edges[j].distance));

    let mut sets = UnionFind::new(ids.len());
    let mut in_tree = vec![false; edges.len()];
    for i in order {
        let e = &edges[i];
        if sets.union(ids[&e.a], ids[&e.b]) {
            in_tree[i] = true;
        }
    }
    in_tree
}

/// Unweighted adjacency over a set of systems.
#[derive(Debug, Clone, Default)]
pub struct SystemGraph {
    /// Node order as supplied to [`SystemGraph::new`].
    nodes: Vec<SolarSystemId>,
    /// id → neighbours, in edge insertion order
    adj: HashMap<SolarSystemId, Vec<SolarSystemId>>,
}

impl SystemGraph {
    /// Build a graph from nodes and edges. Edges naming unknown nodes,
    /// self-loops and repeated edges are ignored.
    pub fn new(
        nodes: impl IntoIterator<Item = SolarSystemId>,
        edges: impl IntoIterator<Item = (SolarSystemId, SolarSystemId)>,
    ) -> Self {
        let mut graph = Self::default();
        for id in nodes {
            if !graph.adj.contains_key(&id) {
                graph.adj.insert(id, Vec::new());
                graph.nodes.push(id);
            }
        }
        for (a, b) in edges {
            if a == b || !graph.adj.contains_key(&a) || !graph.adj.contains_key(&b) {
                continue;
            }
            if graph.adj[&a].contains(&b) {
                continue;
            }
            graph.adj.entry(a).or_default().push(b);
            graph.adj.entry(b).or_default().push(a);
        }
        graph
    }

    pub fn nodes(&self) -> &[SolarSystemId] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn has_node(&self, id: SolarSystemId) -> bool {
        self.adj.contains_key(&id)
    }

    pub fn neighbors(&self, id: SolarSystemId) -> &[SolarSystemId] {
        self.adj.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn degree(&self, id: SolarSystemId) -> usize {
        self.neighbors(id).len()
    }

    /// Hop distance from the nearest source, in BFS discovery order.
    ///
    /// Sources are reported at distance 0; unreachable nodes are absent.
    pub fn bfs_from(&self, sources: &[SolarSystemId]) -> Vec<(SolarSystemId, u32)> {
        let mut dist: HashMap<SolarSystemId, u32> = HashMap::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        for &s in sources {
            if self.has_node(s) && !dist.contains_key(&s) {
                dist.insert(s, 0);
                order.push((s, 0));
                queue.push_back(s);
            }
        }
        while let Some(current) = queue.pop_front() {
            let d = dist[&current];
            for &next in self.neighbors(current) {
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    order.push((next, d + 1));
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// Number of connected components (isolated nodes count as one each).
    pub fn component_count(&self) -> usize {
        let mut seen: HashSet<SolarSystemId> = HashSet::new();
        let mut components = 0;
        for &id in &self.nodes {
            if seen.contains(&id) {
                continue;
            }
            components += 1;
            seen.extend(self.bfs_from(&[id]).into_iter().map(|(reached, _)| reached));
        }
        components
    }
}
