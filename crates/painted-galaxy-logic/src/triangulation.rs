//! Delaunay triangulation (Bowyer–Watson with a ghost vertex).
//!
//! Every hull edge is paired with a single vertex at infinity, forming a
//! "ghost" triangle. A ghost triangle's circumcircle degenerates to the open
//! half-plane outside its hull edge plus the open edge itself, so a point
//! landing outside the hull opens the hull the same way an interior point
//! opens its cavity. Nothing is clipped away at the end, which keeps thin,
//! nearly collinear hulls intact.
//!
//! The orientation and in-circle predicates are evaluated relative to the
//! query point. For integer pixel coordinates they are exact.
//!
//! Repeated coordinates are inserted once. If every point is collinear there
//! are no triangles, and [`triangulation_edges`] falls back to joining the
//! points in order along the line.

use std::collections::{HashMap, HashSet};

use crate::coordinate::Coordinate;

/// The vertex at infinity closing off the hull.
const GHOST: usize = usize::MAX;

/// Indices into the input point slice, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triangle {
    fn edges(&self) -> [(usize, usize); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Ghost triangles always carry the ghost vertex in `c`; the outside of
    /// their hull edge lies to the left of `a -> b`.
    fn is_ghost(&self) -> bool {
        self.c == GHOST
    }

    fn conflicts_with(&self, points: &[Coordinate], p: Coordinate) -> bool {
        if self.is_ghost() {
            let (a, b) = (points[self.a], points[self.b]);
            let side = orient(a, b, p);
            side > 0.0 || (side == 0.0 && strictly_between(a, b, p))
        } else {
            in_circle(points[self.a], points[self.b], points[self.c], p) > 0.0
        }
    }
}

/// Twice the signed area of `abc`, positive when counter-clockwise.
fn orient(a: Coordinate, b: Coordinate, c: Coordinate) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Positive when `p` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `abc`.
fn in_circle(a: Coordinate, b: Coordinate, c: Coordinate, p: Coordinate) -> f64 {
    let (adx, ady) = (a.x - p.x, a.y - p.y);
    let (bdx, bdy) = (b.x - p.x, b.y - p.y);
    let (cdx, cdy) = (c.x - p.x, c.y - p.y);
    (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        + (bdx * bdx + bdy * bdy) * (cdx * ady - adx * cdy)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady)
}

/// `p`, already known to be on the line `ab`, lies between `a` and `b`.
fn strictly_between(a: Coordinate, b: Coordinate, p: Coordinate) -> bool {
    (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y) > 0.0
        && (p.x - b.x) * (a.x - b.x) + (p.y - b.y) * (a.y - b.y) > 0.0
}

/// First three points spanning a triangle, ordered counter-clockwise.
fn seed_triangle(points: &[Coordinate]) -> Option<Triangle> {
    let first = *points.first()?;
    let second = (1..points.len()).find(|&i| points[i] != first)?;
    let third = (second + 1..points.len())
        .find(|&i| orient(first, points[second], points[i]) != 0.0)?;
    if orient(first, points[second], points[third]) > 0.0 {
        Some(Triangle { a: 0, b: second, c: third })
    } else {
        Some(Triangle { a: 0, b: third, c: second })
    }
}

/// Triangle joining a cavity boundary edge `u -> v` to the new point,
/// keeping the ghost vertex in last position.
fn fan(u: usize, v: usize, apex: usize) -> Triangle {
    match (u, v) {
        (GHOST, v) => Triangle { a: v, b: apex, c: GHOST },
        (u, GHOST) => Triangle { a: apex, b: u, c: GHOST },
        (u, v) => Triangle { a: u, b: v, c: apex },
    }
}

/// Triangulate `points`. Returned triangles reference input indices only.
///
/// For input that is not entirely collinear this yields `2n - h - 2`
/// triangles, where `h` counts the points on the hull boundary.
pub fn triangulate(points: &[Coordinate]) -> Vec<Triangle> {
    let Some(seed) = seed_triangle(points) else {
        return Vec::new();
    };
    let mut triangles = vec![
        seed,
        Triangle { a: seed.b, b: seed.a, c: GHOST },
        Triangle { a: seed.c, b: seed.b, c: GHOST },
        Triangle { a: seed.a, b: seed.c, c: GHOST },
    ];
    let mut inserted: HashSet<Coordinate> =
        [seed.a, seed.b, seed.c].iter().map(|&i| points[i]).collect();

    for (i, &p) in points.iter().enumerate() {
        if !inserted.insert(p) {
            continue;
        }
        let (bad, good): (Vec<_>, Vec<_>) = triangles
            .into_iter()
            .partition(|t| t.conflicts_with(points, p));

        // Cavity boundary: edges belonging to exactly one bad triangle.
        let mut edge_count: HashMap<(usize, usize), u32> = HashMap::new();
        for t in &bad {
            for (u, v) in t.edges() {
                *edge_count.entry((u.min(v), u.max(v))).or_default() += 1;
            }
        }

        triangles = good;
        for t in &bad {
            for (u, v) in t.edges() {
                if edge_count[&(u.min(v), u.max(v))] == 1 {
                    triangles.push(fan(u, v, i));
                }
            }
        }
    }

    triangles.retain(|t| !t.is_ghost());
    triangles
}

/// Unique undirected edges `(i, j)` with `i < j`, in the order first
/// encountered while walking the triangles.
pub fn triangulation_edges(points: &[Coordinate]) -> Vec<(usize, usize)> {
    let triangles = triangulate(points);
    if triangles.is_empty() {
        return collinear_edges(points);
    }
    let mut seen = std::collections::HashSet::new();
    let mut edges = Vec::new();
    for t in &triangles {
        for (u, v) in t.edges() {
            let key = (u.min(v), u.max(v));
            if seen.insert(key) {
                edges.push(key);
            }
        }
    }
    edges
}

/// Chain of neighbours along a line (also covers one or two points).
fn collinear_edges(points: &[Coordinate]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| points[i].cmp(&points[j]));
    order
        .windows(2)
        .map(|w| (w[0].min(w[1]), w[0].max(w[1])))
        .collect()
}
