// Copyright 2025 Lars Brubaker
// Structural and Delaunay checks over a finished (or in-progress) mesh.

use super::{Mesh, TriIdx, INVALID};
use crate::geom::in_circle;

impl Mesh {
    /// True if every neighbor link of `t` is reciprocated across the same
    /// shared edge.
    pub fn neighbor_links_consistent(&self, t: TriIdx) -> bool {
        let tri = self.triangles[t];
        for i in 0..3 {
            let n = tri.neighbors[i];
            if n == INVALID {
                continue;
            }
            let p = tri.points[(i + 1) % 3];
            let q = tri.points[(i + 2) % 3];
            match self.triangles[n].edge_index(p, q) {
                Some(j) if self.triangles[n].neighbors[j] == t => {}
                _ => return false,
            }
        }
        true
    }

    /// Check reciprocity for every triangle in `set`.
    pub fn neighbors_consistent(&self, set: &[TriIdx]) -> bool {
        set.iter().all(|&t| self.neighbor_links_consistent(t))
    }

    /// True if local edge `i` of `t` is a boundary, a constraint, or passes
    /// the empty-circumcircle test against the neighbor's far corner.
    pub fn edge_is_locally_delaunay(&self, t: TriIdx, i: usize) -> bool {
        let tri = self.triangles[t];
        let n = tri.neighbors[i];
        if n == INVALID || tri.flags.is_constrained(i) {
            return true;
        }
        let p = tri.points[i];
        let op = self.triangles[n].opposite_point(&tri, p);
        !in_circle(
            self.coord(p),
            self.coord(tri.point_ccw(p)),
            self.coord(tri.point_cw(p)),
            self.coord(op),
        )
    }

    /// Unconstrained edges between two interior triangles of `set` that a
    /// Delaunay flip would still change.
    pub fn illegal_edges(&self, set: &[TriIdx]) -> Vec<(TriIdx, usize)> {
        let mut result = Vec::new();
        for &t in set {
            let tri = &self.triangles[t];
            for i in 0..3 {
                let n = tri.neighbors[i];
                if n == INVALID || !self.triangles[n].flags.is_interior() {
                    continue;
                }
                if !self.edge_is_locally_delaunay(t, i) {
                    result.push((t, i));
                }
            }
        }
        result
    }
}
