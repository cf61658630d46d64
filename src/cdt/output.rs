// Copyright 2025 Lars Brubaker
// Finalization: collect the triangles bounded by constraints and build the
// flat output buffers.

use super::Context;
use crate::mesh::{TriIdx, INVALID};

impl Context {
    /// Find a triangle inside the outer contour and flood fill from it.
    ///
    /// The leftmost real point on the final front lies on the outer contour;
    /// rotating counter-clockwise around it from its front triangle reaches a
    /// triangle whose clockwise edge is a constraint, which is inside.
    pub(super) fn finalize_polygon(&mut self) {
        let first = self.front.next(self.front.head());
        let p = self.front.point(first);
        let mut t = self.front.triangle(first);
        let limit = self.mesh.triangles.len();

        let mut steps = 0;
        while !self.mesh.triangles[t].constrained_cw(p) {
            let next = self.mesh.triangles[t].neighbor_ccw(p);
            assert!(
                next != INVALID && steps < limit,
                "no constrained edge around front point {}",
                p
            );
            t = next;
            steps += 1;
        }
        tracing::trace!(seed = t, point = p, steps, "finalization seed");

        self.mesh_clean(t);
    }

    /// Mark and collect every triangle reachable from `seed` without
    /// crossing a constrained edge.
    fn mesh_clean(&mut self, seed: TriIdx) {
        self.fill_stack.clear();
        self.fill_stack.push(seed);

        while let Some(t) = self.fill_stack.pop() {
            let tri = &mut self.mesh.triangles[t];
            if tri.flags.is_interior() {
                continue;
            }
            tri.flags.set_interior(true);
            let tri = *tri;
            self.result.push(t);

            for i in 0..3 {
                let n = tri.neighbors[i];
                if tri.flags.is_constrained(i) || n == INVALID {
                    continue;
                }
                if !self.mesh.triangles[n].flags.is_interior() {
                    self.fill_stack.push(n);
                }
            }
        }
    }

    pub(super) fn build_output(&mut self) {
        let n = self.input_point_count as usize;
        for p in &self.mesh.points.as_slice()[..n] {
            self.out_vertices.push(p.x);
            self.out_vertices.push(p.y);
        }
        for &t in &self.result {
            let tri = &self.mesh.triangles[t];
            debug_assert!(
                tri.points.iter().all(|&p| p < self.input_point_count),
                "interior triangle {} touches a bounding sentinel",
                t
            );
            self.out_elements.extend_from_slice(&tri.points);
        }
    }
}
