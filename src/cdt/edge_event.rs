// Copyright 2025 Lars Brubaker
// Edge events: forcing a constraint p-q into the mesh once its upper
// endpoint q has been swept.
//
// First the front between q and p is filled so the constraint lies over
// triangles only (fill_*_edge_event). Then the triangles the constraint
// crosses are walked from q, flipping the shared diagonal of each crossed
// pair until p-q is a triangle side (flip_*). A crossed pair that cannot be
// flipped because the quad is not convex is resolved by scanning ahead for a
// point that makes it flippable (flip_scan_edge_event).

use super::Context;
use crate::front::NodeIdx;
use crate::geom::{in_scan_area, orient_2d, Orientation};
use crate::mesh::{Edge, PointIdx, TriIdx, Triangle, INVALID};
use crate::sweep::EdgeEvent;

/// Local index of edge p-q, which `tri` must have.
fn shared_edge(tri: &Triangle, p: PointIdx, q: PointIdx) -> usize {
    match tri.edge_index(p, q) {
        Some(i) => i,
        None => panic!("edge {}-{} is not a side of triangle {:?}", p, q, tri.points),
    }
}

impl Context {
    pub(super) fn edge_event_for_edge(&mut self, edge: Edge, node: NodeIdx) {
        let mut event = EdgeEvent {
            p: edge.p,
            q: edge.q,
            right: self.mesh.points[edge.p].x > self.mesh.points[edge.q].x,
        };

        if self.is_edge_side_of_triangle(self.front.triangle(node), edge.p, edge.q) {
            return;
        }

        // Fill first so the flips below only ever see triangles.
        self.fill_edge_event(&event, node);
        let t = self.front.triangle(node);
        self.edge_event(&mut event, edge.p, edge.q, t, edge.q, 0);
    }

    /// If ep-eq is already a side of `t`, mark it constrained on both
    /// triangles sharing it.
    fn is_edge_side_of_triangle(&mut self, t: TriIdx, ep: PointIdx, eq: PointIdx) -> bool {
        let tri = self.mesh.triangles[t];
        match tri.edge_index(ep, eq) {
            Some(i) => {
                self.mesh.triangles[t].flags.set_constrained(i, true);
                let n = tri.neighbors[i];
                if n != INVALID {
                    self.mesh.triangles[n].mark_constrained_edge(ep, eq);
                }
                true
            }
            None => false,
        }
    }

    /// Walk around `point` to the triangle the constraint ep-eq leaves
    /// through, then flip until ep-eq is a triangle side.
    fn edge_event(
        &mut self,
        event: &mut EdgeEvent,
        ep: PointIdx,
        eq: PointIdx,
        t: TriIdx,
        point: PointIdx,
        depth: u32,
    ) {
        let depth = self.enter(depth, "edge event");
        let (mut eq, mut t, mut point) = (eq, t, point);
        loop {
            assert!(
                t != INVALID,
                "edge event for {}-{} ran off the mesh at point {}",
                ep,
                eq,
                point
            );
            if self.is_edge_side_of_triangle(t, ep, eq) {
                return;
            }

            let tri = self.mesh.triangles[t];

            // A constraint passing exactly through a corner is split there
            // and the remaining piece ep-corner is forced next.
            let p1 = tri.point_ccw(point);
            let o1 = orient_2d(self.coord(eq), self.coord(p1), self.coord(ep));
            if o1 == Orientation::Collinear {
                self.split_collinear_edge_event(event, &tri, t, ep, eq, p1);
                (eq, t, point) = (p1, tri.neighbor_across(point), p1);
                continue;
            }

            let p2 = tri.point_cw(point);
            let o2 = orient_2d(self.coord(eq), self.coord(p2), self.coord(ep));
            if o2 == Orientation::Collinear {
                self.split_collinear_edge_event(event, &tri, t, ep, eq, p2);
                (eq, t, point) = (p2, tri.neighbor_across(point), p2);
                continue;
            }

            if o1 == o2 {
                // Both corners on one side: rotate towards the crossing triangle.
                t = if o1 == Orientation::Cw {
                    tri.neighbor_ccw(point)
                } else {
                    tri.neighbor_cw(point)
                };
                continue;
            }

            match self.flip_edge_event(event, ep, eq, t, point, depth) {
                Some((next_t, next_point)) => {
                    t = next_t;
                    point = next_point;
                }
                None => return,
            }
        }
    }

    fn split_collinear_edge_event(
        &mut self,
        event: &mut EdgeEvent,
        tri: &Triangle,
        t: TriIdx,
        ep: PointIdx,
        eq: PointIdx,
        corner: PointIdx,
    ) {
        assert!(
            tri.contains_edge(eq, corner),
            "constraint {}-{} passes through point {}: collinear points are not supported",
            ep,
            eq,
            corner
        );
        self.mesh.triangles[t].mark_constrained_edge(eq, corner);
        event.q = corner;
    }

    // ──────────────────────────────── Fill phase ─────────────────────────────

    fn fill_edge_event(&mut self, event: &EdgeEvent, node: NodeIdx) {
        if event.right {
            self.fill_right_above_edge_event(event, node);
        } else {
            self.fill_left_above_edge_event(event, node);
        }
    }

    /// True if front node `n` lies below the constraint, seen walking right.
    #[inline]
    fn below_right(&self, event: &EdgeEvent, n: NodeIdx) -> bool {
        orient_2d(self.coord(event.q), self.node_coord(n), self.coord(event.p)) == Orientation::Ccw
    }

    /// True if front node `n` lies below the constraint, seen walking left.
    #[inline]
    fn below_left(&self, event: &EdgeEvent, n: NodeIdx) -> bool {
        orient_2d(self.coord(event.q), self.node_coord(n), self.coord(event.p)) == Orientation::Cw
    }

    fn fill_right_above_edge_event(&mut self, event: &EdgeEvent, mut node: NodeIdx) {
        let px = self.mesh.points[event.p].x;
        loop {
            let next = self.front.next(node);
            if next == INVALID || self.front.value(next) >= px {
                break;
            }
            if !self.below_right(event, next) || !self.fill_right_below_edge_event(event, node) {
                node = next;
            }
        }
    }

    /// Fill under the constraint right of `node` until it turns concave.
    /// Returns false if nothing could be filled.
    fn fill_right_below_edge_event(&mut self, event: &EdgeEvent, node: NodeIdx) -> bool {
        let px = self.mesh.points[event.p].x;
        let mut filled = false;
        loop {
            if self.front.value(node) >= px {
                return filled;
            }
            let next = self.front.next(node);
            let next2 = self.front.next(next);
            if next2 == INVALID {
                return filled;
            }
            let o = orient_2d(self.node_coord(node), self.node_coord(next), self.node_coord(next2));
            if o == Orientation::Ccw {
                self.fill_right_concave_edge_event(event, node);
                return true;
            }
            if !self.fill_right_convex_edge_event(event, node) {
                return filled;
            }
            filled = true;
        }
    }

    fn fill_right_concave_edge_event(&mut self, event: &EdgeEvent, node: NodeIdx) {
        loop {
            self.fill(self.front.next(node));

            let next = self.front.next(node);
            if self.front.point(next) == event.p || !self.below_right(event, next) {
                return;
            }
            let next2 = self.front.next(next);
            if next2 == INVALID
                || orient_2d(self.node_coord(node), self.node_coord(next), self.node_coord(next2))
                    != Orientation::Ccw
            {
                return;
            }
        }
    }

    /// Returns false if the convex run ended above the constraint without
    /// filling anything.
    fn fill_right_convex_edge_event(&mut self, event: &EdgeEvent, mut node: NodeIdx) -> bool {
        loop {
            let n1 = self.front.next(node);
            let n2 = if n1 == INVALID { INVALID } else { self.front.next(n1) };
            let n3 = if n2 == INVALID { INVALID } else { self.front.next(n2) };
            if n3 == INVALID {
                return false;
            }
            if orient_2d(self.node_coord(n1), self.node_coord(n2), self.node_coord(n3))
                == Orientation::Ccw
            {
                self.fill_right_concave_edge_event(event, n1);
                return true;
            }
            if !self.below_right(event, n2) {
                return false;
            }
            node = n1;
        }
    }

    fn fill_left_above_edge_event(&mut self, event: &EdgeEvent, mut node: NodeIdx) {
        let px = self.mesh.points[event.p].x;
        loop {
            let prev = self.front.prev(node);
            if prev == INVALID || self.front.value(prev) <= px {
                break;
            }
            if !self.below_left(event, prev) || !self.fill_left_below_edge_event(event, node) {
                node = prev;
            }
        }
    }

    fn fill_left_below_edge_event(&mut self, event: &EdgeEvent, node: NodeIdx) -> bool {
        let px = self.mesh.points[event.p].x;
        let mut filled = false;
        loop {
            if self.front.value(node) <= px {
                return filled;
            }
            let prev = self.front.prev(node);
            let prev2 = self.front.prev(prev);
            if prev2 == INVALID {
                return filled;
            }
            let o = orient_2d(self.node_coord(node), self.node_coord(prev), self.node_coord(prev2));
            if o == Orientation::Cw {
                self.fill_left_concave_edge_event(event, node);
                return true;
            }
            if !self.fill_left_convex_edge_event(event, node) {
                return filled;
            }
            filled = true;
        }
    }

    fn fill_left_concave_edge_event(&mut self, event: &EdgeEvent, node: NodeIdx) {
        loop {
            self.fill(self.front.prev(node));

            let prev = self.front.prev(node);
            if self.front.point(prev) == event.p || !self.below_left(event, prev) {
                return;
            }
            let prev2 = self.front.prev(prev);
            if prev2 == INVALID
                || orient_2d(self.node_coord(node), self.node_coord(prev), self.node_coord(prev2))
                    != Orientation::Cw
            {
                return;
            }
        }
    }

    fn fill_left_convex_edge_event(&mut self, event: &EdgeEvent, mut node: NodeIdx) -> bool {
        loop {
            let n1 = self.front.prev(node);
            let n2 = if n1 == INVALID { INVALID } else { self.front.prev(n1) };
            let n3 = if n2 == INVALID { INVALID } else { self.front.prev(n2) };
            if n3 == INVALID {
                return false;
            }
            if orient_2d(self.node_coord(n1), self.node_coord(n2), self.node_coord(n3))
                == Orientation::Cw
            {
                self.fill_left_concave_edge_event(event, n1);
                return true;
            }
            if !self.below_left(event, n2) {
                return false;
            }
            node = n1;
        }
    }

    // ──────────────────────────────── Flip phase ─────────────────────────────

    /// Flip the pairs crossed by ep-eq, starting with `t` and the triangle
    /// across `p`. Returns the triangle and point to resume the edge event
    /// from when a non-convex pair had to be scanned past first.
    fn flip_edge_event(
        &mut self,
        event: &mut EdgeEvent,
        ep: PointIdx,
        eq: PointIdx,
        t: TriIdx,
        p: PointIdx,
        depth: u32,
    ) -> Option<(TriIdx, PointIdx)> {
        let depth = self.enter(depth, "flip edge event");
        let mut t = t;
        loop {
            let tri = self.mesh.triangles[t];
            let ot = tri.neighbor_across(p);
            assert!(
                ot != INVALID,
                "flip for constraint {}-{} found no triangle across point {}",
                ep,
                eq,
                p
            );
            let op = self.mesh.triangles[ot].opposite_point(&tri, p);

            if !in_scan_area(
                self.coord(p),
                self.coord(tri.point_ccw(p)),
                self.coord(tri.point_cw(p)),
                self.coord(op),
            ) {
                let new_p = self.next_flip_point(ep, eq, ot, op);
                self.flip_scan_edge_event(event, ep, eq, t, ot, new_p, depth);
                return Some((t, p));
            }

            self.mesh.rotate_triangle_pair(t, p, ot, op);
            self.map_triangle_to_nodes(t);
            self.map_triangle_to_nodes(ot);

            if p == eq && op == ep {
                if eq == event.q && ep == event.p {
                    self.mesh.triangles[t].mark_constrained_edge(ep, eq);
                    self.mesh.triangles[ot].mark_constrained_edge(ep, eq);
                    self.legalize(t, 0);
                    self.legalize(ot, 0);
                }
                // A sub-edge from a flip scan reached its end: the pair is
                // left as flipped.
                return None;
            }

            let o = orient_2d(self.coord(eq), self.coord(op), self.coord(ep));
            t = self.next_flip_triangle(o, t, ot, p, op);
        }
    }

    /// After a flip one of the pair no longer crosses the constraint;
    /// legalize that one and continue with the other.
    fn next_flip_triangle(
        &mut self,
        o: Orientation,
        t: TriIdx,
        ot: TriIdx,
        p: PointIdx,
        op: PointIdx,
    ) -> TriIdx {
        let (done, next) = if o == Orientation::Ccw { (ot, t) } else { (t, ot) };
        let i = shared_edge(&self.mesh.triangles[done], p, op);
        self.mesh.triangles[done].flags.set_delaunay(i, true);
        self.legalize(done, 0);
        self.mesh.triangles[done].flags.clear_delaunay();
        next
    }

    /// The corner of `ot` on the far side of the constraint from `op`.
    fn next_flip_point(&self, ep: PointIdx, eq: PointIdx, ot: TriIdx, op: PointIdx) -> PointIdx {
        let otri = &self.mesh.triangles[ot];
        match orient_2d(self.coord(eq), self.coord(op), self.coord(ep)) {
            Orientation::Cw => otri.point_ccw(op),
            Orientation::Ccw => otri.point_cw(op),
            Orientation::Collinear => panic!(
                "opposing point {} lies on constrained edge {}-{}",
                op, ep, eq
            ),
        }
    }

    /// Walk past a non-convex crossed pair until a point `op` is found that
    /// `flip_triangle` can see; flip towards it as a sub-constraint eq-op.
    #[allow(clippy::too_many_arguments)]
    fn flip_scan_edge_event(
        &mut self,
        event: &mut EdgeEvent,
        ep: PointIdx,
        eq: PointIdx,
        flip_triangle: TriIdx,
        t: TriIdx,
        p: PointIdx,
        depth: u32,
    ) {
        let depth = self.enter(depth, "flip scan");
        let (mut t, mut p) = (t, p);
        loop {
            let tri = self.mesh.triangles[t];
            let ot = tri.neighbor_across(p);
            assert!(
                ot != INVALID,
                "flip scan for constraint {}-{} found no triangle across point {}",
                ep,
                eq,
                p
            );
            let op = self.mesh.triangles[ot].opposite_point(&tri, p);

            let ft = self.mesh.triangles[flip_triangle];
            if in_scan_area(
                self.coord(eq),
                self.coord(ft.point_ccw(eq)),
                self.coord(ft.point_cw(eq)),
                self.coord(op),
            ) {
                if let Some((next_t, next_p)) = self.flip_edge_event(event, eq, op, ot, op, depth) {
                    self.edge_event(event, eq, op, next_t, next_p, depth);
                }
                return;
            }

            p = self.next_flip_point(ep, eq, ot, op);
            t = ot;
        }
    }
}
