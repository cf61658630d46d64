// Copyright 2025 Lars Brubaker
// License: MIT
//
// Constrained Delaunay triangulation context: public lifecycle plus the
// point-event half of the sweep.
//
// The sweep processes points bottom to top. Each point lands on the advancing
// front, spawns one triangle, and is legalized by Delaunay edge flips; the
// front is then tidied (hole and basin fills) and every constraint ending at
// the point is forced into the mesh (see edge_event.rs). Finalization flood
// fills the region bounded by constraints (see output.rs).
//
// Lifecycle:
//   Context::new -> push_point* -> add_edge -> (push_point* -> add_hole)*
//                -> triangulate -> read triangles / elements / vertices
// A context triangulates once.

mod basin;
mod edge_event;
mod output;


use std::ops::Range;

use crate::arena::{Capacity, SENTINEL_COUNT};
use crate::error::{CdtError, CdtResult};
use crate::front::{AdvancingFront, NodeIdx};
use crate::geom::{
    angle_exceeds_90_degrees, angle_exceeds_plus_90_degrees_or_is_negative, angle_is_negative,
    basin_angle_below_three_quarter_pi, in_circle, Coord, Real, BOUNDING_MARGIN, EPSILON,
};
use crate::mesh::{Mesh, Point, PointIdx, TriIdx, Triangle, INVALID};

/// Nesting bound for the procedures that still recurse: legalize and the
/// edge-event/flip-scan chain. Their depth follows local mesh structure, not
/// the point count; every walk along the front or a crossed edge is a loop.
const MAX_RECURSION_DEPTH: u32 = 1024;

pub struct Context {
    capacity: Capacity,
    mesh: Mesh,
    front: AdvancingFront,
    /// Input points in sweep order.
    sweep_order: Vec<PointIdx>,
    input_point_count: u32,
    /// First point of the contour currently being pushed.
    contour_start: u32,
    has_outer: bool,
    hole_count: u32,
    head_point: PointIdx,
    tail_point: PointIdx,
    valid: bool,
    /// Flood-fill stack for finalization, reserved up front.
    fill_stack: Vec<TriIdx>,

    // Output
    result: Vec<TriIdx>,
    out_elements: Vec<u32>,
    out_vertices: Vec<Real>,
}

impl Context {
    /// Reserve every pool for up to `max_point_count` input points.
    pub fn new(max_point_count: u32) -> CdtResult<Self> {
        if max_point_count == 0 {
            return Err(CdtError::ZeroCapacity);
        }
        let capacity = Capacity::for_points(max_point_count);
        tracing::debug!(
            max_point_count,
            bytes = capacity.bytes(),
            "created triangulation context"
        );
        Ok(Context {
            capacity,
            mesh: Mesh::new(&capacity),
            front: AdvancingFront::with_capacity(capacity.nodes as usize),
            sweep_order: Vec::with_capacity((capacity.points - SENTINEL_COUNT) as usize),
            input_point_count: 0,
            contour_start: 0,
            has_outer: false,
            hole_count: 0,
            head_point: INVALID,
            tail_point: INVALID,
            valid: false,
            fill_stack: Vec::with_capacity(capacity.fill_stack as usize),
            result: Vec::with_capacity(capacity.triangles as usize),
            out_elements: Vec::with_capacity(capacity.triangles as usize * 3),
            out_vertices: Vec::with_capacity((capacity.points - SENTINEL_COUNT) as usize * 2),
        })
    }

    pub fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    /// Append one point to the contour being built.
    ///
    /// Panics if the context was sized for fewer points or has already been
    /// triangulated.
    pub fn push_point(&mut self, x: Real, y: Real) -> PointIdx {
        assert!(!self.valid, "cannot push points into a triangulated context");
        let limit = (self.capacity.points - SENTINEL_COUNT) as usize;
        assert!(
            self.mesh.points.len() < limit,
            "arena exhausted: point pool is full (capacity {})",
            limit
        );
        let idx = self.mesh.points.push(Point::new(x, y));
        self.input_point_count += 1;
        idx
    }

    /// Append a run of points, returning their handles.
    pub fn push_point_range(&mut self, coords: &[Coord]) -> Range<PointIdx> {
        let start = self.input_point_count;
        for c in coords {
            self.push_point(c[0], c[1]);
        }
        start..self.input_point_count
    }

    /// Close the points pushed so far into the outer contour.
    pub fn add_edge(&mut self) -> CdtResult<()> {
        if self.valid {
            return Err(CdtError::AlreadyTriangulated);
        }
        if self.has_outer {
            return Err(CdtError::OuterContourAlreadyAdded);
        }
        let count = self.close_contour()?;
        self.has_outer = true;
        tracing::debug!(points = count, "added outer contour");
        Ok(())
    }

    /// Close the points pushed since the previous contour into a hole.
    pub fn add_hole(&mut self) -> CdtResult<()> {
        if self.valid {
            return Err(CdtError::AlreadyTriangulated);
        }
        if !self.has_outer {
            return Err(CdtError::HoleBeforeOuterContour);
        }
        let count = self.close_contour()?;
        self.hole_count += 1;
        tracing::debug!(points = count, hole = self.hole_count, "added hole contour");
        Ok(())
    }

    /// Chain the pending points into a closed loop of constraint edges.
    fn close_contour(&mut self) -> CdtResult<u32> {
        let start = self.contour_start;
        let end = self.input_point_count;
        let count = end - start;
        if count < 3 {
            return Err(CdtError::ContourTooShort(count as usize));
        }
        for i in start..end {
            let j = if i + 1 == end { start } else { i + 1 };
            self.mesh.add_edge(i, j);
        }
        self.contour_start = end;
        Ok(count)
    }

    /// Run the sweep. Returns the number of interior triangles.
    pub fn triangulate(&mut self) -> CdtResult<usize> {
        if self.valid {
            return Err(CdtError::AlreadyTriangulated);
        }
        if !self.has_outer {
            return Err(CdtError::MissingOuterContour);
        }
        let pending = self.input_point_count - self.contour_start;
        if pending > 0 {
            return Err(CdtError::UnclosedContour(pending as usize));
        }

        self.init_triangulation();
        self.create_advancing_front();
        self.sweep_points();
        self.finalize_polygon();
        self.build_output();
        self.valid = true;

        tracing::debug!(
            points = self.input_point_count,
            holes = self.hole_count,
            triangles = self.mesh.triangles.len(),
            front_nodes = self.front.allocated(),
            interior = self.result.len(),
            "triangulation complete"
        );
        Ok(self.result.len())
    }

    // ───────────────────────────── Output access ─────────────────────────────

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Interior triangles, in flood-fill order.
    pub fn triangles(&self) -> &[TriIdx] {
        &self.result
    }

    pub fn triangle(&self, t: TriIdx) -> &Triangle {
        self.mesh.triangle(t)
    }

    pub fn point(&self, p: PointIdx) -> &Point {
        &self.mesh.points[p]
    }

    pub fn triangle_points(&self, t: TriIdx) -> [Coord; 3] {
        let tri = self.mesh.triangle(t);
        [
            self.mesh.coord(tri.points[0]),
            self.mesh.coord(tri.points[1]),
            self.mesh.coord(tri.points[2]),
        ]
    }

    /// Counter-clockwise index triples into the input points.
    pub fn elements(&self) -> &[u32] {
        &self.out_elements
    }

    /// Flat `x, y` pairs of the input points.
    pub fn vertices(&self) -> &[Real] {
        &self.out_vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.out_vertices.len() / 2
    }

    pub fn element_count(&self) -> usize {
        self.out_elements.len() / 3
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    // ─────────────────────────────── Sweep setup ─────────────────────────────

    /// Append the two bounding sentinels and sort the input into sweep order.
    fn init_triangulation(&mut self) {
        let first = self.mesh.points[0];
        let (mut xmin, mut xmax, mut ymin, mut ymax) = (first.x, first.x, first.y, first.y);
        for p in &self.mesh.points.as_slice()[..self.input_point_count as usize] {
            xmin = xmin.min(p.x);
            xmax = xmax.max(p.x);
            ymin = ymin.min(p.y);
            ymax = ymax.max(p.y);
        }
        let dx = BOUNDING_MARGIN * (xmax - xmin);
        let dy = BOUNDING_MARGIN * (ymax - ymin);
        self.head_point = self.mesh.points.push(Point::new(xmin - dx, ymin - dy));
        self.tail_point = self.mesh.points.push(Point::new(xmax + dx, ymin - dy));

        let points = self.mesh.points.as_slice();
        self.sweep_order.extend(0..self.input_point_count);
        // Points are distinct, so this matches a stable sort.
        self.sweep_order.sort_unstable_by(|&a, &b| {
            let (pa, pb) = (&points[a as usize], &points[b as usize]);
            pa.y.total_cmp(&pb.y).then(pa.x.total_cmp(&pb.x))
        });
    }

    /// Bounding triangle (first, head, tail) and the three-node front over it.
    fn create_advancing_front(&mut self) {
        let first = self.sweep_order[0];
        let t = self.mesh.add_triangle(first, self.head_point, self.tail_point);
        self.front.init(
            (self.head_point, self.mesh.points[self.head_point].x),
            (first, self.mesh.points[first].x),
            (self.tail_point, self.mesh.points[self.tail_point].x),
            t,
        );
    }

    fn sweep_points(&mut self) {
        for i in 1..self.sweep_order.len() {
            let p = self.sweep_order[i];
            let node = self.point_event(p);
            let mut e = self.mesh.points[p].first_edge;
            while e != INVALID {
                let edge = self.mesh.edges[e];
                self.edge_event_for_edge(edge, node);
                e = edge.next;
            }
        }
    }

    // ─────────────────────────────── Point event ─────────────────────────────

    /// Step a recursion counter, panicking once it passes the guard.
    #[inline]
    fn enter(&self, depth: u32, procedure: &str) -> u32 {
        assert!(
            depth < MAX_RECURSION_DEPTH,
            "{} recursion exceeded {} levels",
            procedure,
            MAX_RECURSION_DEPTH
        );
        depth + 1
    }

    #[inline]
    fn coord(&self, p: PointIdx) -> Coord {
        self.mesh.coord(p)
    }

    #[inline]
    fn node_coord(&self, n: NodeIdx) -> Coord {
        self.mesh.coord(self.front.point(n))
    }

    fn point_event(&mut self, p: PointIdx) -> NodeIdx {
        let px = self.mesh.points[p].x;
        let node = match self.front.locate_node(px) {
            Some(n) => n,
            None => panic!("point {} at x = {} lies outside the advancing front", p, px),
        };
        let new_node = self.new_front_triangle(p, node);

        // The located node is never right of the point, so only +EPSILON
        // needs checking.
        if px <= self.front.value(node) + EPSILON {
            self.fill(node);
        }

        self.fill_advancing_front(new_node);
        new_node
    }

    fn new_front_triangle(&mut self, p: PointIdx, node: NodeIdx) -> NodeIdx {
        let next = self.front.next(node);
        let t = self
            .mesh
            .add_triangle(p, self.front.point(node), self.front.point(next));
        let below = self.front.triangle(node);
        if below != INVALID {
            self.mesh.mark_neighbor(t, below);
        }

        let new_node = self
            .front
            .insert_after(node, p, self.mesh.points[p].x, INVALID);

        if !self.legalize(t, 0) {
            self.map_triangle_to_nodes(t);
        }
        new_node
    }

    /// Close the dip at `node` with one triangle and drop it from the front.
    fn fill(&mut self, node: NodeIdx) {
        let prev = self.front.prev(node);
        let next = self.front.next(node);
        let t = self.mesh.add_triangle(
            self.front.point(prev),
            self.front.point(node),
            self.front.point(next),
        );

        // Constraint flags of the new edges are picked up during legalize.
        let left = self.front.triangle(prev);
        if left != INVALID {
            self.mesh.mark_neighbor(t, left);
        }
        let below = self.front.triangle(node);
        if below != INVALID {
            self.mesh.mark_neighbor(t, below);
        }

        self.front.remove(node);

        if !self.legalize(t, 0) {
            self.map_triangle_to_nodes(t);
        }
    }

    /// Fill small holes on both sides of a freshly inserted node, then any
    /// basin to its right.
    fn fill_advancing_front(&mut self, n: NodeIdx) {
        let mut node = self.front.next(n);
        while self.front.next(node) != INVALID {
            if self.large_hole_dont_fill(node) {
                break;
            }
            self.fill(node);
            node = self.front.next(node);
        }

        node = self.front.prev(n);
        while self.front.prev(node) != INVALID {
            if self.large_hole_dont_fill(node) {
                break;
            }
            self.fill(node);
            node = self.front.prev(node);
        }

        let next = self.front.next(n);
        if next != INVALID {
            let next2 = self.front.next(next);
            if next2 != INVALID
                && basin_angle_below_three_quarter_pi(self.node_coord(n), self.node_coord(next2))
            {
                self.fill_basin(n);
            }
        }
    }

    /// True if the front angle at `node` is too wide to close with one
    /// triangle, looking one more node out on each side.
    fn large_hole_dont_fill(&self, node: NodeIdx) -> bool {
        let next = self.front.next(node);
        let prev = self.front.prev(node);
        let origin = self.node_coord(node);
        let a = self.node_coord(next);
        let b = self.node_coord(prev);

        if !angle_exceeds_90_degrees(origin, a, b) {
            return false;
        }
        if angle_is_negative(origin, a, b) {
            return true;
        }

        // Only angles on the side of the inserted point matter.
        let next2 = self.front.next(next);
        if next2 != INVALID
            && !angle_exceeds_plus_90_degrees_or_is_negative(origin, self.node_coord(next2), b)
        {
            return false;
        }
        let prev2 = self.front.prev(prev);
        if prev2 != INVALID
            && !angle_exceeds_plus_90_degrees_or_is_negative(origin, a, self.node_coord(prev2))
        {
            return false;
        }
        true
    }

    // ─────────────────────────────── Legalization ────────────────────────────

    /// Flip the first illegal edge of `t` and recursively legalize both
    /// results. Returns true if a flip happened; the recursion has then
    /// already mapped the touched triangles onto the front.
    fn legalize(&mut self, t: TriIdx, depth: u32) -> bool {
        let depth = self.enter(depth, "legalize");
        for i in 0..3 {
            let tri = self.mesh.triangles[t];
            if tri.flags.is_delaunay(i) {
                continue;
            }
            let ot = tri.neighbors[i];
            if ot == INVALID {
                continue;
            }

            let p = tri.points[i];
            let otri = self.mesh.triangles[ot];
            let op = otri.opposite_point(&tri, p);
            let oi = otri.index(op);

            // Constrained edges and edges already legal in this pass stay.
            if otri.flags.is_constrained(oi) || otri.flags.is_delaunay(oi) {
                self.mesh.triangles[t]
                    .flags
                    .set_constrained(i, otri.flags.is_constrained(oi));
                continue;
            }

            let inside = in_circle(
                self.coord(p),
                self.coord(tri.point_ccw(p)),
                self.coord(tri.point_cw(p)),
                self.coord(op),
            );
            if !inside {
                continue;
            }

            self.mesh.triangles[t].flags.set_delaunay(i, true);
            self.mesh.triangles[ot].flags.set_delaunay(oi, true);

            self.mesh.rotate_triangle_pair(t, p, ot, op);

            // Each triangle is mapped onto the front exactly once.
            if !self.legalize(t, depth) {
                self.map_triangle_to_nodes(t);
            }
            if !self.legalize(ot, depth) {
                self.map_triangle_to_nodes(ot);
            }

            // Delaunay marks only hold until the next point is added.
            self.mesh.triangles[t].flags.set_delaunay(i, false);
            self.mesh.triangles[ot].flags.set_delaunay(oi, false);
            return true;
        }
        false
    }

    /// Point every front node that starts a boundary edge of `t` at `t`.
    fn map_triangle_to_nodes(&mut self, t: TriIdx) {
        let tri = self.mesh.triangles[t];
        for i in 0..3 {
            if tri.neighbors[i] != INVALID {
                continue;
            }
            let p = tri.point_cw(tri.points[i]);
            let x = self.mesh.points[p].x;
            if let Some(n) = self.front.locate_point(p, x) {
                self.front.set_triangle(n, t);
            }
        }
    }
}
