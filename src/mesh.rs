// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangle mesh data model.
//
// Points, constraint edges and triangles live in fixed-capacity pools owned
// by the Mesh. Every cross reference is a u32 index into one of those pools:
//   - INVALID: u32::MAX  (null reference / mesh boundary)
//   - Triangles store their points counter-clockwise. Local edge i is the edge
//     opposite points[i]; neighbors[i] is the triangle across that edge.
//   - Each point heads a singly linked list of the constraint edges whose
//     upper endpoint it is.

mod delaunay;
mod flags;

pub use flags::TriFlags;

use crate::arena::{Capacity, Pool};
use crate::geom::{Coord, Real};

pub const INVALID: u32 = u32::MAX;

/// Index into Mesh::points
pub type PointIdx = u32;
/// Index into Mesh::edges
pub type EdgeIdx = u32;
/// Index into Mesh::triangles
pub type TriIdx = u32;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
    /// Head of the list of edges ending at this point, in insertion order.
    pub first_edge: EdgeIdx,
}

impl Point {
    pub fn new(x: Real, y: Real) -> Self {
        Point {
            x,
            y,
            first_edge: INVALID,
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        [self.x, self.y]
    }
}

/// A constraint edge. `p` precedes `q` in sweep order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub p: PointIdx,
    pub q: PointIdx,
    /// Next edge in `q`'s edge list.
    pub next: EdgeIdx,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub points: [PointIdx; 3],
    pub neighbors: [TriIdx; 3],
    pub flags: TriFlags,
}

impl Triangle {
    pub fn new(a: PointIdx, b: PointIdx, c: PointIdx) -> Self {
        Triangle {
            points: [a, b, c],
            neighbors: [INVALID; 3],
            flags: TriFlags::default(),
        }
    }

    /// Local index of `p`; panics if `p` is not a corner.
    #[inline]
    pub fn index(&self, p: PointIdx) -> usize {
        match self.points.iter().position(|&q| q == p) {
            Some(i) => i,
            None => panic!("point {} is not a corner of triangle {:?}", p, self.points),
        }
    }

    #[inline]
    pub fn contains(&self, p: PointIdx) -> bool {
        self.points.contains(&p)
    }

    #[inline]
    pub fn contains_edge(&self, p: PointIdx, q: PointIdx) -> bool {
        self.contains(p) && self.contains(q)
    }

    /// Local index of the edge p-q (in either direction).
    pub fn edge_index(&self, p: PointIdx, q: PointIdx) -> Option<usize> {
        let [a, b, c] = self.points;
        if a == p {
            if b == q {
                return Some(2);
            } else if c == q {
                return Some(1);
            }
        } else if b == p {
            if c == q {
                return Some(0);
            } else if a == q {
                return Some(2);
            }
        } else if c == p {
            if a == q {
                return Some(1);
            } else if b == q {
                return Some(0);
            }
        }
        None
    }

    /// The corner clockwise from `p`.
    #[inline]
    pub fn point_cw(&self, p: PointIdx) -> PointIdx {
        self.points[(self.index(p) + 2) % 3]
    }

    /// The corner counter-clockwise from `p`.
    #[inline]
    pub fn point_ccw(&self, p: PointIdx) -> PointIdx {
        self.points[(self.index(p) + 1) % 3]
    }

    /// Neighbor across the edge clockwise of `p`.
    #[inline]
    pub fn neighbor_cw(&self, p: PointIdx) -> TriIdx {
        self.neighbors[(self.index(p) + 1) % 3]
    }

    /// Neighbor across the edge counter-clockwise of `p`.
    #[inline]
    pub fn neighbor_ccw(&self, p: PointIdx) -> TriIdx {
        self.neighbors[(self.index(p) + 2) % 3]
    }

    /// Neighbor across the edge opposite `p`.
    #[inline]
    pub fn neighbor_across(&self, p: PointIdx) -> TriIdx {
        self.neighbors[self.index(p)]
    }

    #[inline]
    pub fn constrained_cw(&self, p: PointIdx) -> bool {
        self.flags.is_constrained((self.index(p) + 1) % 3)
    }

    #[inline]
    pub fn constrained_ccw(&self, p: PointIdx) -> bool {
        self.flags.is_constrained((self.index(p) + 2) % 3)
    }

    #[inline]
    pub fn set_constrained_cw(&mut self, p: PointIdx, value: bool) {
        let i = (self.index(p) + 1) % 3;
        self.flags.set_constrained(i, value);
    }

    #[inline]
    pub fn set_constrained_ccw(&mut self, p: PointIdx, value: bool) {
        let i = (self.index(p) + 2) % 3;
        self.flags.set_constrained(i, value);
    }

    #[inline]
    pub fn delaunay_cw(&self, p: PointIdx) -> bool {
        self.flags.is_delaunay((self.index(p) + 1) % 3)
    }

    #[inline]
    pub fn delaunay_ccw(&self, p: PointIdx) -> bool {
        self.flags.is_delaunay((self.index(p) + 2) % 3)
    }

    #[inline]
    pub fn set_delaunay_cw(&mut self, p: PointIdx, value: bool) {
        let i = (self.index(p) + 1) % 3;
        self.flags.set_delaunay(i, value);
    }

    #[inline]
    pub fn set_delaunay_ccw(&mut self, p: PointIdx, value: bool) {
        let i = (self.index(p) + 2) % 3;
        self.flags.set_delaunay(i, value);
    }

    /// Mark the edge p-q constrained if this triangle has it.
    pub fn mark_constrained_edge(&mut self, p: PointIdx, q: PointIdx) {
        if let Some(i) = self.edge_index(p, q) {
            self.flags.set_constrained(i, true);
        }
    }

    /// The corner of `self` that is not on the edge it shares with `t` at `p`.
    #[inline]
    pub fn opposite_point(&self, t: &Triangle, p: PointIdx) -> PointIdx {
        let cw = t.point_cw(p);
        self.point_cw(cw)
    }

    /// Rotate the corners so that `opoint` moves one step and `npoint`
    /// takes the freed slot. Half of a diagonal flip.
    pub fn rotate_points(&mut self, opoint: PointIdx, npoint: PointIdx) {
        let i = self.index(opoint);
        let old = self.points;
        self.points[(i + 1) % 3] = old[i];
        self.points[i] = old[(i + 2) % 3];
        self.points[(i + 2) % 3] = npoint;
    }

    /// Record `t` as the neighbor across edge p-q, if this triangle has it.
    fn mark_neighbor_edge(&mut self, p: PointIdx, q: PointIdx, t: TriIdx) {
        match self.edge_index(p, q) {
            Some(i) => self.neighbors[i] = t,
            None => debug_assert!(false, "edge {}-{} not on triangle {:?}", p, q, self.points),
        }
    }

    #[inline]
    pub fn clear_neighbors(&mut self) {
        self.neighbors = [INVALID; 3];
    }
}

/// All arena-resident mesh entities of one context.
#[derive(Debug)]
pub struct Mesh {
    pub points: Pool<Point>,
    pub edges: Pool<Edge>,
    pub triangles: Pool<Triangle>,
}

impl Mesh {
    pub fn new(capacity: &Capacity) -> Self {
        Mesh {
            points: Pool::with_capacity("point", capacity.points as usize),
            edges: Pool::with_capacity("edge", capacity.edges as usize),
            triangles: Pool::with_capacity("triangle", capacity.triangles as usize),
        }
    }

    #[inline]
    pub fn coord(&self, p: PointIdx) -> Coord {
        self.points[p].coord()
    }

    #[inline]
    pub fn triangle(&self, t: TriIdx) -> &Triangle {
        &self.triangles[t]
    }

    #[inline]
    pub fn triangle_mut(&mut self, t: TriIdx) -> &mut Triangle {
        &mut self.triangles[t]
    }

    pub fn add_triangle(&mut self, a: PointIdx, b: PointIdx, c: PointIdx) -> TriIdx {
        self.triangles.push(Triangle::new(a, b, c))
    }

    /// Create the constraint edge between two distinct points and attach it
    /// to the endpoint that comes later in sweep order.
    pub fn add_edge(&mut self, a: PointIdx, b: PointIdx) -> EdgeIdx {
        let pa = self.points[a];
        let pb = self.points[b];
        debug_assert!(
            pa.x != pb.x || pa.y != pb.y,
            "repeated point ({}, {}) in contour",
            pa.x,
            pa.y
        );
        let (p, q) = if pa.y > pb.y || (pa.y == pb.y && pa.x > pb.x) {
            (b, a)
        } else {
            (a, b)
        };
        let e = self.edges.push(Edge { p, q, next: INVALID });
        // Appended, so edge events at q run in contour order.
        let first = self.points[q].first_edge;
        if first == INVALID {
            self.points[q].first_edge = e;
        } else {
            let mut last = first;
            while self.edges[last].next != INVALID {
                last = self.edges[last].next;
            }
            self.edges[last].next = e;
        }
        e
    }

    /// Link `a` and `b` across whichever edge they share.
    pub fn mark_neighbor(&mut self, a: TriIdx, b: TriIdx) {
        let ta = self.triangles[a];
        let tb = self.triangles[b];
        let [p0, p1, p2] = ta.points;
        let (i, p, q) = if tb.contains_edge(p1, p2) {
            (0, p1, p2)
        } else if tb.contains_edge(p0, p2) {
            (1, p0, p2)
        } else if tb.contains_edge(p0, p1) {
            (2, p0, p1)
        } else {
            return;
        };
        self.triangles[a].neighbors[i] = b;
        self.triangles[b].mark_neighbor_edge(p, q, a);
    }

    /// Flip the diagonal shared by `t` and `ot`, where `p` is the corner of
    /// `t` and `op` the corner of `ot` opposite that diagonal. Afterwards the
    /// new diagonal is p-op. Edge flags of the four outer edges travel with
    /// their edges and all outer neighbors are relinked.
    pub fn rotate_triangle_pair(&mut self, t: TriIdx, p: PointIdx, ot: TriIdx, op: PointIdx) {
        let mut tt = self.triangles[t];
        let mut oo = self.triangles[ot];

        let n1 = tt.neighbor_ccw(p);
        let n2 = tt.neighbor_cw(p);
        let n3 = oo.neighbor_ccw(op);
        let n4 = oo.neighbor_cw(op);

        let ce1 = tt.constrained_ccw(p);
        let ce2 = tt.constrained_cw(p);
        let ce3 = oo.constrained_ccw(op);
        let ce4 = oo.constrained_cw(op);

        let de1 = tt.delaunay_ccw(p);
        let de2 = tt.delaunay_cw(p);
        let de3 = oo.delaunay_ccw(op);
        let de4 = oo.delaunay_cw(op);

        tt.rotate_points(p, op);
        oo.rotate_points(op, p);

        oo.set_delaunay_ccw(p, de1);
        tt.set_delaunay_cw(p, de2);
        tt.set_delaunay_ccw(op, de3);
        oo.set_delaunay_cw(op, de4);

        oo.set_constrained_ccw(p, ce1);
        tt.set_constrained_cw(p, ce2);
        tt.set_constrained_ccw(op, ce3);
        oo.set_constrained_cw(op, ce4);

        tt.clear_neighbors();
        oo.clear_neighbors();
        self.triangles[t] = tt;
        self.triangles[ot] = oo;

        if n1 != INVALID {
            self.mark_neighbor(ot, n1);
        }
        if n2 != INVALID {
            self.mark_neighbor(t, n2);
        }
        if n3 != INVALID {
            self.mark_neighbor(t, n3);
        }
        if n4 != INVALID {
            self.mark_neighbor(ot, n4);
        }
        self.mark_neighbor(t, ot);
    }
}
