// Copyright 2025 Lars Brubaker
// License: MIT
//
// Transient scratch records of the sweep.
//
// Both are rebuilt for each use and passed down the call chain explicitly, so
// no sweep procedure reads state another one left behind.

use crate::front::NodeIdx;
use crate::geom::Real;
use crate::mesh::PointIdx;

/// A concave dip in the advancing front between two higher walls.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Basin {
    pub left_node: NodeIdx,
    pub bottom_node: NodeIdx,
    pub right_node: NodeIdx,
    /// Horizontal distance between the two walls.
    pub width: Real,
    /// True if the left wall is the higher one.
    pub left_highest: bool,
}

/// The constraint currently being forced into the mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EdgeEvent {
    /// Lower endpoint in sweep order.
    pub p: PointIdx,
    /// Upper endpoint; the point whose insertion triggered the event.
    pub q: PointIdx,
    /// True if `p` lies right of `q`.
    pub right: bool,
}
