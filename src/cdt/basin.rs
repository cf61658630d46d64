// Copyright 2025 Lars Brubaker
// Basin fill: a dip in the front right of a new node is filled bottom up
// until what remains is wider than it is deep.

use super::Context;
use crate::front::NodeIdx;
use crate::geom::{orient_2d, Orientation};
use crate::mesh::INVALID;
use crate::sweep::Basin;

impl Context {
    pub(super) fn fill_basin(&mut self, node: NodeIdx) {
        let next = self.front.next(node);
        let next2 = self.front.next(next);
        let left_node =
            if orient_2d(self.node_coord(node), self.node_coord(next), self.node_coord(next2))
                == Orientation::Ccw
            {
                next2
            } else {
                next
            };

        // Walk down to the bottom, then up the right wall.
        let mut bottom_node = left_node;
        loop {
            let n = self.front.next(bottom_node);
            if n == INVALID || self.node_y(bottom_node) < self.node_y(n) {
                break;
            }
            bottom_node = n;
        }
        if bottom_node == left_node {
            return;
        }

        let mut right_node = bottom_node;
        loop {
            let n = self.front.next(right_node);
            if n == INVALID || self.node_y(right_node) >= self.node_y(n) {
                break;
            }
            right_node = n;
        }
        if right_node == bottom_node {
            return;
        }

        let basin = Basin {
            left_node,
            bottom_node,
            right_node,
            width: self.front.value(right_node) - self.front.value(left_node),
            left_highest: self.node_y(left_node) > self.node_y(right_node),
        };
        self.fill_basin_req(&basin, bottom_node);
    }

    /// Fill the basin bottom up, always continuing with the lower side.
    fn fill_basin_req(&mut self, basin: &Basin, mut node: NodeIdx) {
        while !self.is_shallow(basin, node) {
            self.fill(node);

            // `node` is off the front now but still links to its old neighbors.
            let prev = self.front.prev(node);
            let next = self.front.next(node);
            node = if prev == basin.left_node && next == basin.right_node {
                return;
            } else if prev == basin.left_node {
                let o = orient_2d(
                    self.node_coord(node),
                    self.node_coord(next),
                    self.node_coord(self.front.next(next)),
                );
                if o == Orientation::Cw {
                    return;
                }
                next
            } else if next == basin.right_node {
                let o = orient_2d(
                    self.node_coord(node),
                    self.node_coord(prev),
                    self.node_coord(self.front.prev(prev)),
                );
                if o == Orientation::Ccw {
                    return;
                }
                prev
            } else if self.node_y(prev) < self.node_y(next) {
                prev
            } else {
                next
            };
        }
    }

    fn is_shallow(&self, basin: &Basin, node: NodeIdx) -> bool {
        let wall = if basin.left_highest {
            basin.left_node
        } else {
            basin.right_node
        };
        let height = self.node_y(wall) - self.node_y(node);
        basin.width > height
    }

    #[inline]
    fn node_y(&self, n: NodeIdx) -> crate::geom::Real {
        self.mesh.points[self.front.point(n)].y
    }
}
