// Copyright 2025 Lars Brubaker
// License: MIT
//
// The advancing front: the upper boundary of the region triangulated so far.
//
// A doubly linked list of nodes ordered by x, from the left sentinel (head)
// to the right sentinel (tail). Each node but the tail carries the triangle
// lying below the front edge that starts at it. Nodes are arena allocated;
// a node removed from the front keeps its prev/next links so a caller that
// just filled it can continue walking from it.
//
// A search cursor remembers the last located node, which makes lookups for
// spatially coherent sweeps nearly constant time.

use crate::arena::Pool;
use crate::geom::Real;
use crate::mesh::{PointIdx, TriIdx, INVALID};

/// Index into AdvancingFront::nodes
pub type NodeIdx = u32;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    pub point: PointIdx,
    pub triangle: TriIdx,
    pub prev: NodeIdx,
    pub next: NodeIdx,
    /// Cached x of `point`.
    pub value: Real,
}

#[derive(Debug)]
pub struct AdvancingFront {
    nodes: Pool<Node>,
    head: NodeIdx,
    tail: NodeIdx,
    search: NodeIdx,
}

impl AdvancingFront {
    pub fn with_capacity(capacity: usize) -> Self {
        AdvancingFront {
            nodes: Pool::with_capacity("front node", capacity),
            head: INVALID,
            tail: INVALID,
            search: INVALID,
        }
    }

    /// Seed the front with the three corners of the bounding triangle:
    /// left sentinel, first swept point, right sentinel.
    pub fn init(
        &mut self,
        head: (PointIdx, Real),
        middle: (PointIdx, Real),
        tail: (PointIdx, Real),
        triangle: TriIdx,
    ) {
        debug_assert!(self.nodes.is_empty(), "front already initialized");
        let h = self.nodes.push(Node {
            point: head.0,
            triangle,
            prev: INVALID,
            next: INVALID,
            value: head.1,
        });
        let m = self.nodes.push(Node {
            point: middle.0,
            triangle,
            prev: h,
            next: INVALID,
            value: middle.1,
        });
        let t = self.nodes.push(Node {
            point: tail.0,
            triangle: INVALID,
            prev: m,
            next: INVALID,
            value: tail.1,
        });
        self.nodes[h].next = m;
        self.nodes[m].next = t;
        self.head = h;
        self.tail = t;
        self.search = h;
    }

    #[inline]
    pub fn head(&self) -> NodeIdx {
        self.head
    }

    #[inline]
    pub fn tail(&self) -> NodeIdx {
        self.tail
    }

    #[inline]
    pub fn next(&self, n: NodeIdx) -> NodeIdx {
        self.nodes[n].next
    }

    #[inline]
    pub fn prev(&self, n: NodeIdx) -> NodeIdx {
        self.nodes[n].prev
    }

    #[inline]
    pub fn point(&self, n: NodeIdx) -> PointIdx {
        self.nodes[n].point
    }

    #[inline]
    pub fn triangle(&self, n: NodeIdx) -> TriIdx {
        self.nodes[n].triangle
    }

    #[inline]
    pub fn set_triangle(&mut self, n: NodeIdx, t: TriIdx) {
        self.nodes[n].triangle = t;
    }

    #[inline]
    pub fn value(&self, n: NodeIdx) -> Real {
        self.nodes[n].value
    }

    /// Number of nodes ever allocated, including removed ones.
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    /// Find the node whose x interval [node.x, node.next.x) contains `x`.
    pub fn locate_node(&mut self, x: Real) -> Option<NodeIdx> {
        let mut node = self.search;
        if x < self.nodes[node].value {
            loop {
                node = self.nodes[node].prev;
                if node == INVALID {
                    return None;
                }
                if x >= self.nodes[node].value {
                    self.search = node;
                    return Some(node);
                }
            }
        } else {
            loop {
                node = self.nodes[node].next;
                if node == INVALID {
                    return None;
                }
                if x < self.nodes[node].value {
                    let found = self.nodes[node].prev;
                    self.search = found;
                    return Some(found);
                }
            }
        }
    }

    /// Find the node holding `point`, whose x coordinate is `x`.
    ///
    /// Two nodes may briefly share an x value; that tie is broken by point
    /// identity among the cursor's neighbors.
    pub fn locate_point(&mut self, point: PointIdx, x: Real) -> Option<NodeIdx> {
        let mut node = self.search;
        let nx = self.nodes[node].value;

        if x == nx {
            if self.nodes[node].point != point {
                let prev = self.nodes[node].prev;
                let next = self.nodes[node].next;
                if prev != INVALID && self.nodes[prev].point == point {
                    node = prev;
                } else if next != INVALID && self.nodes[next].point == point {
                    node = next;
                } else {
                    node = self.scan_for(point);
                }
            }
        } else if x < nx {
            loop {
                node = self.nodes[node].prev;
                if node == INVALID || self.nodes[node].point == point {
                    break;
                }
            }
        } else {
            loop {
                node = self.nodes[node].next;
                if node == INVALID || self.nodes[node].point == point {
                    break;
                }
            }
        }

        if node == INVALID {
            return None;
        }
        self.search = node;
        Some(node)
    }

    fn scan_for(&self, point: PointIdx) -> NodeIdx {
        let mut node = self.head;
        while node != INVALID && self.nodes[node].point != point {
            node = self.nodes[node].next;
        }
        node
    }

    /// Splice a new node for `point` right after `node`.
    pub fn insert_after(&mut self, node: NodeIdx, point: PointIdx, x: Real, triangle: TriIdx) -> NodeIdx {
        let next = self.nodes[node].next;
        let new_node = self.nodes.push(Node {
            point,
            triangle,
            prev: node,
            next,
            value: x,
        });
        if next != INVALID {
            self.nodes[next].prev = new_node;
        }
        self.nodes[node].next = new_node;
        new_node
    }

    /// Unlink `node` from the front. Its own links are left intact.
    pub fn remove(&mut self, node: NodeIdx) {
        let prev = self.nodes[node].prev;
        let next = self.nodes[node].next;
        debug_assert!(prev != INVALID && next != INVALID, "cannot remove a sentinel node");
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        if self.search == node {
            self.search = prev;
        }
    }

    /// Live nodes from head to tail.
    pub fn iter(&self) -> FrontIter<'_> {
        FrontIter {
            front: self,
            node: self.head,
        }
    }
}

pub struct FrontIter<'a> {
    front: &'a AdvancingFront,
    node: NodeIdx,
}

impl<'a> Iterator for FrontIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        if self.node == INVALID {
            return None;
        }
        let n = &self.front.nodes[self.node];
        self.node = n.next;
        Some(n)
    }
}
