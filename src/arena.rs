// Copyright 2025 Lars Brubaker
// License: MIT
//
// Fixed-capacity arenas backing every mesh entity.
//
// All pools are reserved once when a context is created and are never grown,
// shrunk or individually freed. Entities are addressed by u32 indices; the
// whole graph is released together when the owning context is dropped.
// Overrunning a pool is a contract violation (the caller sized the context
// too small) and panics.

use std::mem::size_of;
use std::ops::{Index, IndexMut};

use crate::front::Node;
use crate::mesh::{Edge, Point, Triangle};

/// Extra slots added to every pool on top of the per-point worst case.
pub const CAPACITY_SLACK: u32 = 8;

/// Synthetic bounding points appended after the input points.
pub const SENTINEL_COUNT: u32 = 2;

/// A push-only arena with a hard capacity.
#[derive(Debug)]
pub struct Pool<T> {
    items: Vec<T>,
    capacity: usize,
    name: &'static str,
}

impl<T> Pool<T> {
    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            name,
        }
    }

    /// Append an item, returning its index.
    ///
    /// Panics when the pool is full.
    pub fn push(&mut self, item: T) -> u32 {
        assert!(
            self.items.len() < self.capacity,
            "arena exhausted: {} pool is full (capacity {})",
            self.name,
            self.capacity
        );
        let idx = self.items.len() as u32;
        self.items.push(item);
        idx
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Index<u32> for Pool<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: u32) -> &T {
        &self.items[idx as usize]
    }
}

impl<T> IndexMut<u32> for Pool<T> {
    #[inline]
    fn index_mut(&mut self, idx: u32) -> &mut T {
        &mut self.items[idx as usize]
    }
}

/// Per-pool slot counts for a context sized for `max_points` input points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capacity {
    pub max_points: u32,
    pub points: u32,
    pub edges: u32,
    pub triangles: u32,
    pub nodes: u32,
    pub fill_stack: u32,
}

impl Capacity {
    /// Worst-case pool sizes for `max_points` input points.
    ///
    /// A sweep over n points plus two sentinels creates at most one triangle
    /// per point event and one per front fill, bounded by 2n; the front holds
    /// at most n + 3 nodes; every contour point owns one constraint edge.
    /// The flood fill pushes at most three neighbors per visited triangle.
    pub fn for_points(max_points: u32) -> Self {
        let n = max_points.saturating_add(CAPACITY_SLACK);
        let triangles = n.saturating_mul(2);
        Capacity {
            max_points,
            points: n.saturating_add(SENTINEL_COUNT),
            edges: n,
            triangles,
            nodes: n.saturating_add(3),
            fill_stack: triangles.saturating_mul(3).saturating_add(1),
        }
    }

    /// Total bytes reserved across all pools, including output buffers.
    pub fn bytes(&self) -> usize {
        let points = self.points as usize * size_of::<Point>();
        let edges = self.edges as usize * size_of::<Edge>();
        let triangles = self.triangles as usize * size_of::<Triangle>();
        let nodes = self.nodes as usize * size_of::<Node>();
        // Sweep order, flood-fill stack, interior list and element triples.
        let sweep_order = self.max_points as usize * size_of::<u32>();
        let fill_stack = self.fill_stack as usize * size_of::<u32>();
        let result = self.triangles as usize * size_of::<u32>();
        let elements = self.triangles as usize * 3 * size_of::<u32>();
        points + edges + triangles + nodes + sweep_order + fill_stack + result + elements
    }
}

/// Bytes a context sized for `max_point_count` points reserves.
pub fn size_required(max_point_count: u32) -> usize {
    Capacity::for_points(max_point_count).bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_sequential_indices() {
        let mut pool: Pool<u32> = Pool::with_capacity("test", 4);
        assert_eq!(pool.push(10), 0);
        assert_eq!(pool.push(11), 1);
        assert_eq!(pool[1], 11);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.remaining(), 2);
    }

    #[test]
    #[should_panic(expected = "arena exhausted")]
    fn push_past_capacity_panics() {
        let mut pool: Pool<u8> = Pool::with_capacity("tiny", 1);
        pool.push(1);
        pool.push(2);
    }

    #[test]
    fn size_required_grows_with_point_count() {
        let small = size_required(4);
        let large = size_required(400);
        assert!(small > 0);
        assert!(large > small);
    }

    #[test]
    fn capacity_covers_sentinels_and_triangles() {
        let cap = Capacity::for_points(10);
        assert!(cap.points >= 10 + SENTINEL_COUNT);
        assert!(cap.triangles >= 2 * 10);
        assert!(cap.nodes >= 10 + 3);
    }
}
