// Copyright 2025 Lars Brubaker
// Shared test utilities for sweep-cdt tests.

#![allow(dead_code)]

use sweep_cdt::{Context, Coord, Real, EPSILON};

/// Build and triangulate a context from an outer contour and holes.
pub fn triangulate(outer: &[Coord], holes: &[Vec<Coord>]) -> Context {
    let total = outer.len() + holes.iter().map(|h| h.len()).sum::<usize>();
    let mut ctx = Context::new(total as u32).expect("context");
    ctx.push_point_range(outer);
    ctx.add_edge().expect("outer contour");
    for hole in holes {
        ctx.push_point_range(hole);
        ctx.add_hole().expect("hole contour");
    }
    ctx.triangulate().expect("triangulate");
    ctx
}

/// Tolerance for area and coordinate checks at the compiled precision.
pub const TOL: Real = 1e3 * EPSILON;

/// True if `actual` matches `expected` to TOL, relative once `expected`
/// exceeds 1.
pub fn approx_eq(actual: Real, expected: Real) -> bool {
    (actual - expected).abs() <= TOL * expected.abs().max(1.0)
}

/// Signed area of a triangle; positive when counter-clockwise.
pub fn triangle_area(a: Coord, b: Coord, c: Coord) -> Real {
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

pub fn centroid(tri: [Coord; 3]) -> Coord {
    [
        (tri[0][0] + tri[1][0] + tri[2][0]) / 3.0,
        (tri[0][1] + tri[1][1] + tri[2][1]) / 3.0,
    ]
}

/// Shoelace area of a closed contour (absolute).
pub fn polygon_area(contour: &[Coord]) -> Real {
    let n = contour.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = contour[i];
        let b = contour[(i + 1) % n];
        sum += a[0] * b[1] - b[0] * a[1];
    }
    (sum * 0.5).abs()
}

/// Even-odd ray cast, independent of the triangulator.
pub fn point_in_polygon(p: Coord, contour: &[Coord]) -> bool {
    let n = contour.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (contour[i], contour[j]);
        if (a[1] > p[1]) != (b[1] > p[1]) {
            let x = a[0] + (p[1] - a[1]) / (b[1] - a[1]) * (b[0] - a[0]);
            if p[0] < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Output triangles as coordinate triples.
pub fn output_triangles(ctx: &Context) -> Vec<[Coord; 3]> {
    ctx.triangles()
        .iter()
        .map(|&t| ctx.triangle_points(t))
        .collect()
}

/// Sum of the absolute areas of all output triangles, read from the flat
/// element and vertex buffers.
pub fn total_area(ctx: &Context) -> Real {
    let verts = ctx.vertices();
    let v = |i: u32| [verts[i as usize * 2], verts[i as usize * 2 + 1]];
    ctx.elements()
        .chunks(3)
        .map(|e| triangle_area(v(e[0]), v(e[1]), v(e[2])).abs())
        .sum()
}

/// Every triangle is strictly counter-clockwise.
pub fn all_ccw(ctx: &Context) -> bool {
    output_triangles(ctx)
        .iter()
        .all(|t| triangle_area(t[0], t[1], t[2]) > 0.0)
}

/// Every neighbor link between output triangles is reciprocated.
pub fn neighbors_reciprocal(ctx: &Context) -> bool {
    ctx.mesh().neighbors_consistent(ctx.triangles())
}

/// Point handles of a contour pushed starting at `start`.
pub fn contour_edges(start: u32, len: usize) -> Vec<(u32, u32)> {
    let len = len as u32;
    (0..len)
        .map(|i| (start + i, start + (i + 1) % len))
        .collect()
}

/// Every edge of `edges` appears on some output triangle and is flagged
/// constrained on every output triangle that has it.
pub fn constraints_preserved(ctx: &Context, edges: &[(u32, u32)]) -> bool {
    edges.iter().all(|&(p, q)| {
        let mut found = false;
        for &t in ctx.triangles() {
            let tri = ctx.triangle(t);
            if let Some(i) = tri.edge_index(p, q) {
                found = true;
                if !tri.flags.is_constrained(i) {
                    return false;
                }
            }
        }
        found
    })
}

/// No output triangle has a centroid outside `outer` or inside a hole.
pub fn centroids_contained(ctx: &Context, outer: &[Coord], holes: &[Vec<Coord>]) -> bool {
    output_triangles(ctx).into_iter().all(|t| {
        let c = centroid(t);
        point_in_polygon(c, outer) && holes.iter().all(|h| !point_in_polygon(c, h))
    })
}

/// Regular polygon approximating a circle, counter-clockwise.
pub fn circle(cx: Real, cy: Real, r: Real, n: usize) -> Vec<Coord> {
    (0..n)
        .map(|i| {
            let a = i as Real / n as Real * std::f64::consts::TAU as Real;
            [cx + r * a.cos(), cy + r * a.sin()]
        })
        .collect()
}
