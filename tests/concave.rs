// Copyright 2025 Lars Brubaker
// Concave outer contours: reflex vertices force edge events across the front.

mod helpers;

use sweep_cdt::{Coord, Real};

fn check(outer: &[Coord]) -> sweep_cdt::Context {
    let ctx = helpers::triangulate(outer, &[]);
    assert_eq!(ctx.triangles().len(), outer.len() - 2);
    let expected = helpers::polygon_area(outer);
    let area = helpers::total_area(&ctx);
    assert!(
        helpers::approx_eq(area, expected),
        "area {} != {}",
        area,
        expected
    );
    assert!(helpers::centroids_contained(&ctx, outer, &[]));
    assert!(helpers::constraints_preserved(
        &ctx,
        &helpers::contour_edges(0, outer.len())
    ));
    assert!(helpers::neighbors_reciprocal(&ctx));
    ctx
}

#[test]
fn l_shaped_hexagon() {
    let outer = [
        [0.0, 0.0],
        [2.0, 0.0],
        [2.0, 1.0],
        [1.0, 1.0],
        [1.0, 2.0],
        [0.0, 2.0],
    ];
    let ctx = check(&outer);
    assert_eq!(ctx.triangles().len(), 4);
    // The reflex corner (1,1) is point 3; no triangle may span the notch.
    for t in helpers::output_triangles(&ctx) {
        let c = helpers::centroid(t);
        assert!(!(c[0] > 1.0 && c[1] > 1.0), "triangle {:?} lies in the notch", t);
    }
}

#[test]
fn mirrored_l_shape() {
    let outer = [
        [0.0, 0.0],
        [2.0, 0.0],
        [2.0, 2.0],
        [1.0, 2.0],
        [1.0, 1.0],
        [0.0, 1.0],
    ];
    check(&outer);
}

#[test]
fn comb_with_teeth_pointing_up() {
    // Teeth leave deep dips in the front that basin fill must not cross.
    let outer = [
        [0.0, 0.0],
        [7.0, 0.0],
        [7.0, 5.0],
        [6.0, 5.0],
        [5.5, 1.0],
        [5.0, 5.0],
        [4.0, 5.0],
        [3.5, 1.0],
        [3.0, 5.0],
        [2.0, 5.0],
        [1.5, 1.0],
        [1.0, 5.0],
        [0.0, 5.0],
    ];
    check(&outer);
}

#[test]
fn comb_with_teeth_pointing_down() {
    let outer = [
        [0.0, 0.0],
        [1.0, 0.0],
        [1.5, 4.0],
        [2.0, 0.0],
        [3.0, 0.0],
        [3.5, 4.0],
        [4.0, 0.0],
        [5.0, 0.0],
        [5.0, 5.0],
        [0.0, 5.0],
    ];
    check(&outer);
}

#[test]
fn star_polygon() {
    let outer: Vec<Coord> = (0..10)
        .map(|i| {
            let a = i as f64 / 10.0 * std::f64::consts::TAU;
            let r = if i % 2 == 0 { 10.0 } else { 4.0 };
            [(r * a.cos()) as Real, (r * a.sin()) as Real]
        })
        .collect();
    check(&outer);
}

#[test]
fn long_diagonal_constraint() {
    // A thin wedge whose long bottom edge crosses many front nodes.
    let outer = [
        [0.0, 0.0],
        [10.0, 3.0],
        [9.0, 3.2],
        [8.0, 3.0],
        [7.0, 3.3],
        [6.0, 3.0],
        [5.0, 3.4],
        [4.0, 3.0],
        [3.0, 3.5],
        [0.5, 2.0],
    ];
    check(&outer);
}

#[test]
fn lid_edge_over_fifty_thousand_front_nodes() {
    // A bottom chain of many points under one apex. The closing edge from
    // the apex back to the first point lies above every chain node, so its
    // edge event fills the whole front in one pass and then walks the full
    // fan around the apex.
    let width = 50_000usize;
    let height = (width / 4) as Real;
    let mut outer: Vec<Coord> = (0..=width).map(|i| [i as Real, 0.0]).collect();
    outer.push([width as Real, height]);

    let ctx = helpers::triangulate(&outer, &[]);
    assert_eq!(ctx.triangles().len(), width);
    assert!(helpers::approx_eq(
        helpers::total_area(&ctx),
        width as Real * height / 2.0
    ));
    let apex = width as u32 + 1;
    assert!(helpers::constraints_preserved(
        &ctx,
        &[(0, 1), (apex - 2, apex - 1), (apex - 1, apex), (apex, 0)]
    ));
}
