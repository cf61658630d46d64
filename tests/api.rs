// Copyright 2025 Lars Brubaker
// Context lifecycle: sizing, sequencing errors and capacity violations.

mod helpers;

use sweep_cdt::{size_required, CdtError, Context};

const SQUARE: [[sweep_cdt::Real; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

#[test]
fn zero_capacity_is_rejected() {
    assert!(matches!(Context::new(0), Err(CdtError::ZeroCapacity)));
}

#[test]
fn size_required_is_monotonic() {
    let mut last = 0;
    for n in [1u32, 3, 10, 100, 1000] {
        let bytes = size_required(n);
        assert!(bytes > last, "size_required({}) = {}", n, bytes);
        last = bytes;
    }
}

#[test]
fn push_point_range_returns_handles() {
    let mut ctx = Context::new(8).unwrap();
    let a = ctx.push_point_range(&SQUARE);
    assert_eq!(a, 0..4);
    let b = ctx.push_point_range(&[[0.2, 0.2], [0.4, 0.2], [0.3, 0.4]]);
    assert_eq!(b, 4..7);
    assert_eq!(ctx.point(5).x, 0.4);
}

#[test]
fn contour_needs_three_points() {
    let mut ctx = Context::new(4).unwrap();
    ctx.push_point(0.0, 0.0);
    ctx.push_point(1.0, 0.0);
    assert_eq!(ctx.add_edge(), Err(CdtError::ContourTooShort(2)));
}

#[test]
fn outer_contour_only_once() {
    let mut ctx = Context::new(8).unwrap();
    ctx.push_point_range(&SQUARE);
    ctx.add_edge().unwrap();
    ctx.push_point_range(&[[0.2, 0.2], [0.4, 0.2], [0.3, 0.4]]);
    assert_eq!(ctx.add_edge(), Err(CdtError::OuterContourAlreadyAdded));
    // The pending points can still become a hole.
    ctx.add_hole().unwrap();
    assert_eq!(ctx.triangulate(), Ok(7));
}

#[test]
fn hole_requires_outer_contour() {
    let mut ctx = Context::new(4).unwrap();
    ctx.push_point_range(&SQUARE);
    assert_eq!(ctx.add_hole(), Err(CdtError::HoleBeforeOuterContour));
}

#[test]
fn triangulate_requires_outer_contour() {
    let mut ctx = Context::new(4).unwrap();
    assert_eq!(ctx.triangulate(), Err(CdtError::MissingOuterContour));
}

#[test]
fn triangulate_rejects_unclosed_points() {
    let mut ctx = Context::new(8).unwrap();
    ctx.push_point_range(&SQUARE);
    ctx.add_edge().unwrap();
    ctx.push_point(0.5, 0.5);
    assert_eq!(ctx.triangulate(), Err(CdtError::UnclosedContour(1)));
}

#[test]
fn context_is_single_use() {
    let mut ctx = Context::new(4).unwrap();
    ctx.push_point_range(&SQUARE);
    ctx.add_edge().unwrap();
    assert!(!ctx.is_valid());
    assert_eq!(ctx.triangulate(), Ok(2));
    assert!(ctx.is_valid());
    assert_eq!(ctx.triangulate(), Err(CdtError::AlreadyTriangulated));
    assert_eq!(ctx.add_hole(), Err(CdtError::AlreadyTriangulated));
    assert_eq!(ctx.triangles().len(), 2);
}

#[test]
fn slack_allows_a_few_extra_points() {
    let mut ctx = Context::new(3).unwrap();
    ctx.push_point_range(&SQUARE);
    ctx.add_edge().unwrap();
    assert_eq!(ctx.triangulate(), Ok(2));
}

#[test]
#[should_panic(expected = "arena exhausted")]
fn pushing_past_capacity_panics() {
    let mut ctx = Context::new(1).unwrap();
    for i in 0..64 {
        ctx.push_point(i as sweep_cdt::Real, 0.0);
    }
}

#[test]
#[should_panic(expected = "triangulated context")]
fn pushing_after_triangulate_panics() {
    let mut ctx = Context::new(4).unwrap();
    ctx.push_point_range(&SQUARE);
    ctx.add_edge().unwrap();
    ctx.triangulate().unwrap();
    ctx.push_point(2.0, 2.0);
}

#[test]
fn errors_format_for_display() {
    assert_eq!(
        CdtError::ContourTooShort(2).to_string(),
        "a contour needs at least 3 points, got 2"
    );
    assert_eq!(
        CdtError::UnclosedContour(5).to_string(),
        "5 pushed points are not closed into a contour"
    );
}

#[test]
fn independent_contexts_on_threads() {
    let handles: Vec<_> = (0..4)
        .map(|k| {
            std::thread::spawn(move || {
                let outer = helpers::circle(0.0, 0.0, 5.0, 8 + k);
                helpers::triangulate(&outer, &[]).triangles().len()
            })
        })
        .collect();
    for (k, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), 8 + k - 2);
    }
}
