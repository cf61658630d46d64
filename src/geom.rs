// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geometric predicates for the sweep.
//
// Every comparison against zero goes through EPSILON. The band is part of the
// algorithm: front insertion side, edge-event direction and flip validity all
// depend on near-collinear triples being classified as Collinear.

#[cfg(not(feature = "single-precision"))]
pub type Real = f64;
#[cfg(feature = "single-precision")]
pub type Real = f32;

#[cfg(not(feature = "single-precision"))]
pub const EPSILON: Real = 1e-12;
#[cfg(feature = "single-precision")]
pub const EPSILON: Real = 1e-6;

/// Fraction of the input extent the bounding sentinels sit outside it.
pub const BOUNDING_MARGIN: Real = 0.3;

/// A 2D coordinate pair.
pub type Coord = [Real; 2];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Ccw,
    Cw,
    Collinear,
}

/// Orientation of the triple (a, b, c) from the signed area
/// `(a.x - c.x)(b.y - c.y) - (a.y - c.y)(b.x - c.x)`.
#[inline]
pub fn orient_2d(a: Coord, b: Coord, c: Coord) -> Orientation {
    let det_left = (a[0] - c[0]) * (b[1] - c[1]);
    let det_right = (a[1] - c[1]) * (b[0] - c[0]);
    let val = det_left - det_right;
    if val > -EPSILON && val < EPSILON {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Ccw
    } else {
        Orientation::Cw
    }
}

/// True if `d` lies strictly inside the wedge at `a` bounded by the rays
/// towards `b` and `c`. A flip of the diagonal opposite `a` is only
/// geometrically valid when this holds.
#[inline]
pub fn in_scan_area(a: Coord, b: Coord, c: Coord, d: Coord) -> bool {
    let oadb = (a[0] - b[0]) * (d[1] - b[1]) - (d[0] - b[0]) * (a[1] - b[1]);
    if oadb >= -EPSILON {
        return false;
    }
    let oadc = (a[0] - c[0]) * (d[1] - c[1]) - (d[0] - c[0]) * (a[1] - c[1]);
    if oadc <= EPSILON {
        return false;
    }
    true
}

/// True if `d` lies strictly inside the circumcircle of the CCW triangle
/// (a, b, c).
///
/// Requires `d` to be opposite the edge b-c. The two orientation sub-terms
/// reject most candidates before the lifted determinant is formed.
#[inline]
pub fn in_circle(a: Coord, b: Coord, c: Coord, d: Coord) -> bool {
    let adx = a[0] - d[0];
    let ady = a[1] - d[1];
    let bdx = b[0] - d[0];
    let bdy = b[1] - d[1];

    let oabd = adx * bdy - bdx * ady;
    if oabd <= 0.0 {
        return false;
    }

    let cdx = c[0] - d[0];
    let cdy = c[1] - d[1];

    let ocad = cdx * ady - adx * cdy;
    if ocad <= 0.0 {
        return false;
    }

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdx * cdy - cdx * bdy) + blift * ocad + clift * oabd;
    det > 0.0
}

/// Cross and dot products of (a - origin) and (b - origin).
#[inline]
fn cross_dot(origin: Coord, a: Coord, b: Coord) -> (Real, Real) {
    let ax = a[0] - origin[0];
    let ay = a[1] - origin[1];
    let bx = b[0] - origin[0];
    let by = b[1] - origin[1];
    (ax * by - ay * bx, ax * bx + ay * by)
}

/// True if the signed angle a-origin-b lies outside [-90°, 90°].
#[inline]
pub fn angle_exceeds_90_degrees(origin: Coord, a: Coord, b: Coord) -> bool {
    let (_, dot) = cross_dot(origin, a, b);
    dot < 0.0
}

/// True if the signed angle a-origin-b is negative.
#[inline]
pub fn angle_is_negative(origin: Coord, a: Coord, b: Coord) -> bool {
    let (cross, _) = cross_dot(origin, a, b);
    cross < 0.0
}

/// True if the signed angle a-origin-b is above +90° or negative.
#[inline]
pub fn angle_exceeds_plus_90_degrees_or_is_negative(origin: Coord, a: Coord, b: Coord) -> bool {
    let (cross, dot) = cross_dot(origin, a, b);
    cross < 0.0 || dot < 0.0
}

/// True if the direction from `far` back to `node` makes an angle below
/// 3π/4 with the +x axis, i.e. the front dips to the right of `node`.
#[inline]
pub fn basin_angle_below_three_quarter_pi(node: Coord, far: Coord) -> bool {
    let ax = node[0] - far[0];
    let ay = node[1] - far[1];
    !(ay >= 0.0 && ax < 0.0 && ay <= -ax)
}

/// Twice the signed area of (a, b, c); positive when CCW.
#[inline]
pub fn signed_area2(a: Coord, b: Coord, c: Coord) -> Real {
    (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient_basic() {
        assert_eq!(orient_2d([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]), Orientation::Ccw);
        assert_eq!(orient_2d([0.0, 0.0], [0.0, 1.0], [1.0, 0.0]), Orientation::Cw);
        assert_eq!(
            orient_2d([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]),
            Orientation::Collinear
        );
    }

    #[test]
    fn orient_treats_tiny_area_as_collinear() {
        let tiny = EPSILON / 4.0;
        assert_eq!(
            orient_2d([0.0, 0.0], [1.0, 0.0], [0.5, tiny]),
            Orientation::Collinear
        );
    }

    #[test]
    fn in_circle_detects_inside_and_outside() {
        let a = [0.0, 0.0];
        let b = [1.0, 0.0];
        let c = [0.0, 1.0];
        // d opposite edge b-c, inside the circumcircle centered at (0.5, 0.5).
        assert!(in_circle(a, b, c, [0.9, 0.9]));
        assert!(!in_circle(a, b, c, [2.0, 2.0]));
    }

    #[test]
    fn in_circle_rejects_cocircular() {
        // Square corners are cocircular: not strictly inside.
        assert!(!in_circle([0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]));
    }

    #[test]
    fn in_scan_area_wedge() {
        let a = [0.0, 0.0];
        let b = [1.0, 1.0];
        let c = [-1.0, 1.0];
        assert!(in_scan_area(a, b, c, [0.0, 2.0]));
        assert!(!in_scan_area(a, b, c, [3.0, 0.5]));
    }

    #[test]
    fn hole_angles() {
        let o = [0.0, 0.0];
        // 135 degrees between (1,0) and (-1,1).
        assert!(angle_exceeds_90_degrees(o, [1.0, 0.0], [-1.0, 1.0]));
        assert!(!angle_exceeds_90_degrees(o, [1.0, 0.0], [1.0, 1.0]));
        // Negative angle: b is clockwise from a.
        assert!(angle_exceeds_plus_90_degrees_or_is_negative(
            o,
            [1.0, 0.0],
            [1.0, -1.0]
        ));
        assert!(!angle_exceeds_plus_90_degrees_or_is_negative(
            o,
            [1.0, 0.0],
            [1.0, 1.0]
        ));
    }

    #[test]
    fn basin_angle() {
        // Front drops steeply to the right of the node.
        assert!(basin_angle_below_three_quarter_pi([0.0, 3.0], [1.0, 0.0]));
        // Gentle slope down to the right: no basin.
        assert!(!basin_angle_below_three_quarter_pi([0.0, 1.0], [2.0, 0.0]));
        // Front rising to the right always qualifies for a basin check.
        assert!(basin_angle_below_three_quarter_pi([0.0, 0.0], [4.0, 1.0]));
    }

    #[test]
    fn signed_area_sign() {
        assert!(signed_area2([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]) > 0.0);
    }
}
