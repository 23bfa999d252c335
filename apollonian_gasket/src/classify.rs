// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight-line predicates used to route points through the packing.
//!
//! Three mutually tangent circles touch pairwise on the edges of the triangle
//! formed by their centers, so that triangle minus the three disks is exactly
//! the curvilinear gap between them. The routing code relies on this to
//! replace curvilinear membership with these cheap linear tests.

use kurbo::Point;

/// Whether `point` lies strictly to the left of the directed line `from -> to`.
///
/// "Left" is the counterclockwise side in a y-up frame. Points on the line
/// are not left.
#[inline]
pub fn left_of_line(point: Point, from: Point, to: Point) -> bool {
    (point.x - from.x) * (to.y - from.y) < (point.y - from.y) * (to.x - from.x)
}

/// Whether `point` lies inside the triangle `z1, z2, z3`, in either winding.
#[inline]
pub fn inside_triangle(point: Point, z1: Point, z2: Point, z3: Point) -> bool {
    let b1 = left_of_line(point, z1, z2);
    let b2 = left_of_line(point, z2, z3);
    let b3 = left_of_line(point, z3, z1);
    b1 == b2 && b2 == b3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_is_counterclockwise() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(1.0, 0.0);
        assert!(left_of_line(Point::new(0.5, 1.0), from, to));
        assert!(!left_of_line(Point::new(0.5, -1.0), from, to));
        assert!(!left_of_line(Point::new(2.0, 0.0), from, to));
        // Reversing the direction flips the side.
        assert!(left_of_line(Point::new(0.5, -1.0), to, from));
    }

    #[test]
    fn triangle_ignores_winding() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        let c = Point::new(0.0, 4.0);
        let inside = Point::new(1.0, 1.0);
        let outside = Point::new(3.0, 3.0);
        assert!(inside_triangle(inside, a, b, c));
        assert!(inside_triangle(inside, a, c, b));
        assert!(!inside_triangle(outside, a, b, c));
        assert!(!inside_triangle(outside, c, b, a));
        assert!(!inside_triangle(Point::new(-1.0, 1.0), a, b, c));
    }
}
