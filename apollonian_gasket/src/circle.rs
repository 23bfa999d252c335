// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signed-curvature circles and their per-point queries.

use kurbo::Point;

use crate::GasketError;

/// Shade value for samples that no circle claims.
pub const BACKGROUND: u8 = 0;

/// An immutable circle described by its signed curvature.
///
/// The curvature is the reciprocal of the radius. A negative curvature marks a
/// circle whose tangency "interior" is the unbounded side, which is how the
/// outer boundary of a packing is oriented. Membership queries ignore the sign
/// and always look at the disk.
///
/// ```rust
/// use apollonian_gasket::Circle;
/// use kurbo::Point;
///
/// let c = Circle::new(Point::new(0.5, 0.0), 2.0).unwrap();
/// assert!(c.contains(Point::new(0.5, 0.25)));
/// assert_eq!(c.shade(Point::new(0.5, 0.0)), Some(255));
/// assert_eq!(c.shade(Point::new(2.0, 0.0)), None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    curvature: f64,
    center: Point,
    radius_squared: f64,
}

impl Circle {
    /// Create a circle from its center and signed curvature.
    ///
    /// Fails with [`GasketError::InvalidCurvature`] for a zero or non-finite
    /// curvature.
    pub fn new(center: Point, curvature: f64) -> Result<Self, GasketError> {
        if curvature == 0.0 || !curvature.is_finite() {
            return Err(GasketError::InvalidCurvature { curvature });
        }
        Ok(Self {
            curvature,
            center,
            radius_squared: 1.0 / (curvature * curvature),
        })
    }

    /// Signed curvature.
    #[inline]
    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Unsigned radius, `1 / |curvature|`.
    #[inline]
    pub fn radius(&self) -> f64 {
        1.0 / self.curvature.abs()
    }

    /// Square of the radius.
    #[inline]
    pub fn radius_squared(&self) -> f64 {
        self.radius_squared
    }

    /// Signed radius, `1 / curvature`.
    #[inline]
    pub(crate) fn signed_radius(&self) -> f64 {
        1.0 / self.curvature
    }

    /// Squared distance from the center minus the square radius.
    ///
    /// Negative strictly inside, zero on the rim, positive outside.
    #[inline]
    pub fn penetration(&self, point: Point) -> f64 {
        (point - self.center).hypot2() - self.radius_squared
    }

    /// Whether `point` lies inside or on the circle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.penetration(point) <= 0.0
    }

    /// Grayscale intensity for a point strictly inside the circle.
    ///
    /// The penetration depth is normalized by the square radius, so the
    /// center maps to `255` and the rim fades to `0`. Returns `None` when the
    /// point is on or outside the rim.
    pub fn shade(&self, point: Point) -> Option<u8> {
        let penetration = self.penetration(point);
        if penetration < 0.0 {
            let depth = -penetration / self.radius_squared * 255.0;
            #[expect(
                clippy::cast_possible_truncation,
                reason = "value is clamped to the u8 range first"
            )]
            let level = depth.clamp(0.0, 255.0) as u8;
            Some(level)
        } else {
            None
        }
    }

    /// The unsigned [`kurbo::Circle`] covering the same disk.
    pub fn to_kurbo(&self) -> kurbo::Circle {
        kurbo::Circle::new(self.center, self.radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_nan_curvature_are_rejected() {
        assert_eq!(
            Circle::new(Point::ORIGIN, 0.0),
            Err(GasketError::InvalidCurvature { curvature: 0.0 })
        );
        assert!(Circle::new(Point::ORIGIN, f64::NAN).is_err());
        assert!(Circle::new(Point::ORIGIN, f64::INFINITY).is_err());
    }

    #[test]
    fn penetration_sign_tracks_the_rim() {
        let c = Circle::new(Point::new(1.0, 1.0), 0.5).unwrap();
        assert_eq!(c.radius(), 2.0);
        assert!(c.penetration(Point::new(1.0, 1.0)) < 0.0);
        assert_eq!(c.penetration(Point::new(3.0, 1.0)), 0.0);
        assert!(c.penetration(Point::new(3.5, 1.0)) > 0.0);
        assert!(c.contains(Point::new(3.0, 1.0)));
        assert!(!c.contains(Point::new(3.5, 1.0)));
    }

    #[test]
    fn negative_curvature_still_measures_the_disk() {
        let boundary = Circle::new(Point::ORIGIN, -1.0).unwrap();
        assert_eq!(boundary.radius(), 1.0);
        assert!(boundary.contains(Point::new(0.5, 0.5)));
        assert!(!boundary.contains(Point::new(1.0, 1.0)));
    }

    #[test]
    fn shade_is_linear_in_depth_and_absent_on_the_rim() {
        let c = Circle::new(Point::ORIGIN, 1.0).unwrap();
        assert_eq!(c.shade(Point::ORIGIN), Some(255));
        // Penetration of -0.75 at distance 0.5.
        assert_eq!(c.shade(Point::new(0.5, 0.0)), Some(191));
        assert_eq!(c.shade(Point::new(1.0, 0.0)), None);
        assert_eq!(c.shade(Point::new(2.0, 0.0)), None);
    }

    #[test]
    fn kurbo_export_uses_unsigned_radius() {
        let c = Circle::new(Point::new(2.0, 3.0), -4.0).unwrap();
        let k = c.to_kurbo();
        assert_eq!(k.center, Point::new(2.0, 3.0));
        assert_eq!(k.radius, 0.25);
    }
}
