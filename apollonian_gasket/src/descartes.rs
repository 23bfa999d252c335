// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descartes Circle Theorem solver.
//!
//! Given three mutually tangent circles with curvatures `k1, k2, k3` and
//! centers `z1, z2, z3` (as complex numbers), the two circles tangent to all
//! three satisfy
//!
//! ```text
//! k4 = k1 + k2 + k3 ± 2·sqrt(k1k2 + k2k3 + k3k1)
//! z4 = (z1k1 + z2k2 + z3k3 ± 2·sqrt(k1k2·z1z2 + k2k3·z2z3 + k3k1·z3z1)) / k4
//! ```
//!
//! The sign in the center formula does not always pair with the sign in the
//! curvature formula: which branch of the complex square root is "right"
//! depends on where the circles sit in the plane. [`tangent_circle`] therefore
//! evaluates both center candidates and keeps the one that is actually tangent
//! to the generators.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use num_complex::Complex64;

use crate::{Circle, GasketError};

/// Largest relative tangency mismatch accepted for a solved circle.
///
/// The mismatch of each generator is the gap between the center distance and
/// the expected `|1/k + 1/k4|`, divided by the sum of the two radii.
pub const TANGENCY_TOLERANCE: f64 = 1e-5;

/// Relative slack for rounding noise in the curvature radicand.
const RADICAND_TOLERANCE: f64 = 1e-9;

/// Which of the two Descartes solutions to produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Root {
    /// `k1 + k2 + k3 + 2·sqrt(..)`: the smaller circle nested in the gap.
    Plus,
    /// `k1 + k2 + k3 - 2·sqrt(..)`: the other solution.
    Minus,
}

impl Root {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Self::Plus => 1.0,
            Self::Minus => -1.0,
        }
    }

    #[inline]
    fn opposite(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }
}

/// Curvature of the fourth circle tangent to three mutually tangent circles.
///
/// Fails with [`GasketError::DegenerateConfiguration`] if any input curvature
/// is zero or the radicand `k1k2 + k2k3 + k3k1` is negative beyond rounding
/// noise.
///
/// ```rust
/// use apollonian_gasket::{Root, fourth_curvature};
///
/// // Unit boundary with two half-size circles inside it.
/// assert_eq!(fourth_curvature(-1.0, 2.0, 2.0, Root::Plus).unwrap(), 3.0);
/// assert_eq!(fourth_curvature(-1.0, 2.0, 2.0, Root::Minus).unwrap(), 3.0);
/// ```
pub fn fourth_curvature(k1: f64, k2: f64, k3: f64, root: Root) -> Result<f64, GasketError> {
    if k1 == 0.0 || k2 == 0.0 || k3 == 0.0 {
        return Err(GasketError::DegenerateConfiguration { value: 0.0 });
    }
    let radicand = k1 * k2 + k2 * k3 + k3 * k1;
    let scale = (k1 * k2).abs().max((k2 * k3).abs()).max((k3 * k1).abs());
    if radicand < -RADICAND_TOLERANCE * scale || radicand.is_nan() {
        return Err(GasketError::DegenerateConfiguration { value: radicand });
    }
    let radicand = radicand.max(0.0);
    Ok(k1 + k2 + k3 + root.sign() * 2.0 * radicand.sqrt())
}

/// Center of the fourth circle with curvature `k4`, using the `root` branch of
/// the complex square root.
///
/// `k4` must be non-zero. The returned point is only one of two candidates;
/// see [`tangent_circle`] for the selection that checks tangency.
pub fn fourth_center(generators: [(f64, Point); 3], k4: f64, root: Root) -> Point {
    let [(k1, z1), (k2, z2), (k3, z3)] = generators.map(|(k, p)| (k, Complex64::new(p.x, p.y)));
    let weighted = z1 * k1 + z2 * k2 + z3 * k3;
    let cross = z1 * z2 * (k1 * k2) + z2 * z3 * (k2 * k3) + z3 * z1 * (k3 * k1);
    let z4 = (weighted + cross.sqrt() * (2.0 * root.sign())) / k4;
    Point::new(z4.re, z4.im)
}

/// Worst relative tangency mismatch between a candidate and its generators.
fn tangency_residual(generators: &[Circle; 3], center: Point, curvature: f64) -> f64 {
    let rho = 1.0 / curvature;
    generators
        .iter()
        .map(|g| {
            let distance = (center - g.center()).hypot();
            let expected = (g.signed_radius() + rho).abs();
            (distance - expected).abs() / (g.radius() + rho.abs())
        })
        .fold(0.0, f64::max)
}

/// The circle tangent to three mutually tangent circles, on the `root` side.
///
/// The center candidate paired with `root` is preferred when it passes the
/// tangency check; otherwise the other branch is taken. If neither candidate
/// is tangent within [`TANGENCY_TOLERANCE`] the generators were not mutually
/// tangent and [`GasketError::DegenerateConfiguration`] is returned.
pub fn tangent_circle(
    c1: &Circle,
    c2: &Circle,
    c3: &Circle,
    root: Root,
) -> Result<Circle, GasketError> {
    let k4 = fourth_curvature(c1.curvature(), c2.curvature(), c3.curvature(), root)?;
    if k4 == 0.0 || !k4.is_finite() {
        return Err(GasketError::InvalidCurvature { curvature: k4 });
    }
    let generators = [*c1, *c2, *c3];
    let raw = generators.map(|c| (c.curvature(), c.center()));

    let paired = fourth_center(raw, k4, root);
    let paired_residual = tangency_residual(&generators, paired, k4);
    if paired_residual <= TANGENCY_TOLERANCE {
        return Circle::new(paired, k4);
    }
    let other = fourth_center(raw, k4, root.opposite());
    let other_residual = tangency_residual(&generators, other, k4);
    if other_residual <= TANGENCY_TOLERANCE {
        return Circle::new(other, k4);
    }
    Err(GasketError::DegenerateConfiguration {
        value: paired_residual.min(other_residual),
    })
}
