// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gasket root: five base circles, six branches, and the public queries.

use kurbo::Point;

use crate::circle::BACKGROUND;
use crate::descartes::{Root, TANGENCY_TOLERANCE, tangent_circle};
use crate::region::{Branch, Region, RegionKind};
use crate::{Circle, GasketError, Subdivision, SubdivisionLimits, SubdivisionReport, classify};

/// [`Gasket::locate`] result for points outside the boundary circle.
pub const OUTSIDE: f64 = f64::INFINITY;

/// Seeds a gasket is built from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SeedSpec {
    /// Only the outer boundary; the two inner seeds are placed symmetrically.
    ///
    /// A boundary of curvature `k` (which must be negative) at `center` gets
    /// two seeds of curvature `-2k` centered at `center ± 0.5/k` along the x
    /// axis, so they split the boundary's diameter between them.
    Boundary {
        /// Signed curvature of the boundary, negative.
        curvature: f64,
        /// Center of the boundary.
        center: Point,
    },
    /// Three mutually tangent seeds as `(curvature, center)`.
    ///
    /// The first seed is the boundary and must have negative curvature. The
    /// two inner seeds must sit on a common diameter of the boundary;
    /// otherwise construction fails with
    /// [`GasketError::DegenerateConfiguration`] carrying the sine of the
    /// angle between them as seen from the boundary's center.
    Explicit([(f64, Point); 3]),
}

impl Default for SeedSpec {
    /// The unit boundary at the origin.
    fn default() -> Self {
        Self::Boundary {
            curvature: -1.0,
            center: Point::ORIGIN,
        }
    }
}

impl SeedSpec {
    fn seeds(&self) -> Result<[Circle; 3], GasketError> {
        let raw = match *self {
            Self::Boundary { curvature, center } => {
                let offset = kurbo::Vec2::new(0.5 / curvature, 0.0);
                [
                    (curvature, center),
                    (-2.0 * curvature, center + offset),
                    (-2.0 * curvature, center - offset),
                ]
            }
            Self::Explicit(raw) => raw,
        };
        let boundary = raw[0].0;
        if boundary >= 0.0 || boundary.is_nan() {
            return Err(GasketError::InvalidCurvature {
                curvature: boundary,
            });
        }
        let [a, b, c] = raw;
        let seeds = [
            Circle::new(a.1, a.0)?,
            Circle::new(b.1, b.0)?,
            Circle::new(c.1, c.0)?,
        ];
        // Top-level routing splits the boundary along the line through the
        // inner seeds, which only separates the two gaps when it is a diameter.
        let to_b = b.1 - a.1;
        let to_c = c.1 - a.1;
        let sine = to_b.cross(to_c) / (to_b.hypot() * to_c.hypot());
        if sine.abs() > TANGENCY_TOLERANCE || sine.is_nan() {
            return Err(GasketError::DegenerateConfiguration { value: sine });
        }
        Ok(seeds)
    }
}

/// One of the five circles every gasket starts from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BaseCircle {
    /// The outer boundary.
    A,
    /// First inner seed.
    B,
    /// Second inner seed.
    C,
    /// The Descartes solution for `A, B, C` left of the `B -> C` axis.
    ///
    /// This is the `+` solution unless the two solutions had to be swapped to
    /// put it on that side, which only happens when they share a curvature.
    D,
    /// The other Descartes solution, right of the `B -> C` axis.
    E,
}

impl BaseCircle {
    const fn idx(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
        }
    }
}

/// Top-level routing of a point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TopLevel {
    /// Outside the boundary circle.
    Outside,
    /// Inside (or on) one of the inner base circles.
    Base(BaseCircle),
    /// In the gap covered by the branch with this index.
    ///
    /// Branches `0..4` are peripheral, rooted at `(A, B, D)`, `(A, D, C)`,
    /// `(A, C, E)`, `(A, E, B)`; branches `4` and `5` are interior, rooted at
    /// `(B, D, C)` and `(C, E, B)`.
    Branch(usize),
}

/// Sum per-branch reports, or return the error of the first branch (in branch
/// order) that failed.
fn merge_branch_results(
    results: impl IntoIterator<Item = Result<SubdivisionReport, GasketError>>,
) -> Result<SubdivisionReport, GasketError> {
    let mut report = SubdivisionReport::default();
    let mut first_err = None;
    for result in results {
        match result {
            Ok(branch) => report += branch,
            Err(err) => {
                tracing::debug!(%err, "branch stopped early");
                first_err.get_or_insert(err);
            }
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(report),
    }
}

/// An Apollonian gasket.
///
/// Built once from a [`SeedSpec`], grown with [`Gasket::subdivide`], then
/// queried read-only. Queries take `&self`, never fail, and can run from many
/// threads at once.
#[derive(Clone, Debug)]
pub struct Gasket {
    base: [Circle; 5],
    branches: [Branch; 6],
    limits: SubdivisionLimits,
}

impl Gasket {
    /// Build the base circles and the six childless top-level regions.
    pub fn new(seeds: SeedSpec) -> Result<Self, GasketError> {
        Self::with_limits(seeds, SubdivisionLimits::default())
    }

    /// Like [`Gasket::new`], with custom subdivision budgets.
    pub fn with_limits(seeds: SeedSpec, limits: SubdivisionLimits) -> Result<Self, GasketError> {
        let [a, b, c] = seeds.seeds()?;
        let d = tangent_circle(&a, &b, &c, Root::Plus)?;
        let e = tangent_circle(&a, &b, &c, Root::Minus)?;
        // Routing expects D on the left of B -> C. For seeds along a diameter
        // both solutions share a curvature and only the square-root branch
        // decides which side each lands on.
        let (d, e) = if classify::left_of_line(d.center(), b.center(), c.center()) {
            (d, e)
        } else {
            (e, d)
        };

        let peripheral = |parents| Region::new(RegionKind::Peripheral, parents, 0).map(Branch::new);
        let interior = |parents| Region::new(RegionKind::Interior, parents, 0).map(Branch::new);
        let branches = [
            peripheral([a, b, d])?,
            peripheral([a, d, c])?,
            peripheral([a, c, e])?,
            peripheral([a, e, b])?,
            interior([b, d, c])?,
            interior([c, e, b])?,
        ];
        Ok(Self {
            base: [a, b, c, d, e],
            branches,
            limits,
        })
    }

    /// The budgets applied by [`Gasket::subdivide`].
    pub fn limits(&self) -> SubdivisionLimits {
        self.limits
    }

    /// One of the five base circles.
    pub fn base(&self, which: BaseCircle) -> &Circle {
        &self.base[which.idx()]
    }

    /// All five base circles, in `A..=E` order.
    pub fn base_circles(&self) -> &[Circle; 5] {
        &self.base
    }

    /// Grow every branch according to `mode`.
    ///
    /// Only empty child slots are filled, so repeating a pass (or running one
    /// with a smaller budget) creates nothing, and existing circles never move.
    /// A slot whose generators turn out degenerate stays empty and is counted in
    /// [`SubdivisionReport::skipped`]. A branch that exceeds the configured
    /// [`SubdivisionLimits`] stops growing, the other branches still grow, and
    /// the pass then returns the first branch's
    /// [`GasketError::ResourceLimitExceeded`]; whatever was built stays valid.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn subdivide(&mut self, mode: Subdivision) -> Result<SubdivisionReport, GasketError> {
        let limits = self.limits;
        let results = self
            .branches
            .each_mut()
            .map(|branch| branch.subdivide(mode, &limits));
        let report = merge_branch_results(results)?;
        tracing::debug!(
            created = report.created,
            skipped = report.skipped,
            regions = self.region_count(),
            "subdivision finished"
        );
        Ok(report)
    }

    /// [`Gasket::subdivide`], growing the six branches in parallel.
    ///
    /// Each branch is owned by exactly one worker, so every child slot is
    /// filled at most once without any locking. The resulting tree, report and
    /// error are the same as the sequential pass produces.
    #[cfg(feature = "rayon")]
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn par_subdivide(&mut self, mode: Subdivision) -> Result<SubdivisionReport, GasketError> {
        use rayon::prelude::*;

        let limits = self.limits;
        let results: alloc::vec::Vec<_> = self
            .branches
            .as_mut_slice()
            .par_iter_mut()
            .map(|branch| branch.subdivide(mode, &limits))
            .collect();
        let report = merge_branch_results(results)?;
        tracing::debug!(
            created = report.created,
            skipped = report.skipped,
            regions = self.region_count(),
            "parallel subdivision finished"
        );
        Ok(report)
    }

    /// Decide which base circle or branch a point belongs to.
    pub fn classify(&self, point: Point) -> TopLevel {
        let [a, b, c, d, e] = &self.base;
        if !a.contains(point) {
            return TopLevel::Outside;
        }
        if b.contains(point) {
            return TopLevel::Base(BaseCircle::B);
        }
        if c.contains(point) {
            return TopLevel::Base(BaseCircle::C);
        }
        if classify::left_of_line(point, b.center(), c.center()) {
            if d.contains(point) {
                TopLevel::Base(BaseCircle::D)
            } else if classify::inside_triangle(point, b.center(), d.center(), c.center()) {
                TopLevel::Branch(4)
            } else if classify::left_of_line(point, a.center(), d.center()) {
                TopLevel::Branch(0)
            } else {
                TopLevel::Branch(1)
            }
        } else if e.contains(point) {
            TopLevel::Base(BaseCircle::E)
        } else if classify::inside_triangle(point, c.center(), e.center(), b.center()) {
            TopLevel::Branch(5)
        } else if classify::left_of_line(point, a.center(), e.center()) {
            TopLevel::Branch(2)
        } else {
            TopLevel::Branch(3)
        }
    }

    /// Signed nearest-boundary value at `point`.
    ///
    /// Negative exactly when some circle of the tree strictly contains the
    /// point (the value is that circle's [`Circle::penetration`]). Otherwise a
    /// non-negative penetration of the closest circle seen while descending.
    /// Points outside the boundary return [`OUTSIDE`].
    pub fn locate(&self, point: Point) -> f64 {
        match self.classify(point) {
            TopLevel::Outside => OUTSIDE,
            TopLevel::Base(which) => self.base(which).penetration(point),
            TopLevel::Branch(i) => self.branches[i].locate(point),
        }
    }

    /// Grayscale intensity at `point`, or [`BACKGROUND`] where no circle of the
    /// tree claims it.
    pub fn shade(&self, point: Point) -> u8 {
        match self.classify(point) {
            TopLevel::Outside => BACKGROUND,
            TopLevel::Base(which) => self.base(which).shade(point).unwrap_or(BACKGROUND),
            TopLevel::Branch(i) => self.branches[i].shade(point),
        }
    }

    /// Whether `point` routes into the `(A, D, C)` or `(A, E, B)` peripheral
    /// branch.
    ///
    /// This is a diagnostic predicate kept with its historical meaning: it is
    /// `false` inside every base circle, outside the boundary, and in the other
    /// four branches. It does not mean "covered by the packing".
    pub fn contains(&self, point: Point) -> bool {
        matches!(self.classify(point), TopLevel::Branch(1 | 3))
    }

    /// Every circle of the tree: the five base circles, then each branch's
    /// regions in creation order.
    ///
    /// The order is stable for a given tree and newly grown circles always
    /// come after the existing circles of their branch.
    pub fn circles(&self) -> impl Iterator<Item = &Circle> + '_ {
        self.base
            .iter()
            .chain(self.regions().map(Region::circle))
    }

    /// Every circle of the tree as an unsigned [`kurbo::Circle`] (center and
    /// radius), in the order of [`Gasket::circles`].
    pub fn enumerate_circles(&self) -> impl Iterator<Item = kurbo::Circle> + '_ {
        self.circles().map(Circle::to_kurbo)
    }

    /// Every region of the tree, branch by branch in creation order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.branches.iter().flat_map(|branch| branch.regions().iter())
    }

    /// Number of regions across all branches.
    pub fn region_count(&self) -> usize {
        self.branches.iter().map(Branch::len).sum()
    }

    /// Number of circles, base circles included.
    pub fn circle_count(&self) -> usize {
        self.base.len() + self.region_count()
    }
}
