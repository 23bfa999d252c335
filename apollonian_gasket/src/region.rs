// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subdivision regions and the per-branch arena that owns them.
//!
//! A region is the curvilinear triangle between three mutually tangent
//! circles together with the circle inscribed in it. Inscribing that circle
//! splits the gap into three smaller gaps, which become the region's children.
//!
//! Two kinds of region exist:
//! - [`RegionKind::Peripheral`]: one generator is the outer boundary. The gap
//!   splits into two peripheral gaps (still touching the boundary) and one
//!   interior gap.
//! - [`RegionKind::Interior`]: no generator is the boundary. The gap splits
//!   into three interior gaps.
//!
//! Parent circles are stored by value, so a region never borrows from its
//! ancestors. Children live in the same [`Branch`] arena and are addressed by
//! [`RegionId`]; they are created once and never removed or reordered.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use crate::circle::BACKGROUND;
use crate::descartes::{Root, tangent_circle};
use crate::{Circle, GasketError, classify};

/// Handle of a region inside its branch.
///
/// Handles stay valid for the life of the gasket: regions are only ever
/// appended to a branch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u32);

impl RegionId {
    /// The top-level region of every branch.
    pub(crate) const ROOT: Self = Self(0);

    #[inline]
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which family a region belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// The region's circle touches the outer boundary.
    ///
    /// Parents are `[boundary, inner1, inner2]`; child slots are
    /// `[(boundary, inner1, own), (boundary, own, inner2), interior(inner1, inner2, own)]`.
    Peripheral,
    /// The region's circle touches no boundary circle.
    ///
    /// Parents are `[inner1, inner2, inner3]`; child slots are
    /// `[(inner1, inner2, own), (inner1, inner3, own), (inner2, inner3, own)]`.
    Interior,
}

/// Where a point goes next while descending a region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    /// Inside or on the region's own circle.
    Own,
    /// In the gap belonging to this child slot.
    Child(usize),
}

/// One node of the subdivision tree.
#[derive(Clone, Debug)]
pub struct Region {
    kind: RegionKind,
    circle: Circle,
    parents: [Circle; 3],
    children: [Option<RegionId>; 3],
    depth: u32,
}

impl Region {
    /// Inscribe a circle in the gap between `parents`.
    pub(crate) fn new(
        kind: RegionKind,
        parents: [Circle; 3],
        depth: u32,
    ) -> Result<Self, GasketError> {
        let [p1, p2, p3] = &parents;
        let circle = tangent_circle(p1, p2, p3, Root::Plus)?;
        Ok(Self {
            kind,
            circle,
            parents,
            children: [None; 3],
            depth,
        })
    }

    /// Peripheral or interior.
    #[inline]
    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// The circle inscribed in this region.
    #[inline]
    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    /// The three circles this region's circle is tangent to.
    ///
    /// See [`RegionKind`] for their order.
    #[inline]
    pub fn parents(&self) -> &[Circle; 3] {
        &self.parents
    }

    /// Generation below the top-level region of the branch (which is `0`).
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Handles of the child slots; `None` where no child has been created.
    #[inline]
    pub fn children(&self) -> &[Option<RegionId>; 3] {
        &self.children
    }

    /// Whether no child slot is filled.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Kind and generators of the child in `slot`.
    fn child_spec(&self, slot: usize) -> (RegionKind, [Circle; 3]) {
        let own = self.circle;
        let [p1, p2, p3] = self.parents;
        match (self.kind, slot) {
            (RegionKind::Peripheral, 0) => (RegionKind::Peripheral, [p1, p2, own]),
            (RegionKind::Peripheral, 1) => (RegionKind::Peripheral, [p1, own, p3]),
            (RegionKind::Peripheral, _) => (RegionKind::Interior, [p2, p3, own]),
            (RegionKind::Interior, 0) => (RegionKind::Interior, [p1, p2, own]),
            (RegionKind::Interior, 1) => (RegionKind::Interior, [p1, p3, own]),
            (RegionKind::Interior, _) => (RegionKind::Interior, [p2, p3, own]),
        }
    }

    /// Build (but do not attach) the child for `slot`.
    pub(crate) fn make_child(&self, slot: usize) -> Result<Self, GasketError> {
        let (kind, parents) = self.child_spec(slot);
        Self::new(kind, parents, self.depth + 1)
    }

    /// Route `point` to the own circle or exactly one child gap.
    ///
    /// Callers only reach a region with points that lie outside all of its
    /// generators, so the straight-line tests below partition the gap.
    pub(crate) fn classify(&self, point: Point) -> Route {
        if self.circle.contains(point) {
            return Route::Own;
        }
        let own = self.circle.center();
        let [p1, p2, p3] = self.parents.map(|c| c.center());
        match self.kind {
            RegionKind::Peripheral => {
                if classify::inside_triangle(point, p2, p3, own) {
                    Route::Child(2)
                } else if classify::left_of_line(point, p1, own) {
                    Route::Child(0)
                } else {
                    Route::Child(1)
                }
            }
            RegionKind::Interior => {
                if classify::inside_triangle(point, p1, p2, own) {
                    Route::Child(0)
                } else if classify::inside_triangle(point, p1, p3, own) {
                    Route::Child(1)
                } else {
                    Route::Child(2)
                }
            }
        }
    }
}

/// Arena holding one top-level region and all of its descendants.
///
/// Dropping the branch drops the whole subtree.
#[derive(Clone, Debug)]
pub(crate) struct Branch {
    regions: Vec<Region>,
}

impl Branch {
    pub(crate) fn new(root: Region) -> Self {
        Self {
            regions: vec![root],
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: RegionId) -> &Region {
        &self.regions[id.idx()]
    }

    #[inline]
    pub(crate) fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.regions.len()
    }

    /// Append `child` under `parent` in `slot` and return its handle.
    ///
    /// The slot must be empty.
    pub(crate) fn attach(&mut self, parent: RegionId, slot: usize, child: Region) -> RegionId {
        debug_assert!(
            self.regions[parent.idx()].children[slot].is_none(),
            "child slot {slot} of {parent:?} is already filled"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "branch sizes are capped at u32::MAX by the subdivision limits"
        )]
        let id = RegionId(self.regions.len() as u32);
        self.regions.push(child);
        self.regions[parent.idx()].children[slot] = Some(id);
        id
    }

    /// Signed nearest-boundary value for a point routed into this branch.
    ///
    /// Returns a negative penetration as soon as a circle contains the point.
    /// Otherwise peripheral regions (and the first interior region on the
    /// path) contribute their penetration to a running minimum; interior
    /// regions below an interior region do not refine it.
    pub(crate) fn locate(&self, point: Point) -> f64 {
        let mut best = f64::INFINITY;
        let mut refine = true;
        let mut id = RegionId::ROOT;
        loop {
            let region = self.get(id);
            let penetration = region.circle.penetration(point);
            if penetration < 0.0 {
                return penetration;
            }
            if refine {
                best = best.min(penetration);
            }
            if region.kind == RegionKind::Interior {
                refine = false;
            }
            match region.classify(point) {
                Route::Own => return best.min(penetration),
                Route::Child(slot) => match region.children[slot] {
                    Some(child) => id = child,
                    None => return best,
                },
            }
        }
    }

    /// Shade for a point routed into this branch.
    pub(crate) fn shade(&self, point: Point) -> u8 {
        let mut id = RegionId::ROOT;
        loop {
            let region = self.get(id);
            match region.classify(point) {
                Route::Own => return region.circle.shade(point).unwrap_or(BACKGROUND),
                Route::Child(slot) => match region.children[slot] {
                    Some(child) => id = child,
                    None => return BACKGROUND,
                },
            }
        }
    }
}
