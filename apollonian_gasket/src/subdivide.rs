// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growing branches: stopping rules, budgets, and the work-stack driver.

use alloc::vec;
use core::ops::{Add, AddAssign};

use crate::error::ResourceLimit;
use crate::region::{Branch, RegionId};
use crate::GasketError;

/// Stopping rule for a subdivision pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Subdivision {
    /// Give every top-level region this many generations of descendants.
    ///
    /// `Depth(0)` leaves the top-level regions childless.
    Depth(u32),
    /// Keep splitting a region while its circle's curvature is below the
    /// ceiling, i.e. until circles are smaller than `1 / ceiling`.
    CurvatureCeiling(f64),
}

/// Budgets that bound a subdivision pass.
///
/// Both budgets apply to each of the six top-level branches separately.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubdivisionLimits {
    /// Deepest generation a region may have below its top-level region.
    pub max_depth: u32,
    /// Most regions a single branch may hold, top-level region included.
    ///
    /// Values above `u32::MAX` are treated as `u32::MAX`.
    pub max_regions: usize,
}

impl Default for SubdivisionLimits {
    fn default() -> Self {
        Self {
            max_depth: 4096,
            max_regions: 1 << 22,
        }
    }
}

impl SubdivisionLimits {
    fn region_budget(&self) -> usize {
        self.max_regions.min(u32::MAX as usize)
    }
}

/// What a subdivision pass did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SubdivisionReport {
    /// Regions created by this pass.
    pub created: usize,
    /// Child slots left empty because their generators were degenerate.
    pub skipped: usize,
    /// Regions the pass looked at, existing or new.
    pub visited: usize,
}

impl Add for SubdivisionReport {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            created: self.created + rhs.created,
            skipped: self.skipped + rhs.skipped,
            visited: self.visited + rhs.visited,
        }
    }
}

impl AddAssign for SubdivisionReport {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Branch {
    /// Grow this branch according to `mode`, filling only empty child slots.
    ///
    /// Driven by an explicit stack, so the call depth stays constant however
    /// deep the tree gets. On a budget error the regions created so far stay
    /// attached and the branch remains fully queryable.
    pub(crate) fn subdivide(
        &mut self,
        mode: Subdivision,
        limits: &SubdivisionLimits,
    ) -> Result<SubdivisionReport, GasketError> {
        let mut report = SubdivisionReport::default();
        let levels = match mode {
            Subdivision::Depth(levels) => levels,
            Subdivision::CurvatureCeiling(_) => 0,
        };
        let mut stack = vec![(RegionId::ROOT, levels)];

        while let Some((id, remaining)) = stack.pop() {
            report.visited += 1;
            let region = self.get(id);
            let expand = match mode {
                Subdivision::Depth(_) => remaining > 0,
                Subdivision::CurvatureCeiling(ceiling) => region.circle().curvature() < ceiling,
            };
            if !expand {
                continue;
            }
            let remaining = remaining.saturating_sub(1);
            for slot in 0..3 {
                if let Some(child) = self.get(id).children()[slot] {
                    stack.push((child, remaining));
                    continue;
                }
                match self.spawn(id, slot, limits)? {
                    Some(child) => {
                        report.created += 1;
                        stack.push((child, remaining));
                    }
                    None => report.skipped += 1,
                }
            }
        }
        Ok(report)
    }

    /// Create the child in an empty slot, or leave it empty if the solver fails.
    fn spawn(
        &mut self,
        parent: RegionId,
        slot: usize,
        limits: &SubdivisionLimits,
    ) -> Result<Option<RegionId>, GasketError> {
        let region = self.get(parent);
        if region.depth() >= limits.max_depth {
            return Err(GasketError::ResourceLimitExceeded {
                limit: ResourceLimit::Depth,
                value: limits.max_depth as usize,
            });
        }
        if self.len() >= limits.region_budget() {
            return Err(GasketError::ResourceLimitExceeded {
                limit: ResourceLimit::Regions,
                value: limits.max_regions,
            });
        }
        let depth = region.depth() + 1;
        match region.make_child(slot) {
            Ok(child) => Ok(Some(self.attach(parent, slot, child))),
            Err(err) => {
                tracing::debug!(%err, slot, depth, "leaving degenerate child slot empty");
                Ok(None)
            }
        }
    }
}
