// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for gasket construction and subdivision.

use core::fmt;

/// Which configured budget a subdivision ran into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceLimit {
    /// A region would be created deeper than [`SubdivisionLimits::max_depth`](crate::SubdivisionLimits::max_depth).
    Depth,
    /// A branch would hold more than [`SubdivisionLimits::max_regions`](crate::SubdivisionLimits::max_regions) regions.
    Regions,
}

/// Errors produced while building or growing a [`Gasket`](crate::Gasket).
///
/// Queries never fail; only construction and subdivision return these.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GasketError {
    /// A supplied or derived curvature is zero, non-finite, or has the wrong
    /// sign for its role (the boundary must be negative).
    InvalidCurvature {
        /// The rejected curvature.
        curvature: f64,
    },
    /// The three generating circles are not mutually tangent: either the
    /// Descartes radicand is negative or no candidate center is tangent to
    /// all three generators.
    DegenerateConfiguration {
        /// The offending value: the radicand, or the best tangency residual.
        value: f64,
    },
    /// Subdivision hit a configured budget and stopped.
    ResourceLimitExceeded {
        /// The budget that was hit.
        limit: ResourceLimit,
        /// The configured value of that budget.
        value: usize,
    },
}

impl fmt::Display for GasketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCurvature { curvature } => {
                write!(f, "invalid curvature {curvature}")
            }
            Self::DegenerateConfiguration { value } => {
                write!(
                    f,
                    "circles are not mutually tangent (offending value {value})"
                )
            }
            Self::ResourceLimitExceeded { limit, value } => match limit {
                ResourceLimit::Depth => {
                    write!(f, "subdivision exceeded the maximum depth of {value}")
                }
                ResourceLimit::Regions => {
                    write!(f, "subdivision exceeded the budget of {value} regions")
                }
            },
        }
    }
}

impl core::error::Error for GasketError {}
