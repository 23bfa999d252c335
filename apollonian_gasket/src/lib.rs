// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Apollonian Gasket: a Kurbo-native Apollonian circle packing with point queries.
//!
//! An Apollonian gasket is the infinite packing of mutually tangent circles
//! obtained by repeatedly inscribing a circle in every curvilinear triangle
//! left between three tangent circles. Each new circle comes from the
//! Descartes Circle Theorem.
//!
//! This crate builds a finite prefix of that packing as a tree and answers,
//! for any point, which circle (if any) contains it and how deep inside it
//! lies. That is exactly what is needed to shade a raster image of the
//! packing one sample at a time.
//!
//! ## Structure
//!
//! - [`Circle`]: immutable signed-curvature circle with [`Circle::penetration`],
//!   [`Circle::contains`], and [`Circle::shade`].
//! - [`tangent_circle`], [`fourth_curvature`], [`fourth_center`]: the Descartes
//!   solver, with [`Root`] selecting which of the two solutions is produced.
//! - [`Region`]: a node of the subdivision tree, either
//!   [`RegionKind::Peripheral`] (touching the outer boundary) or
//!   [`RegionKind::Interior`].
//! - [`Gasket`]: the root. It owns five base circles (three seeds and the two
//!   Descartes solutions between them) and six top-level regions, each the
//!   root of an independent branch.
//!
//! Key operations:
//! - [`Gasket::new`] / [`Gasket::with_limits`] from a [`SeedSpec`].
//! - [`Gasket::subdivide`] with a [`Subdivision`] rule (a generation count or
//!   a curvature ceiling), bounded by [`SubdivisionLimits`].
//! - [`Gasket::shade`] and [`Gasket::locate`] per sample.
//! - [`Gasket::enumerate_circles`] for export.
//!
//! ## Minimal example
//!
//! ```rust
//! use apollonian_gasket::{BACKGROUND, Gasket, SeedSpec, Subdivision};
//! use kurbo::Point;
//!
//! let mut gasket = Gasket::new(SeedSpec::default())?;
//! gasket.subdivide(Subdivision::Depth(3))?;
//!
//! // Center of the upper circle between the two seeds.
//! assert_eq!(gasket.shade(Point::new(0.0, 2.0 / 3.0)), 255);
//! // Far outside the unit boundary.
//! assert_eq!(gasket.shade(Point::new(100.0, 100.0)), BACKGROUND);
//! assert!(gasket.locate(Point::new(0.0, 2.0 / 3.0)) < 0.0);
//! # Ok::<(), apollonian_gasket::GasketError>(())
//! ```
//!
//! ## Growth and concurrency
//!
//! Subdivision is idempotent and monotone: it only fills empty child slots,
//! so growing with a larger budget adds circles without moving existing ones.
//! It runs on an explicit work stack rather than the call stack, and budgets
//! in [`SubdivisionLimits`] turn runaway growth into
//! [`GasketError::ResourceLimitExceeded`].
//!
//! Branches are independent arenas. With the `rayon` feature,
//! `Gasket::par_subdivide` grows them in parallel. Once grown, a [`Gasket`]
//! is read-only: queries take `&self` and can be issued from any number of
//! threads.
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: float math through `libm` for `no_std` targets.
//! - `rayon`: parallel subdivision.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod circle;
pub mod classify;
mod descartes;
mod error;
mod gasket;
mod region;
mod subdivide;

pub use circle::{BACKGROUND, Circle};
pub use descartes::{Root, TANGENCY_TOLERANCE, fourth_center, fourth_curvature, tangent_circle};
pub use error::{GasketError, ResourceLimit};
pub use gasket::{BaseCircle, Gasket, OUTSIDE, SeedSpec, TopLevel};
pub use region::{Region, RegionId, RegionKind};
pub use subdivide::{Subdivision, SubdivisionLimits, SubdivisionReport};
