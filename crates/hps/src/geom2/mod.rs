//! Planar convex hulls of projected meshes.
//!
//! Purpose
//! - Hull the 2D image of a mesh under one projection and measure it
//!   (area via the shoelace formula, or perimeter).
//! - Degenerate inputs (fewer than three distinct points, all collinear) are
//!   reported as `DegenerateGeometry` by `convex_hull`; `hull_measure` maps
//!   them to a zero contribution so a dense direction grid always sums.
//!
//! Numerics
//! - Exact orientation test (`cross <= 0` pops), points merged below a fixed
//!   distance. Inputs are assumed to be of roughly unit scale.

mod hull;

pub use hull::{convex_hull, hull_measure, polygon_area, polygon_perimeter, Measure};
