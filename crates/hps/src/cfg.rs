//! Tolerance defaults (internal).
//!
//! Policy
//! - Fixed constants; the estimator has no tolerance knobs on its public
//!   surface. Values assume coordinates of roughly unit scale.

/// Minimum `|R₀₀·R₁₁|` of the QR factor before a basis counts as collapsed.
///
/// For a unit direction `d`, `|pre1 × pre2| = |d_z|`, so this is a bound on
/// the distance from the equator.
pub(crate) const BASIS_EPS: f64 = 1e-8;
/// Projected points closer than this are merged before hulling.
pub(crate) const DEDUP_EPS: f64 = 1e-12;
/// Smallest direction norm accepted by the basis builder.
pub(crate) const DIR_EPS: f64 = 1e-12;
