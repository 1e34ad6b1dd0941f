//! Direction sampler: a dense (θ, φ) grid mapped onto a sphere.
//!
//! Model
//! - `N` samples of θ and `N` samples of φ, each `linspace(0, 2π, N)` with
//!   both endpoints included; every pair is one direction, `N²` in total.
//! - θ runs over the full circle, so the grid covers the sphere twice and
//!   repeats the endpoints. This weighting is part of the estimate.
//! - Directions are produced lazily in a fixed order (θ outer, φ inner).

use std::f64::consts::TAU;

use nalgebra::Vector3;

use crate::error::{HpsError, Result};

/// Radius applied to every direction. Only the direction is used downstream.
pub const DEFAULT_STRETCH: f64 = 10.0;

/// Spherical to Cartesian: polar angle `theta`, azimuth `phi`.
#[inline]
pub fn sphere_to_cart(theta: f64, phi: f64, stretch: f64) -> Vector3<f64> {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    stretch * Vector3::new(st * cp, st * sp, ct)
}

/// `k`-th of `n` evenly spaced samples on `[0, 2π]`; `n == 1` gives `0`.
#[inline]
fn angle_sample(k: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        TAU * (k as f64) / ((n - 1) as f64)
    }
}

/// Sampling grid with `n × n` angle pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereGrid {
    n: usize,
    len: usize,
    stretch: f64,
}

impl SphereGrid {
    pub fn new(n: usize, stretch: f64) -> Result<Self> {
        if n == 0 {
            return Err(HpsError::InvalidArgument(
                "sample count must be at least 1".into(),
            ));
        }
        if !(stretch.is_finite() && stretch > 0.0) {
            return Err(HpsError::InvalidArgument(format!(
                "stretch must be finite and positive, got {stretch}"
            )));
        }
        let len = n.checked_mul(n).ok_or_else(|| {
            HpsError::InvalidArgument(format!("{n} samples give more than usize::MAX directions"))
        })?;
        Ok(Self { n, len, stretch })
    }

    #[inline]
    pub fn samples(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn stretch(&self) -> f64 {
        self.stretch
    }

    /// Number of directions, `n²`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: `new` rejects `n == 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Angles `[0, 2π]` used on both axes.
    pub fn angles(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.n).map(move |k| angle_sample(k, self.n))
    }

    /// Fresh single-pass sequence of directions.
    pub fn directions(&self) -> Directions {
        Directions {
            grid: *self,
            next: 0,
        }
    }
}

/// Lazy direction sequence. Regenerate from the grid to restart.
#[derive(Clone, Debug)]
pub struct Directions {
    grid: SphereGrid,
    next: usize,
}

impl Iterator for Directions {
    type Item = Vector3<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.grid.n;
        if self.next >= self.grid.len {
            return None;
        }
        let (i, j) = (self.next / n, self.next % n);
        self.next += 1;
        Some(sphere_to_cart(
            angle_sample(i, n),
            angle_sample(j, n),
            self.grid.stretch,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.grid.len - self.next;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for Directions {}
