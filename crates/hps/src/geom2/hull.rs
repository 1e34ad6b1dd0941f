use nalgebra::{Matrix2xX, Vector2};

use crate::cfg::DEDUP_EPS;
use crate::error::{HpsError, Result};

/// Which hull quantity a projection contributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Measure {
    /// Enclosed area (silhouette size).
    #[default]
    Area,
    /// Boundary length of the hull polygon.
    Perimeter,
}

/// Andrew’s monotone chain convex hull (returns hull in CCW order, deduped).
///
/// Collinear boundary points are dropped, as are points with a non-finite
/// coordinate. Errors with `DegenerateGeometry` when fewer than three hull
/// vertices remain.
///
/// Complexity: O(N log N) for sort + linear passes.
pub fn convex_hull(points: &[Vector2<f64>]) -> Result<Vec<Vector2<f64>>> {
    let mut pts: Vec<_> = points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .copied()
        .collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < DEDUP_EPS);
    if pts.len() < 3 {
        return Err(HpsError::DegenerateGeometry {
            distinct: pts.len(),
        });
    }
    let mut hull = half_chain(pts.iter());
    hull.extend(half_chain(pts.iter().rev()));
    if hull.len() < 3 {
        return Err(HpsError::DegenerateGeometry {
            distinct: hull.len(),
        });
    }
    Ok(hull)
}

/// One monotone half of the hull, without its closing endpoint.
fn half_chain<'a>(sorted: impl Iterator<Item = &'a Vector2<f64>>) -> Vec<Vector2<f64>> {
    let mut chain: Vec<Vector2<f64>> = Vec::new();
    for &p in sorted {
        while let [.., a, b] = chain[..] {
            if cross(a, b, p) > 0.0 {
                break;
            }
            chain.pop();
        }
        chain.push(p);
    }
    chain.pop();
    chain
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Shoelace area of a simple polygon (absolute value, any orientation).
pub fn polygon_area(poly: &[Vector2<f64>]) -> f64 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|k| {
            let p = poly[k];
            let q = poly[(k + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    0.5 * twice.abs()
}

/// Sum of edge lengths of the closed polygon.
pub fn polygon_perimeter(poly: &[Vector2<f64>]) -> f64 {
    let n = poly.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|k| (poly[(k + 1) % n] - poly[k]).norm()).sum()
}

/// Hull measure of a 2×V projection; degenerate hulls measure 0.
///
/// Returns the value and whether the hull was degenerate.
pub fn hull_measure(points: &Matrix2xX<f64>, measure: Measure) -> (f64, bool) {
    let pts: Vec<Vector2<f64>> = points.column_iter().map(|c| c.into_owned()).collect();
    match convex_hull(&pts) {
        Ok(hull) => {
            let value = match measure {
                Measure::Area => polygon_area(&hull),
                Measure::Perimeter => polygon_perimeter(&hull),
            };
            (value, false)
        }
        Err(_) => (0.0, true),
    }
}
