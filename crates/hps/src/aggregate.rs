//! Projection-hull aggregator: the hits-per-second estimate.
//!
//! For every grid direction: build the plane basis, project all mesh vertices,
//! hull the 2D image, measure it, and add it to a running total. Directions,
//! bases, and projections are produced lazily, so only one projection is alive
//! at a time. Summation order is the grid order, which makes the total
//! bit-reproducible.
//!
//! Cost: O(N² · V log V), dominated by the hull calls.

use std::path::Path;

use nalgebra::{Matrix2xX, Vector3};

use crate::basis::{plane_basis, PlaneBasis};
use crate::error::Result;
use crate::geom2::{hull_measure, Measure};
use crate::mesh::{load_obj, Mesh};
use crate::progress::{Checkpoint, Progress};
use crate::sphere::{SphereGrid, DEFAULT_STRETCH};

/// Angle samples per axis when the caller does not choose.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Run configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunCfg {
    /// Samples per angle; the grid has `samples²` directions.
    pub samples: usize,
    pub stretch: f64,
    pub measure: Measure,
}

impl Default for RunCfg {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            stretch: DEFAULT_STRETCH,
            measure: Measure::Area,
        }
    }
}

/// Result of one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    /// Sum of hull measures: the hits-per-second figure.
    pub total: f64,
    pub directions: usize,
    /// Directions whose basis came from the equator fallback.
    pub fallback_bases: usize,
    /// Projections with fewer than three non-collinear points (counted as 0).
    pub degenerate_projections: usize,
}

impl Estimate {
    /// Average measure per direction.
    pub fn mean(&self) -> f64 {
        if self.directions == 0 {
            0.0
        } else {
            self.total / self.directions as f64
        }
    }
}

/// Lazy `(basis, projection)` pairs, one per grid direction.
pub fn projections<'a>(
    mesh: &'a Mesh,
    grid: &SphereGrid,
) -> impl ExactSizeIterator<Item = Result<(PlaneBasis, Matrix2xX<f64>)>> + 'a {
    grid.directions().map(move |d| -> Result<(PlaneBasis, Matrix2xX<f64>)> {
        let basis = plane_basis(d)?;
        let proj = basis.project(mesh);
        Ok((basis, proj))
    })
}

/// Hull measure of the mesh seen along a single direction.
pub fn measure_along(mesh: &Mesh, direction: Vector3<f64>, measure: Measure) -> Result<f64> {
    let basis = plane_basis(direction)?;
    Ok(hull_measure(&basis.project(mesh), measure).0)
}

/// Sum the hull measure over every direction of `grid`.
pub fn estimate<P: Progress + ?Sized>(
    mesh: &Mesh,
    grid: &SphereGrid,
    measure: Measure,
    progress: &mut P,
) -> Result<Estimate> {
    progress.checkpoint(Checkpoint::DirectionsGenerated { count: grid.len() });
    let mut est = Estimate {
        total: 0.0,
        directions: 0,
        fallback_bases: 0,
        degenerate_projections: 0,
    };
    for item in projections(mesh, grid) {
        let (basis, proj) = item?;
        let (value, degenerate) = hull_measure(&proj, measure);
        est.total += value;
        est.directions += 1;
        est.fallback_bases += usize::from(basis.fallback);
        est.degenerate_projections += usize::from(degenerate);
    }
    // Bases are built inside the loop; report them as one summary.
    progress.checkpoint(Checkpoint::BasesBuilt {
        count: est.directions,
        fallbacks: est.fallback_bases,
    });
    progress.checkpoint(Checkpoint::AggregationComplete { total: est.total });
    Ok(est)
}

/// Load the mesh at `path` and run the estimate with `cfg`.
pub fn run<P: Progress + ?Sized>(
    path: impl AsRef<Path>,
    cfg: &RunCfg,
    progress: &mut P,
) -> Result<Estimate> {
    let grid = SphereGrid::new(cfg.samples, cfg.stretch)?;
    let mesh = load_obj(path)?;
    progress.checkpoint(Checkpoint::MeshLoaded {
        vertices: mesh.vertex_count(),
    });
    estimate(&mesh, &grid, cfg.measure, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HpsError;
    use crate::progress::NoProgress;
    use crate::sphere::sphere_to_cart;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use tempfile::tempdir;

    fn unit_cube() -> Mesh {
        let mut v = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    v.push(Vector3::new(x, y, z));
                }
            }
        }
        Mesh::from_vertices(&v)
    }

    /// Regular tetrahedron with edge 2√2.
    fn tetrahedron() -> Mesh {
        Mesh::from_vertices(&[
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0, -1.0, -1.0),
            Vector3::new(-1.0, 1.0, -1.0),
            Vector3::new(-1.0, -1.0, 1.0),
        ])
    }

    fn triangle() -> Mesh {
        Mesh::from_vertices(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ])
    }

    fn grid(n: usize) -> SphereGrid {
        SphereGrid::new(n, DEFAULT_STRETCH).unwrap()
    }

    fn rel_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1e-12)
    }

    #[test]
    fn tetrahedron_spot_checks() {
        let tet = tetrahedron();
        let edge_on = measure_along(&tet, Vector3::z(), Measure::Area).unwrap();
        assert!((edge_on - 4.0).abs() < 1e-12);
        let face_on = measure_along(&tet, Vector3::new(1.0, 1.0, 1.0), Measure::Area).unwrap();
        assert!((face_on - 2.0 * 3f64.sqrt()).abs() < 1e-12);
        let x_axis = measure_along(&tet, Vector3::x(), Measure::Area).unwrap();
        assert!((x_axis - 4.0).abs() < 1e-12);
    }

    #[test]
    fn tetrahedron_area_matches_closed_form() {
        // Projected area of this tetrahedron is Σ|vᵢ·u| for unit u.
        let tet = tetrahedron();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let d = sphere_to_cart(
                rng.gen_range(0.0..std::f64::consts::PI),
                rng.gen_range(0.0..std::f64::consts::TAU),
                1.0,
            );
            let expected: f64 = tet.vertices().map(|v| v.dot(&d).abs()).sum();
            let got = measure_along(&tet, d, Measure::Area).unwrap();
            assert!((got - expected).abs() < 1e-9, "d = {d:?}");
        }
    }

    #[test]
    fn tetrahedron_areas_stay_within_extremes() {
        let tet = tetrahedron();
        let lo = 2.0 * 3f64.sqrt();
        for item in projections(&tet, &grid(13)) {
            let (_, proj) = item.unwrap();
            let (area, degenerate) = hull_measure(&proj, Measure::Area);
            assert!(!degenerate);
            assert!(area >= lo - 1e-9 && area <= 4.0 + 1e-9, "area = {area}");
        }
    }

    #[test]
    fn single_sample_is_one_direction() {
        let tet = tetrahedron();
        let est = estimate(&tet, &grid(1), Measure::Area, &mut NoProgress).unwrap();
        assert_eq!(est.directions, 1);
        let one = measure_along(&tet, Vector3::z(), Measure::Area).unwrap();
        assert_eq!(est.total, one);

        let cube = estimate(&unit_cube(), &grid(1), Measure::Perimeter, &mut NoProgress).unwrap();
        assert!((cube.total - 4.0).abs() < 1e-12);
    }

    #[test]
    fn axis_grid_on_cube_uses_fallback_on_equator() {
        // N = 5 hits θ ∈ {0, π/2, π, 3π/2, 2π}: every direction is an axis.
        let est = estimate(&unit_cube(), &grid(5), Measure::Area, &mut NoProgress).unwrap();
        assert_eq!(est.directions, 25);
        assert_eq!(est.fallback_bases, 10);
        assert_eq!(est.degenerate_projections, 0);
        assert!((est.total - 25.0).abs() < 1e-9);
    }

    #[test]
    fn cube_mean_converges_with_refinement() {
        let cube = unit_cube();
        let means: Vec<f64> = [8usize, 16, 32, 64]
            .iter()
            .map(|&k| {
                estimate(&cube, &grid(k), Measure::Area, &mut NoProgress)
                    .unwrap()
                    .mean()
            })
            .collect();
        let diffs: Vec<f64> = means
            .windows(2)
            .map(|w| ((w[1] - w[0]) / w[0]).abs())
            .collect();
        assert!(diffs[1] < diffs[0], "{diffs:?}");
        assert!(diffs[2] < diffs[1], "{diffs:?}");
        // Every cube silhouette lies between a face (1) and the hexagon (√3).
        for m in means {
            assert!((1.0..=3f64.sqrt()).contains(&m));
        }
    }

    #[test]
    fn triangle_matches_projected_footprint() {
        let tri = triangle();
        let g = grid(17);
        let mut expected_total = 0.0;
        for d in g.directions() {
            let u = d.normalize();
            let expected = 0.5 * u.z.abs();
            expected_total += expected;
            let got = measure_along(&tri, d, Measure::Area).unwrap();
            assert!((got - expected).abs() < 1e-9, "d = {u:?}");
        }
        let est = estimate(&tri, &g, Measure::Area, &mut NoProgress).unwrap();
        assert!(rel_close(est.total, expected_total));
        // Along z the footprint is the triangle itself.
        let top = measure_along(&tri, Vector3::z(), Measure::Area).unwrap();
        assert!((top - 0.5).abs() < 1e-12);
    }

    #[test]
    fn flat_and_tiny_meshes_contribute_zero() {
        let empty = Mesh::from_vertices(&[]);
        let est = estimate(&empty, &grid(4), Measure::Area, &mut NoProgress).unwrap();
        assert_eq!(est.total, 0.0);
        assert_eq!(est.degenerate_projections, 16);

        let pair = Mesh::from_vertices(&[Vector3::zeros(), Vector3::x()]);
        let est = estimate(&pair, &grid(3), Measure::Area, &mut NoProgress).unwrap();
        assert_eq!(est.total, 0.0);
        assert_eq!(est.mean(), 0.0);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let mut rng = StdRng::seed_from_u64(99);
        let verts: Vec<_> = (0..40)
            .map(|_| {
                Vector3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                )
            })
            .collect();
        let mesh = Mesh::from_vertices(&verts);
        let a = estimate(&mesh, &grid(12), Measure::Area, &mut NoProgress).unwrap();
        let b = estimate(&mesh, &grid(12), Measure::Area, &mut NoProgress).unwrap();
        assert_eq!(a.total.to_bits(), b.total.to_bits());
    }

    #[test]
    fn checkpoints_arrive_in_pipeline_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tet.obj");
        let mut buf = Vec::new();
        tetrahedron().write_obj(&mut buf).unwrap();
        std::fs::write(&path, buf).unwrap();

        let mut seen = Vec::new();
        let cfg = RunCfg {
            samples: 3,
            ..RunCfg::default()
        };
        let est = run(&path, &cfg, &mut |c: Checkpoint| seen.push(c)).unwrap();
        assert_eq!(
            seen,
            vec![
                Checkpoint::MeshLoaded { vertices: 4 },
                Checkpoint::DirectionsGenerated { count: 9 },
                Checkpoint::BasesBuilt {
                    count: 9,
                    fallbacks: est.fallback_bases
                },
                Checkpoint::AggregationComplete { total: est.total },
            ]
        );
    }

    #[test]
    fn non_finite_vertices_are_ignored_by_the_hull() {
        let mut verts: Vec<_> = tetrahedron().vertices().collect();
        let clean = estimate(&tetrahedron(), &grid(8), Measure::Area, &mut NoProgress).unwrap();
        verts.push(Vector3::new(f64::NAN, 0.0, 0.0));
        verts.push(Vector3::new(0.0, f64::INFINITY, 0.0));
        let mesh = Mesh::from_vertices(&verts);
        let est = estimate(&mesh, &grid(8), Measure::Area, &mut NoProgress).unwrap();
        assert!(est.total.is_finite());
        assert!((est.total - clean.total).abs() <= 1e-9 * clean.total);
    }

    #[test]
    fn run_surfaces_loader_errors_without_result() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.obj");
        std::fs::write(&bad, "v 0 0 0\nv 1 1\n").unwrap();
        let mut calls = 0usize;
        let err = run(&bad, &RunCfg::default(), &mut |_: Checkpoint| calls += 1).unwrap_err();
        assert!(matches!(err, HpsError::Parse { line: 2, .. }));
        assert_eq!(calls, 0);

        let missing = dir.path().join("missing.obj");
        assert!(matches!(
            run(&missing, &RunCfg::default(), &mut NoProgress),
            Err(HpsError::NotFound { .. })
        ));
    }

    #[test]
    fn zero_samples_rejected() {
        let cfg = RunCfg {
            samples: 0,
            ..RunCfg::default()
        };
        assert!(matches!(
            run("does-not-matter.obj", &cfg, &mut NoProgress),
            Err(HpsError::InvalidArgument(_))
        ));
    }
}
