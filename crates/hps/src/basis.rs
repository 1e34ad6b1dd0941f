//! Basis builder: orthonormal frame of the plane orthogonal to a direction.
//!
//! Construction
//! - `pre1 = BT1·d`, `pre2 = BT2·d` with the fixed maps below. Both are
//!   orthogonal to `d`, and `pre1 × pre2 = d_z · d`.
//! - Thin QR of `[pre1 | pre2]`; the two columns of `Q` are `(e1, e2)`.
//! - Near the equator (`d_z ≈ 0`) the pair collapses onto one line and `Q`
//!   no longer spans the orthogonal plane. There we switch to a fallback
//!   frame built from the coordinate axis least aligned with `d`.
//!
//! Hull areas are invariant under rotations inside the plane, so both
//! constructions yield the same measure.

use nalgebra::{matrix, Matrix2xX, Matrix3, Matrix3x2, Vector3};

use crate::cfg::{BASIS_EPS, DIR_EPS};
use crate::error::{HpsError, Result};
use crate::mesh::Mesh;

/// `d ↦ (d_z, 0, -d_x)`
#[rustfmt::skip]
pub const BT1: Matrix3<f64> = matrix![
    0.0, 0.0, 1.0;
    0.0, 0.0, 0.0;
    -1.0, 0.0, 0.0
];
/// `d ↦ (0, d_z, -d_y)`
#[rustfmt::skip]
pub const BT2: Matrix3<f64> = matrix![
    0.0, 0.0, 0.0;
    0.0, 0.0, 1.0;
    0.0, -1.0, 0.0
];

/// Orthonormal columns `[e1 | e2]` spanning the plane orthogonal to a direction.
#[derive(Clone, Copy, Debug)]
pub struct PlaneBasis {
    pub e: Matrix3x2<f64>,
    /// Built by the equator fallback rather than the QR path.
    pub fallback: bool,
}

impl PlaneBasis {
    #[inline]
    pub fn e1(&self) -> Vector3<f64> {
        self.e.column(0).into_owned()
    }

    #[inline]
    pub fn e2(&self) -> Vector3<f64> {
        self.e.column(1).into_owned()
    }

    /// `[e1 | e2]ᵀ · M`, one 2D point per mesh vertex.
    #[inline]
    pub fn project(&self, mesh: &Mesh) -> Matrix2xX<f64> {
        self.e.transpose() * mesh.coords()
    }
}

/// Basis for `direction` (any nonzero length).
pub fn plane_basis(direction: Vector3<f64>) -> Result<PlaneBasis> {
    let norm = direction.norm();
    if !norm.is_finite() || norm < DIR_EPS {
        return Err(HpsError::InvalidArgument(format!(
            "direction must be finite and nonzero, got {direction:?}"
        )));
    }
    let d = direction / norm;
    let pre = Matrix3x2::from_columns(&[BT1 * d, BT2 * d]);
    let qr = pre.qr();
    let r = qr.r();
    if (r[(0, 0)] * r[(1, 1)]).abs() < BASIS_EPS {
        return Ok(fallback_basis(d));
    }
    Ok(PlaneBasis {
        e: qr.q(),
        fallback: false,
    })
}

/// Gram–Schmidt on the least aligned axis; `d` must be unit length.
fn fallback_basis(d: Vector3<f64>) -> PlaneBasis {
    let axis = d.iamin();
    let mut a = Vector3::zeros();
    a[axis] = 1.0;
    let e1 = (a - d * d.dot(&a)).normalize();
    let e2 = d.cross(&e1);
    PlaneBasis {
        e: Matrix3x2::from_columns(&[e1, e2]),
        fallback: true,
    }
}
