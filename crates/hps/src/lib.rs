//! Hits-per-second estimate for pollen meshes.
//!
//! Pipeline
//! - `mesh`: read vertex records from an OBJ-like file into a 3×V matrix.
//! - `sphere`: lazy (θ, φ) grid of viewing directions.
//! - `basis`: orthonormal basis of the plane orthogonal to each direction.
//! - `aggregate`: project, hull, measure, and sum over all directions.
//!
//! The sum of silhouette areas over the direction grid is the "hits per
//! second" figure: how often randomly oriented air particles strike the shape.

pub mod aggregate;
pub mod basis;
mod cfg;
pub mod error;
pub mod geom2;
pub mod mesh;
pub mod progress;
pub mod sphere;

pub use aggregate::{estimate, run, Estimate, RunCfg};
pub use error::{HpsError, Result};
pub use geom2::Measure;
pub use mesh::{load_obj, parse_obj, Mesh};
pub use progress::{Checkpoint, NoProgress, Progress};
pub use sphere::{SphereGrid, DEFAULT_STRETCH};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::aggregate::{estimate, run, Estimate, RunCfg};
    pub use crate::basis::{plane_basis, PlaneBasis};
    pub use crate::geom2::{convex_hull, hull_measure, polygon_area, polygon_perimeter, Measure};
    pub use crate::mesh::{load_obj, Mesh};
    pub use crate::progress::{Checkpoint, NoProgress, Progress};
    pub use crate::sphere::{sphere_to_cart, SphereGrid};
    pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
}
