mod arc_length;
mod blended_helix;
mod frenet;
mod helix;
mod lead;

pub use arc_length::LENGTH_TOLERANCE;
pub(crate) use arc_length::uniform_grid;
pub use blended_helix::{BlendedHelixCurve, CctParams};
pub use helix::PeriodicHelix;
pub use lead::{LeadSegment, FD_STEP};

use crate::error::Result;
use crate::math::{Matrix3, Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }
}

/// A parametric space curve with derivatives up to third order.
///
/// Implementors supply position, velocity, acceleration and jerk; arc
/// length, equal-length reparametrization, Frenet frames and
/// curvature/torsion are derived from those.
pub trait SpaceCurve {
    /// Position at `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn r(&self, t: f64) -> Result<Point3>;

    /// First derivative (velocity) at `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn v(&self, t: f64) -> Result<Vector3>;

    /// Second derivative (acceleration) at `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn a(&self, t: f64) -> Result<Vector3>;

    /// Third derivative (jerk) at `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn b(&self, t: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Arc length between `ta` and `tb` (7-point Gauss–Legendre on `|v|`).
    ///
    /// # Errors
    ///
    /// Propagates velocity evaluation errors.
    fn segment_length(&self, ta: f64, tb: f64) -> Result<f64> {
        arc_length::segment_length(self, ta, tb)
    }

    /// Returns `n` increasing parameters starting at `ta` that split the
    /// curve into `n - 1` pieces of equal arc length.
    ///
    /// The target piece length is the quadrature length of `[ta, tb]` on the
    /// uniform `n`-point grid divided by `n - 1`, and every end point,
    /// the last included, is solved for. The last value therefore only
    /// approximates `tb`, closer the finer the grid.
    ///
    /// # Errors
    ///
    /// Returns an error for `n < 2`, `ta >= tb`, a zero-length range, or
    /// when a root cannot be bracketed or refined.
    fn make_equidistant(&self, ta: f64, tb: f64, n: usize) -> Result<Vec<f64>> {
        arc_length::make_equidistant(self, ta, tb, n)
    }

    /// Frenet frame at `t` as a matrix with columns (normal, binormal, tangent).
    ///
    /// # Errors
    ///
    /// Returns an error where the velocity or the curvature vanishes.
    fn transform(&self, t: f64) -> Result<Matrix3> {
        frenet::transform(self, t)
    }

    /// Curvature and torsion at `t`.
    ///
    /// # Errors
    ///
    /// Returns an error where the velocity vanishes.
    fn kappa_tau(&self, t: f64) -> Result<(f64, f64)> {
        frenet::kappa_tau(self, t)
    }
}
