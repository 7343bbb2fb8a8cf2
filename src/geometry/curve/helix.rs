use std::f64::consts::TAU;

use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{CctParams, CurveDomain, SpaceCurve};

/// The periodic canted-cosine-theta winding.
///
/// `x = R1 cos t`, `y = R2 sin t`, `z = R2 (sin t * tan(alpha) + q t)`
/// with `q = pitch / 2pi`. All derivatives are closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicHelix {
    r1: f64,
    r2: f64,
    q: f64,
    tan_alpha: f64,
    domain: CurveDomain,
}

impl PeriodicHelix {
    /// Builds the periodic formula from coil parameters.
    ///
    /// The domain is `[0, turns * 2pi + pi]`, the same as the blended curve.
    /// No validation happens here; [`BlendedHelixCurve::new`](super::BlendedHelixCurve::new)
    /// checks the parameters.
    #[must_use]
    pub fn new(params: &CctParams) -> Self {
        let mut helix = Self::from_parts(
            params.r1,
            params.r2,
            params.pitch / TAU,
            params.angle_deg.to_radians().tan(),
        );
        helix.domain = CurveDomain::new(0.0, f64::from(params.turns) * TAU + std::f64::consts::PI);
        helix
    }

    /// Builds the formula from its raw constants, over a single turn.
    #[must_use]
    pub fn from_parts(r1: f64, r2: f64, q: f64, tan_alpha: f64) -> Self {
        Self {
            r1,
            r2,
            q,
            tan_alpha,
            domain: CurveDomain::new(0.0, TAU),
        }
    }

    /// First radius (x semi-axis).
    #[must_use]
    pub fn r1(&self) -> f64 {
        self.r1
    }

    /// Second radius (y semi-axis and z scale).
    #[must_use]
    pub fn r2(&self) -> f64 {
        self.r2
    }

    pub(super) fn position(&self, t: f64) -> Point3 {
        let (sin, cos) = t.sin_cos();
        Point3::new(
            self.r1 * cos,
            self.r2 * sin,
            self.r2 * (sin * self.tan_alpha + self.q * t),
        )
    }

    pub(super) fn velocity(&self, t: f64) -> Vector3 {
        let (sin, cos) = t.sin_cos();
        Vector3::new(
            -self.r1 * sin,
            self.r2 * cos,
            self.r2 * (cos * self.tan_alpha + self.q),
        )
    }

    pub(super) fn acceleration(&self, t: f64) -> Vector3 {
        let (sin, cos) = t.sin_cos();
        Vector3::new(
            -self.r1 * cos,
            -self.r2 * sin,
            -self.r2 * sin * self.tan_alpha,
        )
    }

    pub(super) fn jerk(&self, t: f64) -> Vector3 {
        let (sin, cos) = t.sin_cos();
        Vector3::new(
            self.r1 * sin,
            -self.r2 * cos,
            -self.r2 * cos * self.tan_alpha,
        )
    }
}

impl SpaceCurve for PeriodicHelix {
    fn r(&self, t: f64) -> Result<Point3> {
        Ok(self.position(t))
    }

    fn v(&self, t: f64) -> Result<Vector3> {
        Ok(self.velocity(t))
    }

    fn a(&self, t: f64) -> Result<Vector3> {
        Ok(self.acceleration(t))
    }

    fn b(&self, t: f64) -> Result<Vector3> {
        Ok(self.jerk(t))
    }

    fn domain(&self) -> CurveDomain {
        self.domain
    }
}
