use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, OperationError, Result};
use crate::math::{Point3, Poly7, Vector3, TOLERANCE};

use super::{CurveDomain, LeadSegment, PeriodicHelix, SpaceCurve};

/// Parameters of a canted-cosine-theta winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CctParams {
    /// First radius (x semi-axis).
    pub r1: f64,
    /// Second radius (y semi-axis, also scales z).
    pub r2: f64,
    /// Axial advance per turn.
    pub pitch: f64,
    /// Tilt angle in degrees.
    pub angle_deg: f64,
    /// Number of full turns of the periodic section.
    pub turns: u32,
}

impl Default for CctParams {
    fn default() -> Self {
        Self {
            r1: 60.0,
            r2: 60.0,
            pitch: 0.25,
            angle_deg: 68.0,
            turns: 4,
        }
    }
}

impl CctParams {
    fn validate(&self) -> Result<()> {
        if !(self.r1.is_finite() && self.r2.is_finite()) {
            return Err(OperationError::InvalidInput("radii must be finite".into()).into());
        }
        if self.r1 < TOLERANCE {
            return Err(GeometryError::Degenerate("R1 must be positive".into()).into());
        }
        if self.r2 < TOLERANCE {
            return Err(GeometryError::Degenerate("R2 must be positive".into()).into());
        }
        if !self.pitch.is_finite() {
            return Err(OperationError::InvalidInput("pitch must be finite".into()).into());
        }
        if self.angle_deg.is_nan() || self.angle_deg.abs() >= 90.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "angle_deg",
                value: self.angle_deg,
                min: -90.0,
                max: 90.0,
            }
            .into());
        }
        if self.turns == 0 {
            return Err(OperationError::InvalidInput("at least one turn is required".into()).into());
        }
        Ok(())
    }
}

/// Lead evaluation state of a [`BlendedHelixCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
enum Leads {
    /// The periodic formula is used on the whole domain.
    Pending,
    /// Polynomial leads replace the formula outside `[t_a, t_b]`.
    Fitted {
        lead_in: LeadSegment,
        lead_out: LeadSegment,
    },
}

/// The section responsible for a parameter value.
enum Branch<'a> {
    Interior,
    Lead(&'a LeadSegment),
}

/// A CCT winding with straight entry and exit leads.
///
/// The periodic winding runs on `[t_a, t_b] = [pi, t_max - pi]`. On either
/// side a degree-7 polynomial lead matches the winding's position and first
/// three derivatives at the splice point and a straight feed (half the
/// winding speed, zero curvature) at the domain end.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendedHelixCurve {
    helix: PeriodicHelix,
    domain: CurveDomain,
    t_a: f64,
    t_b: f64,
    leads: Leads,
}

impl BlendedHelixCurve {
    /// Creates the curve and fits both leads.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive radii (`R1 = 0` would divide by
    /// zero in the ellipse constraint), a tilt of 90 degrees or more, zero
    /// turns, or an ill-conditioned lead boundary system.
    pub fn new(params: CctParams) -> Result<Self> {
        let mut curve = Self::unfitted(params)?;
        let lead_in = curve.fit_lead_in()?;
        let lead_out = curve.fit_lead_out()?;
        curve.leads = Leads::Fitted { lead_in, lead_out };
        tracing::debug!(
            t_max = curve.domain.t_max,
            t_a = curve.t_a,
            t_b = curve.t_b,
            "blended helix initialized"
        );
        Ok(curve)
    }

    /// Creates the curve without leads: every evaluation uses the periodic formula.
    fn unfitted(params: CctParams) -> Result<Self> {
        params.validate()?;
        let helix = PeriodicHelix::new(&params);
        let domain = helix.domain();
        Ok(Self {
            helix,
            domain,
            t_a: domain.t_min + PI,
            t_b: domain.t_max - PI,
            leads: Leads::Pending,
        })
    }

    /// Returns the splice points `(t_a, t_b)`.
    #[must_use]
    pub fn splice_points(&self) -> (f64, f64) {
        (self.t_a, self.t_b)
    }

    /// Returns the periodic winding used on `[t_a, t_b]`.
    #[must_use]
    pub fn helix(&self) -> &PeriodicHelix {
        &self.helix
    }

    /// Returns the entry and exit leads, if fitted.
    #[must_use]
    pub fn leads(&self) -> Option<(&LeadSegment, &LeadSegment)> {
        match &self.leads {
            Leads::Pending => None,
            Leads::Fitted { lead_in, lead_out } => Some((lead_in, lead_out)),
        }
    }

    fn branch(&self, t: f64) -> Branch<'_> {
        match &self.leads {
            Leads::Pending => Branch::Interior,
            Leads::Fitted { lead_in, .. } if t < self.t_a => Branch::Lead(lead_in),
            Leads::Fitted { lead_out, .. } if t > self.t_b => Branch::Lead(lead_out),
            Leads::Fitted { .. } => Branch::Interior,
        }
    }

    /// Entry lead: starts at `(0, R2, 0)` moving with half the winding's
    /// initial velocity.
    fn fit_lead_in(&self) -> Result<LeadSegment> {
        let t0 = self.domain.t_min;
        let start = Point3::new(0.0, self.helix.r2(), 0.0);
        let feed = self.v(t0)? * 0.5;
        self.fit_lead(t0, start, feed, self.t_a)
    }

    /// Exit lead: ends at the winding's height a quarter turn before `t_max`
    /// plus the rise of its first quarter turn, moving with half the
    /// winding's reversed final velocity.
    fn fit_lead_out(&self) -> Result<LeadSegment> {
        let t_min = self.domain.t_min;
        let t_max = self.domain.t_max;
        let dz = self.r(t_min + FRAC_PI_2)?.z - self.r(t_min)?.z;
        let end = Point3::new(0.0, self.helix.r2(), self.r(t_max - FRAC_PI_2)?.z + dz);
        let feed = self.v(t_max)? * -0.5;
        self.fit_lead(t_max, end, feed, self.t_b)
    }

    fn fit_lead(
        &self,
        t_end: f64,
        end: Point3,
        feed: Vector3,
        t_splice: f64,
    ) -> Result<LeadSegment> {
        let r = self.r(t_splice)?;
        let v = self.v(t_splice)?;
        let a = self.a(t_splice)?;
        let b = self.b(t_splice)?;

        let x = Poly7::fit_hermite(
            t_end,
            [end.x, feed.x, 0.0, 0.0],
            t_splice,
            [r.x, v.x, a.x, b.x],
        )?;
        let z = Poly7::fit_hermite(
            t_end,
            [end.z, feed.z, 0.0, 0.0],
            t_splice,
            [r.z, v.z, a.z, b.z],
        )?;
        Ok(LeadSegment::new(x, z, self.helix.r1(), self.helix.r2()))
    }
}

impl SpaceCurve for BlendedHelixCurve {
    fn r(&self, t: f64) -> Result<Point3> {
        Ok(match self.branch(t) {
            Branch::Interior => self.helix.position(t),
            Branch::Lead(lead) => lead.r(t),
        })
    }

    fn v(&self, t: f64) -> Result<Vector3> {
        Ok(match self.branch(t) {
            Branch::Interior => self.helix.velocity(t),
            Branch::Lead(lead) => lead.v(t),
        })
    }

    fn a(&self, t: f64) -> Result<Vector3> {
        Ok(match self.branch(t) {
            Branch::Interior => self.helix.acceleration(t),
            Branch::Lead(lead) => lead.a(t),
        })
    }

    fn b(&self, t: f64) -> Result<Vector3> {
        Ok(match self.branch(t) {
            Branch::Interior => self.helix.jerk(t),
            Branch::Lead(lead) => lead.b(t),
        })
    }

    fn domain(&self) -> CurveDomain {
        self.domain
    }
}
