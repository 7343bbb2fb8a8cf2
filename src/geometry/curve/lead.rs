use crate::math::{Point3, Poly7, Vector3};

/// Step of the centered finite differences used for the lead y coordinate.
pub const FD_STEP: f64 = 1e-6;

/// A polynomial lead section joining the periodic winding to a straight feed.
///
/// `x(t)` and `z(t)` are degree-7 polynomials. `y(t)` follows the ellipse
/// `y = R2 sqrt(1 - (x / R1)^2)` of the winding, so its derivatives are
/// taken by centered finite differences of that composition with step
/// [`FD_STEP`]:
///
/// - velocity: `(y(t + h/2) - y(t - h/2)) / h`
/// - acceleration: `(y(t + h) - 2 y(t) + y(t - h)) / h^2`
/// - jerk: `(y(t + 3h/2) - 3 y(t + h/2) + 3 y(t - h/2) - y(t - 3h/2)) / h^3`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadSegment {
    x: Poly7,
    z: Poly7,
    r1: f64,
    r2: f64,
}

impl LeadSegment {
    /// Creates a lead from its x and z polynomials and the ellipse radii.
    #[must_use]
    pub fn new(x: Poly7, z: Poly7, r1: f64, r2: f64) -> Self {
        Self { x, z, r1, r2 }
    }

    /// The x polynomial.
    #[must_use]
    pub fn x_poly(&self) -> &Poly7 {
        &self.x
    }

    /// The z polynomial.
    #[must_use]
    pub fn z_poly(&self) -> &Poly7 {
        &self.z
    }

    /// Position at `t`.
    #[must_use]
    pub fn r(&self, t: f64) -> Point3 {
        Point3::new(self.x.value(t), self.y(t), self.z.value(t))
    }

    /// Velocity at `t`.
    #[must_use]
    pub fn v(&self, t: f64) -> Vector3 {
        let h = FD_STEP;
        let dy = (self.y(t + 0.5 * h) - self.y(t - 0.5 * h)) / h;
        Vector3::new(self.x.derivative(1, t), dy, self.z.derivative(1, t))
    }

    /// Acceleration at `t`.
    #[must_use]
    pub fn a(&self, t: f64) -> Vector3 {
        let h = FD_STEP;
        let ddy = (self.y(t + h) - 2.0 * self.y(t) + self.y(t - h)) / (h * h);
        Vector3::new(self.x.derivative(2, t), ddy, self.z.derivative(2, t))
    }

    /// Jerk at `t`.
    #[must_use]
    pub fn b(&self, t: f64) -> Vector3 {
        let h = FD_STEP;
        let dddy = (self.y(t + 1.5 * h) - 3.0 * self.y(t + 0.5 * h) + 3.0 * self.y(t - 0.5 * h)
            - self.y(t - 1.5 * h))
            / (h * h * h);
        Vector3::new(self.x.derivative(3, t), dddy, self.z.derivative(3, t))
    }

    /// The y coordinate recovered from the ellipse.
    ///
    /// Rounding can push `|x|` marginally past `R1` next to the splice
    /// point; the radicand is clamped at zero there.
    fn y(&self, t: f64) -> f64 {
        let f = self.x.value(t) / self.r1;
        self.r2 * (1.0 - f * f).max(0.0).sqrt()
    }
}
