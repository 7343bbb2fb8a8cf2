use nalgebra::{SMatrix, SVector};

use crate::error::{NumericalError, Result};

use super::TOLERANCE;

/// Number of coefficients of a degree-7 polynomial.
const N: usize = 8;

/// Value and first three derivatives of a scalar function at one parameter.
pub type Jet = [f64; 4];

/// A degree-7 polynomial expanded about an origin parameter.
///
/// `p(t) = c[0] * s^7 + c[1] * s^6 + ... + c[7]` with `s = t - origin`.
/// Coefficients are stored highest degree first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poly7 {
    origin: f64,
    coeffs: [f64; N],
}

impl Poly7 {
    /// Creates a polynomial from coefficients (highest degree first) about `origin`.
    #[must_use]
    pub fn new(origin: f64, coeffs: [f64; N]) -> Self {
        Self { origin, coeffs }
    }

    /// Fits the polynomial matching value and derivatives 1..3 at two parameters.
    ///
    /// `jet0` holds `[p, p', p'', p''']` at `t0`, `jet1` the same at `t1`.
    /// The expansion origin is `t1`, so the 8x8 system stays well conditioned
    /// even when both parameters are far from zero.
    ///
    /// # Errors
    ///
    /// Returns [`NumericalError::SingularSystem`] if the two parameters
    /// coincide, the system is singular, or the solution is not finite.
    pub fn fit_hermite(t0: f64, jet0: Jet, t1: f64, jet1: Jet) -> Result<Self> {
        if (t1 - t0).abs() < TOLERANCE {
            return Err(NumericalError::SingularSystem(format!(
                "boundary parameters coincide at t = {t0}"
            ))
            .into());
        }

        let origin = t1;
        let mut system = SMatrix::<f64, N, N>::zeros();
        let mut rhs = SVector::<f64, N>::zeros();
        for (block, (t, jet)) in [(t0, jet0), (t1, jet1)].into_iter().enumerate() {
            let s = t - origin;
            for (order, value) in jet.into_iter().enumerate() {
                let row = block * 4 + order;
                for col in 0..N {
                    system[(row, col)] = basis_derivative(N - 1 - col, order, s);
                }
                rhs[row] = value;
            }
        }

        let solution = system.lu().solve(&rhs).ok_or_else(|| {
            NumericalError::SingularSystem("boundary matrix is singular".into())
        })?;
        if solution.iter().any(|c| !c.is_finite()) {
            return Err(NumericalError::SingularSystem(
                "boundary solve produced non-finite coefficients".into(),
            )
            .into());
        }

        let mut coeffs = [0.0; N];
        coeffs.copy_from_slice(solution.as_slice());
        Ok(Self { origin, coeffs })
    }

    /// Returns the expansion origin.
    #[must_use]
    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// Returns the coefficients, highest degree first.
    #[must_use]
    pub fn coeffs(&self) -> &[f64; N] {
        &self.coeffs
    }

    /// Evaluates the polynomial at `t`.
    #[must_use]
    pub fn value(&self, t: f64) -> f64 {
        self.derivative(0, t)
    }

    /// Evaluates the `order`-th derivative at `t` with a Horner scheme.
    #[must_use]
    pub fn derivative(&self, order: usize, t: f64) -> f64 {
        let s = t - self.origin;
        let mut acc = 0.0;
        for (col, c) in self.coeffs.iter().enumerate() {
            let power = N - 1 - col;
            if power < order {
                break;
            }
            acc = acc * s + c * falling_factorial(power, order);
        }
        acc
    }

    /// Returns `[p, p', p'', p''']` at `t`.
    #[must_use]
    pub fn jet(&self, t: f64) -> Jet {
        [
            self.derivative(0, t),
            self.derivative(1, t),
            self.derivative(2, t),
            self.derivative(3, t),
        ]
    }
}

/// `power * (power - 1) * ... * (power - order + 1)`.
#[allow(clippy::cast_precision_loss)]
fn falling_factorial(power: usize, order: usize) -> f64 {
    (0..order).map(|k| (power - k) as f64).product()
}

/// The `order`-th derivative of `s^power` evaluated at `s`.
fn basis_derivative(power: usize, order: usize, s: f64) -> f64 {
    if power < order {
        return 0.0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let exponent = (power - order) as i32;
    falling_factorial(power, order) * s.powi(exponent)
}
