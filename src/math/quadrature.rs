use crate::error::Result;

/// Abscissae of the 7-point Gauss–Legendre rule on `[-1, 1]`.
pub const GAUSS_LEGENDRE_7_NODES: [f64; 7] = [
    -0.949_107_912_342_758_5,
    -0.741_531_185_599_394_5,
    -0.405_845_151_377_397_2,
    0.0,
    0.405_845_151_377_397_2,
    0.741_531_185_599_394_5,
    0.949_107_912_342_758_5,
];

/// Weights of the 7-point Gauss–Legendre rule, matching [`GAUSS_LEGENDRE_7_NODES`].
pub const GAUSS_LEGENDRE_7_WEIGHTS: [f64; 7] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_6,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
    0.381_830_050_505_118_9,
    0.279_705_391_489_276_6,
    0.129_484_966_168_869_7,
];

/// Integrates `f` over `[a, b]` with the 7-point Gauss–Legendre rule.
///
/// Each reference node `xi` maps to `t = 0.5 * ((1 - xi) * a + (1 + xi) * b)`
/// and the weighted sum is scaled by `(b - a) / 2`. The rule is exact for
/// polynomials up to degree 13. `b < a` yields the negated integral.
///
/// # Errors
///
/// Propagates the first error returned by `f`.
pub fn gauss_legendre_7<F>(a: f64, b: f64, mut f: F) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    let mut sum = 0.0;
    for (xi, w) in GAUSS_LEGENDRE_7_NODES.iter().zip(GAUSS_LEGENDRE_7_WEIGHTS) {
        let t = 0.5 * ((1.0 - xi) * a + (1.0 + xi) * b);
        sum += w * f(t)?;
    }
    Ok(sum * (b - a) * 0.5)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights_sum_to_interval_length() {
        let sum: f64 = GAUSS_LEGENDRE_7_WEIGHTS.iter().sum();
        assert_relative_eq!(sum, 2.0, epsilon = 1e-14);
    }

    #[test]
    fn exact_for_degree_13() {
        // Integral of t^13 over [0, 2] is 2^14 / 14.
        let value = gauss_legendre_7(0.0, 2.0, |t| Ok(t.powi(13))).unwrap();
        assert_relative_eq!(value, 16384.0 / 14.0, max_relative = 1e-13);
    }

    #[test]
    fn odd_function_vanishes_on_symmetric_interval() {
        let value = gauss_legendre_7(-1.5, 1.5, |t| Ok(t.powi(5) - t)).unwrap();
        assert!(value.abs() < 1e-12);
    }

    #[test]
    fn reversed_interval_negates() {
        let fwd = gauss_legendre_7(0.0, 1.0, |t| Ok(t.exp())).unwrap();
        let rev = gauss_legendre_7(1.0, 0.0, |t| Ok(t.exp())).unwrap();
        assert_relative_eq!(fwd, -rev, epsilon = 1e-14);
        assert_relative_eq!(fwd, std::f64::consts::E - 1.0, max_relative = 1e-12);
    }

    #[test]
    fn errors_propagate() {
        let r = gauss_legendre_7(0.0, 1.0, |_| {
            Err(crate::error::GeometryError::ZeroVector.into())
        });
        assert!(r.is_err());
    }
}
