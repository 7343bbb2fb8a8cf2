use crate::error::{GeometryError, OperationError, Result};
use crate::math::quadrature::gauss_legendre_7;
use crate::math::root::{bracket_root, refine_root};
use crate::math::TOLERANCE;

use super::SpaceCurve;

/// Convergence threshold on the relative segment length error.
pub const LENGTH_TOLERANCE: f64 = 1e-7;

/// First search point of each bracket, as a fraction of the uniform spacing.
const INITIAL_STEP_FRACTION: f64 = 0.01;

pub(super) fn segment_length<C>(curve: &C, ta: f64, tb: f64) -> Result<f64>
where
    C: SpaceCurve + ?Sized,
{
    gauss_legendre_7(ta, tb, |t| Ok(curve.v(t)?.norm()))
}

pub(super) fn make_equidistant<C>(curve: &C, ta: f64, tb: f64, n: usize) -> Result<Vec<f64>>
where
    C: SpaceCurve + ?Sized,
{
    if n < 2 {
        return Err(OperationError::InvalidInput(format!(
            "equidistant grid needs at least 2 points, got {n}"
        ))
        .into());
    }
    if ta >= tb || !ta.is_finite() || !tb.is_finite() {
        return Err(OperationError::InvalidInput(format!(
            "invalid parameter range [{ta}, {tb}]"
        ))
        .into());
    }

    let mut t = uniform_grid(ta, tb, n);
    let mut length = 0.0;
    for w in t.windows(2) {
        length += curve.segment_length(w[0], w[1])?;
    }
    if length < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "curve has zero length on [{ta}, {tb}]"
        ))
        .into());
    }

    #[allow(clippy::cast_precision_loss)]
    let segments = (n - 1) as f64;
    let dl = length / segments;
    let dt = (tb - ta) / segments;
    tracing::debug!(length, dl, n, "equalizing arc length");

    for k in 1..n {
        let t0 = t[k - 1];
        let mut f = |x: f64| -> Result<f64> { Ok((curve.segment_length(t0, x)? - dl) / dl) };
        let bracket = bracket_root(&mut f, t0 + INITIAL_STEP_FRACTION * dt, dt)?;
        let root = refine_root(&mut f, bracket, LENGTH_TOLERANCE)?;
        tracing::trace!(k, t = root.root, iterations = root.iterations, "segment end found");
        t[k] = root.root;
    }

    Ok(t)
}

/// `n` evenly spaced values from `ta` to `tb`, both ends exact.
pub(crate) fn uniform_grid(ta: f64, tb: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![ta];
    }
    #[allow(clippy::cast_precision_loss)]
    let step = (tb - ta) / (n - 1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let mut grid: Vec<f64> = (0..n).map(|k| ta + step * k as f64).collect();
    grid[n - 1] = tb;
    grid
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CctError;
    use crate::geometry::curve::{BlendedHelixCurve, CctParams, CurveDomain, PeriodicHelix};
    use crate::math::{Point3, Vector3};
    use approx::assert_relative_eq;
    use std::f64::consts::{PI, TAU};

    /// Planar curve with polynomial speed: `v = (1 - t^2, 2t, 0)`, `|v| = 1 + t^2`.
    struct Hodograph;

    impl SpaceCurve for Hodograph {
        fn r(&self, t: f64) -> Result<Point3> {
            Ok(Point3::new(t - t * t * t / 3.0, t * t, 0.0))
        }
        fn v(&self, t: f64) -> Result<Vector3> {
            Ok(Vector3::new(1.0 - t * t, 2.0 * t, 0.0))
        }
        fn a(&self, t: f64) -> Result<Vector3> {
            Ok(Vector3::new(-2.0 * t, 2.0, 0.0))
        }
        fn b(&self, _t: f64) -> Result<Vector3> {
            Ok(Vector3::new(-2.0, 0.0, 0.0))
        }
        fn domain(&self) -> CurveDomain {
            CurveDomain::new(0.0, 2.0)
        }
    }

    /// A curve that never moves.
    struct Stationary;

    impl SpaceCurve for Stationary {
        fn r(&self, _t: f64) -> Result<Point3> {
            Ok(Point3::origin())
        }
        fn v(&self, _t: f64) -> Result<Vector3> {
            Ok(Vector3::zeros())
        }
        fn a(&self, _t: f64) -> Result<Vector3> {
            Ok(Vector3::zeros())
        }
        fn b(&self, _t: f64) -> Result<Vector3> {
            Ok(Vector3::zeros())
        }
        fn domain(&self) -> CurveDomain {
            CurveDomain::new(0.0, 1.0)
        }
    }

    fn helix() -> PeriodicHelix {
        PeriodicHelix::new(&CctParams::default())
    }

    fn segment_lengths<C: SpaceCurve>(curve: &C, t: &[f64]) -> Vec<f64> {
        t.windows(2)
            .map(|w| curve.segment_length(w[0], w[1]).unwrap())
            .collect()
    }

    fn max_relative_spread(lengths: &[f64]) -> f64 {
        let max = lengths.iter().copied().fold(f64::MIN, f64::max);
        let min = lengths.iter().copied().fold(f64::MAX, f64::min);
        let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
        (max - min) / mean
    }

    #[test]
    fn polynomial_speed_is_integrated_exactly() {
        let len = Hodograph.segment_length(0.0, 2.0).unwrap();
        assert_relative_eq!(len, 2.0 + 8.0 / 3.0, max_relative = 1e-14);
    }

    #[test]
    fn circle_length() {
        let h = PeriodicHelix::from_parts(5.0, 5.0, 0.0, 0.0);
        let len = h.segment_length(0.0, PI / 2.0).unwrap();
        assert_relative_eq!(len, 2.5 * PI, max_relative = 1e-9);
    }

    #[test]
    fn helix_turn_splits_into_equal_lengths() {
        let h = helix();
        for n in [2, 9, 17] {
            let t = h.make_equidistant(0.0, TAU, n).unwrap();
            assert_eq!(t.len(), n);
            assert!(t[0].abs() < 1e-15);
            assert!((t[n - 1] - TAU).abs() < 1e-6);
            assert!(t.windows(2).all(|w| w[0] < w[1]));
            assert!(max_relative_spread(&segment_lengths(&h, &t)) < 1e-6);
        }
    }

    #[test]
    fn helix_grid_is_symmetric_about_half_turn() {
        // The speed of the CCT helix is symmetric about t = pi.
        let t = helix().make_equidistant(0.0, TAU, 9).unwrap();
        assert!((t[4] - PI).abs() < 1e-5);
        assert!((t[2] + t[6] - TAU).abs() < 1e-5);
    }

    #[test]
    fn two_turns_keep_equal_lengths() {
        let h = helix();
        let t = h.make_equidistant(0.0, 2.0 * TAU, 33).unwrap();
        assert!(max_relative_spread(&segment_lengths(&h, &t)) < 1e-6);
    }

    #[test]
    fn blended_interior_keeps_equal_lengths() {
        let c = BlendedHelixCurve::new(CctParams::default()).unwrap();
        let (ta, tb) = c.splice_points();
        let t = c.make_equidistant(ta, tb, 25).unwrap();
        assert!(max_relative_spread(&segment_lengths(&c, &t)) < 1e-6);
    }

    #[test]
    fn blended_full_domain_keeps_equal_lengths() {
        for turns in [1, 4, 10] {
            let c = BlendedHelixCurve::new(CctParams {
                turns,
                ..CctParams::default()
            })
            .unwrap();
            let d = c.domain();
            for n in [2, 3, 5, 10, 37] {
                let t = c.make_equidistant(d.t_min, d.t_max, n).unwrap();
                assert_eq!(t.len(), n);
                assert!(t.windows(2).all(|w| w[0] < w[1]), "turns {turns}, n {n}");
                let spread = max_relative_spread(&segment_lengths(&c, &t));
                assert!(spread < 1e-6, "turns {turns}, n {n}: {spread:e}");
            }
        }
    }

    #[test]
    fn fine_grid_ends_at_domain_end() {
        let c = BlendedHelixCurve::new(CctParams::default()).unwrap();
        let d = c.domain();
        let t = c.make_equidistant(d.t_min, d.t_max, 100).unwrap();
        assert!((t[0] - d.t_min).abs() < 1e-15);
        assert!((t[99] - d.t_max).abs() < 1e-5);
    }

    #[test]
    fn rejects_too_few_points() {
        let err = helix().make_equidistant(0.0, 1.0, 1).unwrap_err();
        assert!(matches!(err, CctError::Operation(_)));
    }

    #[test]
    fn rejects_empty_range() {
        let err = helix().make_equidistant(1.0, 1.0, 4).unwrap_err();
        assert!(matches!(err, CctError::Operation(_)));
    }

    #[test]
    fn zero_length_curve_fails_instead_of_looping() {
        let err = Stationary.make_equidistant(0.0, 1.0, 5).unwrap_err();
        assert!(matches!(
            err,
            CctError::Geometry(GeometryError::Degenerate(_))
        ));
    }

    #[test]
    fn uniform_grid_hits_both_ends() {
        let g = uniform_grid(0.0, 0.3, 4);
        assert_eq!(g.len(), 4);
        assert!((g[1] - 0.1).abs() < 1e-15);
        assert!((g[3] - 0.3).abs() < f64::EPSILON);
    }
}
