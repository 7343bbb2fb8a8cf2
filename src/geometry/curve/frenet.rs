use crate::error::{GeometryError, Result};
use crate::math::{Matrix3, TOLERANCE};

use super::SpaceCurve;

pub(super) fn transform<C>(curve: &C, t: f64) -> Result<Matrix3>
where
    C: SpaceCurve + ?Sized,
{
    let v = curve.v(t)?;
    let a = curve.a(t)?;

    let speed = v.norm();
    if speed < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let vxa = v.cross(&a);
    let vxa_norm = vxa.norm();
    if vxa_norm < TOLERANCE * speed.powi(3) {
        return Err(GeometryError::Degenerate(format!(
            "curvature vanishes at t = {t}, Frenet frame undefined"
        ))
        .into());
    }

    let tangent = v / speed;
    let binormal = vxa / vxa_norm;
    // Renormalized to keep round-off from accumulating.
    let normal = binormal.cross(&tangent).normalize();

    Ok(Matrix3::from_columns(&[normal, binormal, tangent]))
}

/// Curvature and torsion.
///
/// Torsion is the scalar triple product `(v x a) . b / |v x a|^2`. Where the
/// curvature vanishes the osculating plane is undefined and torsion is
/// reported as zero.
pub(super) fn kappa_tau<C>(curve: &C, t: f64) -> Result<(f64, f64)>
where
    C: SpaceCurve + ?Sized,
{
    let v = curve.v(t)?;
    let a = curve.a(t)?;

    let speed = v.norm();
    if speed < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let vxa = v.cross(&a);
    let vxa_norm = vxa.norm();
    let kappa = vxa_norm / speed.powi(3);
    if kappa < TOLERANCE {
        return Ok((kappa, 0.0));
    }

    let tau = vxa.dot(&curve.b(t)?) / (vxa_norm * vxa_norm);
    Ok((kappa, tau))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::error::{CctError, GeometryError, Result};
    use crate::geometry::curve::{BlendedHelixCurve, CctParams, CurveDomain, PeriodicHelix, SpaceCurve};
    use crate::math::{Point3, Vector3};
    use approx::assert_relative_eq;

    /// Straight line through the origin along `(1, 2, 2)`.
    struct Straight;

    impl SpaceCurve for Straight {
        fn r(&self, t: f64) -> Result<Point3> {
            Ok(Point3::new(t, 2.0 * t, 2.0 * t))
        }
        fn v(&self, _t: f64) -> Result<Vector3> {
            Ok(Vector3::new(1.0, 2.0, 2.0))
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

    /// Circular helix of radius `a` and rise `c` per radian.
    fn circular_helix(a: f64, c: f64) -> PeriodicHelix {
        // z = r2 * q * t, so q = c / a with r2 = a.
        PeriodicHelix::from_parts(a, a, c / a, 0.0)
    }

    #[test]
    fn frames_are_orthonormal_and_right_handed() {
        let c = BlendedHelixCurve::new(CctParams::default()).unwrap();
        let (ta, tb) = c.splice_points();
        for k in 0..50 {
            let t = ta + 0.05 + (tb - ta - 0.1) * f64::from(k) / 49.0;
            let m = c.transform(t).unwrap();
            let (n, b, tan) = (m.column(0), m.column(1), m.column(2));
            assert!(n.dot(&b).abs() < 1e-10);
            assert!(n.dot(&tan).abs() < 1e-10);
            assert!(b.dot(&tan).abs() < 1e-10);
            for col in [n, b, tan] {
                assert!((col.norm() - 1.0).abs() < 1e-10);
            }
            assert!((m.determinant() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn tangent_follows_velocity() {
        let c = BlendedHelixCurve::new(CctParams::default()).unwrap();
        let t = 7.0;
        let m = c.transform(t).unwrap();
        let v = c.v(t).unwrap().normalize();
        assert!((m.column(2) - v).norm() < 1e-12);
    }

    #[test]
    fn circle_normal_points_to_center() {
        let h = PeriodicHelix::from_parts(2.0, 2.0, 0.0, 0.0);
        let t = 0.8;
        let m = h.transform(t).unwrap();
        let p = h.r(t).unwrap();
        let to_center = (Point3::origin() - p).normalize();
        assert!((m.column(0) - to_center).norm() < 1e-12);
        assert!((m.column(1) - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn straight_line_frame_is_degenerate() {
        let err = Straight.transform(0.5).unwrap_err();
        assert!(matches!(
            err,
            CctError::Geometry(GeometryError::Degenerate(_))
        ));
    }

    #[test]
    fn straight_feed_ends_are_degenerate() {
        let c = BlendedHelixCurve::new(CctParams::default()).unwrap();
        let d = c.domain();
        assert!(c.transform(d.t_min).is_err());
        assert!(c.transform(d.t_max).is_err());
    }

    #[test]
    fn circular_helix_curvature_and_torsion() {
        let (a, c) = (3.0, 0.5);
        let h = circular_helix(a, c);
        let (kappa, tau) = h.kappa_tau(1.3).unwrap();
        assert_relative_eq!(kappa, a / (a * a + c * c), max_relative = 1e-12);
        assert_relative_eq!(tau, c / (a * a + c * c), max_relative = 1e-12);
    }

    #[test]
    fn plane_circle_has_no_torsion() {
        let h = PeriodicHelix::from_parts(4.0, 4.0, 0.0, 0.0);
        let (kappa, tau) = h.kappa_tau(2.0).unwrap();
        assert_relative_eq!(kappa, 0.25, max_relative = 1e-12);
        assert!(tau.abs() < 1e-14);
    }

    #[test]
    fn straight_line_has_zero_curvature() {
        let (kappa, tau) = Straight.kappa_tau(0.2).unwrap();
        assert!(kappa.abs() < 1e-15);
        assert!(tau.abs() < 1e-15);
    }
}
