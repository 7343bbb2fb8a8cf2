use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::curve::SpaceCurve;
use crate::geometry::CrossSection;
use crate::math::{Point3, Vector2, Vector3, TOLERANCE};
use crate::operations::sampling::CurveSample;
use crate::topology::{
    CurveData, CurveId, CurveLoopData, CurveLoopId, OrientedCurve, PointData, PointId,
    SurfaceData, SurfaceId, TopologyStore,
};

/// Parameters for building a tape.
#[derive(Debug, Clone, Copy)]
pub struct TapeParams {
    /// Mesh resolution stored on every tape point.
    pub resolution: f64,
    /// Extends both tape ends straight along the feed direction until
    /// they have moved this far in z.
    pub end_extension: Option<f64>,
}

impl Default for TapeParams {
    fn default() -> Self {
        Self {
            resolution: 5.0,
            end_extension: None,
        }
    }
}

/// Topology of one tape.
#[derive(Debug, Clone, PartialEq)]
pub struct TapeData {
    /// Tape index in the cross-section.
    pub index: usize,
    /// Left edge points, in curve direction.
    pub left_points: Vec<PointId>,
    /// Right edge points, in curve direction.
    pub right_points: Vec<PointId>,
    /// Line from the first left to the first right point.
    pub front: CurveId,
    /// Spline through the right points.
    pub right: CurveId,
    /// Line from the last right to the last left point.
    pub back: CurveId,
    /// Spline through the left points, last to first.
    pub left: CurveId,
    /// Boundary loop: front, right, back, left.
    pub curve_loop: CurveLoopId,
    /// The tape surface.
    pub surface: SurfaceId,
}

/// Sweeps one tape of a cross-section along sampled curve frames.
pub struct MakeTape<'a> {
    samples: &'a [CurveSample],
    cross_section: &'a CrossSection,
    index: usize,
    params: TapeParams,
}

impl<'a> MakeTape<'a> {
    /// Creates a new `MakeTape` operation for tape `index`.
    #[must_use]
    pub fn new(
        samples: &'a [CurveSample],
        cross_section: &'a CrossSection,
        index: usize,
        params: TapeParams,
    ) -> Self {
        Self {
            samples,
            cross_section,
            index,
            params,
        }
    }

    /// Executes the operation, creating the tape in the topology store.
    ///
    /// `curve` must be the curve the samples were taken from; it supplies
    /// the feed direction for end extensions.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two samples, the tape index
    /// is out of range, or an end extension is requested where the feed
    /// direction has no z component.
    pub fn execute<C>(&self, curve: &C, store: &mut TopologyStore) -> Result<TapeData>
    where
        C: SpaceCurve + ?Sized,
    {
        let (first, last) = match self.samples {
            [first, .., last] => (first, last),
            _ => {
                return Err(OperationError::InvalidInput(format!(
                    "a tape needs at least 2 samples, got {}",
                    self.samples.len()
                ))
                .into())
            }
        };
        let (Some(&left_offset), Some(&right_offset)) = (
            self.cross_section.left(self.index),
            self.cross_section.right(self.index),
        ) else {
            return Err(OperationError::InvalidInput(format!(
                "tape {} not in a cross-section of {} tapes",
                self.index,
                self.cross_section.num_tapes()
            ))
            .into());
        };

        let mut left = self.edge(left_offset);
        let mut right = self.edge(right_offset);

        if let Some(delta_z) = self.params.end_extension {
            if !delta_z.is_finite() || delta_z < TOLERANCE {
                return Err(OperationError::InvalidInput(format!(
                    "end extension must be positive, got {delta_z}"
                ))
                .into());
            }
            let second = &self.samples[1];
            let before_last = &self.samples[self.samples.len() - 2];

            let head = Extension::new(curve, first.t, second.t, -delta_z)?;
            let tail = Extension::new(curve, last.t, before_last.t, delta_z)?;
            left = head.attach(left, &tail);
            right = head.attach(right, &tail);
        }

        let resolution = self.params.resolution;
        let left_points: Vec<PointId> = left
            .into_iter()
            .map(|p| store.add_point(PointData::new(p, resolution)))
            .collect();
        let right_points: Vec<PointId> = right
            .into_iter()
            .map(|p| store.add_point(PointData::new(p, resolution)))
            .collect();

        let n = left_points.len();
        let front = store.add_curve(CurveData::line(left_points[0], right_points[0]))?;
        let right_spline = store.add_curve(CurveData::spline(right_points.clone()))?;
        let back = store.add_curve(CurveData::line(right_points[n - 1], left_points[n - 1]))?;
        let left_spline =
            store.add_curve(CurveData::spline(left_points.iter().rev().copied().collect()))?;

        let curve_loop = store.add_curve_loop(CurveLoopData {
            curves: [front, right_spline, back, left_spline]
                .into_iter()
                .map(|c| OrientedCurve::new(c, true))
                .collect(),
        })?;
        let surface = store.add_surface(SurfaceData {
            loops: vec![curve_loop],
            is_plane: false,
        })?;

        tracing::debug!(index = self.index, points = n, "tape created");

        Ok(TapeData {
            index: self.index,
            left_points,
            right_points,
            front,
            right: right_spline,
            back,
            left: left_spline,
            curve_loop,
            surface,
        })
    }

    /// Edge positions `r + N * offset.x + B * offset.y` for every sample.
    fn edge(&self, offset: Vector2) -> Vec<Point3> {
        self.samples
            .iter()
            .map(|s| s.position + s.frame.column(0) * offset.x + s.frame.column(1) * offset.y)
            .collect()
    }
}

/// Straight continuation of a tape end along the curve velocity.
struct Extension {
    velocity: Vector3,
    /// Velocity multiplier reaching the full z offset.
    xi_end: f64,
    /// Number of stations including the tape end itself.
    stations: usize,
}

impl Extension {
    /// Extension at `t_end` that moves `delta_z` in z, with stations spaced
    /// like the curve segment between `t_end` and its neighbour `t_next`.
    fn new<C>(curve: &C, t_end: f64, t_next: f64, delta_z: f64) -> Result<Self>
    where
        C: SpaceCurve + ?Sized,
    {
        let velocity = curve.v(t_end)?;
        if velocity.z.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "feed direction at t = {t_end} has no z component"
            ))
            .into());
        }
        let segment = curve.segment_length(t_end.min(t_next), t_end.max(t_next))?;
        if segment < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "zero-length end segment at t = {t_end}"
            ))
            .into());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stations = (delta_z.abs() / segment).round() as usize;
        Ok(Self {
            velocity,
            xi_end: delta_z / velocity.z,
            stations,
        })
    }

    /// New points beyond `origin`, nearest first.
    fn points(&self, origin: Point3) -> Vec<Point3> {
        (1..self.stations)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let xi = self.xi_end * k as f64 / (self.stations - 1) as f64;
                origin + self.velocity * xi
            })
            .collect()
    }

    /// Prepends this extension to `edge` and appends `tail`.
    fn attach(&self, edge: Vec<Point3>, tail: &Self) -> Vec<Point3> {
        let (Some(&first), Some(&last)) = (edge.first(), edge.last()) else {
            return edge;
        };
        let mut out: Vec<Point3> = self.points(first).into_iter().rev().collect();
        out.extend(edge);
        out.extend(tail.points(last));
        out
    }
}
