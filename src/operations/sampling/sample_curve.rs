use crate::error::{CctError, GeometryError, OperationError, Result};
use crate::geometry::curve::{uniform_grid, SpaceCurve};
use crate::math::{Matrix3, TOLERANCE};

use super::{CurveSample, DegenerateFrames, SamplingParams, Spacing};

/// Samples a space curve over its whole domain.
pub struct SampleCurve {
    params: SamplingParams,
}

impl SampleCurve {
    /// Creates a new `SampleCurve` operation.
    #[must_use]
    pub fn new(params: SamplingParams) -> Self {
        Self { params }
    }

    /// Parameter values the samples are taken at, starting at `t_min`.
    ///
    /// A uniform grid ends exactly at `t_max`. An arc-length grid solves for
    /// its last value too, so it ends near `t_max`.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than two samples, or when arc-length
    /// equalization fails.
    pub fn parameter_grid<C>(&self, curve: &C) -> Result<Vec<f64>>
    where
        C: SpaceCurve + ?Sized,
    {
        let n = self.params.count;
        if n < 2 {
            return Err(OperationError::InvalidInput(format!(
                "need at least 2 samples, got {n}"
            ))
            .into());
        }
        let d = curve.domain();
        match self.params.spacing {
            Spacing::Uniform => Ok(uniform_grid(d.t_min, d.t_max, n)),
            Spacing::ArcLength => curve.make_equidistant(d.t_min, d.t_max, n),
        }
    }

    /// Executes the sampling, returning one sample per grid value.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be built, an evaluation fails, a
    /// frame is degenerate under [`DegenerateFrames::Fail`], or no sample has
    /// a frame at all.
    pub fn execute<C>(&self, curve: &C) -> Result<Vec<CurveSample>>
    where
        C: SpaceCurve + ?Sized,
    {
        let grid = self.parameter_grid(curve)?;

        let mut positions = Vec::with_capacity(grid.len());
        let mut frames = Vec::with_capacity(grid.len());
        for &t in &grid {
            positions.push(curve.r(t)?);
            match curve.transform(t) {
                Ok(m) => frames.push(Some(m)),
                Err(CctError::Geometry(GeometryError::Degenerate(_)))
                    if self.params.degenerate_frames == DegenerateFrames::Transport =>
                {
                    frames.push(None);
                }
                Err(e) => return Err(e),
            }
        }

        let missing = frames.iter().filter(|f| f.is_none()).count();
        if missing > 0 {
            if missing == frames.len() {
                return Err(OperationError::Failed(
                    "no sample has a defined Frenet frame".into(),
                )
                .into());
            }
            tracing::warn!(missing, "transporting frames over degenerate samples");
        }

        let mut samples = Vec::with_capacity(grid.len());
        for (i, (&t, position)) in grid.iter().zip(positions).enumerate() {
            let frame = match frames[i] {
                Some(m) => m,
                None => transported_frame(curve, t, &frames, i)?,
            };
            samples.push(CurveSample { t, position, frame });
        }

        tracing::debug!(
            count = samples.len(),
            spacing = ?self.params.spacing,
            "curve sampled"
        );
        Ok(samples)
    }
}

/// Frame at `t` built from the binormal of the valid frame nearest to index `i`.
fn transported_frame<C>(curve: &C, t: f64, frames: &[Option<Matrix3>], i: usize) -> Result<Matrix3>
where
    C: SpaceCurve + ?Sized,
{
    let donor = frames
        .iter()
        .enumerate()
        .filter_map(|(j, f)| f.map(|m| (i.abs_diff(j), m)))
        .min_by_key(|&(dist, _)| dist)
        .map(|(_, m)| m)
        .ok_or_else(|| OperationError::Failed("no frame to transport".into()))?;

    let tangent = curve.v(t)?.normalize();
    let b = donor.column(1).into_owned();
    let b = b - tangent * b.dot(&tangent);
    let norm = b.norm();
    if norm < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "transported binormal is parallel to the tangent at t = {t}"
        ))
        .into());
    }
    let binormal = b / norm;
    let normal = binormal.cross(&tangent);

    Ok(Matrix3::from_columns(&[normal, binormal, tangent]))
}
