mod sample_curve;

pub use sample_curve::SampleCurve;

use crate::math::{Matrix3, Point3};

/// How sample parameters are distributed over the curve domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    /// Equal steps in the curve parameter.
    #[default]
    Uniform,
    /// Equal arc length between consecutive samples.
    ArcLength,
}

/// What to do where the Frenet frame is undefined (vanishing curvature).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateFrames {
    /// Abort sampling with the geometry error.
    #[default]
    Fail,
    /// Carry the binormal of the nearest valid sample over and
    /// re-orthogonalize it against the local tangent.
    Transport,
}

/// Parameters controlling curve sampling.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    /// Number of samples, including both domain ends.
    pub count: usize,
    /// Parameter distribution.
    pub spacing: Spacing,
    /// Handling of samples without a Frenet frame.
    pub degenerate_frames: DegenerateFrames,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            count: 100,
            spacing: Spacing::Uniform,
            degenerate_frames: DegenerateFrames::Fail,
        }
    }
}

/// Position and moving frame of a curve at one parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Curve parameter.
    pub t: f64,
    /// Point on the curve.
    pub position: Point3,
    /// Columns (normal, binormal, tangent).
    pub frame: Matrix3,
}
