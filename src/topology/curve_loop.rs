use super::curve::CurveId;

slotmap::new_key_type! {
    /// Unique identifier for a curve loop in the topology store.
    pub struct CurveLoopId;
}

/// A curve with orientation information within a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedCurve {
    /// The curve identifier.
    pub curve: CurveId,
    /// If `true`, the curve is traversed from its first to its last point.
    pub forward: bool,
}

impl OrientedCurve {
    /// Creates a new oriented curve.
    #[must_use]
    pub fn new(curve: CurveId, forward: bool) -> Self {
        Self { curve, forward }
    }
}

/// A closed sequence of oriented curves bounding a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveLoopData {
    /// The ordered curves.
    pub curves: Vec<OrientedCurve>,
}
