use super::point::PointId;

slotmap::new_key_type! {
    /// Unique identifier for a curve in the topology store.
    pub struct CurveId;
}

/// How a curve interpolates its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight segment between exactly two points.
    Line,
    /// Spline through all points in order.
    Spline,
}

/// Data associated with a curve: an ordered list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveData {
    /// Interpolation kind.
    pub kind: CurveKind,
    /// Points in traversal order.
    pub points: Vec<PointId>,
}

impl CurveData {
    /// A line from `start` to `end`.
    #[must_use]
    pub fn line(start: PointId, end: PointId) -> Self {
        Self {
            kind: CurveKind::Line,
            points: vec![start, end],
        }
    }

    /// A spline through `points`.
    #[must_use]
    pub fn spline(points: Vec<PointId>) -> Self {
        Self {
            kind: CurveKind::Spline,
            points,
        }
    }

    /// First point, if any.
    #[must_use]
    pub fn start(&self) -> Option<PointId> {
        self.points.first().copied()
    }

    /// Last point, if any.
    #[must_use]
    pub fn end(&self) -> Option<PointId> {
        self.points.last().copied()
    }
}
