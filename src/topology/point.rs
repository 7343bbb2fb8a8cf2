use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a point in the topology store.
    pub struct PointId;
}

/// A geometric point with a target mesh resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointData {
    /// Position in space.
    pub position: Point3,
    /// Characteristic mesh length requested around this point.
    pub resolution: f64,
}

impl PointData {
    /// Creates a new point.
    #[must_use]
    pub fn new(position: Point3, resolution: f64) -> Self {
        Self {
            position,
            resolution,
        }
    }
}
