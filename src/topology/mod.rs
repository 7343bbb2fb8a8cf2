pub mod curve;
pub mod curve_loop;
pub mod point;
pub mod surface;

pub use curve::{CurveData, CurveId, CurveKind};
pub use curve_loop::{CurveLoopData, CurveLoopId, OrientedCurve};
pub use point::{PointData, PointId};
pub use surface::{SurfaceData, SurfaceId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all tape topology entities.
///
/// Entities reference each other via typed IDs (generational indices).
#[derive(Debug, Default)]
pub struct TopologyStore {
    points: SlotMap<PointId, PointData>,
    curves: SlotMap<CurveId, CurveData>,
    loops: SlotMap<CurveLoopId, CurveLoopData>,
    surfaces: SlotMap<SurfaceId, SurfaceData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Point operations ---

    /// Inserts a point and returns its ID.
    pub fn add_point(&mut self, data: PointData) -> PointId {
        self.points.insert(data)
    }

    /// Returns a reference to the point data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn point(&self, id: PointId) -> Result<&PointData, TopologyError> {
        self.points
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("point".into()))
    }

    /// Number of points in the store.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    // --- Curve operations ---

    /// Inserts a curve after checking that it references stored points.
    ///
    /// # Errors
    ///
    /// Returns an error if a point is missing, or a line does not have
    /// exactly two points, or a spline has fewer than two.
    pub fn add_curve(&mut self, data: CurveData) -> Result<CurveId, TopologyError> {
        let valid_len = match data.kind {
            CurveKind::Line => data.points.len() == 2,
            CurveKind::Spline => data.points.len() >= 2,
        };
        if !valid_len {
            return Err(TopologyError::InvalidTopology(format!(
                "{:?} with {} points",
                data.kind,
                data.points.len()
            )));
        }
        for &p in &data.points {
            self.point(p)?;
        }
        Ok(self.curves.insert(data))
    }

    /// Returns a reference to the curve data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn curve(&self, id: CurveId) -> Result<&CurveData, TopologyError> {
        self.curves
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("curve".into()))
    }

    /// Number of curves in the store.
    #[must_use]
    pub fn num_curves(&self) -> usize {
        self.curves.len()
    }

    // --- Curve loop operations ---

    /// Inserts a curve loop after checking that it closes.
    ///
    /// # Errors
    ///
    /// Returns an error if a curve is missing or consecutive curves do not
    /// share end points.
    pub fn add_curve_loop(&mut self, data: CurveLoopData) -> Result<CurveLoopId, TopologyError> {
        self.check_closed(&data)?;
        Ok(self.loops.insert(data))
    }

    /// Returns a reference to the curve loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn curve_loop(&self, id: CurveLoopId) -> Result<&CurveLoopData, TopologyError> {
        self.loops
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("curve loop".into()))
    }

    /// Number of curve loops in the store.
    #[must_use]
    pub fn num_curve_loops(&self) -> usize {
        self.loops.len()
    }

    // --- Surface operations ---

    /// Inserts a surface and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if a boundary loop is missing or none is given.
    pub fn add_surface(&mut self, data: SurfaceData) -> Result<SurfaceId, TopologyError> {
        if data.loops.is_empty() {
            return Err(TopologyError::InvalidTopology(
                "surface without boundary".into(),
            ));
        }
        for &l in &data.loops {
            self.curve_loop(l)?;
        }
        Ok(self.surfaces.insert(data))
    }

    /// Returns a reference to the surface data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn surface(&self, id: SurfaceId) -> Result<&SurfaceData, TopologyError> {
        self.surfaces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("surface".into()))
    }

    /// Number of surfaces in the store.
    #[must_use]
    pub fn num_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// Start and end point of a curve as traversed in a loop.
    fn oriented_ends(&self, oc: OrientedCurve) -> Result<(PointId, PointId), TopologyError> {
        let curve = self.curve(oc.curve)?;
        let (Some(start), Some(end)) = (curve.start(), curve.end()) else {
            return Err(TopologyError::InvalidTopology("curve without points".into()));
        };
        Ok(if oc.forward { (start, end) } else { (end, start) })
    }

    fn check_closed(&self, data: &CurveLoopData) -> Result<(), TopologyError> {
        if data.curves.is_empty() {
            return Err(TopologyError::InvalidTopology("empty curve loop".into()));
        }
        let n = data.curves.len();
        for (i, &oc) in data.curves.iter().enumerate() {
            let (_, end) = self.oriented_ends(oc)?;
            let (next_start, _) = self.oriented_ends(data.curves[(i + 1) % n])?;
            if end != next_start {
                return Err(TopologyError::InvalidTopology(format!(
                    "curve loop is open after curve {i}"
                )));
            }
        }
        Ok(())
    }
}
