use super::curve_loop::CurveLoopId;

slotmap::new_key_type! {
    /// Unique identifier for a surface in the topology store.
    pub struct SurfaceId;
}

/// A surface bounded by curve loops.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceData {
    /// Boundary loops; the first one is the outer boundary.
    pub loops: Vec<CurveLoopId>,
    /// Whether the surface is planar (otherwise ruled/filled).
    pub is_plane: bool,
}
