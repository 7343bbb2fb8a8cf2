use crate::error::{OperationError, Result};
use crate::topology::{
    CurveData, CurveId, CurveLoopData, CurveLoopId, OrientedCurve, PointId, SurfaceData,
    SurfaceId, TopologyStore,
};

use super::TapeData;

/// Topology of the block between two stacked tapes.
#[derive(Debug, Clone, PartialEq)]
pub struct TapeBlockData {
    /// Lines from bottom to top at the first left, first right, last left
    /// and last right points.
    pub connectors: [CurveId; 4],
    /// Loops of the front, back, left and right faces.
    pub loops: [CurveLoopId; 4],
    /// Planar face at the curve start.
    pub front: SurfaceId,
    /// Planar face at the curve end.
    pub back: SurfaceId,
    /// Face between the left edges.
    pub left: SurfaceId,
    /// Face between the right edges.
    pub right: SurfaceId,
}

/// Closes the gap between two stacked tapes.
pub struct MakeTapeBlock<'a> {
    bottom: &'a TapeData,
    top: &'a TapeData,
}

impl<'a> MakeTapeBlock<'a> {
    /// Creates a new `MakeTapeBlock` operation.
    #[must_use]
    pub fn new(bottom: &'a TapeData, top: &'a TapeData) -> Self {
        Self { bottom, top }
    }

    /// Executes the operation, creating the block faces in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if a tape has no points or the tapes' entities are
    /// not in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<TapeBlockData> {
        let (b, t) = (self.bottom, self.top);
        let connect = |store: &mut TopologyStore,
                       lower: Option<&PointId>,
                       upper: Option<&PointId>|
         -> Result<CurveId> {
            match (lower, upper) {
                (Some(&p), Some(&q)) => Ok(store.add_curve(CurveData::line(p, q))?),
                _ => Err(OperationError::InvalidInput("tape without points".into()).into()),
            }
        };

        let l0 = connect(store, b.left_points.first(), t.left_points.first())?;
        let r0 = connect(store, b.right_points.first(), t.right_points.first())?;
        let l1 = connect(store, b.left_points.last(), t.left_points.last())?;
        let r1 = connect(store, b.right_points.last(), t.right_points.last())?;

        let face = |store: &mut TopologyStore,
                    curves: [(CurveId, bool); 4],
                    is_plane: bool|
         -> Result<(CurveLoopId, SurfaceId)> {
            let curve_loop = store.add_curve_loop(CurveLoopData {
                curves: curves
                    .into_iter()
                    .map(|(c, forward)| OrientedCurve::new(c, forward))
                    .collect(),
            })?;
            let surface = store.add_surface(SurfaceData {
                loops: vec![curve_loop],
                is_plane,
            })?;
            Ok((curve_loop, surface))
        };

        let (front_loop, front) = face(
            store,
            [(b.front, true), (r0, true), (t.front, false), (l0, false)],
            true,
        )?;
        let (back_loop, back) = face(
            store,
            [(b.back, true), (l1, true), (t.back, false), (r1, false)],
            true,
        )?;
        // Left splines run from the last point to the first.
        let (left_loop, left) = face(
            store,
            [(l0, true), (t.left, false), (l1, false), (b.left, true)],
            false,
        )?;
        let (right_loop, right) = face(
            store,
            [(r0, true), (t.right, true), (r1, false), (b.right, false)],
            false,
        )?;

        tracing::debug!(bottom = b.index, top = t.index, "tape block created");

        Ok(TapeBlockData {
            connectors: [l0, r0, l1, r1],
            loops: [front_loop, back_loop, left_loop, right_loop],
            front,
            back,
            left,
            right,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::PeriodicHelix;
    use crate::geometry::CrossSection;
    use crate::operations::creation::{MakeTape, TapeParams};
    use crate::operations::sampling::{SampleCurve, SamplingParams};

    fn two_tapes(store: &mut TopologyStore) -> (TapeData, TapeData) {
        let h = PeriodicHelix::from_parts(10.0, 10.0, 1.0, 0.0);
        let s = SampleCurve::new(SamplingParams {
            count: 9,
            ..SamplingParams::default()
        })
        .execute(&h)
        .unwrap();
        let cs = CrossSection::stacked(2.0, 0.5, 2).unwrap();
        let bottom = MakeTape::new(&s, &cs, 0, TapeParams::default())
            .execute(&h, store)
            .unwrap();
        let top = MakeTape::new(&s, &cs, 1, TapeParams::default())
            .execute(&h, store)
            .unwrap();
        (bottom, top)
    }

    #[test]
    fn block_adds_four_lines_loops_and_surfaces() {
        let mut store = TopologyStore::new();
        let (bottom, top) = two_tapes(&mut store);
        let block = MakeTapeBlock::new(&bottom, &top)
            .execute(&mut store)
            .unwrap();

        assert_eq!(store.num_curves(), 12);
        assert_eq!(store.num_curve_loops(), 6);
        assert_eq!(store.num_surfaces(), 6);
        assert!(store.surface(block.front).unwrap().is_plane);
        assert!(store.surface(block.back).unwrap().is_plane);
        assert!(!store.surface(block.left).unwrap().is_plane);
        assert!(!store.surface(block.right).unwrap().is_plane);
    }

    #[test]
    fn connectors_join_matching_corners() {
        let mut store = TopologyStore::new();
        let (bottom, top) = two_tapes(&mut store);
        let block = MakeTapeBlock::new(&bottom, &top)
            .execute(&mut store)
            .unwrap();

        let l0 = store.curve(block.connectors[0]).unwrap();
        assert_eq!(l0.points, vec![bottom.left_points[0], top.left_points[0]]);
        let r1 = store.curve(block.connectors[3]).unwrap();
        assert_eq!(
            r1.points,
            vec![bottom.right_points[8], top.right_points[8]]
        );
    }

    #[test]
    fn front_loop_orientation() {
        let mut store = TopologyStore::new();
        let (bottom, top) = two_tapes(&mut store);
        let block = MakeTapeBlock::new(&bottom, &top)
            .execute(&mut store)
            .unwrap();

        let front = store.curve_loop(block.loops[0]).unwrap();
        let signs: Vec<bool> = front.curves.iter().map(|c| c.forward).collect();
        assert_eq!(signs, vec![true, true, false, false]);
        assert_eq!(front.curves[0].curve, bottom.front);
        assert_eq!(front.curves[2].curve, top.front);
    }

    #[test]
    fn empty_tape_is_rejected() {
        let mut store = TopologyStore::new();
        let (bottom, mut top) = two_tapes(&mut store);
        top.left_points.clear();
        assert!(MakeTapeBlock::new(&bottom, &top)
            .execute(&mut store)
            .is_err());
    }
}
