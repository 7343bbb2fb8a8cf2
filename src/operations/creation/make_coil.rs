use crate::error::Result;
use crate::geometry::curve::SpaceCurve;
use crate::geometry::CrossSection;
use crate::operations::sampling::CurveSample;
use crate::topology::TopologyStore;

use super::{MakeTape, MakeTapeBlock, TapeBlockData, TapeData, TapeParams};

/// Topology of a complete winding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoilData {
    /// One entry per cross-section tape, bottom to top.
    pub tapes: Vec<TapeData>,
    /// Blocks between consecutive tapes.
    pub blocks: Vec<TapeBlockData>,
}

/// Builds every tape of a cross-section and the blocks between them.
pub struct MakeCoil<'a> {
    samples: &'a [CurveSample],
    cross_section: &'a CrossSection,
    params: TapeParams,
}

impl<'a> MakeCoil<'a> {
    /// Creates a new `MakeCoil` operation.
    #[must_use]
    pub fn new(
        samples: &'a [CurveSample],
        cross_section: &'a CrossSection,
        params: TapeParams,
    ) -> Self {
        Self {
            samples,
            cross_section,
            params,
        }
    }

    /// Executes the operation, creating the coil in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if any tape or block cannot be built.
    pub fn execute<C>(&self, curve: &C, store: &mut TopologyStore) -> Result<CoilData>
    where
        C: SpaceCurve + ?Sized,
    {
        let tapes = (0..self.cross_section.num_tapes())
            .map(|i| {
                MakeTape::new(self.samples, self.cross_section, i, self.params)
                    .execute(curve, store)
            })
            .collect::<Result<Vec<_>>>()?;

        let blocks = tapes
            .windows(2)
            .map(|pair| MakeTapeBlock::new(&pair[0], &pair[1]).execute(store))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            tapes = tapes.len(),
            blocks = blocks.len(),
            surfaces = store.num_surfaces(),
            "coil created"
        );
        Ok(CoilData { tapes, blocks })
    }
}
