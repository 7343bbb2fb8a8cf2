use crate::error::{OperationError, Result};
use crate::math::{Vector2, TOLERANCE};

/// Tape edge offsets of a winding cross-section.
///
/// Each tape `i` is bounded by a left and a right edge. An edge is an
/// offset `(n, b)` from the base curve: `n` along the Frenet normal, `b`
/// along the binormal.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    left: Vec<Vector2>,
    right: Vec<Vector2>,
}

impl CrossSection {
    /// Creates a cross-section from per-tape left and right edge offsets.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists are empty or differ in length.
    pub fn new(left: Vec<Vector2>, right: Vec<Vector2>) -> Result<Self> {
        if left.is_empty() {
            return Err(OperationError::InvalidInput("cross-section has no tapes".into()).into());
        }
        if left.len() != right.len() {
            return Err(OperationError::InvalidInput(format!(
                "{} left edges but {} right edges",
                left.len(),
                right.len()
            ))
            .into());
        }
        Ok(Self { left, right })
    }

    /// A stack of `num_tapes` tapes of the given `width`, centred on the base
    /// curve and spaced `spacing` apart along the binormal.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_tapes` is zero, `width` is not positive, or
    /// several tapes are requested with a non-positive spacing.
    pub fn stacked(width: f64, spacing: f64, num_tapes: usize) -> Result<Self> {
        if num_tapes == 0 {
            return Err(OperationError::InvalidInput("cross-section has no tapes".into()).into());
        }
        if width < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "tape width must be positive, got {width}"
            ))
            .into());
        }
        if num_tapes > 1 && spacing < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "tape spacing must be positive, got {spacing}"
            ))
            .into());
        }

        #[allow(clippy::cast_precision_loss)]
        let offsets = (0..num_tapes).map(|k| (k as f64 - 0.5 * (num_tapes - 1) as f64) * spacing);
        let (left, right) = offsets
            .map(|b| (Vector2::new(-0.5 * width, b), Vector2::new(0.5 * width, b)))
            .unzip();
        Ok(Self { left, right })
    }

    /// Number of tapes.
    #[must_use]
    pub fn num_tapes(&self) -> usize {
        self.left.len()
    }

    /// Left edge offset of tape `index`, if it exists.
    #[must_use]
    pub fn left(&self, index: usize) -> Option<&Vector2> {
        self.left.get(index)
    }

    /// Right edge offset of tape `index`, if it exists.
    #[must_use]
    pub fn right(&self, index: usize) -> Option<&Vector2> {
        self.right.get(index)
    }
}
