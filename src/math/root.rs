use crate::error::{NumericalError, Result};

/// Number of secant (false-position) iterations before switching to bisection.
pub const SECANT_ITERATIONS: usize = 20;

/// Total iteration budget of [`refine_root`], secant steps included.
pub const MAX_REFINE_ITERATIONS: usize = 200;

/// Maximum number of increments taken by [`bracket_root`].
pub const MAX_BRACKET_STEPS: usize = 100;

/// An interval whose endpoints carry function values of opposite sign
/// (or where one of them is already a root).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// First endpoint.
    pub lo: f64,
    /// Function value at `lo`.
    pub f_lo: f64,
    /// Second endpoint.
    pub hi: f64,
    /// Function value at `hi`.
    pub f_hi: f64,
}

/// Result of a successful root refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    /// The root estimate.
    pub root: f64,
    /// Function value at `root`.
    pub residual: f64,
    /// Number of function evaluations spent refining.
    pub iterations: usize,
}

/// Finds a sign change of `f` starting at `start`, stepping by `step`.
///
/// The search point grows as `start + k * step` for `k = 1, 2, ...` until
/// `f(start) * f(point) <= 0`.
///
/// # Errors
///
/// Returns [`NumericalError::NoBracket`] if no sign change is found within
/// [`MAX_BRACKET_STEPS`] increments, and propagates errors from `f`.
pub fn bracket_root<F>(f: &mut F, start: f64, step: f64) -> Result<Bracket>
where
    F: FnMut(f64) -> Result<f64>,
{
    let f_lo = f(start)?;
    let mut hi = start;
    let mut f_hi = f_lo;
    let mut steps = 0;
    while f_lo * f_hi > 0.0 {
        if steps == MAX_BRACKET_STEPS {
            return Err(NumericalError::NoBracket { start, steps }.into());
        }
        hi += step;
        f_hi = f(hi)?;
        steps += 1;
    }
    Ok(Bracket {
        lo: start,
        f_lo,
        hi,
        f_hi,
    })
}

/// Refines a bracketed root until `|f| <= tolerance`.
///
/// Takes false-position steps (secant through the bracket endpoints) for the
/// first [`SECANT_ITERATIONS`] iterations and bisects afterwards.
///
/// After each evaluation the endpoint whose value has the same sign as the
/// newest one is replaced, so the bracket always encloses the root.
///
/// # Errors
///
/// Returns [`NumericalError::DidNotConverge`] when the iteration budget is
/// exhausted, and propagates errors from `f`.
pub fn refine_root<F>(f: &mut F, bracket: Bracket, tolerance: f64) -> Result<RootResult>
where
    F: FnMut(f64) -> Result<f64>,
{
    let Bracket {
        mut lo,
        mut f_lo,
        mut hi,
        mut f_hi,
    } = bracket;

    for iteration in 0..MAX_REFINE_ITERATIONS {
        let denom = f_hi - f_lo;
        let t = if iteration < SECANT_ITERATIONS && denom.abs() > f64::MIN_POSITIVE {
            lo - f_lo * (hi - lo) / denom
        } else {
            0.5 * (lo + hi)
        };

        let f_t = f(t)?;
        if f_t.abs() <= tolerance {
            return Ok(RootResult {
                root: t,
                residual: f_t,
                iterations: iteration + 1,
            });
        }

        if f_lo * f_t < 0.0 {
            hi = t;
            f_hi = f_t;
        } else {
            lo = t;
            f_lo = f_t;
        }
    }

    Err(NumericalError::DidNotConverge {
        iterations: MAX_REFINE_ITERATIONS,
        residual: f_lo.abs().min(f_hi.abs()),
    }
    .into())
}
