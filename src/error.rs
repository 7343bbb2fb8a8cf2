use thiserror::Error;

/// Top-level error type for the coil geometry crate.
#[derive(Debug, Error)]
pub enum CctError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Numerical(#[from] NumericalError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by the numerical kernels (root finding, linear solves).
#[derive(Debug, Error)]
pub enum NumericalError {
    #[error("no sign change found after {steps} bracket steps from t = {start}")]
    NoBracket { start: f64, steps: usize },

    #[error("root refinement did not converge after {iterations} iterations (residual {residual:e})")]
    DidNotConverge { iterations: usize, residual: f64 },

    #[error("ill-conditioned boundary system: {0}")]
    SingularSystem(String),
}

/// Errors related to topological bookkeeping.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`CctError`].
pub type Result<T> = std::result::Result<T, CctError>;
