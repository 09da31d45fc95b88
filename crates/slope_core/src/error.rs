use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),
    #[error("Domain [{start}, {end}] is not finite")]
    InvalidDomain { start: f64, end: f64 },
    #[error("Multistep method stepped before its history was initialized")]
    DegenerateHistory,
    #[error("Unknown method \"{0}\"")]
    UnknownMethod(String),
    #[error("{0} requires partial derivatives of f, but the problem provides none")]
    MissingDerivatives(&'static str),
    #[error("Problem has no closed-form solution to evaluate")]
    MissingExactSolution,
    #[error("Step from x = {x} did not advance x")]
    NonAdvancingStep { x: f64 },
}
