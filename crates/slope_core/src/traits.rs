use crate::error::SolverError;
use crate::types::{Coordinate, Partials};
use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in our problems and methods.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Converts an `f64` constant into `T`. Unrepresentable values become NaN,
/// which the trajectory driver rejects as a non-advancing step.
pub fn cast<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

/// A scalar first-order initial-value problem `y' = f(x, y)`.
pub trait Problem<T: Scalar> {
    /// Evaluates the right-hand side f(x, y).
    fn rhs(&self, x: T, y: T) -> T;

    /// Partial derivatives of f at (x, y). Only the Taylor methods need them.
    fn partials(&self, _x: T, _y: T) -> Option<Partials<T>> {
        None
    }

    /// Closed-form solution at x, if one is known.
    fn exact(&self, _x: T) -> Option<T> {
        None
    }

    /// Fixed initial condition of the problem.
    fn initial_point(&self) -> Coordinate<T>;

    /// Right end of the integration domain.
    fn upper_bound(&self) -> T;
}

/// A fixed-step method that advances a trajectory one point at a time.
pub trait StepMethod<T: Scalar> {
    /// Human-readable name shown next to the plotted series.
    fn label(&self) -> &'static str;

    /// Bootstraps any history the method needs before `step` is usable.
    /// Returns the prefix of the trajectory ending at the point stepping
    /// continues from, or `None` when `first` is the only seed.
    fn initialize(
        &mut self,
        _problem: &impl Problem<T>,
        _h: T,
        _first: Coordinate<T>,
    ) -> Result<Option<Vec<Coordinate<T>>>, SolverError> {
        Ok(None)
    }

    /// Performs one step of size h starting from `current`.
    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError>;
}
