//! Concrete problem definitions.

use crate::traits::{cast, Problem, Scalar};
use crate::types::{Coordinate, Partials};

/// `y' = 50·y·(x − 0.6)·(x − 0.85)`, `y(0) = 0.1` on `[0, 1]`.
///
/// The solution rises steeply, flattens between the two roots of the
/// coefficient and rises again, which makes the low-order methods drift
/// visibly at the step sizes the comparison page allows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceProblem;

impl ReferenceProblem {
    const GAIN: f64 = 50.0;
    const FIRST_ROOT: f64 = 0.6;
    const SECOND_ROOT: f64 = 0.85;
}

impl<T: Scalar> Problem<T> for ReferenceProblem {
    fn rhs(&self, x: T, y: T) -> T {
        let gain: T = cast(Self::GAIN);
        gain * y * (x - cast(Self::FIRST_ROOT)) * (x - cast(Self::SECOND_ROOT))
    }

    fn partials(&self, x: T, y: T) -> Option<Partials<T>> {
        let gain: T = cast(Self::GAIN);
        let a = x - cast(Self::FIRST_ROOT);
        let b = x - cast(Self::SECOND_ROOT);
        Some(Partials {
            df_dx: gain * b * y + gain * a * y,
            df_dy: gain * b * a,
            d2f_dx2: cast::<T>(2.0 * Self::GAIN) * y,
            d2f_dxdy: gain * b + gain * a,
        })
    }

    fn exact(&self, x: T) -> Option<T> {
        // Integral of 50(x - 0.6)(x - 0.85) from 0 to x, in Horner form.
        let exponent = x * (cast::<T>(50.0 / 3.0) * x * x - cast::<T>(36.25) * x + cast(25.5));
        Some(cast::<T>(0.1) * exponent.exp())
    }

    fn initial_point(&self) -> Coordinate<T> {
        Coordinate::new(T::zero(), cast(0.1))
    }

    fn upper_bound(&self) -> T {
        T::one()
    }
}
