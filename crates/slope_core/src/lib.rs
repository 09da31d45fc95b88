//! The `slope_core` crate compares fixed-step methods for a scalar first-order
//! initial-value problem `y' = f(x, y)` against its exact solution.
//! It is generic over the scalar type, so `f32` and `f64` both work.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `Problem` (right-hand side, partials, closed form), `StepMethod` (one step, optional bootstrap).
//! - **Solvers**: Euler, Heun ("Backward Euler"), Cauchy, RK4, Adams-Bashforth 4, Taylor 2/3 and the exact reference, resolved by `MethodKind`.
//! - **Trajectory**: the driver that steps a fresh method across the domain and clamps the last point onto the bound.
//! - **Series**: labelled, styled series for a plotting front end, with the reference curve cached.

pub mod error;
pub mod problem;
pub mod series;
pub mod solvers;
pub mod traits;
pub mod trajectory;
pub mod types;
