//! Turns a step method into a finite trajectory that ends on the domain bound.

use crate::error::SolverError;
use crate::solvers::MethodKind;
use crate::traits::{Problem, Scalar, StepMethod};
use crate::types::{Coordinate, Trajectory, TrajectorySettings};

/// Generates the clamped trajectory of `kind` with a freshly built method
/// instance, so multistep history never leaks between generations.
pub fn generate_trajectory<T: Scalar>(
    problem: &impl Problem<T>,
    kind: MethodKind,
    settings: &TrajectorySettings<T>,
) -> Result<Trajectory<T>, SolverError> {
    let mut method = kind.build::<T>();
    generate_with(problem, &mut method, settings)
}

/// Drives `method` from `settings.initial` until x reaches
/// `settings.upper_bound`, then clamps the last point onto the bound.
///
/// `method` must be freshly built: its `initialize` is called once here and
/// any state it keeps belongs to this generation only.
pub fn generate_with<T: Scalar, M: StepMethod<T>>(
    problem: &impl Problem<T>,
    method: &mut M,
    settings: &TrajectorySettings<T>,
) -> Result<Trajectory<T>, SolverError> {
    let h = settings.step_size;
    let bound = settings.upper_bound;
    validate(settings)?;

    let mut points = match method.initialize(problem, h, settings.initial)? {
        Some(prefix) if !prefix.is_empty() => prefix,
        _ => vec![settings.initial],
    };
    let mut current = points[points.len() - 1];

    loop {
        let next = method.step(problem, h, current)?;
        // Also catches NaN, which would otherwise never reach the bound.
        if !(next.x > current.x) || !next.x.is_finite() {
            return Err(SolverError::NonAdvancingStep {
                x: current.x.to_f64().unwrap_or(f64::NAN),
            });
        }
        points.push(next);
        current = next;
        if current.x >= bound {
            break;
        }
    }

    clamp_to_bound(&mut points, h, bound);
    log::debug!(
        "{}: {} points with h = {:?}",
        method.label(),
        points.len(),
        h
    );
    Ok(points)
}

fn validate<T: Scalar>(settings: &TrajectorySettings<T>) -> Result<(), SolverError> {
    let h = settings.step_size;
    if !(h > T::zero()) || !h.is_finite() {
        return Err(SolverError::InvalidStepSize(
            h.to_f64().unwrap_or(f64::NAN),
        ));
    }
    let start = settings.initial.x;
    let end = settings.upper_bound;
    if !start.is_finite() || !end.is_finite() {
        return Err(SolverError::InvalidDomain {
            start: start.to_f64().unwrap_or(f64::NAN),
            end: end.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

/// Replaces an overshooting last point with one on the bound, interpolated
/// along the last segment.
///
/// The slope is taken as `(last.y - prev.y) / h`, which assumes the last two
/// points are exactly one nominal step apart in x. Every shipped method
/// satisfies this; an uneven final gap would need the real x difference.
fn clamp_to_bound<T: Scalar>(points: &mut [Coordinate<T>], h: T, bound: T) {
    let n = points.len();
    if n < 2 || !(points[n - 1].x > bound) {
        return;
    }
    let last = points[n - 1];
    let prev = points[n - 2];
    let slope = (last.y - prev.y) / h;
    let clamped = Coordinate::new(bound, prev.y + slope * (bound - prev.x));
    log::debug!("clamped last point from x = {:?} onto {:?}", last.x, bound);
    points[n - 1] = clamped;
}
