//! Plain value types shared by problems, methods and the trajectory driver.

use crate::traits::{Problem, Scalar};
use serde::{Deserialize, Serialize};

/// A point `(x, y)` of a trajectory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate<T> {
    pub x: T,
    pub y: T,
}

impl<T> Coordinate<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type Trajectory<T> = Vec<Coordinate<T>>;

/// First and second partial derivatives of f needed by the Taylor methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partials<T> {
    pub df_dx: T,
    pub df_dy: T,
    pub d2f_dx2: T,
    pub d2f_dxdy: T,
}

/// Inputs of a single trajectory generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrajectorySettings<T> {
    pub step_size: T,
    pub initial: Coordinate<T>,
    pub upper_bound: T,
}

impl<T: Scalar> TrajectorySettings<T> {
    /// Settings starting at the problem's own initial condition and domain end.
    pub fn for_problem(problem: &impl Problem<T>, step_size: T) -> Self {
        Self {
            step_size,
            initial: problem.initial_point(),
            upper_bound: problem.upper_bound(),
        }
    }

    pub fn with_upper_bound(self, upper_bound: T) -> Self {
        Self {
            upper_bound,
            ..self
        }
    }
}

/// Fixed-size window of the four most recent points, oldest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryBuffer<T> {
    points: [Coordinate<T>; 4],
}

impl<T: Copy> HistoryBuffer<T> {
    pub fn new(points: [Coordinate<T>; 4]) -> Self {
        Self { points }
    }

    /// Evicts the oldest point and appends `point` as the newest.
    pub fn push(&mut self, point: Coordinate<T>) {
        self.points.rotate_left(1);
        self.points[3] = point;
    }

    pub fn newest(&self) -> Coordinate<T> {
        self.points[3]
    }

    pub fn points(&self) -> &[Coordinate<T>; 4] {
        &self.points
    }
}
