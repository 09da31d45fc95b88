//! Labelled series handed to a plotting front end.
//!
//! A [`Comparison`] owns one problem together with its exact reference curve,
//! computed once on a fine grid, and regenerates the approximate series for
//! whatever methods and step size are currently selected.

use crate::error::SolverError;
use crate::solvers::MethodKind;
use crate::traits::{cast, Problem, Scalar};
use crate::trajectory::generate_trajectory;
use crate::types::{Trajectory, TrajectorySettings};
use serde::Serialize;

/// Step size of the exact reference curve.
pub const REFERENCE_STEP: f64 = 0.005;

/// How the front end should draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesStyle {
    /// Thin grey line without point markers.
    Reference {
        color: &'static str,
        shadow_size: u32,
    },
    /// Line through the computed points, with markers of the given radius.
    Approximation { point_radius: u32 },
}

impl SeriesStyle {
    pub const REFERENCE: SeriesStyle = SeriesStyle::Reference {
        color: "rgb(150,150,150)",
        shadow_size: 0,
    };
    pub const APPROXIMATION: SeriesStyle = SeriesStyle::Approximation { point_radius: 3 };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<T> {
    pub method: MethodKind,
    pub label: &'static str,
    pub style: SeriesStyle,
    pub points: Trajectory<T>,
}

/// Receiver of generated series, e.g. a plot.
pub trait SeriesSink<T> {
    fn accept(&mut self, series: Series<T>);
}

impl<T> SeriesSink<T> for Vec<Series<T>> {
    fn accept(&mut self, series: Series<T>) {
        self.push(series);
    }
}

pub struct Comparison<P, T> {
    problem: P,
    reference: Series<T>,
}

impl<T: Scalar, P: Problem<T>> Comparison<P, T> {
    /// Computes the reference curve once; fails if the problem has no
    /// closed-form solution.
    pub fn new(problem: P) -> Result<Self, SolverError> {
        let settings = TrajectorySettings::for_problem(&problem, cast(REFERENCE_STEP));
        let points = generate_trajectory(&problem, MethodKind::Exact, &settings)?;
        log::debug!("reference curve computed with {} points", points.len());
        Ok(Self {
            problem,
            reference: Series {
                method: MethodKind::Exact,
                label: MethodKind::Exact.label(),
                style: SeriesStyle::REFERENCE,
                points,
            },
        })
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn reference(&self) -> &Series<T> {
        &self.reference
    }

    /// Generates one method's series at step size `h`.
    pub fn series(&self, method: MethodKind, h: T) -> Result<Series<T>, SolverError> {
        let settings = TrajectorySettings::for_problem(&self.problem, h);
        let points = generate_trajectory(&self.problem, method, &settings)?;
        Ok(Series {
            method,
            label: method.label(),
            style: SeriesStyle::APPROXIMATION,
            points,
        })
    }

    /// Sends the cached reference curve followed by one series per method,
    /// in the given order. Nothing reaches the sink if any method fails.
    pub fn replot(
        &self,
        methods: &[MethodKind],
        h: T,
        sink: &mut impl SeriesSink<T>,
    ) -> Result<(), SolverError> {
        let generated = methods
            .iter()
            .map(|&method| self.series(method, h))
            .collect::<Result<Vec<_>, _>>()?;

        sink.accept(self.reference.clone());
        for series in generated {
            sink.accept(series);
        }
        Ok(())
    }
}
