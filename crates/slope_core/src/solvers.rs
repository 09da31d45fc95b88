use crate::error::SolverError;
use crate::traits::{cast, Problem, Scalar, StepMethod};
use crate::types::{Coordinate, HistoryBuffer, Partials};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Reference curve: evaluates the closed-form solution at x + h.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolution;

impl<T: Scalar> StepMethod<T> for ExactSolution {
    fn label(&self) -> &'static str {
        MethodKind::Exact.label()
    }

    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        let x_next = current.x + h;
        let y_next = problem
            .exact(x_next)
            .ok_or(SolverError::MissingExactSolution)?;
        Ok(Coordinate::new(x_next, y_next))
    }
}

/// Explicit (forward) Euler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl<T: Scalar> StepMethod<T> for Euler {
    fn label(&self) -> &'static str {
        MethodKind::Euler.label()
    }

    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        let Coordinate { x, y } = current;
        Ok(Coordinate::new(x + h, y + h * problem.rhs(x, y)))
    }
}

/// Heun's trapezoidal predictor-corrector. Explicit, despite the label it is
/// shown under.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackwardEuler;

impl<T: Scalar> StepMethod<T> for BackwardEuler {
    fn label(&self) -> &'static str {
        MethodKind::BackwardEuler.label()
    }

    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        let Coordinate { x, y } = current;
        let half: T = cast(0.5);
        let x_next = x + h;

        let f0 = problem.rhs(x, y);
        // predictor: full Euler step
        let y_predictor = y + h * f0;
        // corrector: trapezoid over both ends
        let y_next = y + h * half * (f0 + problem.rhs(x_next, y_predictor));
        Ok(Coordinate::new(x_next, y_next))
    }
}

/// Midpoint predictor-corrector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cauchy;

impl<T: Scalar> StepMethod<T> for Cauchy {
    fn label(&self) -> &'static str {
        MethodKind::Cauchy.label()
    }

    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        let Coordinate { x, y } = current;
        let half: T = cast(0.5);

        // predictor: half Euler step to the midpoint
        let y_predictor = y + h * half * problem.rhs(x, y);
        // corrector: full step with the midpoint slope
        let y_next = y + h * problem.rhs(x + h * half, y_predictor);
        Ok(Coordinate::new(x + h, y_next))
    }
}

/// Classic Runge-Kutta 4th Order Method
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

impl RungeKutta4 {
    fn advance<T: Scalar>(problem: &impl Problem<T>, h: T, current: Coordinate<T>) -> Coordinate<T> {
        let half: T = cast(0.5);
        let sixth: T = cast(1.0 / 6.0);
        let two: T = cast(2.0);
        let Coordinate { x, y } = current;

        // k1 = f(x, y)
        let k1 = problem.rhs(x, y);
        // k2 = f(x + h/2, y + h*k1/2)
        let k2 = problem.rhs(x + h * half, y + h * half * k1);
        // k3 = f(x + h/2, y + h*k2/2)
        let k3 = problem.rhs(x + h * half, y + h * half * k2);
        // k4 = f(x + h, y + h*k3)
        let k4 = problem.rhs(x + h, y + h * k3);

        // y_next = y + h/6 * (k1 + 2k2 + 2k3 + k4)
        let y_next = y + h * sixth * (k1 + two * k2 + two * k3 + k4);
        Coordinate::new(x + h, y_next)
    }
}

impl<T: Scalar> StepMethod<T> for RungeKutta4 {
    fn label(&self) -> &'static str {
        MethodKind::RungeKutta4.label()
    }

    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        Ok(Self::advance(problem, h, current))
    }
}

/// Four-step Adams-Bashforth.
///
/// The history window is bootstrapped with three RK4 steps by `initialize`
/// and then slides one point per `step`. A fresh instance is required for
/// every trajectory; the driver builds one from [`MethodKind`] on each call.
#[derive(Debug, Clone)]
pub struct Adams4<T: Scalar> {
    history: Option<HistoryBuffer<T>>,
}

// Not derived: that would add a `T: Default` bound.
impl<T: Scalar> Default for Adams4<T> {
    fn default() -> Self {
        Self { history: None }
    }
}

impl<T: Scalar> Adams4<T> {
    pub fn history(&self) -> Option<&HistoryBuffer<T>> {
        self.history.as_ref()
    }
}

impl<T: Scalar> StepMethod<T> for Adams4<T> {
    fn label(&self) -> &'static str {
        MethodKind::Adams4.label()
    }

    fn initialize(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        first: Coordinate<T>,
    ) -> Result<Option<Vec<Coordinate<T>>>, SolverError> {
        let p1 = RungeKutta4::advance(problem, h, first);
        let p2 = RungeKutta4::advance(problem, h, p1);
        let p3 = RungeKutta4::advance(problem, h, p2);
        let history = HistoryBuffer::new([first, p1, p2, p3]);
        self.history = Some(history);
        Ok(Some(history.points().to_vec()))
    }

    /// Steps from the newest history point; `current` is expected to be that
    /// same point and is otherwise ignored.
    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        _current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        let history = self.history.as_mut().ok_or(SolverError::DegenerateHistory)?;
        let f = |p: &Coordinate<T>| problem.rhs(p.x, p.y);
        let [p0, p1, p2, p3] = history.points();

        let combination = cast::<T>(55.0 / 24.0) * f(p3) - cast::<T>(59.0 / 24.0) * f(p2)
            + cast::<T>(37.0 / 24.0) * f(p1)
            - cast::<T>(9.0 / 24.0) * f(p0);
        let next = Coordinate::new(p3.x + h, p3.y + h * combination);

        history.push(next);
        Ok(next)
    }
}

fn require_partials<T: Scalar>(
    problem: &impl Problem<T>,
    method: MethodKind,
    x: T,
    y: T,
) -> Result<Partials<T>, SolverError> {
    problem
        .partials(x, y)
        .ok_or(SolverError::MissingDerivatives(method.label()))
}

/// Second-order Taylor series method.
#[derive(Debug, Clone, Copy, Default)]
pub struct Taylor2;

impl<T: Scalar> StepMethod<T> for Taylor2 {
    fn label(&self) -> &'static str {
        MethodKind::Taylor2.label()
    }

    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        let Coordinate { x, y } = current;
        let d = require_partials(problem, MethodKind::Taylor2, x, y)?;
        let f = problem.rhs(x, y);
        let half: T = cast(0.5);

        let y_next = y + h * f + h * h * half * (d.df_dx + d.df_dy * f);
        Ok(Coordinate::new(x + h, y_next))
    }
}

/// Third-order Taylor series method.
#[derive(Debug, Clone, Copy, Default)]
pub struct Taylor3;

impl<T: Scalar> StepMethod<T> for Taylor3 {
    fn label(&self) -> &'static str {
        MethodKind::Taylor3.label()
    }

    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        let Coordinate { x, y } = current;
        let d = require_partials(problem, MethodKind::Taylor3, x, y)?;
        let f = problem.rhs(x, y);
        let half: T = cast(0.5);
        let sixth: T = cast(1.0 / 6.0);
        let two: T = cast(2.0);

        // total derivative of f along the solution
        let d1 = d.df_dx + d.df_dy * f;
        let d2 = d.d2f_dx2 + two * d.d2f_dxdy * f + d.df_dy * d1;
        let y_next = y + h * f + h * h * half * d1 + h * h * h * sixth * d2;
        Ok(Coordinate::new(x + h, y_next))
    }
}

/// Identifier of a stepping method, resolvable from its string id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Exact,
    Euler,
    BackwardEuler,
    Cauchy,
    RungeKutta4,
    Adams4,
    Taylor2,
    Taylor3,
}

impl MethodKind {
    /// Every method, in menu order.
    pub const ALL: [MethodKind; 8] = [
        MethodKind::Exact,
        MethodKind::Euler,
        MethodKind::BackwardEuler,
        MethodKind::Cauchy,
        MethodKind::RungeKutta4,
        MethodKind::Adams4,
        MethodKind::Taylor2,
        MethodKind::Taylor3,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MethodKind::Exact => "exact",
            MethodKind::Euler => "euler",
            MethodKind::BackwardEuler => "backward-euler",
            MethodKind::Cauchy => "cauchy",
            MethodKind::RungeKutta4 => "rk4",
            MethodKind::Adams4 => "adams4",
            MethodKind::Taylor2 => "taylor2",
            MethodKind::Taylor3 => "taylor3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MethodKind::Exact => "Exact solution",
            MethodKind::Euler => "Euler method",
            MethodKind::BackwardEuler => "Backward Euler method",
            MethodKind::Cauchy => "Cauchy method",
            MethodKind::RungeKutta4 => "Fourth-order Runge–Kutta method",
            MethodKind::Adams4 => "Fourth-order Adams method",
            MethodKind::Taylor2 => "Second-order Taylor method",
            MethodKind::Taylor3 => "Third-order Taylor method",
        }
    }

    /// Builds a fresh method instance with empty history.
    pub fn build<T: Scalar>(self) -> Method<T> {
        match self {
            MethodKind::Exact => Method::Exact(ExactSolution),
            MethodKind::Euler => Method::Euler(Euler),
            MethodKind::BackwardEuler => Method::BackwardEuler(BackwardEuler),
            MethodKind::Cauchy => Method::Cauchy(Cauchy),
            MethodKind::RungeKutta4 => Method::RungeKutta4(RungeKutta4),
            MethodKind::Adams4 => Method::Adams4(Adams4::default()),
            MethodKind::Taylor2 => Method::Taylor2(Taylor2),
            MethodKind::Taylor3 => Method::Taylor3(Taylor3),
        }
    }
}

impl FromStr for MethodKind {
    type Err = SolverError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        MethodKind::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| SolverError::UnknownMethod(id.to_string()))
    }
}

/// Serialized as its [`MethodKind::id`].
impl Serialize for MethodKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for MethodKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        id.parse::<MethodKind>().map_err(serde::de::Error::custom)
    }
}

/// A method instance, dispatched by variant.
#[derive(Debug, Clone)]
pub enum Method<T: Scalar> {
    Exact(ExactSolution),
    Euler(Euler),
    BackwardEuler(BackwardEuler),
    Cauchy(Cauchy),
    RungeKutta4(RungeKutta4),
    Adams4(Adams4<T>),
    Taylor2(Taylor2),
    Taylor3(Taylor3),
}

impl<T: Scalar> Method<T> {
    pub fn kind(&self) -> MethodKind {
        match self {
            Method::Exact(_) => MethodKind::Exact,
            Method::Euler(_) => MethodKind::Euler,
            Method::BackwardEuler(_) => MethodKind::BackwardEuler,
            Method::Cauchy(_) => MethodKind::Cauchy,
            Method::RungeKutta4(_) => MethodKind::RungeKutta4,
            Method::Adams4(_) => MethodKind::Adams4,
            Method::Taylor2(_) => MethodKind::Taylor2,
            Method::Taylor3(_) => MethodKind::Taylor3,
        }
    }
}

impl<T: Scalar> StepMethod<T> for Method<T> {
    fn label(&self) -> &'static str {
        self.kind().label()
    }

    fn initialize(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        first: Coordinate<T>,
    ) -> Result<Option<Vec<Coordinate<T>>>, SolverError> {
        match self {
            Method::Adams4(s) => s.initialize(problem, h, first),
            _ => Ok(None),
        }
    }

    fn step(
        &mut self,
        problem: &impl Problem<T>,
        h: T,
        current: Coordinate<T>,
    ) -> Result<Coordinate<T>, SolverError> {
        match self {
            Method::Exact(s) => s.step(problem, h, current),
            Method::Euler(s) => s.step(problem, h, current),
            Method::BackwardEuler(s) => s.step(problem, h, current),
            Method::Cauchy(s) => s.step(problem, h, current),
            Method::RungeKutta4(s) => s.step(problem, h, current),
            Method::Adams4(s) => s.step(problem, h, current),
            Method::Taylor2(s) => s.step(problem, h, current),
            Method::Taylor3(s) => s.step(problem, h, current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ReferenceProblem;

    /// y' = y, y(0) = 1, without partials or a closed form.
    struct Growth;

    impl Problem<f64> for Growth {
        fn rhs(&self, _x: f64, y: f64) -> f64 {
            y
        }

        fn initial_point(&self) -> Coordinate<f64> {
            Coordinate::new(0.0, 1.0)
        }

        fn upper_bound(&self) -> f64 {
            1.0
        }
    }

    fn f(x: f64, y: f64) -> f64 {
        50.0 * y * (x - 0.6) * (x - 0.85)
    }

    fn start() -> Coordinate<f64> {
        Coordinate::new(0.0, 0.1)
    }

    #[test]
    fn euler_first_step_matches_formula() {
        let next = Euler
            .step(&ReferenceProblem, 0.1, start())
            .expect("euler step");
        assert!((next.x - 0.1).abs() < 1e-15);
        assert!((next.y - (0.1 + 0.1 * f(0.0, 0.1))).abs() < 1e-15);
        assert!((next.y - 0.355).abs() < 1e-12);
    }

    #[test]
    fn predictor_corrector_steps_match_formulas() {
        let h = 0.05;
        let Coordinate { x, y } = start();

        let heun = BackwardEuler
            .step(&ReferenceProblem, h, start())
            .expect("heun step");
        let predictor = y + h * f(x, y);
        let expected = y + h / 2.0 * (f(x, y) + f(x + h, predictor));
        assert!((heun.y - expected).abs() < 1e-14);

        let cauchy = Cauchy
            .step(&ReferenceProblem, h, start())
            .expect("cauchy step");
        let predictor = y + h / 2.0 * f(x, y);
        let expected = y + h * f(x + h / 2.0, predictor);
        assert!((cauchy.y - expected).abs() < 1e-14);
        assert!((cauchy.x - h).abs() < 1e-15);
    }

    #[test]
    fn taylor_methods_match_exponential_series() {
        // For y' = y every derivative equals y, so the Taylor steps reduce to
        // truncated exponential series.
        struct GrowthWithPartials;

        impl Problem<f64> for GrowthWithPartials {
            fn rhs(&self, _x: f64, y: f64) -> f64 {
                y
            }

            fn partials(&self, _x: f64, _y: f64) -> Option<Partials<f64>> {
                Some(Partials {
                    df_dx: 0.0,
                    df_dy: 1.0,
                    d2f_dx2: 0.0,
                    d2f_dxdy: 0.0,
                })
            }

            fn initial_point(&self) -> Coordinate<f64> {
                Coordinate::new(0.0, 1.0)
            }

            fn upper_bound(&self) -> f64 {
                1.0
            }
        }

        let h = 0.2;
        let origin = Coordinate::new(0.0, 1.0);
        let second = Taylor2
            .step(&GrowthWithPartials, h, origin)
            .expect("taylor2 step");
        let third = Taylor3
            .step(&GrowthWithPartials, h, origin)
            .expect("taylor3 step");

        assert!((second.y - (1.0 + h + h * h / 2.0)).abs() < 1e-14);
        assert!((third.y - (1.0 + h + h * h / 2.0 + h * h * h / 6.0)).abs() < 1e-14);
    }

    #[test]
    fn taylor_methods_require_partials() {
        let origin = Growth.initial_point();
        assert_eq!(
            Taylor2.step(&Growth, 0.1, origin),
            Err(SolverError::MissingDerivatives("Second-order Taylor method"))
        );
        assert!(matches!(
            Taylor3.step(&Growth, 0.1, origin),
            Err(SolverError::MissingDerivatives(_))
        ));
    }

    #[test]
    fn exact_solution_requires_closed_form() {
        let result = StepMethod::<f64>::step(&mut ExactSolution, &Growth, 0.1, Growth.initial_point());
        assert_eq!(result, Err(SolverError::MissingExactSolution));

        let next = ExactSolution
            .step(&ReferenceProblem, 0.25, start())
            .expect("exact step");
        assert_eq!(next.x, 0.25);
        assert_eq!(Some(next.y), ReferenceProblem.exact(0.25));
    }

    #[test]
    fn adams4_step_without_history_is_rejected() {
        let mut adams = Adams4::<f64>::default();
        assert_eq!(
            adams.step(&ReferenceProblem, 0.1, start()),
            Err(SolverError::DegenerateHistory)
        );
    }

    #[test]
    fn adams4_bootstrap_uses_three_rk4_steps() {
        let h = 0.1;
        let mut adams = Adams4::<f64>::default();
        let prefix = adams
            .initialize(&ReferenceProblem, h, start())
            .expect("bootstrap")
            .expect("adams4 returns a prefix");

        let mut expected = vec![start()];
        for _ in 0..3 {
            let last = *expected.last().expect("non-empty");
            expected.push(
                RungeKutta4
                    .step(&ReferenceProblem, h, last)
                    .expect("rk4 step"),
            );
        }
        assert_eq!(prefix, expected);
        assert_eq!(
            adams.history().expect("history").points().to_vec(),
            expected
        );
    }

    #[test]
    fn adams4_step_applies_formula_and_slides_history() {
        let h = 0.05;
        let mut adams = Adams4::<f64>::default();
        let prefix = adams
            .initialize(&ReferenceProblem, h, start())
            .expect("bootstrap")
            .expect("prefix");
        let fp = |i: usize| f(prefix[i].x, prefix[i].y);

        let next = adams
            .step(&ReferenceProblem, h, prefix[3])
            .expect("adams step");
        let expected = prefix[3].y
            + h * (55.0 / 24.0 * fp(3) - 59.0 / 24.0 * fp(2) + 37.0 / 24.0 * fp(1)
                - 9.0 / 24.0 * fp(0));
        assert!((next.x - (prefix[3].x + h)).abs() < 1e-15);
        assert!((next.y - expected).abs() < 1e-12);

        let history = adams.history().expect("history");
        assert_eq!(history.points()[0], prefix[1]);
        assert_eq!(history.newest(), next);
    }

    #[test]
    fn method_kind_resolves_ids_and_labels() {
        for kind in MethodKind::ALL {
            assert_eq!(kind.id().parse::<MethodKind>(), Ok(kind));
            assert_eq!(kind.build::<f64>().kind(), kind);
            assert_eq!(kind.build::<f64>().label(), kind.label());
        }
        assert_eq!(
            "Adams4".parse::<MethodKind>(),
            Err(SolverError::UnknownMethod("Adams4".to_string()))
        );
    }

    #[test]
    fn method_kind_serde_uses_ids() {
        use serde::de::value::{Error as ValueError, StrDeserializer};
        use serde::de::IntoDeserializer;

        for kind in MethodKind::ALL {
            let de: StrDeserializer<ValueError> = kind.id().into_deserializer();
            assert_eq!(MethodKind::deserialize(de), Ok(kind));
        }

        let de: StrDeserializer<ValueError> = "runge-kutta4".into_deserializer();
        let err = MethodKind::deserialize(de).expect_err("unknown id");
        assert!(err.to_string().contains("Unknown method"), "{err}");
    }

    #[test]
    fn single_step_methods_skip_bootstrap() {
        for kind in MethodKind::ALL {
            let mut method = kind.build::<f64>();
            let prefix = method
                .initialize(&ReferenceProblem, 0.1, start())
                .expect("initialize");
            assert_eq!(prefix.is_some(), kind == MethodKind::Adams4, "{kind:?}");
        }
    }
}
