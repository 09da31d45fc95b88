//! WASM wrapper around the method comparison shown on the page.

use crate::selection::{flatten, MethodSelection, StepSizeInput};
use js_sys::Float64Array;
use slope_core::problem::ReferenceProblem;
use slope_core::series::{Comparison, Series};
use slope_core::solvers::MethodKind;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmComparison {
    comparison: Comparison<ReferenceProblem, f64>,
    pub(crate) selection: MethodSelection,
    pub(crate) step: StepSizeInput,
}

impl WasmComparison {
    pub(crate) fn build() -> anyhow::Result<Self> {
        let comparison = Comparison::new(ReferenceProblem)?;
        Ok(Self {
            comparison,
            selection: MethodSelection::default(),
            step: StepSizeInput::new(),
        })
    }

    /// Reference curve plus the selected methods at the current step size.
    pub(crate) fn current_series(&self) -> anyhow::Result<Vec<Series<f64>>> {
        let mut series = Vec::with_capacity(self.selection.methods().len() + 1);
        self.comparison
            .replot(self.selection.methods(), self.step.value(), &mut series)?;
        Ok(series)
    }

    pub(crate) fn flat_trajectory(&self, id: &str) -> anyhow::Result<Vec<f64>> {
        let kind: MethodKind = id.parse()?;
        let series = self.comparison.series(kind, self.step.value())?;
        Ok(flatten(&series.points))
    }
}

#[wasm_bindgen]
impl WasmComparison {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmComparison, JsValue> {
        console_error_panic_hook::set_once();
        Self::build().map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    pub fn step_size(&self) -> f64 {
        self.step.value()
    }

    /// Accepts `raw` if it lies in the allowed range and returns the step
    /// size in effect afterwards.
    pub fn set_step_size(&mut self, raw: f64) -> f64 {
        self.step.offer(raw)
    }

    pub fn toggle_method(&mut self, id: &str) -> Result<bool, JsValue> {
        self.selection
            .toggle(id)
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    pub fn selected_methods(&self) -> Vec<String> {
        self.selection.ids()
    }

    pub fn replot(&self) -> Result<JsValue, JsValue> {
        let series = self
            .current_series()
            .map_err(|e| JsValue::from_str(&format!("Replot failed: {e:#}")))?;
        serde_wasm_bindgen::to_value(&series)
            .map_err(|err| JsValue::from_str(&format!("Failed to serialize series: {err}")))
    }

    /// Points of one method at the current step size, as `[x0, y0, x1, y1, ...]`.
    pub fn trajectory(&self, id: &str) -> Result<Float64Array, JsValue> {
        let flat = self
            .flat_trajectory(id)
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        Ok(Float64Array::from(flat.as_slice()))
    }
}
