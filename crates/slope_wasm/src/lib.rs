//! WASM bridge between `slope_core` and the comparison page, which owns the
//! method buttons, the step size box and the plot.

mod comparison;
mod selection;

pub use comparison::WasmComparison;
pub use selection::{DEFAULT_STEP_SIZE, MAX_STEP_SIZE, MIN_STEP_SIZE};

use wasm_bindgen::prelude::*;

/// Ids and labels of every method, in menu order.
#[wasm_bindgen]
pub fn method_catalog() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&selection::catalog_entries())
        .map_err(|err| JsValue::from_str(&format!("Failed to serialize catalog: {err}")))
}
