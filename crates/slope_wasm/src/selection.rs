//! Plain-Rust state behind the comparison page controls.

use anyhow::{Context, Result};
use serde::Serialize;
use slope_core::solvers::MethodKind;
use slope_core::types::Coordinate;

pub const MIN_STEP_SIZE: f64 = 0.0001;
pub const MAX_STEP_SIZE: f64 = 0.25;
pub const DEFAULT_STEP_SIZE: f64 = 0.1;

/// Step size typed into the page. Values outside
/// `[MIN_STEP_SIZE, MAX_STEP_SIZE]` are ignored and the previous one is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StepSizeInput {
    value: f64,
}

impl StepSizeInput {
    pub(crate) fn new() -> Self {
        Self {
            value: DEFAULT_STEP_SIZE,
        }
    }

    pub(crate) fn value(&self) -> f64 {
        self.value
    }

    /// Returns the step size in effect after the offer.
    pub(crate) fn offer(&mut self, raw: f64) -> f64 {
        if raw.is_finite() && (MIN_STEP_SIZE..=MAX_STEP_SIZE).contains(&raw) {
            self.value = raw;
        } else {
            log::debug!("ignoring step size {raw}, keeping {}", self.value);
        }
        self.value
    }
}

/// Selected methods, in the order they were switched on.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MethodSelection {
    selected: Vec<MethodKind>,
}

impl MethodSelection {
    /// Flips `id` on or off; returns whether it is selected afterwards.
    pub(crate) fn toggle(&mut self, id: &str) -> Result<bool> {
        let kind: MethodKind = id
            .parse()
            .with_context(|| format!("Cannot toggle method \"{id}\""))?;
        if let Some(pos) = self.selected.iter().position(|&k| k == kind) {
            self.selected.remove(pos);
            Ok(false)
        } else {
            self.selected.push(kind);
            Ok(true)
        }
    }

    pub(crate) fn methods(&self) -> &[MethodKind] {
        &self.selected
    }

    pub(crate) fn ids(&self) -> Vec<String> {
        self.selected.iter().map(|k| k.id().to_string()).collect()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub(crate) struct CatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
}

pub(crate) fn catalog_entries() -> Vec<CatalogEntry> {
    MethodKind::ALL
        .iter()
        .map(|kind| CatalogEntry {
            id: kind.id(),
            label: kind.label(),
        })
        .collect()
}

/// Interleaves the points as `[x0, y0, x1, y1, ...]`.
pub(crate) fn flatten(points: &[Coordinate<f64>]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}
