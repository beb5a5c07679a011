// File: crates/converge-core/src/view.rs
// Visible ranges for the two presentations of a sequence.

use crate::sequence::Sequence;
use crate::Chart;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Values along a single horizontal line.
    NumberLine,
    /// Values (x) against their index (y).
    Diagram,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Ranges fitted to `seq` for `kind`. The x range always includes `target`.
    pub fn fit(seq: &Sequence, target: f64, kind: ViewKind) -> Self {
        let (mut x_min, mut x_max) = seq.extent().unwrap_or((target, target));
        x_min = x_min.min(target);
        x_max = x_max.max(target);
        if (x_max - x_min).abs() < 1e-9 {
            x_min -= 0.5;
            x_max += 0.5;
        }
        let xm = (x_max - x_min) * 0.05;
        let (y_min, y_max) = match kind {
            ViewKind::NumberLine => (-1.0, 1.0),
            ViewKind::Diagram => (0.0, (seq.len() as f64).max(1.0) + 1.0),
        };
        Self { x_min: x_min - xm, x_max: x_max + xm, y_min, y_max }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }
}
