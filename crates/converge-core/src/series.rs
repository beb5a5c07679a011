// File: crates/converge-core/src/series.rs
// Summary: Series model for the scatter presentations and straight overlay rules.

use crate::sequence::Sequence;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesKind {
    Scatter,
    Rule,      // straight segment between its first two points (probe overlay)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub kind: SeriesKind,
    pub label: String,
    pub data: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(kind: SeriesKind, label: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { kind, label: label.into(), data }
    }

    /// Sequence values on a 1-D number line (constant y).
    pub fn number_line(seq: &Sequence) -> Self {
        Self::new(SeriesKind::Scatter, "Sequence", seq.number_line_points())
    }

    /// Sequence values against their 1-based index.
    pub fn diagram(seq: &Sequence) -> Self {
        Self::new(SeriesKind::Scatter, "Sequence", seq.diagram_points())
    }

    /// Vertical rule at `x` spanning `[y0, y1]`.
    pub fn vertical_rule(label: impl Into<String>, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(SeriesKind::Rule, label, vec![(x, y0), (x, y1)])
    }

    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}
