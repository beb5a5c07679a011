// File: crates/converge-core/src/probe.rs
// Summary: Click-driven probe: pointer event -> canvas pixel -> x value, kept as an overlay rule.

use serde::{Deserialize, Serialize};

use crate::series::Series;

/// Pointer event in screen (window) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub screen_x: f64,
    pub screen_y: f64,
}

impl PointerEvent {
    pub fn at(screen_x: f64, screen_y: f64) -> Self { Self { screen_x, screen_y } }
}

/// Renderer capabilities the probe depends on.
pub trait ProbeSurface {
    /// Screen -> canvas pixel position. `None` when the event is not over the canvas.
    fn to_canvas(&self, event: &PointerEvent) -> Option<(f32, f32)>;
    /// Invert the x scale at a canvas x coordinate. `None` when no value results.
    fn x_value_at(&self, canvas_x: f32) -> Option<f64>;
    /// Currently plotted x range `(min, max)`.
    fn x_domain(&self) -> (f64, f64);
}

/// What to do with a click whose value falls outside the plotted x range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbePolicy {
    /// Store the value as-is.
    #[default]
    Accept,
    /// Store the nearest in-range value.
    Clamp,
    /// Ignore the click.
    Reject,
}

/// Probe state: `None` is unset, `Some` once a value is known. Never cleared by clicks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Probe {
    value: Option<f64>,
    policy: ProbePolicy,
}

impl Probe {
    pub fn new() -> Self { Self::default() }

    pub fn with_value(value: Option<f64>) -> Self { Self { value, policy: ProbePolicy::Accept } }

    pub fn with_policy(mut self, policy: ProbePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn value(&self) -> Option<f64> { self.value }
    pub fn is_set(&self) -> bool { self.value.is_some() }
    pub fn policy(&self) -> ProbePolicy { self.policy }

    /// Map a pointer event to a data value and store it.
    /// Returns the stored value, or `None` when the click was ignored (state unchanged).
    pub fn on_pointer_event(&mut self, event: &PointerEvent, surface: &dyn ProbeSurface) -> Option<f64> {
        let (cx, _cy) = surface.to_canvas(event)?;
        let raw = surface.x_value_at(cx)?;
        let (lo, hi) = surface.x_domain();
        if self.policy != ProbePolicy::Accept && !(lo.is_finite() && hi.is_finite()) {
            tracing::debug!(lo, hi, "x domain not finite; click ignored");
            return None;
        }
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        let inside = raw >= lo && raw <= hi;
        let v = match self.policy {
            ProbePolicy::Accept => raw,
            ProbePolicy::Clamp => raw.clamp(lo, hi),
            ProbePolicy::Reject if !inside => {
                tracing::debug!(value = raw, "probe click outside x domain ignored");
                return None;
            }
            ProbePolicy::Reject => raw,
        };
        tracing::debug!(canvas_x = cx, value = v, previous = ?self.value, "probe set");
        self.value = Some(v);
        Some(v)
    }

    /// Overlay rule at the probe value from y = 0 to y = `sequence_len`.
    pub fn overlay(&self, sequence_len: usize) -> Option<Series> {
        self.value.map(|v| Series::vertical_rule("Probe", v, 0.0, sequence_len as f64))
    }
}
