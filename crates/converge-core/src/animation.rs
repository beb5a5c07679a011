// File: crates/converge-core/src/animation.rs
// Summary: Progressive-reveal scheduler. Produces per-point delay/duration/start parameters
// for the renderer's interpolation loop so points appear one at a time, each sliding out of
// the previous one.

use serde::{Deserialize, Serialize};

use crate::scale::ScaleTransform;

/// Vertical value the first point slides in from (mapped through the y scale).
pub const REVEAL_BASELINE_VALUE: f64 = 100.0;

/// Animated point property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
        }
    }
}

/// Where a property's interpolation starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StartValue {
    /// NaN start: the renderer skips the point until the animation lands.
    Hidden,
    /// Point 0 starts at `baseline` (data space); point i starts at point i-1's live value.
    Chained { baseline: f64 },
}

/// Per-property animation parameters handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAnimationSpec {
    pub duration_ms: f64,
    pub easing: Easing,
    pub from: StartValue,
}

/// Which element the renderer is asking about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderContext {
    Data { series_index: usize, point_index: usize },
    /// Legend swatches and other non-data elements.
    Legend,
}

/// Renderer capability: the live, currently-rendered pixel value of a point property.
pub trait RenderedValues {
    fn current_rendered_value(&self, series_index: usize, point_index: usize, prop: Prop) -> f64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointState {
    pub started: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointTiming {
    pub delay_ms: f64,
    pub duration_ms: f64,
}

/// Reveal schedule for one scatter series.
///
/// Delay for point `i` is `i * per_point_delay` the first time it is asked for; afterwards
/// the point is marked started and later evaluations (reflows, retargets) return 0.
#[derive(Clone, Debug)]
pub struct ProgressiveReveal {
    point_count: usize,
    total_duration_ms: f64,
    per_point_delay: f64,
    x: AxisAnimationSpec,
    y: AxisAnimationSpec,
    x_states: Vec<PointState>,
    y_states: Vec<PointState>,
}

/// Build the reveal schedule for `point_count` points over `total_duration_ms`.
/// Zero points yields an empty schedule with zero delay and duration.
pub fn build_animation(point_count: usize, total_duration_ms: f64) -> ProgressiveReveal {
    let per_point_delay = if point_count == 0 { 0.0 } else { total_duration_ms / point_count as f64 };
    tracing::debug!(point_count, total_duration_ms, per_point_delay, "built progressive reveal");
    ProgressiveReveal {
        point_count,
        total_duration_ms,
        per_point_delay,
        x: AxisAnimationSpec { duration_ms: per_point_delay, easing: Easing::Linear, from: StartValue::Hidden },
        y: AxisAnimationSpec {
            duration_ms: per_point_delay,
            easing: Easing::Linear,
            from: StartValue::Chained { baseline: REVEAL_BASELINE_VALUE },
        },
        x_states: vec![PointState::default(); point_count],
        y_states: vec![PointState::default(); point_count],
    }
}

impl ProgressiveReveal {
    pub fn point_count(&self) -> usize { self.point_count }
    pub fn total_duration_ms(&self) -> f64 { self.total_duration_ms }
    pub fn per_point_delay(&self) -> f64 { self.per_point_delay }

    /// No points: nothing to animate.
    pub fn is_noop(&self) -> bool { self.point_count == 0 }

    pub fn spec(&self, prop: Prop) -> &AxisAnimationSpec {
        match prop {
            Prop::X => &self.x,
            Prop::Y => &self.y,
        }
    }

    pub fn duration(&self, prop: Prop) -> f64 { self.spec(prop).duration_ms }

    pub fn state(&self, prop: Prop, index: usize) -> Option<PointState> {
        self.states(prop).get(index).copied()
    }

    fn states(&self, prop: Prop) -> &[PointState] {
        match prop {
            Prop::X => &self.x_states,
            Prop::Y => &self.y_states,
        }
    }

    fn states_mut(&mut self, prop: Prop) -> &mut [PointState] {
        match prop {
            Prop::X => &mut self.x_states,
            Prop::Y => &mut self.y_states,
        }
    }

    /// Delay callback. First evaluation per point returns its scheduled delay and marks it
    /// started; later evaluations return 0. Non-data contexts always return 0.
    pub fn delay(&mut self, prop: Prop, ctx: RenderContext) -> f64 {
        let RenderContext::Data { point_index, .. } = ctx else { return 0.0 };
        let per_point = self.per_point_delay;
        match self.states_mut(prop).get_mut(point_index) {
            Some(st) if !st.started => {
                st.started = true;
                point_index as f64 * per_point
            }
            _ => 0.0,
        }
    }

    /// Start value for a point property, in pixels.
    /// `None` means "keep whatever the renderer already has" (non-data contexts).
    pub fn from_value<S: ScaleTransform + ?Sized>(
        &self,
        prop: Prop,
        ctx: RenderContext,
        rendered: &dyn RenderedValues,
        y_scale: &S,
    ) -> Option<f64> {
        let RenderContext::Data { series_index, point_index } = ctx else { return None };
        match self.spec(prop).from {
            StartValue::Hidden => Some(f64::NAN),
            StartValue::Chained { baseline } => {
                if point_index == 0 {
                    Some(y_scale.to_px(baseline) as f64)
                } else {
                    Some(rendered.current_rendered_value(series_index, point_index - 1, prop))
                }
            }
        }
    }

    /// Scheduled timing of a point, without touching the started flags.
    pub fn timing(&self, index: usize) -> Option<PointTiming> {
        (index < self.point_count).then(|| PointTiming {
            delay_ms: index as f64 * self.per_point_delay,
            duration_ms: self.per_point_delay,
        })
    }

    /// Full derived schedule.
    pub fn schedule(&self) -> Vec<PointTiming> {
        (0..self.point_count).filter_map(|i| self.timing(i)).collect()
    }

    /// Clear all started flags so the next pass replays from index 0.
    pub fn reset(&mut self) {
        self.x_states.iter_mut().chain(self.y_states.iter_mut()).for_each(|s| *s = PointState::default());
    }
}
