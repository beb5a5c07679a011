// File: crates/converge-core/src/lib.rs
// Summary: Core library entry point; converging-sequence generation, progressive reveal
// scheduling, probe mapping and headless chart rendering.

pub mod animation;
pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod playback;
pub mod probe;
pub mod scale;
pub mod sequence;
pub mod series;
pub mod theme;
pub mod view;

pub use animation::{build_animation, AxisAnimationSpec, Easing, Prop, ProgressiveReveal, RenderContext, RenderedValues};
pub use axis::Axis;
pub use chart::{CanvasPlacement, Chart, ChartSurface, RenderOptions};
pub use config::{ChartConfig, SequenceSpec};
pub use error::{ChartError, ChartResult};
pub use playback::{Frame, Playback};
pub use probe::{PointerEvent, Probe, ProbePolicy, ProbeSurface};
pub use scale::{LinearScale, ScaleTransform};
pub use sequence::{generate, generate_seeded, generate_with, Sequence};
pub use series::{Series, SeriesKind};
pub use theme::Theme;
pub use view::{ViewKind, ViewState};

/// Build the chart for one presentation of `seq`, with axes fitted to the data.
pub fn sequence_chart(seq: &Sequence, spec: &SequenceSpec, kind: ViewKind) -> Chart {
    let mut chart = Chart::new();
    let (series, y_label) = match kind {
        ViewKind::NumberLine => (Series::number_line(seq), ""),
        ViewKind::Diagram => (Series::diagram(seq), "n"),
    };
    chart.title = match kind {
        ViewKind::NumberLine => "Number line".to_string(),
        ViewKind::Diagram => "Diagram".to_string(),
    };
    chart.x_axis = Axis::new("Value", 0.0, 1.0);
    chart.y_axis = Axis::new(y_label, 0.0, 1.0);
    chart.target = Some(spec.target);
    chart.add_series(series);
    ViewState::fit(seq, spec.target, kind).apply_to_chart(&mut chart);
    chart
}
