// File: crates/converge-core/src/scale.rs
// Summary: Linear value <-> pixel transforms for the horizontal and vertical axes.

/// Data-space coordinate.
pub type Value = f64;

/// Forward and inverse mapping between data values and canvas pixels.
pub trait ScaleTransform {
    fn to_px(&self, v: Value) -> f32;
    fn from_px(&self, px: f32) -> Value;

    /// Inverse mapping that reports "no value" instead of producing NaN/inf.
    fn try_from_px(&self, px: f32) -> Option<Value> {
        if !px.is_finite() { return None; }
        let v = self.from_px(px);
        v.is_finite().then_some(v)
    }
}

/// Linear scale mapping `[vmin, vmax]` onto the pixel span `[px_start, px_end]`.
///
/// The span may run in either direction: horizontal scales go left→right,
/// vertical scales are built with `px_start = bottom` so larger values sit higher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub px_start: f32,
    pub px_end: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl LinearScale {
    pub fn new(px_start: f32, px_end: f32, vmin: Value, vmax: Value) -> Self {
        Self { px_start, px_end, vmin, vmax }
    }

    /// Horizontal scale over `[left, right]`.
    pub fn horizontal(left_px: f32, right_px: f32, vmin: Value, vmax: Value) -> Self {
        Self::new(left_px, right_px, vmin, vmax)
    }

    /// Vertical scale over `[top, bottom]`, with `vmin` at the bottom.
    pub fn vertical(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        Self::new(bottom_px, top_px, vmin, vmax)
    }

    #[inline]
    fn px_span(&self) -> f64 { (self.px_end - self.px_start) as f64 }
}

impl ScaleTransform for LinearScale {
    #[inline]
    fn to_px(&self, v: Value) -> f32 {
        let span = self.vmax - self.vmin;
        if span.abs() < 1e-12 { return self.px_start; }
        self.px_start + (((v - self.vmin) / span) * self.px_span()) as f32
    }

    #[inline]
    fn from_px(&self, px: f32) -> Value {
        // zero-width span yields NaN; try_from_px turns that into None
        let span = self.px_span();
        if span.abs() < 1e-9 { return f64::NAN; }
        self.vmin + ((px - self.px_start) as f64 / span) * (self.vmax - self.vmin)
    }
}
