// File: crates/converge-core/src/chart.rs
// Summary: Chart struct and headless rendering (PNG bytes / RGBA) using Skia CPU raster surfaces,
// plus the canvas-facing probe surface.

use skia_safe as skia;

use crate::error::{ChartError, ChartResult};
use crate::geometry::{Insets, RectI32, HEIGHT, WIDTH};
use crate::playback::Frame;
use crate::probe::{PointerEvent, ProbeSurface};
use crate::scale::{LinearScale, ScaleTransform};
use crate::series::{Series, SeriesKind};
use crate::theme::Theme;
use crate::Axis;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub draw_labels: bool,
    pub point_radius: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            point_radius: 3.5,
        }
    }
}

impl RenderOptions {
    pub fn plot_rect(&self) -> RectI32 {
        RectI32::inset(self.width, self.height, &self.insets)
    }
}

pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Probe rule drawn beneath the scatter series.
    pub overlay: Option<Series>,
    /// Optional reference line at the convergence target.
    pub target: Option<f64>,
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            overlay: None,
            target: None,
        }
    }

    pub fn add_series(&mut self, series: Series) -> usize {
        self.series.push(series);
        self.series.len() - 1
    }

    pub fn set_overlay(&mut self, overlay: Option<Series>) {
        self.overlay = overlay;
    }

    pub fn x_scale(&self, opts: &RenderOptions) -> LinearScale {
        let r = opts.plot_rect();
        LinearScale::horizontal(r.left as f32, r.right as f32, self.x_axis.min, self.x_axis.max)
    }

    pub fn y_scale(&self, opts: &RenderOptions) -> LinearScale {
        let r = opts.plot_rect();
        LinearScale::vertical(r.top as f32, r.bottom as f32, self.y_axis.min, self.y_axis.max)
    }

    /// Final pixel positions of a series' points, in index order.
    pub fn pixel_targets(&self, series_index: usize, opts: &RenderOptions) -> Vec<(f32, f32)> {
        let (sx, sy) = (self.x_scale(opts), self.y_scale(opts));
        self.series
            .get(series_index)
            .map(|s| s.data.iter().map(|&(x, y)| (sx.to_px(x), sy.to_px(y))).collect())
            .unwrap_or_default()
    }

    /// Labels of the plotted series, in drawing order; unlabeled series are skipped.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).filter(|l| !l.is_empty()).collect()
    }

    /// Render the static chart to a PNG at `output_png_path`.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> ChartResult<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> ChartResult<Vec<u8>> {
        self.render_frame_png_bytes(opts, None)
    }

    /// Render with the animated series drawn from `frame` instead of its final positions.
    #[tracing::instrument(skip_all, fields(w = opts.width, h = opts.height, animated = frame.is_some()))]
    pub fn render_frame_png_bytes(&self, opts: &RenderOptions, frame: Option<&Frame>) -> ChartResult<Vec<u8>> {
        let mut surface = self.raster(opts, frame)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| ChartError::render("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Returns `(pixels, width, height, stride)` with unpremultiplied RGBA8 pixels.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> ChartResult<(Vec<u8>, i32, i32, usize)> {
        self.render_frame_rgba8(opts, None)
    }

    pub fn render_frame_rgba8(&self, opts: &RenderOptions, frame: Option<&Frame>) -> ChartResult<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.raster(opts, frame)?;
        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut px = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            return Err(ChartError::render("read_pixels failed"));
        }
        Ok((px, opts.width, opts.height, stride))
    }

    fn raster(&self, opts: &RenderOptions, frame: Option<&Frame>) -> ChartResult<skia::Surface> {
        if opts.width <= 0 || opts.height <= 0 {
            return Err(ChartError::render(format!("invalid surface size {}x{}", opts.width, opts.height)));
        }
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| ChartError::render("failed to create raster surface"))?;
        self.paint(surface.canvas(), opts, frame);
        Ok(surface)
    }

    fn paint(&self, canvas: &skia::Canvas, opts: &RenderOptions, frame: Option<&Frame>) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let r = opts.plot_rect();
        let (sx, sy) = (self.x_scale(opts), self.y_scale(opts));

        draw_grid(canvas, r, theme);
        draw_axes(canvas, r, theme);
        if opts.draw_labels {
            draw_labels(canvas, r, self, theme);
        }

        canvas.save();
        canvas.clip_rect(skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32), skia::ClipOp::Intersect, true);

        if let Some(t) = self.target {
            let x = sx.to_px(t);
            let mut paint = stroke(theme.target_line, 1.0);
            paint.set_path_effect(skia::PathEffect::dash(&[6.0, 4.0], 0.0));
            canvas.draw_line((x, r.top as f32), (x, r.bottom as f32), &paint);
        }

        // overlay sits beneath the scatter points
        if let Some(rule) = &self.overlay {
            draw_rule(canvas, &sx, &sy, rule, theme.probe);
        }

        for (idx, s) in self.series.iter().enumerate() {
            match s.kind {
                SeriesKind::Scatter => match frame.filter(|f| f.series_index == idx) {
                    Some(f) => draw_points(canvas, f.visible_points().map(|(_, x, y)| (x, y)), opts.point_radius, theme.point),
                    None => draw_points(
                        canvas,
                        s.data.iter().map(|&(x, y)| (sx.to_px(x), sy.to_px(y))),
                        opts.point_radius,
                        theme.point,
                    ),
                },
                SeriesKind::Rule => draw_rule(canvas, &sx, &sy, s, theme.axis_line),
            }
        }
        canvas.restore();
    }
}

// ---- probe surface ----------------------------------------------------------

/// Where the canvas sits on screen and how large it is displayed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasPlacement {
    pub left: f64,
    pub top: f64,
    pub display_width: f64,
    pub display_height: f64,
}

impl CanvasPlacement {
    /// Canvas at the screen origin, displayed at its pixel size.
    pub fn at_origin(opts: &RenderOptions) -> Self {
        Self { left: 0.0, top: 0.0, display_width: opts.width as f64, display_height: opts.height as f64 }
    }
}

/// A rendered chart as seen by pointer input.
pub struct ChartSurface<'a> {
    pub chart: &'a Chart,
    pub opts: &'a RenderOptions,
    pub placement: CanvasPlacement,
}

impl<'a> ChartSurface<'a> {
    pub fn new(chart: &'a Chart, opts: &'a RenderOptions, placement: CanvasPlacement) -> Self {
        Self { chart, opts, placement }
    }
}

impl ProbeSurface for ChartSurface<'_> {
    fn to_canvas(&self, event: &PointerEvent) -> Option<(f32, f32)> {
        let p = &self.placement;
        let rx = event.screen_x - p.left;
        let ry = event.screen_y - p.top;
        if !(rx.is_finite() && ry.is_finite()) || p.display_width <= 0.0 || p.display_height <= 0.0 {
            return None;
        }
        if rx < 0.0 || ry < 0.0 || rx > p.display_width || ry > p.display_height {
            return None;
        }
        let kx = self.opts.width as f64 / p.display_width;
        let ky = self.opts.height as f64 / p.display_height;
        Some(((rx * kx) as f32, (ry * ky) as f32))
    }

    fn x_value_at(&self, canvas_x: f32) -> Option<f64> {
        self.chart.x_scale(self.opts).try_from_px(canvas_x)
    }

    fn x_domain(&self) -> (f64, f64) {
        (self.chart.x_axis.min, self.chart.x_axis.max)
    }
}

// ---- helpers ----------------------------------------------------------------

fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn draw_grid(canvas: &skia::Canvas, r: RectI32, theme: &Theme) {
    let paint = stroke(theme.grid, 1.0);
    for x in linspace(r.left as f64, r.right as f64, 11) {
        canvas.draw_line((x as f32, r.top as f32), (x as f32, r.bottom as f32), &paint);
    }
    for y in linspace(r.top as f64, r.bottom as f64, 6) {
        canvas.draw_line((r.left as f32, y as f32), (r.right as f32, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, r: RectI32, theme: &Theme) {
    let paint = stroke(theme.axis_line, 1.5);
    let (l, t, rr, b) = (r.left as f32, r.top as f32, r.right as f32, r.bottom as f32);
    canvas.draw_line((l, b), (rr, b), &paint);
    canvas.draw_line((l, t), (l, b), &paint);
}

fn draw_labels(canvas: &skia::Canvas, r: RectI32, chart: &Chart, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(theme.axis_label);
    let mut font = skia::Font::default();
    font.set_size(12.0);

    let (l, t, rr, b) = (r.left as f32, r.top as f32, r.right as f32, r.bottom as f32);
    let xs = linspace(chart.x_axis.min, chart.x_axis.max, 6);
    for (v, px) in xs.iter().zip(linspace(l as f64, rr as f64, 6)) {
        canvas.draw_str(format!("{v:.2}"), (px as f32 - 12.0, b + 16.0), &font, &paint);
    }
    let ys = linspace(chart.y_axis.min, chart.y_axis.max, 6);
    for (v, py) in ys.iter().zip(linspace(b as f64, t as f64, 6)) {
        canvas.draw_str(format!("{v:.1}"), (l - 40.0, py as f32 + 4.0), &font, &paint);
    }

    font.set_size(14.0);
    canvas.draw_str(&chart.x_axis.label, (rr - 60.0, b + 36.0), &font, &paint);
    canvas.draw_str(&chart.y_axis.label, (l - 56.0, t - 6.0), &font, &paint);
    if !chart.title.is_empty() {
        canvas.draw_str(&chart.title, (l + 8.0, t + 16.0), &font, &paint);
    }
    font.set_size(12.0);
    let mut y = t + 16.0;
    for label in chart.legend_labels() {
        canvas.draw_str(label, (rr - 120.0, y), &font, &paint);
        y += 16.0;
    }
    if let Some(rule) = &chart.overlay {
        if let Some(&(v, _)) = rule.data.first() {
            paint.set_color(theme.probe);
            canvas.draw_str(format!("probe = {v:.3}"), (rr - 120.0, y), &font, &paint);
        }
    }
}

fn draw_points(canvas: &skia::Canvas, points: impl Iterator<Item = (f32, f32)>, radius: f32, color: skia::Color) {
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(color);
    for (x, y) in points {
        canvas.draw_circle((x, y), radius, &fill);
    }
}

fn draw_rule(canvas: &skia::Canvas, sx: &LinearScale, sy: &LinearScale, rule: &Series, color: skia::Color) {
    if let [(x0, y0), (x1, y1), ..] = rule.data[..] {
        let paint = stroke(color, 2.0);
        canvas.draw_line((sx.to_px(x0), sy.to_px(y0)), (sx.to_px(x1), sy.to_px(y1)), &paint);
    }
}
