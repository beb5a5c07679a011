// File: crates/converge-core/src/playback.rs
// Summary: Renderer-side animation loop. Applies a ProgressiveReveal's delays, durations and
// start values to per-point pixel targets and samples the live positions at a given time.

use crate::animation::{Prop, ProgressiveReveal, RenderContext, RenderedValues};
use crate::scale::{LinearScale, ScaleTransform};

/// Live pixel positions of one animated series. NaN marks a point not drawn yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub series_index: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Frame {
    pub fn len(&self) -> usize { self.x.len() }
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    pub fn point(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(i)?, *self.y.get(i)?))
    }

    /// Points with finite coordinates, as `(index, x_px, y_px)`.
    pub fn visible_points(&self) -> impl Iterator<Item = (usize, f32, f32)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .enumerate()
            .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
            .map(|(i, (&x, &y))| (i, x as f32, y as f32))
    }

    pub fn visible_count(&self) -> usize { self.visible_points().count() }

    fn slot_mut(&mut self, prop: Prop, i: usize) -> &mut f64 {
        match prop {
            Prop::X => &mut self.x[i],
            Prop::Y => &mut self.y[i],
        }
    }
}

impl RenderedValues for Frame {
    fn current_rendered_value(&self, series_index: usize, point_index: usize, prop: Prop) -> f64 {
        if series_index != self.series_index { return f64::NAN; }
        let v = match prop {
            Prop::X => self.x.get(point_index),
            Prop::Y => self.y.get(point_index),
        };
        v.copied().unwrap_or(f64::NAN)
    }
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    start_ms: f64,
    duration_ms: f64,
    /// Resolved when the delay elapses; `None` until then.
    from: Option<f64>,
    to: f64,
    done: bool,
}

/// Drives one scatter series through its reveal schedule.
///
/// Time is supplied by the caller (`advance_to`); the loop never reads a clock.
#[derive(Clone, Debug)]
pub struct Playback {
    reveal: ProgressiveReveal,
    y_scale: LinearScale,
    targets: Vec<(f32, f32)>,
    x: Vec<Tween>,
    y: Vec<Tween>,
    frame: Frame,
    elapsed_ms: f64,
}

impl Playback {
    /// Start a pass at t = 0 toward `targets` (pixel positions, index order).
    pub fn new(reveal: ProgressiveReveal, series_index: usize, targets: Vec<(f32, f32)>, y_scale: LinearScale) -> Self {
        let n = targets.len();
        let mut pb = Self {
            reveal,
            y_scale,
            targets,
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            frame: Frame { series_index, x: Vec::new(), y: Vec::new() },
            elapsed_ms: 0.0,
        };
        pb.begin_pass(0.0);
        pb
    }

    pub fn reveal(&self) -> &ProgressiveReveal { &self.reveal }
    pub fn frame(&self) -> &Frame { &self.frame }
    pub fn elapsed_ms(&self) -> f64 { self.elapsed_ms }

    pub fn is_finished(&self) -> bool {
        self.x.iter().chain(&self.y).all(|t| t.done)
    }

    /// Time at which the last tween lands.
    pub fn finish_time_ms(&self) -> f64 {
        self.x.iter().chain(&self.y).map(|t| t.start_ms + t.duration_ms).fold(0.0, f64::max)
    }

    fn ctx(&self, point_index: usize) -> RenderContext {
        RenderContext::Data { series_index: self.frame.series_index, point_index }
    }

    fn initial_y(&self) -> f64 {
        self.y_scale.to_px(crate::animation::REVEAL_BASELINE_VALUE) as f64
    }

    fn begin_pass(&mut self, now: f64) {
        let n = self.targets.len();
        let y0 = self.initial_y();
        self.frame.x = vec![f64::NAN; n];
        self.frame.y = vec![y0; n];
        self.x.clear();
        self.y.clear();
        for i in 0..n {
            let ctx = self.ctx(i);
            let (tx, ty) = self.targets[i];
            for (prop, to) in [(Prop::X, tx as f64), (Prop::Y, ty as f64)] {
                let delay = self.reveal.delay(prop, ctx);
                let tween = Tween { start_ms: now + delay, duration_ms: self.reveal.duration(prop), from: None, to, done: false };
                match prop {
                    Prop::X => self.x.push(tween),
                    Prop::Y => self.y.push(tween),
                }
            }
        }
        self.elapsed_ms = now;
        tracing::debug!(points = n, finish_ms = self.finish_time_ms(), "playback pass started");
    }

    /// Sample the animation at `t_ms`. Points are stepped in index order so a chained start
    /// value sees its predecessor's position at the same instant.
    pub fn advance_to(&mut self, t_ms: f64) -> &Frame {
        self.elapsed_ms = t_ms;
        for i in 0..self.targets.len() {
            for prop in [Prop::X, Prop::Y] {
                self.step(prop, i, t_ms);
            }
        }
        &self.frame
    }

    fn step(&mut self, prop: Prop, i: usize, t_ms: f64) {
        let mut tw = match prop {
            Prop::X => self.x[i],
            Prop::Y => self.y[i],
        };
        if tw.done || t_ms < tw.start_ms { return; }
        let from = match tw.from {
            Some(f) => f,
            None => {
                let current = self.frame.current_rendered_value(self.frame.series_index, i, prop);
                let f = self.reveal.from_value(prop, self.ctx(i), &self.frame, &self.y_scale).unwrap_or(current);
                tw.from = Some(f);
                f
            }
        };
        let progress = if tw.duration_ms <= 0.0 { 1.0 } else { (t_ms - tw.start_ms) / tw.duration_ms };
        let value = if progress >= 1.0 {
            tw.done = true;
            tw.to
        } else {
            let e = self.reveal.spec(prop).easing.apply(progress);
            from + (tw.to - from) * e
        };
        *self.frame.slot_mut(prop, i) = value;
        match prop {
            Prop::X => self.x[i] = tw,
            Prop::Y => self.y[i] = tw,
        }
    }

    /// Replay from index 0 with fresh started flags, beginning at `now`.
    pub fn restart(&mut self, now: f64) {
        self.reveal.reset();
        self.begin_pass(now);
    }

    /// Move to new pixel targets (e.g. after a resize) without restarting the reveal.
    /// Already-started points re-evaluate their delay (0) and glide from where they are;
    /// points still waiting keep their slot and simply aim at the new target.
    pub fn retarget(&mut self, targets: Vec<(f32, f32)>, y_scale: LinearScale, now: f64) {
        self.y_scale = y_scale;
        if targets.len() != self.targets.len() {
            // different point count: the old schedule no longer applies
            let total = self.reveal.total_duration_ms();
            self.reveal = crate::animation::build_animation(targets.len(), total);
            self.targets = targets;
            self.begin_pass(now);
            return;
        }
        for i in 0..targets.len() {
            let ctx = self.ctx(i);
            let (tx, ty) = targets[i];
            for (prop, to) in [(Prop::X, tx as f64), (Prop::Y, ty as f64)] {
                let delay = self.reveal.delay(prop, ctx);
                let duration = self.reveal.duration(prop);
                let current = self.frame.current_rendered_value(self.frame.series_index, i, prop);
                let tw = match prop {
                    Prop::X => &mut self.x[i],
                    Prop::Y => &mut self.y[i],
                };
                if tw.from.is_some() {
                    *tw = Tween { start_ms: now + delay, duration_ms: duration, from: Some(current), to, done: false };
                } else {
                    tw.start_ms = tw.start_ms.max(now + delay);
                    tw.to = to;
                }
            }
        }
        self.targets = targets;
        self.elapsed_ms = now;
    }
}
