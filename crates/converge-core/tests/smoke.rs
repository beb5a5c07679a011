// File: crates/converge-core/tests/smoke.rs
// Purpose: End-to-end render smoke tests (PNG bytes, RGBA buffer, animated frame, probe overlay).

use converge_core::{
    build_animation, generate_seeded, sequence_chart, CanvasPlacement, ChartSurface, Playback, PointerEvent, Probe,
    RenderOptions, SequenceSpec, ViewKind,
};

fn spec() -> SequenceSpec {
    SequenceSpec { target: 1.0, oscillation_range: 1.0, convergence_speed: 1.0, sequence_length: 30 }
}

#[test]
fn render_both_views_png() {
    let s = spec();
    let seq = generate_seeded(&s, 3);
    let mut opts = RenderOptions::default();
    opts.draw_labels = false;
    for kind in [ViewKind::NumberLine, ViewKind::Diagram] {
        let chart = sequence_chart(&seq, &s, kind);
        let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
        assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
        let img = image::load_from_memory(&bytes).expect("decode png");
        assert_eq!((img.width() as i32, img.height() as i32), (opts.width, opts.height));
    }
}

#[test]
fn render_png_file() {
    let s = spec();
    let chart = sequence_chart(&generate_seeded(&s, 4), &s, ViewKind::Diagram);
    let out = std::path::PathBuf::from("target/test_out/smoke_diagram.png");
    chart.render_to_png(&RenderOptions::default(), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn render_rgba8_buffer() {
    let s = spec();
    let chart = sequence_chart(&generate_seeded(&s, 5), &s, ViewKind::NumberLine);
    let mut opts = RenderOptions::default();
    opts.width = 320;
    opts.height = 200;
    opts.draw_labels = false;
    let (px, w, h, stride) = chart.render_to_rgba8(&opts).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);
    // background is opaque
    assert_eq!(px[3], 255);
}

#[test]
fn animated_frame_starts_empty() {
    let s = spec();
    let chart = sequence_chart(&generate_seeded(&s, 6), &s, ViewKind::Diagram);
    let mut opts = RenderOptions::default();
    opts.width = 320;
    opts.height = 200;
    opts.draw_labels = false;
    let targets = chart.pixel_targets(0, &opts);
    let mut pb = Playback::new(build_animation(targets.len(), 1500.0), 0, targets, chart.y_scale(&opts));

    let first = chart.render_frame_rgba8(&opts, Some(pb.advance_to(0.0))).expect("first frame").0;
    let empty = {
        let mut bare = sequence_chart(&generate_seeded(&s, 6), &s, ViewKind::Diagram);
        bare.series.clear();
        bare.render_to_rgba8(&opts).expect("bare").0
    };
    assert_eq!(first, empty, "no points should be drawn at t=0");

    let last = chart.render_frame_rgba8(&opts, Some(pb.advance_to(1500.0))).expect("last frame").0;
    let settled = chart.render_to_rgba8(&opts).expect("static").0;
    assert_eq!(last, settled, "final frame equals the static render");
}

#[test]
fn click_on_rendered_chart_sets_overlay() {
    let s = spec();
    let seq = generate_seeded(&s, 7);
    let mut chart = sequence_chart(&seq, &s, ViewKind::Diagram);
    let opts = RenderOptions::default();
    let mut probe = Probe::new();

    let r = opts.plot_rect();
    let mid_x = (r.left + r.right) as f64 / 2.0;
    let mid_y = (r.top + r.bottom) as f64 / 2.0;
    let placement = CanvasPlacement { left: 50.0, top: 80.0, ..CanvasPlacement::at_origin(&opts) };
    let v = {
        let surface = ChartSurface::new(&chart, &opts, placement);
        probe.on_pointer_event(&PointerEvent::at(mid_x + 50.0, mid_y + 80.0), &surface).expect("valid click")
    };
    let want = (chart.x_axis.min + chart.x_axis.max) / 2.0;
    assert!((v - want).abs() < 1e-3, "v = {v}, want {want}");

    // outside the canvas: ignored
    {
        let surface = ChartSurface::new(&chart, &opts, placement);
        assert!(probe.on_pointer_event(&PointerEvent::at(10.0, 10.0), &surface).is_none());
    }
    assert_eq!(probe.value(), Some(v));

    chart.set_overlay(probe.overlay(seq.len()));
    let rule = chart.overlay.as_ref().expect("overlay");
    assert_eq!(rule.data, vec![(v, 0.0), (v, seq.len() as f64)]);
    let bytes = chart.render_to_png_bytes(&opts).expect("render with overlay");
    assert!(!bytes.is_empty());
}

#[test]
fn click_on_half_size_display_maps_to_canvas() {
    let s = spec();
    let chart = sequence_chart(&generate_seeded(&s, 8), &s, ViewKind::Diagram);
    let opts = RenderOptions::default();
    let placement = CanvasPlacement {
        left: 0.0,
        top: 0.0,
        display_width: opts.width as f64 / 2.0,
        display_height: opts.height as f64 / 2.0,
    };
    let surface = ChartSurface::new(&chart, &opts, placement);

    let r = opts.plot_rect();
    let mid_x = (r.left + r.right) as f64 / 2.0 / 2.0;
    let mid_y = (r.top + r.bottom) as f64 / 2.0 / 2.0;
    let mut probe = Probe::new();
    let v = probe.on_pointer_event(&PointerEvent::at(mid_x, mid_y), &surface).expect("valid click");
    let want = (chart.x_axis.min + chart.x_axis.max) / 2.0;
    assert!((v - want).abs() < 1e-3, "v = {v}, want {want}");

    // inside the full canvas size but past the displayed width
    assert!(probe.on_pointer_event(&PointerEvent::at(opts.width as f64 * 0.75, mid_y), &surface).is_none());
    assert_eq!(probe.value(), Some(v));
}

#[test]
fn legend_lists_labeled_series() {
    let s = spec();
    let mut chart = sequence_chart(&generate_seeded(&s, 9), &s, ViewKind::NumberLine);
    assert_eq!(chart.legend_labels(), vec!["Sequence"]);
    chart.add_series(converge_core::Series::vertical_rule("", 1.0, 0.0, 1.0));
    assert_eq!(chart.legend_labels(), vec!["Sequence"]);

    let bytes = chart.render_to_png_bytes(&RenderOptions::default()).expect("render with legend");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
