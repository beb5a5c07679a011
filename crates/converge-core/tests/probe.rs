// File: crates/converge-core/tests/probe.rs
// Purpose: Pointer -> value mapping, invalid clicks, policies and the overlay rule.

use converge_core::{LinearScale, PointerEvent, Probe, ProbePolicy, ProbeSurface, ScaleTransform};

/// Canvas at screen offset (10, 20); x scale maps canvas px 0 -> 0 and 300 -> 5.
struct TestSurface {
    scale: LinearScale,
}

impl TestSurface {
    fn new() -> Self { Self { scale: LinearScale::horizontal(0.0, 300.0, 0.0, 5.0) } }
}

impl ProbeSurface for TestSurface {
    fn to_canvas(&self, e: &PointerEvent) -> Option<(f32, f32)> {
        let (x, y) = (e.screen_x - 10.0, e.screen_y - 20.0);
        (x >= -100.0 && x <= 400.0 && y >= 0.0).then_some((x as f32, y as f32))
    }
    fn x_value_at(&self, px: f32) -> Option<f64> { self.scale.try_from_px(px) }
    fn x_domain(&self) -> (f64, f64) { (0.0, 5.0) }
}

#[test]
fn click_at_midpoint_reads_half_domain() {
    let mut p = Probe::new();
    assert!(!p.is_set());
    let v = p.on_pointer_event(&PointerEvent::at(160.0, 50.0), &TestSurface::new()).unwrap();
    assert!((v - 2.5).abs() < 1e-6);
    assert_eq!(p.value(), Some(v));
}

#[test]
fn invalid_click_keeps_previous_value() {
    let surface = TestSurface::new();
    let mut p = Probe::with_value(Some(1.5));
    // off the canvas entirely
    assert_eq!(p.on_pointer_event(&PointerEvent::at(150.0, -5.0), &surface), None);
    // non-finite pointer position
    assert_eq!(p.on_pointer_event(&PointerEvent::at(f64::NAN, 50.0), &surface), None);
    assert_eq!(p.value(), Some(1.5));
}

#[test]
fn later_clicks_overwrite() {
    let surface = TestSurface::new();
    let mut p = Probe::with_value(Some(1.5));
    p.on_pointer_event(&PointerEvent::at(70.0, 30.0), &surface);
    p.on_pointer_event(&PointerEvent::at(250.0, 30.0), &surface);
    let v = p.value().unwrap();
    assert!((v - 4.0).abs() < 1e-6);
}

#[test]
fn out_of_domain_policies() {
    let surface = TestSurface::new();
    // canvas px 360 -> value 6.0, past the domain
    let click = PointerEvent::at(370.0, 30.0);

    let mut accept = Probe::new();
    assert!((accept.on_pointer_event(&click, &surface).unwrap() - 6.0).abs() < 1e-6);

    let mut clamp = Probe::new().with_policy(ProbePolicy::Clamp);
    assert_eq!(clamp.on_pointer_event(&click, &surface), Some(5.0));

    let mut reject = Probe::with_value(Some(1.0)).with_policy(ProbePolicy::Reject);
    assert_eq!(reject.on_pointer_event(&click, &surface), None);
    assert_eq!(reject.value(), Some(1.0));
}

#[test]
fn overlay_spans_zero_to_sequence_length() {
    let surface = TestSurface::new();
    let mut p = Probe::new();
    assert!(p.overlay(50).is_none());
    let v = p.on_pointer_event(&PointerEvent::at(100.0, 30.0), &surface).unwrap();
    let rule = p.overlay(50).unwrap();
    assert_eq!(rule.data, vec![(v, 0.0), (v, 50.0)]);
}

/// Same canvas as `TestSurface`, but the plotted range is not known.
struct UnknownDomain(TestSurface, (f64, f64));

impl ProbeSurface for UnknownDomain {
    fn to_canvas(&self, e: &PointerEvent) -> Option<(f32, f32)> { self.0.to_canvas(e) }
    fn x_value_at(&self, px: f32) -> Option<f64> { self.0.x_value_at(px) }
    fn x_domain(&self) -> (f64, f64) { self.1 }
}

#[test]
fn non_finite_domain_ignores_bounded_policies() {
    let click = PointerEvent::at(160.0, 30.0);
    for domain in [(f64::NAN, 5.0), (f64::NAN, f64::NAN), (0.0, f64::INFINITY)] {
        let surface = UnknownDomain(TestSurface::new(), domain);
        for policy in [ProbePolicy::Clamp, ProbePolicy::Reject] {
            let mut p = Probe::with_value(Some(1.5)).with_policy(policy);
            assert_eq!(p.on_pointer_event(&click, &surface), None, "{policy:?} with {domain:?}");
            assert_eq!(p.value(), Some(1.5));
        }
        let mut accept = Probe::new();
        let v = accept.on_pointer_event(&click, &surface).unwrap();
        assert!((v - 2.5).abs() < 1e-6);
    }
}
