// File: crates/converge-core/tests/sequence.rs
// Purpose: Length, envelope and convergence properties of the generator.

use converge_core::sequence::{envelope, generate, generate_seeded};
use converge_core::SequenceSpec;

fn spec() -> SequenceSpec {
    SequenceSpec { target: 2.0, oscillation_range: 1.5, convergence_speed: 1.0, sequence_length: 200 }
}

#[test]
fn length_matches_spec() {
    let s = spec();
    assert_eq!(generate(&s).len(), 200);
    let empty = SequenceSpec { sequence_length: 0, ..s };
    assert!(generate(&empty).is_empty());
}

#[test]
fn every_term_within_its_envelope() {
    let s = spec();
    for seed in 0..20 {
        let seq = generate_seeded(&s, seed);
        for (k, &v) in seq.values().iter().enumerate() {
            let n = k + 1;
            assert!((v - s.target).abs() <= envelope(&s, n) + 1e-12, "term {n} = {v} escapes envelope");
        }
        // first term bounded by the full range
        assert!((seq.values()[0] - s.target).abs() <= s.oscillation_range);
    }
}

#[test]
fn envelope_strictly_decreases() {
    let s = SequenceSpec { convergence_speed: 0.5, ..spec() };
    for n in 1..100 {
        assert!(envelope(&s, n + 1) < envelope(&s, n));
    }
    assert_eq!(envelope(&s, 1), s.oscillation_range);
}

#[test]
fn unseeded_calls_differ() {
    let s = spec();
    assert_ne!(generate(&s), generate(&s));
}

#[test]
fn seeded_calls_repeat() {
    let s = spec();
    assert_eq!(generate_seeded(&s, 42), generate_seeded(&s, 42));
    assert_ne!(generate_seeded(&s, 42), generate_seeded(&s, 43));
}

#[test]
fn tail_sits_closer_to_target_than_head() {
    let s = spec();
    let tenth = s.sequence_length / 10;
    let mut tail_wins = 0;
    for seed in 0..50 {
        let seq = generate_seeded(&s, seed);
        let v = seq.values();
        let dist = |xs: &[f64]| xs.iter().map(|x| (x - s.target).abs()).sum::<f64>() / xs.len() as f64;
        if dist(&v[v.len() - tenth..]) < dist(&v[..tenth]) {
            tail_wins += 1;
        }
    }
    assert!(tail_wins >= 45, "tail closer in only {tail_wins}/50 trials");
}

#[test]
fn presentations_reshape_values() {
    let seq = generate_seeded(&spec(), 1);
    let line = seq.number_line_points();
    let diag = seq.diagram_points();
    assert!(line.iter().all(|&(_, y)| y == 0.0));
    assert_eq!(diag[0].1, 1.0);
    assert_eq!(diag[199].1, 200.0);
    assert_eq!(diag[5].0, seq.values()[5]);
}
