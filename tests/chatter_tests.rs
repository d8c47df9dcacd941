// Host-side tests for the debate chatter voices.

use katharos_core::{
    phrase_gap_bounds, AudioRequest, DebateChatter, CHATTER_DETUNE_HZ, CHATTER_PHRASES,
    CHATTER_VOICES,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: f64 = 1.0 / 60.0;

#[test]
fn gap_bounds_cover_every_phrase_pause() {
    let (lo, hi) = phrase_gap_bounds();
    assert!((lo - 0.2).abs() < 1e-9);
    assert!((hi - 0.9).abs() < 1e-9);
}

#[test]
fn inactive_chatter_is_silent() {
    let mut chatter = DebateChatter::new();
    let mut rng = StdRng::seed_from_u64(1);
    let mut out = Vec::new();
    for f in 0..600 {
        chatter.tick(f as f64 * FRAME, &mut rng, &mut out);
    }
    assert!(out.is_empty());
    assert_eq!(chatter.phrases(), 0);
}

#[test]
fn voices_enter_staggered() {
    let mut chatter = DebateChatter::new();
    let mut rng = StdRng::seed_from_u64(2);
    let mut out = Vec::new();
    chatter.set_active(true, 5.0);
    assert_eq!(chatter.voices().len(), CHATTER_VOICES);

    chatter.tick(5.0, &mut rng, &mut out);
    assert_eq!(out.len(), 1);
    chatter.tick(5.1, &mut rng, &mut out);
    assert_eq!(out.len(), 1);
    chatter.tick(5.4, &mut rng, &mut out);
    assert!(out.len() >= CHATTER_VOICES);
}

#[test]
fn phrases_follow_the_table_with_detune() {
    let mut chatter = DebateChatter::new();
    let mut rng = StdRng::seed_from_u64(3);
    let mut out = Vec::new();
    chatter.set_active(true, 0.0);
    for f in 0..(60 * 60) {
        chatter.tick(f as f64 * FRAME, &mut rng, &mut out);
    }
    // three voices, each waiting 0.2 s to 0.9 s between phrases
    assert!(out.len() >= 150, "{} phrases", out.len());
    assert!(out.len() <= 3 * 301, "{} phrases", out.len());
    assert_eq!(chatter.phrases(), out.len() as u64);

    let half = CHATTER_DETUNE_HZ / 2.0;
    for r in &out {
        let AudioRequest::Chatter(v) = r else {
            panic!("unexpected request {:?}", r);
        };
        assert!(CHATTER_PHRASES.iter().any(|&(hz, dur, _)| {
            v.duration_sec == dur && v.frequency_hz >= hz - half && v.frequency_hz <= hz + half
        }));
    }
}

#[test]
fn deactivation_silences_every_voice() {
    let mut chatter = DebateChatter::new();
    let mut rng = StdRng::seed_from_u64(4);
    let mut out = Vec::new();
    chatter.set_active(true, 0.0);
    chatter.tick(0.0, &mut rng, &mut out);
    chatter.set_active(false, 0.1);
    assert!(chatter.voices().iter().all(|v| v.is_cancelled()));
    out.clear();
    for f in 0..600 {
        chatter.tick(f as f64 * FRAME, &mut rng, &mut out);
    }
    assert!(out.is_empty());
}
