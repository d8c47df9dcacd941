// Host-side tests for lightning strikes and delayed thunder.

use katharos_core::{
    AudioRequest, EffectsConfig, Lightning, FLASH_PRIMARY_OPACITY, FLASH_SECONDARY_OPACITY,
    LIGHTNING_INTERVAL_SEC, THUNDER_DELAY_SEC,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f64 = 1.0 / 60.0;

fn lightning(seed: u64) -> (Lightning, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let l = Lightning::new(&EffectsConfig::default(), 0.0, &mut rng);
    (l, rng)
}

#[test]
fn first_strike_waits_one_interval() {
    let (l, _) = lightning(1);
    let next = l.next_strike_at();
    assert!(next >= LIGHTNING_INTERVAL_SEC.0 && next <= LIGHTNING_INTERVAL_SEC.1);
}

#[test]
fn strikes_never_closer_than_minimum_interval() {
    let (mut l, mut rng) = lightning(2);
    let mut audio = Vec::new();
    let mut strikes = Vec::new();
    let mut now = 0.0;
    while now < 3600.0 {
        if let Some(s) = l.tick(now, &mut rng, &mut audio) {
            strikes.push(s.at);
        }
        now += DT;
    }
    assert!(strikes.len() > 100, "only {} strikes in an hour", strikes.len());
    for pair in strikes.windows(2) {
        assert!(
            pair[1] - pair[0] >= l.min_interval(),
            "strikes {:.2}s apart",
            pair[1] - pair[0]
        );
    }
    assert_eq!(l.strikes(), strikes.len() as u64);
}

#[test]
fn strike_produces_primary_then_secondary_flash() {
    let (mut l, mut rng) = lightning(3);
    let mut audio = Vec::new();
    let at = l.next_strike_at();
    let strike = l.tick(at, &mut rng, &mut audio).expect("strike due");
    assert_eq!(strike.at, at);
    assert_eq!(l.flashes().len(), 1);
    assert!(!l.flashes()[0].is_secondary);
    assert!((l.flash_opacity(at) - FLASH_PRIMARY_OPACITY).abs() < 1e-6);

    let later = at + 0.12;
    l.tick(later, &mut rng, &mut audio);
    assert_eq!(l.flashes().len(), 2);
    assert!(l.flashes().iter().any(|f| f.is_secondary));
    assert!((l.flash_opacity(later) - FLASH_SECONDARY_OPACITY).abs() < 1e-3);

    l.tick(at + 1.0, &mut rng, &mut audio);
    assert!(l.flashes().is_empty());
    assert_eq!(l.flash_opacity(at + 1.0), 0.0);
}

#[test]
fn thunder_follows_the_flash_after_a_delay() {
    let (mut l, mut rng) = lightning(4);
    let mut audio = Vec::new();
    let at = l.next_strike_at();
    let strike = l.tick(at, &mut rng, &mut audio).expect("strike due");
    assert!(audio.is_empty(), "thunder must not sound with the flash");
    let delay = strike.thunder_at - strike.at;
    assert!(delay >= THUNDER_DELAY_SEC.0 && delay <= THUNDER_DELAY_SEC.1);

    let mut now = at;
    let mut heard_at = None;
    while now < at + 2.0 {
        now += DT;
        l.tick(now, &mut rng, &mut audio);
        if heard_at.is_none() && !audio.is_empty() {
            heard_at = Some(now);
        }
    }
    let heard_at = heard_at.expect("thunder queued");
    assert!(heard_at >= strike.thunder_at);
    assert!(heard_at < strike.thunder_at + DT + 1e-9);
    assert_eq!(audio.len(), 1);
    assert!(matches!(audio[0], AudioRequest::Thunder(_)));
}

#[test]
fn cancel_stops_strikes_and_drops_queued_thunder() {
    let (mut l, mut rng) = lightning(5);
    let mut audio = Vec::new();
    let at = l.next_strike_at();
    l.tick(at, &mut rng, &mut audio);
    assert!(l.pending() > 0);
    l.cancel();
    assert_eq!(l.pending(), 0);
    let mut now = at;
    while now < at + 120.0 {
        now += DT;
        assert!(l.tick(now, &mut rng, &mut audio).is_none());
    }
    assert!(audio.is_empty());
    assert_eq!(l.strikes(), 1);
}
