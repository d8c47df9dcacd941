// Host-side tests for scroll-reactive falling relics.

use katharos_core::{
    EffectsConfig, Phase, RelicSpawner, Resolved, SpriteId, MAX_RELICS, RELIC_SPAWN_Y,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const VIEW_H: f32 = 800.0;

fn spawner() -> (RelicSpawner, StdRng) {
    (
        RelicSpawner::new(&EffectsConfig::default()),
        StdRng::seed_from_u64(7),
    )
}

#[test]
fn single_sixty_px_scroll_spawns_two_fresh_relics() {
    let (mut relics, mut rng) = spawner();
    let spawned = relics.on_scroll(60.0, &mut rng);
    assert_eq!(spawned, 2);
    assert_eq!(relics.len(), 2);
    for r in relics.relics() {
        assert_eq!(r.position.y, RELIC_SPAWN_Y);
        assert_eq!(r.opacity, 1.0);
        assert_eq!(r.phase, Phase::Spawned);
        assert!(r.position.x >= 5.0 && r.position.x <= 95.0);
    }
}

#[test]
fn zero_velocity_frames_spawn_nothing() {
    let (mut relics, mut rng) = spawner();
    for _ in 0..100 {
        assert_eq!(relics.on_scroll(0.0, &mut rng), 0);
        relics.on_frame(VIEW_H);
    }
    assert!(relics.is_empty());
}

#[test]
fn slow_scroll_below_threshold_spawns_nothing() {
    let (mut relics, mut rng) = spawner();
    let mut y = 0.0;
    for _ in 0..50 {
        y += 15.0;
        assert_eq!(relics.on_scroll(y, &mut rng), 0);
        relics.on_frame(VIEW_H);
    }
}

#[test]
fn cooldown_blocks_back_to_back_bursts() {
    let (mut relics, mut rng) = spawner();
    assert_eq!(relics.on_scroll(60.0, &mut rng), 2);
    assert_eq!(relics.on_scroll(120.0, &mut rng), 0);
    for _ in 0..4 {
        relics.on_frame(VIEW_H);
    }
    assert_eq!(relics.cooldown(), 0);
    assert_eq!(relics.on_scroll(180.0, &mut rng), 2);
}

#[test]
fn pool_never_exceeds_capacity() {
    let (mut relics, mut rng) = spawner();
    let mut y = 0.0;
    for _ in 0..500 {
        y += 100.0;
        relics.on_scroll(y, &mut rng);
        assert!(relics.len() <= MAX_RELICS);
        relics.on_frame(VIEW_H);
    }
    assert_eq!(relics.capacity(), MAX_RELICS);
}

#[test]
fn pool_fills_to_capacity_under_sustained_scroll() {
    let (mut relics, mut rng) = spawner();
    let mut y = 0.0;
    let mut peak = 0;
    for _ in 0..200 {
        y += 100.0;
        relics.on_scroll(y, &mut rng);
        peak = peak.max(relics.len());
        relics.on_frame(VIEW_H);
    }
    assert_eq!(peak, MAX_RELICS);
}

#[test]
fn kinematics_run_every_other_frame() {
    let (mut relics, mut rng) = spawner();
    relics.on_scroll(60.0, &mut rng);
    let stepped: Vec<bool> = (0..6).map(|_| relics.on_frame(VIEW_H)).collect();
    assert_eq!(stepped, vec![false, true, false, true, false, true]);
}

#[test]
fn opacity_never_increases_once_fading() {
    let (mut relics, mut rng) = spawner();
    relics.on_scroll(60.0, &mut rng);
    let mut last: Vec<f32> = relics.relics().map(|r| r.opacity).collect();
    for _ in 0..1000 {
        relics.on_frame(VIEW_H);
        let now: Vec<f32> = relics.relics().map(|r| r.opacity).collect();
        if now.len() == last.len() {
            for (a, b) in last.iter().zip(&now) {
                assert!(b <= a, "opacity rose from {} to {}", a, b);
            }
        }
        last = now;
        if relics.is_empty() {
            break;
        }
    }
}

#[test]
fn relics_are_removed_within_bounded_frames() {
    let (mut relics, mut rng) = spawner();
    relics.on_scroll(60.0, &mut rng);
    // slowest fall: 4 px per step, one step per two frames
    let bound = ((VIEW_H + 50.0 - RELIC_SPAWN_Y) / 4.0) as usize * 2 + 20;
    let mut frames = 0;
    while !relics.is_empty() {
        relics.on_frame(VIEW_H);
        frames += 1;
        assert!(frames <= bound, "relics still alive after {} frames", frames);
    }
}

#[test]
fn relics_fade_near_the_bottom() {
    let (mut relics, mut rng) = spawner();
    relics.on_scroll(60.0, &mut rng);
    let mut saw_fading = false;
    for _ in 0..1000 {
        relics.on_frame(VIEW_H);
        for r in relics.relics() {
            if r.position.y > VIEW_H - 100.0 {
                assert_eq!(r.phase, Phase::Fading);
                saw_fading = true;
            } else if r.phase == Phase::Fading {
                panic!("relic fading at y={}", r.position.y);
            }
        }
        if relics.is_empty() {
            break;
        }
    }
    assert!(saw_fading);
}

#[test]
fn scroll_origin_prevents_spurious_first_spawn() {
    let (mut relics, mut rng) = spawner();
    relics.set_scroll_origin(3000.0);
    assert_eq!(relics.on_scroll(3005.0, &mut rng), 0);
}

#[test]
fn sprite_outcome_is_fixed_at_spawn() {
    let (mut relics, mut rng) = spawner();
    assert_eq!(relics.on_scroll(60.0, &mut rng), 2);
    relics.settle_sprite(Resolved::Loaded(SpriteId(4)));
    for _ in 0..60 {
        relics.on_frame(VIEW_H);
    }
    assert!(relics.on_scroll(120.0, &mut rng) > 0);

    let early: Vec<_> = relics.relics().take(2).map(|r| r.sprite.loaded()).collect();
    assert_eq!(early, vec![None, None]);
    assert!(relics
        .relics()
        .skip(2)
        .all(|r| r.sprite.loaded() == Some(SpriteId(4))));
}
