// Host-side tests for the mounted scene: wiring, isolation and teardown.

use glam::Vec2;
use katharos_core::{
    AudioRequest, EffectsConfig, FrameSignals, FxError, Layer, PointerSignal, Scene, Viewport,
};

const DT: f32 = 1.0 / 60.0;

fn signals(frame: u64, scroll_y: f32) -> FrameSignals {
    FrameSignals {
        now: frame as f64 * DT as f64,
        dt: DT,
        scroll_y,
        scroll_progress: 0.0,
        viewport: Viewport::default(),
    }
}

fn mounted() -> Scene {
    Scene::mount(EffectsConfig::default(), 42).expect("default config is valid")
}

#[test]
fn invalid_config_is_rejected() {
    let config = EffectsConfig {
        max_relics: 0,
        ..EffectsConfig::default()
    };
    assert!(matches!(
        Scene::mount(config, 1),
        Err(FxError::InvalidConfig(_))
    ));
    let config = EffectsConfig {
        lightning_interval: (10.0, 5.0),
        ..EffectsConfig::default()
    };
    assert!(Scene::mount(config, 1).is_err());
}

#[test]
fn frame_emits_every_layer() {
    let mut scene = mounted();
    scene.on_pointer(PointerSignal::Move(Vec2::new(200.0, 200.0)));
    scene.on_hover(true);
    assert_eq!(scene.on_scroll(60.0), 2);
    scene.on_click(Vec2::new(10.0, 10.0));
    let out = scene.frame(&signals(1, 60.0));
    let has = |layer: Layer| out.instances.iter().any(|i| i.layer == layer);
    assert!(has(Layer::Tablets));
    assert!(has(Layer::Embers));
    assert!(has(Layer::Rain));
    assert!(has(Layer::Relics));
    assert!(has(Layer::Ripples));
    assert!(has(Layer::Sparks));
    assert!(has(Layer::Cursor));
}

#[test]
fn sparks_only_while_hovering_something_interactive() {
    let mut scene = mounted();
    scene.on_pointer(PointerSignal::Move(Vec2::new(50.0, 60.0)));
    let out = scene.frame(&signals(1, 0.0));
    assert!(!out.instances.iter().any(|i| i.layer == Layer::Sparks));

    scene.on_hover(true);
    scene.frame(&signals(2, 0.0));
    assert!(scene.sparks().is_active());
    assert_eq!(scene.sparks().anchor(), Vec2::new(50.0, 60.0));

    scene.set_coarse_pointer(true);
    let out = scene.frame(&signals(3, 0.0));
    assert!(!out.instances.iter().any(|i| i.layer == Layer::Sparks));
    assert!(!scene.sparks().is_active());
}

#[test]
fn embers_keep_rising_with_frame_time() {
    let mut scene = mounted();
    assert_eq!(scene.embers().len(), scene.config().ember_count);
    for f in 0..(60 * 120) {
        scene.frame(&signals(f, 0.0));
    }
    // two minutes at 0.2 to 0.7 units/s carries most embers past the top
    assert!(scene.embers().wrapped() > 0);

    let config = EffectsConfig {
        ember_count: 0,
        ..EffectsConfig::default()
    };
    let mut bare = Scene::mount(config, 42).expect("no embers is valid");
    let out = bare.frame(&signals(1, 0.0));
    assert!(!out.instances.iter().any(|i| i.layer == Layer::Embers));
}

#[test]
fn mute_before_first_gesture_does_not_stick() {
    let mut scene = mounted();
    assert!(scene.is_muted());
    assert!(scene.toggle_mute());
    assert!(scene.toggle_mute());
    let out = scene.frame(&signals(1, 0.0));
    assert!(out.audio.is_empty());

    // the same click then reaches the gesture handler
    assert!(scene.on_gesture());
    assert!(!scene.is_muted());
    let out = scene.frame(&signals(2, 0.0));
    assert!(out
        .audio
        .iter()
        .any(|r| matches!(r, AudioRequest::AmbientStart(_))));
    assert!(!out.audio.iter().any(|r| matches!(
        r,
        AudioRequest::AmbientLevels {
            drone_gain: Some(g),
            ..
        } if *g == 0.0
    )));

    assert!(scene.toggle_mute());
    assert!(scene.is_muted());
}

#[test]
fn chatter_needs_the_section_on_screen_and_audio_running() {
    let count_chatter = |scene: &mut Scene, from: u64, to: u64| {
        (from..to)
            .map(|f| {
                scene
                    .frame(&signals(f, 0.0))
                    .audio
                    .iter()
                    .filter(|r| matches!(r, AudioRequest::Chatter(_)))
                    .count()
            })
            .sum::<usize>()
    };
    let mut scene = mounted();
    scene.set_chatter_visible(true);
    assert_eq!(count_chatter(&mut scene, 0, 120), 0);

    scene.on_gesture();
    assert!(count_chatter(&mut scene, 120, 240) > 0);
    assert!(scene.chatter().is_active());

    scene.set_chatter_visible(false);
    assert_eq!(count_chatter(&mut scene, 240, 360), 0);

    scene.set_chatter_visible(true);
    assert!(count_chatter(&mut scene, 360, 480) > 0);
    scene.toggle_mute();
    assert_eq!(count_chatter(&mut scene, 480, 600), 0);
    assert_eq!(scene.stats().chatter_phrases, scene.chatter().phrases());
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let mut scene = mounted();
        let mut y = 0.0;
        let mut trace = Vec::new();
        for f in 0..300 {
            y += if f % 20 < 5 { 80.0 } else { 0.0 };
            scene.on_scroll(y);
            let out = scene.frame(&signals(f, y));
            trace.push((out.instances.len(), out.flash_opacity.to_bits()));
        }
        (trace, scene.stats())
    };
    assert_eq!(run(), run());
}

#[test]
fn gesture_audio_is_delivered_with_the_next_frame() {
    let mut scene = mounted();
    assert!(scene.on_gesture());
    let out = scene.frame(&signals(1, 0.0));
    assert!(out
        .audio
        .iter()
        .any(|r| matches!(r, AudioRequest::AmbientStart(_))));
    let out = scene.frame(&signals(2, 0.0));
    assert!(!out
        .audio
        .iter()
        .any(|r| matches!(r, AudioRequest::AmbientStart(_))));
}

#[test]
fn lightning_strikes_during_a_long_session() {
    let mut scene = mounted();
    let mut strikes = 0;
    let mut thunder = 0;
    for f in 0..(60 * 120) {
        let out = scene.frame(&signals(f, 0.0));
        if out.strike.is_some() {
            strikes += 1;
        }
        thunder += out
            .audio
            .iter()
            .filter(|r| matches!(r, AudioRequest::Thunder(_)))
            .count();
    }
    assert!(strikes >= 5, "{} strikes in two minutes", strikes);
    assert!(thunder + 1 >= strikes);
    assert_eq!(scene.stats().strikes, strikes as u64);
}

#[test]
fn unmount_leaves_nothing_running() {
    let mut scene = mounted();
    scene.on_scroll(60.0);
    for f in 0..30 {
        scene.frame(&signals(f, 60.0));
    }
    scene.unmount();
    assert!(!scene.is_mounted());
    let frames = scene.stats().frames;
    let relics_spawned = scene.stats().relics_spawned;

    assert_eq!(scene.on_scroll(10_000.0), 0);
    assert!(!scene.on_click(Vec2::ZERO));
    assert!(!scene.on_gesture());
    scene.on_pointer(PointerSignal::Move(Vec2::new(500.0, 500.0)));
    for f in 30..(60 * 60) {
        let out = scene.frame(&signals(f, 10_000.0));
        assert!(out.instances.is_empty());
        assert!(out.audio.is_empty());
        assert!(out.strike.is_none());
    }
    assert_eq!(scene.stats().frames, frames);
    assert_eq!(scene.stats().relics_spawned, relics_spawned);
    assert!(scene.relics().is_empty());
    assert!(scene.rain().is_empty());
    assert!(scene.tablets().is_empty());
    assert!(scene.ripples().is_empty());
    assert!(scene.embers().is_empty());
    assert!(scene.sparks().is_empty());
    assert!(!scene.chatter().is_active());
    assert_eq!(scene.lightning().pending(), 0);

    scene.unmount();
    assert!(!scene.is_mounted());
}
