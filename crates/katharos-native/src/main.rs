use std::time::{Duration, Instant};

use glam::Vec2;
use katharos_core::{
    AudioBackend, AudioRequest, EffectsConfig, FrameSignals, FxResult, PointerSignal, Resolved,
    Scene, SharedAudio, Viewport,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_FRAMES: u64 = 60 * 60;
const DEFAULT_SEED: u64 = 42;
const FRAME_DT: f32 = 1.0 / 60.0;
const DOCUMENT_HEIGHT: f32 = 6000.0;
/// Scroll range where the debate section sits in view.
const DEBATE_SECTION: (f32, f32) = (2400.0, 3600.0);

/// Counts what would have been played instead of making sound.
#[derive(Default)]
struct RecordingAudio {
    thunder: u32,
    crackles: u32,
    chatter: u32,
    level_changes: u32,
    ambient_started: bool,
}

impl AudioBackend for RecordingAudio {
    fn play(&mut self, request: &AudioRequest) -> FxResult<()> {
        match request {
            AudioRequest::Thunder(b) => {
                self.thunder += 1;
                log::info!(
                    "[audio] thunder {:.1}s lowpass {:.0} Hz",
                    b.duration_sec,
                    b.lowpass_hz
                );
            }
            AudioRequest::Crackle(_) => self.crackles += 1,
            AudioRequest::Chatter(_) => self.chatter += 1,
            AudioRequest::AmbientStart(bed) => {
                self.ambient_started = true;
                log::info!("[audio] ambient drone {:.0} Hz", bed.drone_hz);
            }
            AudioRequest::AmbientLevels { .. } => self.level_changes += 1,
        }
        Ok(())
    }

    fn close(&mut self) {
        log::info!(
            "[audio] closed: thunder={} crackles={} chatter={} level_changes={} ambient={}",
            self.thunder,
            self.crackles,
            self.chatter,
            self.level_changes,
            self.ambient_started
        );
    }
}

/// Scroll position for a scripted session: idle, a fast flick down, a slow
/// read, then a flick back up.
fn scripted_scroll(frame: u64, total: u64) -> f32 {
    let t = frame as f32 / total.max(1) as f32;
    match t {
        t if t < 0.1 => 0.0,
        t if t < 0.2 => (t - 0.1) / 0.1 * 2400.0,
        t if t < 0.7 => 2400.0 + (t - 0.2) / 0.5 * 1200.0,
        t if t < 0.8 => 3600.0 - (t - 0.7) / 0.1 * 3000.0,
        _ => 600.0,
    }
}

fn parse_args() -> (u64, u64) {
    let mut args = std::env::args().skip(1);
    let frames = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);
    let seed = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    (frames, seed)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    let (frames, seed) = parse_args();
    log::info!("katharos-native: {} frames, seed {}", frames, seed);

    let config = EffectsConfig::default();
    let mut scene = Scene::mount(config, seed)?;
    scene.settle_relic_sprite(Resolved::Fallback);
    let mut audio = SharedAudio::new(|| Ok(RecordingAudio::default()));
    let mut pointer_rng = StdRng::seed_from_u64(seed ^ 0x9e37_79b9);
    let viewport = Viewport::default();

    let started = Instant::now();
    let mut instance_peak = 0usize;
    let mut pointer = Vec2::new(viewport.width * 0.5, viewport.height * 0.5);
    scene.on_pointer(PointerSignal::Enter);

    for frame in 0..frames {
        let scroll_y = scripted_scroll(frame, frames);
        if frame > 0 && frame % 2 == 0 {
            let spawned = scene.on_scroll(scroll_y);
            if spawned > 0 && scene.on_gesture() {
                _ = audio.ensure_open();
            }
        }
        if frame % 30 == 0 {
            pointer = Vec2::new(
                pointer_rng.gen_range(0.0..viewport.width),
                pointer_rng.gen_range(0.0..viewport.height),
            );
            scene.on_pointer(PointerSignal::Move(pointer));
        }
        if frame % 240 == 120 {
            scene.on_click(pointer);
        }
        // hover a link for half a second out of every four
        scene.on_hover(frame % 240 < 30);
        scene.set_chatter_visible(
            scroll_y >= DEBATE_SECTION.0 && scroll_y <= DEBATE_SECTION.1,
        );

        let signals = FrameSignals {
            now: frame as f64 * FRAME_DT as f64,
            dt: FRAME_DT,
            scroll_y,
            scroll_progress: katharos_core::scroll_progress(
                scroll_y,
                DOCUMENT_HEIGHT,
                viewport.height,
            ),
            viewport,
        };
        let out = scene.frame(&signals);
        instance_peak = instance_peak.max(out.instances.len());
        if let Some(strike) = out.strike {
            log::info!(
                "[lightning] strike at {:.1}s, thunder at {:.1}s",
                strike.at,
                strike.thunder_at
            );
        }
        audio.play_all(out.audio);
    }

    let stats = scene.stats();
    let elapsed = started.elapsed();
    log::info!(
        "frames={} relics_spawned={} relics_peak={} strikes={} ripples={} phrases={} embers_wrapped={} instances_peak={}",
        stats.frames,
        stats.relics_spawned,
        stats.relics_peak,
        stats.strikes,
        stats.ripples_spawned,
        stats.chatter_phrases,
        scene.embers().wrapped(),
        instance_peak
    );
    let per_frame = elapsed.checked_div(frames.max(1) as u32).unwrap_or(Duration::ZERO);
    log::info!("simulated in {:?} ({:?}/frame)", elapsed, per_frame);

    scene.unmount();
    audio.close();
    Ok(())
}
