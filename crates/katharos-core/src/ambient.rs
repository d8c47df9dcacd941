use crate::audio::{AmbientBed, AudioRequest, CrackleBurst, Waveform};
use crate::cadence::Cadence;
use crate::constants::*;
use crate::random::in_range;
use rand::Rng;

const WIND_UPDATE_EPSILON: f32 = 0.01;

/// Drone, scroll-reactive wind and fire crackles. Silent until the first
/// user gesture.
pub struct AmbientSoundscape {
    started: bool,
    muted: bool,
    crackle: Cadence,
    last_progress: f32,
}

impl Default for AmbientSoundscape {
    fn default() -> Self {
        Self::new()
    }
}

impl AmbientSoundscape {
    pub fn new() -> Self {
        let mut crackle = Cadence::starting_at(CRACKLE_INTERVAL_SEC, 0.0);
        crackle.cancel();
        Self {
            started: false,
            muted: true,
            crackle,
            last_progress: 0.0,
        }
    }

    pub fn wind_gain_for(scroll_progress: f32) -> f32 {
        WIND_GAIN_BASE + scroll_progress.clamp(0.0, 1.0) * WIND_GAIN_SCROLL
    }

    /// First click/scroll/touch. Returns whether this call started audio.
    pub fn on_gesture(&mut self, now: f64, out: &mut Vec<AudioRequest>) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.muted = false;
        out.push(AudioRequest::AmbientStart(AmbientBed::default()));
        // first crackle right away, then jittered
        self.crackle = Cadence::starting_at(CRACKLE_INTERVAL_SEC, now);
        log::info!("[ambient] started");
        true
    }

    pub fn tick(
        &mut self,
        now: f64,
        scroll_progress: f32,
        rng: &mut impl Rng,
        out: &mut Vec<AudioRequest>,
    ) {
        if !self.started || self.muted {
            return;
        }
        if self.crackle.poll(now, rng) {
            out.push(AudioRequest::Crackle(CrackleBurst {
                waveform: Waveform::Sawtooth,
                frequency_hz: in_range(rng, CRACKLE_HZ),
                duration_sec: CRACKLE_DURATION_SEC,
                gain_start: CRACKLE_GAIN_START,
                gain_end: CRACKLE_GAIN_END,
            }));
        }
        if (scroll_progress - self.last_progress).abs() >= WIND_UPDATE_EPSILON {
            self.last_progress = scroll_progress;
            out.push(AudioRequest::AmbientLevels {
                drone_gain: None,
                wind_gain: Self::wind_gain_for(scroll_progress),
                tau_sec: WIND_RAMP_TAU_SEC,
            });
        }
    }

    /// Flip mute. Does nothing before audio has started.
    pub fn toggle_mute(&mut self, now: f64, rng: &mut impl Rng, out: &mut Vec<AudioRequest>) -> bool {
        if !self.started {
            return self.muted;
        }
        self.muted = !self.muted;
        if self.muted {
            self.crackle.cancel();
        } else {
            self.crackle.resume(now, rng);
        }
        out.push(AudioRequest::AmbientLevels {
            drone_gain: Some(if self.muted { 0.0 } else { DRONE_GAIN }),
            wind_gain: if self.muted { 0.0 } else { WIND_GAIN_UNMUTED },
            tau_sec: MUTE_RAMP_TAU_SEC,
        });
        log::info!("[ambient] muted={}", self.muted);
        self.muted
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn stop(&mut self) {
        self.crackle.cancel();
        self.started = false;
        self.muted = true;
    }
}
