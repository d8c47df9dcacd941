use crate::constants::*;
use crate::error::{FxError, FxResult};

/// The recognized tuning knobs. The page always runs with the defaults; tests
/// and the native harness inject their own.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectsConfig {
    pub max_relics: usize,
    pub spawn_threshold: f32,
    pub spawn_cooldown_frames: i32,
    pub tablet_count: usize,
    /// Rain density in [0, 1].
    pub rain_intensity: f32,
    pub cursor_smoothing: f32,
    /// Jittered gap between lightning strikes, seconds.
    pub lightning_interval: (f64, f64),
    pub thunder_delay: (f64, f64),
    pub max_ripples: usize,
    /// Rising embers; zero turns the field off.
    pub ember_count: usize,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            max_relics: MAX_RELICS,
            spawn_threshold: SPAWN_THRESHOLD,
            spawn_cooldown_frames: SPAWN_COOLDOWN_FRAMES,
            tablet_count: TABLET_COUNT,
            rain_intensity: RAIN_DEFAULT_INTENSITY,
            cursor_smoothing: CURSOR_SMOOTHING,
            lightning_interval: LIGHTNING_INTERVAL_SEC,
            thunder_delay: THUNDER_DELAY_SEC,
            max_ripples: MAX_RIPPLES,
            ember_count: EMBER_COUNT,
        }
    }
}

impl EffectsConfig {
    pub fn validate(&self) -> FxResult<()> {
        if self.max_relics == 0 {
            return Err(FxError::InvalidConfig("max_relics must be at least 1"));
        }
        if !(self.spawn_threshold >= 0.0) {
            return Err(FxError::InvalidConfig("spawn_threshold must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.rain_intensity) {
            return Err(FxError::InvalidConfig("rain_intensity must be within [0, 1]"));
        }
        if !(self.cursor_smoothing > 0.0 && self.cursor_smoothing < 1.0) {
            return Err(FxError::InvalidConfig("cursor_smoothing must be within (0, 1)"));
        }
        let (lo, hi) = self.lightning_interval;
        if !(lo > 0.0 && hi >= lo) {
            return Err(FxError::InvalidConfig("lightning_interval must be 0 < min <= max"));
        }
        let (dlo, dhi) = self.thunder_delay;
        if !(dlo >= 0.0 && dhi >= dlo) {
            return Err(FxError::InvalidConfig("thunder_delay must be 0 <= min <= max"));
        }
        Ok(())
    }
}
