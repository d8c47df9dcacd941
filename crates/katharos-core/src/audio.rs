use crate::constants::*;
use crate::error::{FxError, FxResult};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseKind {
    White,
    Brown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// Lowpassed noise with an exponential gain decay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThunderBurst {
    pub noise: NoiseKind,
    pub duration_sec: f32,
    pub lowpass_hz: f32,
    pub gain_start: f32,
    pub gain_end: f32,
}

impl Default for ThunderBurst {
    fn default() -> Self {
        Self {
            noise: NoiseKind::Brown,
            duration_sec: THUNDER_DURATION_SEC,
            lowpass_hz: THUNDER_LOWPASS_HZ,
            gain_start: THUNDER_GAIN_START,
            gain_end: THUNDER_GAIN_END,
        }
    }
}

/// Short oscillator pop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrackleBurst {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    pub duration_sec: f32,
    pub gain_start: f32,
    pub gain_end: f32,
}

/// One chatter phrase: a gliding sawtooth through a formant bandpass, with a
/// sine harmonic on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChatterVoice {
    pub frequency_hz: f32,
    pub duration_sec: f32,
    /// Pitch ratio reached at 80% of the duration.
    pub glide_ratio: f32,
    pub bandpass_hz: f32,
    pub bandpass_q: f32,
    pub gain_peak: f32,
    pub attack_sec: f32,
    pub gain_end: f32,
    pub harmonic_ratio: f32,
    pub harmonic_peak: f32,
    pub harmonic_attack_sec: f32,
    pub harmonic_end: f32,
}

impl ChatterVoice {
    pub fn new(frequency_hz: f32, duration_sec: f32) -> Self {
        Self {
            frequency_hz,
            duration_sec,
            glide_ratio: CHATTER_GLIDE,
            bandpass_hz: CHATTER_BANDPASS_HZ,
            bandpass_q: CHATTER_BANDPASS_Q,
            gain_peak: CHATTER_GAIN_PEAK,
            attack_sec: CHATTER_ATTACK_SEC,
            gain_end: CHATTER_GAIN_END,
            harmonic_ratio: CHATTER_HARMONIC_RATIO,
            harmonic_peak: CHATTER_HARMONIC_PEAK,
            harmonic_attack_sec: CHATTER_HARMONIC_ATTACK_SEC,
            harmonic_end: CHATTER_HARMONIC_END,
        }
    }
}

/// Continuous drone and wind layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientBed {
    pub drone_hz: f32,
    pub drone_gain: f32,
    pub wind_lowpass_hz: f32,
    pub wind_gain: f32,
}

impl Default for AmbientBed {
    fn default() -> Self {
        Self {
            drone_hz: DRONE_HZ,
            drone_gain: DRONE_GAIN,
            wind_lowpass_hz: WIND_LOWPASS_HZ,
            wind_gain: WIND_GAIN_UNMUTED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioRequest {
    Thunder(ThunderBurst),
    Crackle(CrackleBurst),
    Chatter(ChatterVoice),
    AmbientStart(AmbientBed),
    /// Glide the ambient layers toward new gains with time-constant `tau_sec`.
    AmbientLevels {
        drone_gain: Option<f32>,
        wind_gain: f32,
        tau_sec: f32,
    },
}

/// Something that can actually make sound.
pub trait AudioBackend {
    fn play(&mut self, request: &AudioRequest) -> FxResult<()>;
    /// Release the output. Called at most once by [`SharedAudio`].
    fn close(&mut self);
}

type Opener<B> = Box<dyn FnMut() -> FxResult<B>>;

enum HandleState<B> {
    Idle,
    Open(B),
    /// Opening failed; stays muted, no retries.
    Muted,
    Closed,
}

/// Lazily opened, explicitly closed audio output shared by every effect.
pub struct SharedAudio<B: AudioBackend> {
    opener: Opener<B>,
    state: HandleState<B>,
    opens: u32,
}

impl<B: AudioBackend> SharedAudio<B> {
    pub fn new(opener: impl FnMut() -> FxResult<B> + 'static) -> Self {
        Self {
            opener: Box::new(opener),
            state: HandleState::Idle,
            opens: 0,
        }
    }

    /// Open now (e.g. inside a user gesture). Idempotent.
    pub fn ensure_open(&mut self) -> FxResult<&mut B> {
        if let HandleState::Idle = self.state {
            self.opens += 1;
            self.state = match (self.opener)() {
                Ok(b) => {
                    log::info!("[audio] output opened");
                    HandleState::Open(b)
                }
                Err(e) => {
                    log::warn!("[audio] {}; effects stay muted", e);
                    HandleState::Muted
                }
            };
        }
        match &mut self.state {
            HandleState::Open(b) => Ok(b),
            HandleState::Idle | HandleState::Muted => {
                Err(FxError::AudioUnavailable("open failed earlier".into()))
            }
            HandleState::Closed => Err(FxError::AudioClosed),
        }
    }

    /// Play one request. Failures degrade silently; returns whether it played.
    pub fn play(&mut self, request: &AudioRequest) -> bool {
        match self.ensure_open() {
            Ok(b) => match b.play(request) {
                Ok(()) => true,
                Err(e) => {
                    log::debug!("[audio] dropped request: {}", e);
                    false
                }
            },
            Err(_) => false,
        }
    }

    pub fn play_all(&mut self, requests: &[AudioRequest]) -> usize {
        requests.iter().filter(|r| self.play(r)).count()
    }

    /// Close the output. Safe to call any number of times.
    pub fn close(&mut self) {
        if let HandleState::Open(b) = &mut self.state {
            b.close();
            log::info!("[audio] output closed");
        }
        self.state = HandleState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, HandleState::Open(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, HandleState::Closed)
    }

    /// How many times the opener ran (never more than once).
    pub fn open_attempts(&self) -> u32 {
        self.opens
    }
}

impl<B: AudioBackend> Drop for SharedAudio<B> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Leaky-integrated white noise, deeper than plain white noise.
pub fn brown_noise(len: usize, rng: &mut impl Rng) -> Vec<f32> {
    let mut out = Vec::with_capacity(len);
    let mut last = 0.0_f32;
    for _ in 0..len {
        let white = rng.gen::<f32>() * 2.0 - 1.0;
        last = (last + BROWN_NOISE_STEP * white) / BROWN_NOISE_LEAK;
        out.push(last * BROWN_NOISE_GAIN);
    }
    out
}

pub fn white_noise(len: usize, rng: &mut impl Rng) -> Vec<f32> {
    (0..len).map(|_| rng.gen::<f32>() * 2.0 - 1.0).collect()
}

/// Exponential ramp value at `t` seconds, as the Web Audio
/// `exponentialRampToValueAtTime` curve evaluates it.
pub fn exponential_gain_at(start: f32, end: f32, duration_sec: f32, t: f32) -> f32 {
    if duration_sec <= 0.0 || t >= duration_sec {
        return end;
    }
    if t <= 0.0 {
        return start;
    }
    start * (end / start).powf(t / duration_sec)
}
