use katharos_core::{
    brown_noise, white_noise, AmbientBed, AudioBackend, AudioRequest, ChatterVoice, CrackleBurst, FxError,
    FxResult, NoiseKind, ThunderBurst, Waveform,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Length of the looping wind noise buffer.
const WIND_LOOP_SEC: f32 = 2.0;
/// Fade-in time constant for the ambient bed.
const AMBIENT_FADE_IN_TAU_SEC: f64 = 0.5;
/// Scheduling slack so ramps never start in the past.
const SCHEDULE_AHEAD_SEC: f64 = 0.005;

#[inline]
fn js_err(e: JsValue) -> FxError {
    FxError::AudioUnavailable(format!("{:?}", e))
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> FxResult<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("[audio] {} GainNode error: {:?}", label, e);
            Err(js_err(e))
        }
    }
}

fn create_lowpass(audio_ctx: &web::AudioContext, cutoff_hz: f32) -> FxResult<web::BiquadFilterNode> {
    let filter = web::BiquadFilterNode::new(audio_ctx).map_err(js_err)?;
    filter.set_type(web::BiquadFilterType::Lowpass);
    filter.frequency().set_value(cutoff_hz);
    Ok(filter)
}

struct AmbientNodes {
    drone: web::OscillatorNode,
    drone_gain: web::GainNode,
    wind: web::AudioBufferSourceNode,
    wind_gain: web::GainNode,
}

/// WebAudio output: one `AudioContext` shared by thunder and the soundscape.
pub struct WebAudio {
    ctx: web::AudioContext,
    rng: StdRng,
    ambient: Option<AmbientNodes>,
}

impl WebAudio {
    /// Must run inside a user gesture for browsers to let the context start.
    pub fn open(seed: u64) -> FxResult<Self> {
        let ctx = web::AudioContext::new().map_err(js_err)?;
        _ = ctx.resume();
        log::info!("[audio] context sample_rate={}", ctx.sample_rate());
        Ok(Self {
            ctx,
            rng: StdRng::seed_from_u64(seed),
            ambient: None,
        })
    }

    /// Contexts created outside a gesture start suspended.
    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }

    fn noise_buffer(&mut self, kind: NoiseKind, duration_sec: f32) -> FxResult<web::AudioBuffer> {
        let sample_rate = self.ctx.sample_rate();
        let len = (sample_rate * duration_sec).max(1.0) as u32;
        let buffer = self.ctx.create_buffer(1, len, sample_rate).map_err(js_err)?;
        let mut samples = match kind {
            NoiseKind::Brown => brown_noise(len as usize, &mut self.rng),
            NoiseKind::White => white_noise(len as usize, &mut self.rng),
        };
        buffer.copy_to_channel(&mut samples, 0).map_err(js_err)?;
        Ok(buffer)
    }

    fn thunder(&mut self, burst: &ThunderBurst) -> FxResult<()> {
        let buffer = self.noise_buffer(burst.noise, burst.duration_sec)?;
        let src = web::AudioBufferSourceNode::new(&self.ctx).map_err(js_err)?;
        src.set_buffer(Some(&buffer));
        let filter = create_lowpass(&self.ctx, burst.lowpass_hz)?;
        let gain = create_gain(&self.ctx, burst.gain_start, "thunder")?;

        let t0 = self.ctx.current_time() + SCHEDULE_AHEAD_SEC;
        let t1 = t0 + burst.duration_sec as f64;
        _ = gain.gain().set_value_at_time(burst.gain_start, t0);
        _ = gain.gain().exponential_ramp_to_value_at_time(burst.gain_end, t1);

        src.connect_with_audio_node(&filter).map_err(js_err)?;
        filter.connect_with_audio_node(&gain).map_err(js_err)?;
        gain.connect_with_audio_node(&self.ctx.destination())
            .map_err(js_err)?;
        src.start_with_when(t0).map_err(js_err)?;
        _ = src.stop_with_when(t1);
        log::debug!("[audio] thunder {:.1}s", burst.duration_sec);
        Ok(())
    }

    fn crackle(&mut self, burst: &CrackleBurst) -> FxResult<()> {
        let osc = web::OscillatorNode::new(&self.ctx).map_err(js_err)?;
        match burst.waveform {
            Waveform::Sine => osc.set_type(web::OscillatorType::Sine),
            Waveform::Sawtooth => osc.set_type(web::OscillatorType::Sawtooth),
        }
        osc.frequency().set_value(burst.frequency_hz);
        let gain = create_gain(&self.ctx, burst.gain_start, "crackle")?;
        let t0 = self.ctx.current_time() + SCHEDULE_AHEAD_SEC;
        let t1 = t0 + burst.duration_sec as f64;
        _ = gain.gain().set_value_at_time(burst.gain_start, t0);
        _ = gain.gain().exponential_ramp_to_value_at_time(burst.gain_end, t1);
        osc.connect_with_audio_node(&gain).map_err(js_err)?;
        gain.connect_with_audio_node(&self.ctx.destination())
            .map_err(js_err)?;
        osc.start_with_when(t0).map_err(js_err)?;
        _ = osc.stop_with_when(t1);
        Ok(())
    }

    fn chatter(&mut self, voice: &ChatterVoice) -> FxResult<()> {
        let dest = self.ctx.destination();
        let t0 = self.ctx.current_time() + SCHEDULE_AHEAD_SEC;
        let t1 = t0 + voice.duration_sec as f64;

        let osc = web::OscillatorNode::new(&self.ctx).map_err(js_err)?;
        osc.set_type(web::OscillatorType::Sawtooth);
        _ = osc.frequency().set_value_at_time(voice.frequency_hz, t0);
        _ = osc.frequency().exponential_ramp_to_value_at_time(
            voice.frequency_hz * voice.glide_ratio,
            t0 + voice.duration_sec as f64 * 0.8,
        );
        let formant = web::BiquadFilterNode::new(&self.ctx).map_err(js_err)?;
        formant.set_type(web::BiquadFilterType::Bandpass);
        formant.frequency().set_value(voice.bandpass_hz);
        formant.q().set_value(voice.bandpass_q);
        let gain = create_gain(&self.ctx, 0.0, "chatter")?;
        _ = gain.gain().set_value_at_time(0.0, t0);
        _ = gain
            .gain()
            .linear_ramp_to_value_at_time(voice.gain_peak, t0 + voice.attack_sec as f64);
        _ = gain.gain().exponential_ramp_to_value_at_time(voice.gain_end, t1);
        osc.connect_with_audio_node(&formant).map_err(js_err)?;
        formant.connect_with_audio_node(&gain).map_err(js_err)?;
        gain.connect_with_audio_node(&dest).map_err(js_err)?;

        let harmonic = web::OscillatorNode::new(&self.ctx).map_err(js_err)?;
        harmonic.set_type(web::OscillatorType::Sine);
        harmonic
            .frequency()
            .set_value(voice.frequency_hz * voice.harmonic_ratio);
        let harmonic_gain = create_gain(&self.ctx, 0.0, "chatter harmonic")?;
        _ = harmonic_gain.gain().set_value_at_time(0.0, t0);
        _ = harmonic_gain.gain().linear_ramp_to_value_at_time(
            voice.harmonic_peak,
            t0 + voice.harmonic_attack_sec as f64,
        );
        _ = harmonic_gain
            .gain()
            .exponential_ramp_to_value_at_time(voice.harmonic_end, t1);
        harmonic.connect_with_audio_node(&harmonic_gain).map_err(js_err)?;
        harmonic_gain.connect_with_audio_node(&dest).map_err(js_err)?;

        osc.start_with_when(t0).map_err(js_err)?;
        harmonic.start_with_when(t0).map_err(js_err)?;
        _ = osc.stop_with_when(t1);
        _ = harmonic.stop_with_when(t1);
        Ok(())
    }

    fn start_ambient(&mut self, bed: &AmbientBed) -> FxResult<()> {
        if self.ambient.is_some() {
            return Ok(());
        }
        let now = self.ctx.current_time();
        let dest = self.ctx.destination();

        let drone = web::OscillatorNode::new(&self.ctx).map_err(js_err)?;
        drone.set_type(web::OscillatorType::Sine);
        drone.frequency().set_value(bed.drone_hz);
        let drone_gain = create_gain(&self.ctx, 0.0, "drone")?;
        _ = drone_gain
            .gain()
            .set_target_at_time(bed.drone_gain, now, AMBIENT_FADE_IN_TAU_SEC);
        drone.connect_with_audio_node(&drone_gain).map_err(js_err)?;
        drone_gain.connect_with_audio_node(&dest).map_err(js_err)?;

        let buffer = self.noise_buffer(NoiseKind::White, WIND_LOOP_SEC)?;
        let wind = web::AudioBufferSourceNode::new(&self.ctx).map_err(js_err)?;
        wind.set_buffer(Some(&buffer));
        wind.set_loop(true);
        let filter = create_lowpass(&self.ctx, bed.wind_lowpass_hz)?;
        let wind_gain = create_gain(&self.ctx, 0.0, "wind")?;
        _ = wind_gain
            .gain()
            .set_target_at_time(bed.wind_gain, now, AMBIENT_FADE_IN_TAU_SEC);
        wind.connect_with_audio_node(&filter).map_err(js_err)?;
        filter.connect_with_audio_node(&wind_gain).map_err(js_err)?;
        wind_gain.connect_with_audio_node(&dest).map_err(js_err)?;

        drone.start().map_err(js_err)?;
        wind.start().map_err(js_err)?;
        self.ambient = Some(AmbientNodes {
            drone,
            drone_gain,
            wind,
            wind_gain,
        });
        log::info!("[audio] ambient bed running");
        Ok(())
    }

    fn set_ambient_levels(&mut self, drone_gain: Option<f32>, wind_gain: f32, tau_sec: f32) {
        let Some(nodes) = &self.ambient else {
            return;
        };
        let now = self.ctx.current_time();
        if let Some(g) = drone_gain {
            _ = nodes
                .drone_gain
                .gain()
                .set_target_at_time(g, now, tau_sec as f64);
        }
        _ = nodes
            .wind_gain
            .gain()
            .set_target_at_time(wind_gain, now, tau_sec as f64);
    }
}

impl AudioBackend for WebAudio {
    fn play(&mut self, request: &AudioRequest) -> FxResult<()> {
        if self.ctx.state() == web::AudioContextState::Closed {
            return Err(FxError::AudioClosed);
        }
        match request {
            AudioRequest::Thunder(b) => self.thunder(b),
            AudioRequest::Crackle(b) => self.crackle(b),
            AudioRequest::Chatter(v) => self.chatter(v),
            AudioRequest::AmbientStart(bed) => self.start_ambient(bed),
            AudioRequest::AmbientLevels {
                drone_gain,
                wind_gain,
                tau_sec,
            } => {
                self.set_ambient_levels(*drone_gain, *wind_gain, *tau_sec);
                Ok(())
            }
        }
    }

    fn close(&mut self) {
        if let Some(nodes) = self.ambient.take() {
            _ = nodes.drone.stop();
            _ = nodes.wind.stop();
            _ = nodes.drone_gain.disconnect();
            _ = nodes.wind_gain.disconnect();
        }
        _ = self.ctx.close();
    }
}
