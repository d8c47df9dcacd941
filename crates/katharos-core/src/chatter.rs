use crate::audio::{AudioRequest, ChatterVoice};
use crate::cadence::Cadence;
use crate::constants::*;
use crate::random::centered;
use rand::Rng;

/// Shortest and longest gap a voice can leave between two phrases.
pub fn phrase_gap_bounds() -> (f64, f64) {
    let pauses = CHATTER_PHRASES.iter().map(|p| p.2);
    let lo = pauses.clone().fold(f64::INFINITY, f64::min);
    let hi = pauses.fold(0.0, f64::max) + CHATTER_PAUSE_JITTER_SEC;
    (lo, hi)
}

/// Murmur of overlapping voices while the debate section is on screen.
pub struct DebateChatter {
    voices: Vec<Cadence>,
    active: bool,
    phrases: u64,
}

impl Default for DebateChatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateChatter {
    pub fn new() -> Self {
        Self {
            voices: Vec::new(),
            active: false,
            phrases: 0,
        }
    }

    /// Voices enter staggered on activation and fall silent on deactivation.
    pub fn set_active(&mut self, active: bool, now: f64) {
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            self.voices = (0..CHATTER_VOICES)
                .map(|i| {
                    Cadence::starting_at(phrase_gap_bounds(), now + i as f64 * CHATTER_STAGGER_SEC)
                })
                .collect();
            log::debug!("[chatter] {} voices in", self.voices.len());
        } else {
            for v in &mut self.voices {
                v.cancel();
            }
            log::debug!("[chatter] silent");
        }
    }

    pub fn tick(&mut self, now: f64, rng: &mut impl Rng, out: &mut Vec<AudioRequest>) {
        if !self.active {
            return;
        }
        for voice in &mut self.voices {
            if !voice.poll(now, rng) {
                continue;
            }
            let (hz, duration, pause) = CHATTER_PHRASES[rng.gen_range(0..CHATTER_PHRASES.len())];
            out.push(AudioRequest::Chatter(ChatterVoice::new(
                hz + centered(rng, CHATTER_DETUNE_HZ),
                duration,
            )));
            // the next phrase waits for this one's own pause
            voice.defer_until(now + pause + rng.gen::<f64>() * CHATTER_PAUSE_JITTER_SEC);
            self.phrases += 1;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phrases(&self) -> u64 {
        self.phrases
    }

    pub fn voices(&self) -> &[Cadence] {
        &self.voices
    }
}
