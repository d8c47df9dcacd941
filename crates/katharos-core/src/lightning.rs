use crate::audio::{AudioRequest, ThunderBurst};
use crate::cadence::Cadence;
use crate::config::EffectsConfig;
use crate::constants::*;
use crate::pool::{EntityId, IdAllocator};
use crate::random::in_range_f64;
use crate::render::{DrawHint, Layer, RenderInstance};
use glam::{Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flash {
    pub id: EntityId,
    pub peak_opacity: f32,
    pub is_secondary: bool,
    pub born_at: f64,
    pub hold_sec: f64,
    pub fade_sec: f64,
}

impl Flash {
    pub fn opacity_at(&self, now: f64) -> f32 {
        let age = now - self.born_at;
        if age < 0.0 {
            return 0.0;
        }
        if age <= self.hold_sec {
            return self.peak_opacity;
        }
        let t = ((age - self.hold_sec) / self.fade_sec.max(1e-6)).min(1.0);
        self.peak_opacity * (1.0 - t as f32)
    }

    pub fn expires_at(&self) -> f64 {
        self.born_at + self.hold_sec + self.fade_sec
    }
}

#[derive(Clone, Copy, Debug)]
enum Queued {
    SecondaryFlash,
    Thunder(ThunderBurst),
}

#[derive(Clone, Copy, Debug)]
struct Due {
    at: f64,
    what: Queued,
}

/// Record of one strike, returned to the caller for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strike {
    pub at: f64,
    pub thunder_at: f64,
}

/// Strikes ride a [`Cadence`]; the second flash pulse and the thunder are
/// queued with absolute due times and drained from `tick`.
pub struct Lightning {
    cadence: Cadence,
    flashes: SmallVec<[Flash; 4]>,
    queue: SmallVec<[Due; 4]>,
    ids: IdAllocator,
    thunder_delay: (f64, f64),
    strikes: u64,
    last_strike: Option<f64>,
}

impl Lightning {
    pub fn new(config: &EffectsConfig, now: f64, rng: &mut impl Rng) -> Self {
        Self {
            cadence: Cadence::new(config.lightning_interval, now, rng),
            flashes: SmallVec::new(),
            queue: SmallVec::new(),
            ids: IdAllocator::new(),
            thunder_delay: config.thunder_delay,
            strikes: 0,
            last_strike: None,
        }
    }

    /// Poll the cadence and drain anything due. Thunder requests go to
    /// `audio_out`.
    pub fn tick(
        &mut self,
        now: f64,
        rng: &mut impl Rng,
        audio_out: &mut Vec<AudioRequest>,
    ) -> Option<Strike> {
        let strike = if self.cadence.poll(now, rng) {
            Some(self.strike(now, rng))
        } else {
            None
        };
        self.drain_due(now, audio_out);
        self.flashes.retain(|f| now < f.expires_at());
        strike
    }

    fn strike(&mut self, now: f64, rng: &mut impl Rng) -> Strike {
        self.flashes.push(Flash {
            id: self.ids.next_id(),
            peak_opacity: FLASH_PRIMARY_OPACITY,
            is_secondary: false,
            born_at: now,
            hold_sec: FLASH_PRIMARY_HOLD_SEC,
            fade_sec: FLASH_PRIMARY_FADE_SEC,
        });
        self.queue.push(Due {
            at: now + FLASH_SECONDARY_DELAY_SEC,
            what: Queued::SecondaryFlash,
        });
        let thunder_at = now + in_range_f64(rng, self.thunder_delay);
        self.queue.push(Due {
            at: thunder_at,
            what: Queued::Thunder(ThunderBurst::default()),
        });

        if let Some(prev) = self.last_strike {
            log::debug!("[lightning] strike at {:.2}s ({:.2}s after previous)", now, now - prev);
        } else {
            log::debug!("[lightning] first strike at {:.2}s", now);
        }
        self.strikes += 1;
        self.last_strike = Some(now);
        Strike { at: now, thunder_at }
    }

    fn drain_due(&mut self, now: f64, audio_out: &mut Vec<AudioRequest>) {
        let mut i = 0;
        while i < self.queue.len() {
            if self.queue[i].at > now {
                i += 1;
                continue;
            }
            let due = self.queue.remove(i);
            match due.what {
                Queued::SecondaryFlash => self.flashes.push(Flash {
                    id: self.ids.next_id(),
                    peak_opacity: FLASH_SECONDARY_OPACITY,
                    is_secondary: true,
                    born_at: due.at,
                    hold_sec: FLASH_SECONDARY_HOLD_SEC,
                    fade_sec: FLASH_SECONDARY_FADE_SEC,
                }),
                Queued::Thunder(burst) => audio_out.push(AudioRequest::Thunder(burst)),
            }
        }
    }

    /// Brightest live flash at `now`, for a single full-viewport overlay.
    pub fn flash_opacity(&self, now: f64) -> f32 {
        self.flashes
            .iter()
            .map(|f| f.opacity_at(now))
            .fold(0.0, f32::max)
    }

    pub fn instances(&self, now: f64, out: &mut Vec<RenderInstance>) {
        for f in &self.flashes {
            out.push(RenderInstance {
                id: f.id,
                layer: Layer::Flash,
                hint: DrawHint::Flash,
                position: Vec3::ZERO,
                offset: Vec2::ZERO,
                rotation: Vec3::ZERO,
                scale: 1.0,
                opacity: f.opacity_at(now),
                color: [1.0, 1.0, 1.0, 1.0],
            });
        }
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    pub fn strikes(&self) -> u64 {
        self.strikes
    }

    pub fn last_strike(&self) -> Option<f64> {
        self.last_strike
    }

    pub fn next_strike_at(&self) -> f64 {
        self.cadence.next_at()
    }

    pub fn min_interval(&self) -> f64 {
        self.cadence.min_interval()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Stop striking and drop anything queued or on screen.
    pub fn cancel(&mut self) {
        self.cadence.cancel();
        self.queue.clear();
        self.flashes.clear();
    }
}
