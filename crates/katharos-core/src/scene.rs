//! All effects mounted together behind one per-frame entry point.
//!
//! The front-end forwards raw signals into a [`Scene`] and calls
//! [`Scene::frame`] from its animation callback. Effects are stepped
//! independently; none of them reads another's state. After
//! [`Scene::unmount`] every entry point is a no-op.

use crate::ambient::AmbientSoundscape;
use crate::audio::AudioRequest;
use crate::chatter::DebateChatter;
use crate::config::EffectsConfig;
use crate::constants::{SPARK_COUNT, TABLET_TIME_STEP};
use crate::cursor::CursorFollower;
use crate::embers::EmberField;
use crate::error::FxResult;
use crate::lightning::{Lightning, Strike};
use crate::rain::RainField;
use crate::relics::RelicSpawner;
use crate::render::{RenderInstance, Resolved, SpriteId};
use crate::ripples::RippleField;
use crate::signals::{FrameSignals, PointerSignal};
use crate::sparks::SparkField;
use crate::tablets::TabletField;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What one frame produced. Borrowed from the scene until the next call.
pub struct FrameOutput<'a> {
    pub instances: &'a [RenderInstance],
    pub audio: &'a [AudioRequest],
    /// Brightest active lightning flash, for a single overlay element.
    pub flash_opacity: f32,
    pub strike: Option<Strike>,
    pub relics_stepped: bool,
}

/// Counters surfaced to the native harness and logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub frames: u64,
    pub relics_spawned: u64,
    pub relics_peak: usize,
    pub strikes: u64,
    pub ripples_spawned: u64,
    pub chatter_phrases: u64,
}

pub struct Scene {
    config: EffectsConfig,
    rng: StdRng,
    relics: RelicSpawner,
    tablets: TabletField,
    rain: RainField,
    lightning: Lightning,
    cursor: CursorFollower,
    ripples: RippleField,
    embers: EmberField,
    sparks: SparkField,
    ambient: AmbientSoundscape,
    chatter: DebateChatter,
    chatter_visible: bool,
    /// Last client position seen, for the ember pull.
    pointer: Option<Vec2>,
    instances: Vec<RenderInstance>,
    /// Requests raised between frames (gestures, mute), flushed by `frame`.
    pending_audio: Vec<AudioRequest>,
    audio: Vec<AudioRequest>,
    last_now: f64,
    stats: SceneStats,
    mounted: bool,
}

impl Scene {
    pub fn mount(config: EffectsConfig, seed: u64) -> FxResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let relics = RelicSpawner::new(&config);
        let tablets = TabletField::new(config.tablet_count, &mut rng);
        let rain = RainField::new(config.rain_intensity, &mut rng);
        let lightning = Lightning::new(&config, 0.0, &mut rng);
        let cursor = CursorFollower::new(config.cursor_smoothing);
        let ripples = RippleField::new(config.max_ripples);
        let embers = EmberField::new(config.ember_count, &mut rng);
        let sparks = SparkField::new(SPARK_COUNT, &mut rng);
        log::info!(
            "[scene] mounted relics<={} tablets={} drops={} next_strike={:.1}s",
            relics.capacity(),
            tablets.len(),
            rain.len(),
            lightning.next_strike_at()
        );
        Ok(Self {
            config,
            rng,
            relics,
            tablets,
            rain,
            lightning,
            cursor,
            ripples,
            embers,
            sparks,
            ambient: AmbientSoundscape::new(),
            chatter: DebateChatter::new(),
            chatter_visible: false,
            pointer: None,
            instances: Vec::new(),
            pending_audio: Vec::new(),
            audio: Vec::new(),
            last_now: 0.0,
            stats: SceneStats::default(),
            mounted: true,
        })
    }

    pub fn on_scroll(&mut self, scroll_y: f32) -> usize {
        if !self.mounted {
            return 0;
        }
        let n = self.relics.on_scroll(scroll_y, &mut self.rng);
        self.stats.relics_spawned += n as u64;
        self.stats.relics_peak = self.stats.relics_peak.max(self.relics.len());
        n
    }

    pub fn set_scroll_origin(&mut self, scroll_y: f32) {
        self.relics.set_scroll_origin(scroll_y);
    }

    pub fn on_pointer(&mut self, signal: PointerSignal) {
        if !self.mounted {
            return;
        }
        if let PointerSignal::Move(p) = signal {
            self.pointer = Some(p);
        }
        self.cursor.on_pointer(signal);
    }

    pub fn on_hover(&mut self, hovering: bool) {
        if self.mounted {
            self.cursor.set_hovering(hovering);
        }
    }

    pub fn set_coarse_pointer(&mut self, coarse: bool) {
        if self.mounted {
            self.cursor.set_coarse_pointer(coarse);
        }
    }

    pub fn on_click(&mut self, position: Vec2) -> bool {
        if !self.mounted {
            return false;
        }
        let spawned = self.ripples.spawn(position, self.last_now);
        if spawned {
            self.stats.ripples_spawned += 1;
        }
        spawned
    }

    /// First user gesture; starts the ambient soundscape. Any resulting
    /// audio requests are returned by the next [`Scene::frame`].
    pub fn on_gesture(&mut self) -> bool {
        self.mounted
            && self
                .ambient
                .on_gesture(self.last_now, &mut self.pending_audio)
    }

    /// Whether the debate section is far enough on screen for chatter.
    pub fn set_chatter_visible(&mut self, visible: bool) {
        if self.mounted {
            self.chatter_visible = visible;
        }
    }

    /// Ambient mute as the page should show it. True until audio starts.
    pub fn is_muted(&self) -> bool {
        self.ambient.is_muted()
    }

    /// Flip ambient mute. Before the first gesture nothing is playing, so
    /// this is a no-op that reports muted.
    pub fn toggle_mute(&mut self) -> bool {
        if !self.mounted {
            return true;
        }
        self.ambient
            .toggle_mute(self.last_now, &mut self.rng, &mut self.pending_audio)
    }

    pub fn settle_relic_sprite(&mut self, outcome: Resolved<SpriteId>) {
        self.relics.settle_sprite(outcome);
    }

    pub fn frame(&mut self, signals: &FrameSignals) -> FrameOutput<'_> {
        self.instances.clear();
        self.audio.clear();
        if !self.mounted {
            return FrameOutput {
                instances: &self.instances,
                audio: &self.audio,
                flash_opacity: 0.0,
                strike: None,
                relics_stepped: false,
            };
        }
        let now = signals.now;
        self.last_now = now;
        self.stats.frames += 1;
        self.audio.append(&mut self.pending_audio);

        let relics_stepped = self.relics.on_frame(signals.viewport.height);
        self.tablets.step(signals.dt, signals.scroll_progress);
        self.rain.step(&mut self.rng);
        let strike = self.lightning.tick(now, &mut self.rng, &mut self.audio);
        if strike.is_some() {
            self.stats.strikes += 1;
        }
        self.cursor.step();
        self.ripples.step(now);
        let ember_pointer = self
            .pointer
            .map(|p| EmberField::pointer_to_world(p, signals.viewport))
            .unwrap_or(Vec2::ZERO);
        self.embers.set_pointer(ember_pointer);
        self.embers.step(if signals.dt > 0.0 {
            signals.dt
        } else {
            TABLET_TIME_STEP
        });
        let sparking = self.cursor.is_enabled()
            && self.cursor.is_visible()
            && self.cursor.is_hovering();
        self.sparks.set_active(sparking, self.cursor.dot());
        self.sparks.step();
        self.ambient
            .tick(now, signals.scroll_progress, &mut self.rng, &mut self.audio);
        let chatter_on =
            self.chatter_visible && self.ambient.is_started() && !self.ambient.is_muted();
        self.chatter.set_active(chatter_on, now);
        let before = self.audio.len();
        self.chatter.tick(now, &mut self.rng, &mut self.audio);
        self.stats.chatter_phrases += (self.audio.len() - before) as u64;

        self.tablets.instances(&mut self.instances);
        self.embers.instances(signals.viewport, &mut self.instances);
        self.rain.instances(signals.viewport, &mut self.instances);
        self.relics
            .instances(signals.viewport.width, &mut self.instances);
        self.ripples.instances(now, &mut self.instances);
        self.sparks.instances(&mut self.instances);
        self.lightning.instances(now, &mut self.instances);
        self.cursor.instances(&mut self.instances);

        FrameOutput {
            instances: &self.instances,
            audio: &self.audio,
            flash_opacity: self.lightning.flash_opacity(now),
            strike,
            relics_stepped,
        }
    }

    /// Stop everything and drop all entities. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.lightning.cancel();
        self.ambient.stop();
        self.chatter.set_active(false, self.last_now);
        self.chatter_visible = false;
        self.relics.clear();
        self.tablets.clear();
        self.rain.clear();
        self.ripples.clear();
        self.embers.clear();
        self.sparks.clear();
        self.instances.clear();
        self.pending_audio.clear();
        self.audio.clear();
        log::info!(
            "[scene] unmounted after {} frames ({} relics, {} strikes)",
            self.stats.frames,
            self.stats.relics_spawned,
            self.stats.strikes
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    pub fn relics(&self) -> &RelicSpawner {
        &self.relics
    }

    pub fn tablets(&self) -> &TabletField {
        &self.tablets
    }

    pub fn rain(&self) -> &RainField {
        &self.rain
    }

    pub fn lightning(&self) -> &Lightning {
        &self.lightning
    }

    pub fn cursor(&self) -> &CursorFollower {
        &self.cursor
    }

    pub fn ripples(&self) -> &RippleField {
        &self.ripples
    }

    pub fn ambient(&self) -> &AmbientSoundscape {
        &self.ambient
    }

    pub fn embers(&self) -> &EmberField {
        &self.embers
    }

    pub fn sparks(&self) -> &SparkField {
        &self.sparks
    }

    pub fn chatter(&self) -> &DebateChatter {
        &self.chatter
    }
}
