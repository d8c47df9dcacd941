use crate::config::EffectsConfig;
use crate::constants::*;
use crate::pool::{EntityId, IdAllocator, Pool};
use crate::random::{centered, in_range};
use crate::render::{AssetSlot, DrawHint, Layer, RenderInstance, Resolved, SpriteId};
use glam::{Vec2, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Spawned,
    Falling,
    Fading,
}

#[derive(Clone, Debug)]
pub struct Relic {
    pub id: EntityId,
    /// x in percent of viewport width, y in px from the top.
    pub position: Vec2,
    pub rotation: Vec3,
    pub velocity: f32,
    pub spin: Vec3,
    pub opacity: f32,
    pub size: f32,
    pub color: [f32; 4],
    pub sprite: Resolved<SpriteId>,
    pub phase: Phase,
}

impl Relic {
    /// Advance one step. Returns `false` once the relic should be dropped.
    fn step(&mut self, viewport_height: f32) -> bool {
        self.position.y += self.velocity;
        self.rotation += self.spin;
        if self.phase == Phase::Spawned {
            self.phase = Phase::Falling;
        }
        if self.position.y > viewport_height - RELIC_FADE_MARGIN {
            self.phase = Phase::Fading;
        }
        if self.phase == Phase::Fading {
            self.opacity = (self.opacity - RELIC_FADE_STEP).max(0.0);
        }
        self.position.y <= viewport_height + RELIC_DISMISS_MARGIN && self.opacity > 0.0
    }
}

/// Stone fragments knocked loose by fast scrolling.
pub struct RelicSpawner {
    pool: Pool<Relic>,
    ids: IdAllocator,
    sprite: AssetSlot<SpriteId>,
    spawn_threshold: f32,
    cooldown_frames: i32,
    cooldown: i32,
    last_scroll_y: f32,
    frame: u64,
}

impl RelicSpawner {
    pub fn new(config: &EffectsConfig) -> Self {
        Self {
            pool: Pool::with_capacity(config.max_relics),
            ids: IdAllocator::new(),
            sprite: AssetSlot::default(),
            spawn_threshold: config.spawn_threshold,
            cooldown_frames: config.spawn_cooldown_frames,
            cooldown: 0,
            last_scroll_y: 0.0,
            frame: 0,
        }
    }

    /// Baseline for the first velocity sample, so mounting mid-page does not
    /// read as one huge scroll.
    pub fn set_scroll_origin(&mut self, scroll_y: f32) {
        self.last_scroll_y = scroll_y;
    }

    pub fn settle_sprite(&mut self, outcome: Resolved<SpriteId>) {
        self.sprite.settle(outcome);
    }

    /// Feed one scroll sample. Returns how many relics were spawned.
    pub fn on_scroll(&mut self, scroll_y: f32, rng: &mut impl Rng) -> usize {
        let velocity = (scroll_y - self.last_scroll_y).abs();
        self.last_scroll_y = scroll_y;

        if !(velocity > self.spawn_threshold) || self.pool.is_full() || self.cooldown > 0 {
            return 0;
        }

        let wanted = ((velocity / SPAWN_VELOCITY_DIVISOR).floor() as usize).min(MAX_SPAWN_PER_EVENT);
        let mut spawned = 0;
        for _ in 0..wanted.min(self.pool.free()) {
            let relic = self.make_relic(rng);
            if self.pool.try_push(relic) {
                spawned += 1;
            }
        }
        self.cooldown = self.cooldown_frames;
        if spawned > 0 {
            log::debug!(
                "[relics] velocity={:.1} spawned={} live={}",
                velocity,
                spawned,
                self.pool.len()
            );
        }
        spawned
    }

    /// Call once per animation frame. Returns whether kinematics ran this
    /// frame (they run on every other frame).
    pub fn on_frame(&mut self, viewport_height: f32) -> bool {
        self.frame += 1;
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
        if self.frame % RELIC_STEP_EVERY != 0 {
            return false;
        }
        self.pool.retain_mut(|r| r.step(viewport_height));
        true
    }

    fn make_relic(&mut self, rng: &mut impl Rng) -> Relic {
        let color = RELIC_PALETTE[rng.gen_range(0..RELIC_PALETTE.len())];
        Relic {
            id: self.ids.next_id(),
            position: Vec2::new(in_range(rng, RELIC_X_RANGE), RELIC_SPAWN_Y),
            rotation: Vec3::new(
                rng.gen::<f32>() * 360.0,
                rng.gen::<f32>() * 360.0,
                rng.gen::<f32>() * 360.0,
            ),
            velocity: in_range(rng, RELIC_FALL_SPEED),
            spin: Vec3::new(
                centered(rng, RELIC_SPIN_XY),
                centered(rng, RELIC_SPIN_XY),
                centered(rng, RELIC_SPIN_Z),
            ),
            opacity: 1.0,
            size: in_range(rng, RELIC_SIZE),
            color,
            sprite: self.sprite.resolve(),
            phase: Phase::Spawned,
        }
    }

    pub fn instances(&self, viewport_width: f32, out: &mut Vec<RenderInstance>) {
        for r in &self.pool {
            out.push(RenderInstance {
                id: r.id,
                layer: Layer::Relics,
                hint: DrawHint::Cube(r.sprite),
                position: Vec3::new(r.position.x / 100.0 * viewport_width, r.position.y, 0.0),
                offset: Vec2::ZERO,
                rotation: r.rotation,
                scale: r.size,
                opacity: r.opacity,
                color: r.color,
            });
        }
    }

    pub fn relics(&self) -> impl Iterator<Item = &Relic> {
        self.pool.iter()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn cooldown(&self) -> i32 {
        self.cooldown
    }

    pub fn clear(&mut self) {
        self.pool.clear();
        self.cooldown = 0;
    }
}
