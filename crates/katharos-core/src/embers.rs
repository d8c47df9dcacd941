use crate::constants::*;
use crate::pool::{EntityId, IdAllocator, Pool};
use crate::random::{centered, in_range};
use crate::render::{DrawHint, Layer, RenderInstance};
use crate::signals::Viewport;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Half extent of the visible ember box in world units.
const EMBER_HALF_VIEW: f32 = 10.0;

#[derive(Clone, Copy, Debug)]
pub struct Ember {
    pub id: EntityId,
    /// Resting position before rise, sway and pointer pull.
    pub base: Vec3,
    /// Height gained since the last wrap, in `[0, EMBER_RISE_SPAN)`.
    pub lift: f32,
    /// Units per second.
    pub speed: f32,
    pub phase: f32,
    pub size: f32,
    pub color: [f32; 4],
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Glowing motes that rise, wrap back to the bottom and lean toward the
/// pointer. Embers are never removed; the pool is filled once at mount.
pub struct EmberField {
    pool: Pool<Ember>,
    time: f32,
    pointer: Vec2,
    wrapped: u64,
}

impl EmberField {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let mut ids = IdAllocator::new();
        let mut pool = Pool::with_capacity(count);
        for _ in 0..count {
            let phase = rng.gen::<f32>() * TAU;
            pool.try_push(Ember {
                id: ids.next_id(),
                base: Vec3::new(
                    centered(rng, EMBER_BOX.x),
                    centered(rng, EMBER_BOX.y),
                    centered(rng, EMBER_BOX.z),
                ),
                lift: phase.rem_euclid(EMBER_RISE_SPAN),
                speed: in_range(rng, EMBER_RISE_SPEED),
                phase,
                size: in_range(rng, EMBER_SIZE),
                color: EMBER_PALETTE[rng.gen_range(0..EMBER_PALETTE.len())],
            });
        }
        Self {
            pool,
            time: 0.0,
            pointer: Vec2::ZERO,
            wrapped: 0,
        }
    }

    /// Pointer in ember world units, see [`EmberField::pointer_to_world`].
    pub fn set_pointer(&mut self, world: Vec2) {
        self.pointer = world;
    }

    pub fn step(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.time += dt;
        for e in self.pool.iter_mut() {
            e.lift += e.speed * dt;
            if e.lift >= EMBER_RISE_SPAN {
                e.lift = e.lift.rem_euclid(EMBER_RISE_SPAN);
                self.wrapped += 1;
            }
        }
    }

    /// Current world position: base, rise, sideways sway, then pointer pull.
    pub fn position(&self, e: &Ember) -> Vec3 {
        let t = self.time;
        let mut p = e.base
            + Vec3::new(
                (t * EMBER_SWAY_RATE.0 + e.phase).sin() * EMBER_SWAY,
                e.lift - EMBER_RISE_SPAN * 0.5,
                (t * EMBER_SWAY_RATE.1 + e.phase).cos() * EMBER_SWAY,
            );
        let pull = (self.pointer - p.truncate()) * EMBER_POINTER_GAIN;
        let reach = pull.length();
        if reach < EMBER_POINTER_REACH {
            let shift = pull * (EMBER_POINTER_REACH - reach) * 0.5;
            p.x += shift.x;
            p.y += shift.y;
        }
        p
    }

    /// Embers fade out as they climb through the fade band.
    pub fn opacity_at_height(y: f32) -> f32 {
        1.0 - smoothstep(EMBER_FADE_BAND.0, EMBER_FADE_BAND.1, y)
    }

    pub fn project(position: Vec3, viewport: Viewport) -> Vec2 {
        let u = (position.x + EMBER_HALF_VIEW) / (EMBER_HALF_VIEW * 2.0);
        let v = (EMBER_HALF_VIEW - position.y) / (EMBER_HALF_VIEW * 2.0);
        Vec2::new(u * viewport.width, v * viewport.height)
    }

    /// Client px to ember world units; the viewport spans `[-10, 10]`.
    pub fn pointer_to_world(client: Vec2, viewport: Viewport) -> Vec2 {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (client.x / viewport.width * 2.0 - 1.0) * EMBER_HALF_VIEW,
            (1.0 - client.y / viewport.height * 2.0) * EMBER_HALF_VIEW,
        )
    }

    pub fn instances(&self, viewport: Viewport, out: &mut Vec<RenderInstance>) {
        for e in &self.pool {
            let p = self.position(e);
            let opacity = Self::opacity_at_height(p.y);
            if opacity <= 0.0 {
                continue;
            }
            let screen = Self::project(p, viewport);
            out.push(RenderInstance {
                id: e.id,
                layer: Layer::Embers,
                hint: DrawHint::Glow,
                position: Vec3::new(screen.x, screen.y, p.z),
                offset: Vec2::ZERO,
                rotation: Vec3::ZERO,
                scale: e.size * EMBER_SIZE_PX,
                opacity,
                color: e.color,
            });
        }
    }

    pub fn embers(&self) -> impl Iterator<Item = &Ember> {
        self.pool.iter()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Times an ember climbed past the top and started over.
    pub fn wrapped(&self) -> u64 {
        self.wrapped
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}
