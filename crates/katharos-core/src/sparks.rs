use crate::constants::*;
use crate::pool::{EntityId, IdAllocator, Pool};
use crate::random::centered;
use crate::render::{DrawHint, Layer, RenderInstance};
use glam::{Vec2, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct Spark {
    pub id: EntityId,
    /// Px from the anchor.
    pub offset: Vec2,
    /// Px per frame; fixed for the spark's life.
    pub velocity: Vec2,
}

/// Sparks thrown off the cursor while it rests on something interactive.
/// A spark that strays past the radius jumps back to the anchor.
pub struct SparkField {
    pool: Pool<Spark>,
    anchor: Vec2,
    active: bool,
    recycled: u64,
}

impl SparkField {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let mut ids = IdAllocator::new();
        let mut pool = Pool::with_capacity(count);
        for _ in 0..count {
            pool.try_push(Spark {
                id: ids.next_id(),
                offset: Vec2::ZERO,
                velocity: Vec2::new(
                    centered(rng, SPARK_SPEED_XZ),
                    -rng.gen::<f32>() * SPARK_SPEED_UP,
                ) * SPARK_UNIT_PX,
            });
        }
        Self {
            pool,
            anchor: Vec2::ZERO,
            active: false,
            recycled: 0,
        }
    }

    #[inline]
    pub fn radius_px() -> f32 {
        SPARK_RADIUS * SPARK_UNIT_PX
    }

    /// Follow `anchor`; a fresh activation restarts every spark at it.
    pub fn set_active(&mut self, active: bool, anchor: Vec2) {
        if active && !self.active {
            for s in self.pool.iter_mut() {
                s.offset = Vec2::ZERO;
            }
        }
        self.active = active;
        self.anchor = anchor;
    }

    pub fn step(&mut self) {
        if !self.active {
            return;
        }
        let radius = Self::radius_px();
        for s in self.pool.iter_mut() {
            s.offset += s.velocity;
            if s.offset.length() > radius {
                s.offset = Vec2::ZERO;
                self.recycled += 1;
            }
        }
    }

    pub fn instances(&self, out: &mut Vec<RenderInstance>) {
        if !self.active {
            return;
        }
        let radius = Self::radius_px();
        for s in &self.pool {
            out.push(RenderInstance {
                id: s.id,
                layer: Layer::Sparks,
                hint: DrawHint::Dot,
                position: (self.anchor + s.offset).extend(0.0),
                offset: Vec2::ZERO,
                rotation: Vec3::ZERO,
                scale: SPARK_SIZE_PX,
                opacity: (1.0 - s.offset.length() / radius).clamp(0.0, 1.0),
                color: [CURSOR_GOLD[0], CURSOR_GOLD[1], CURSOR_GOLD[2], 1.0],
            });
        }
    }

    pub fn sparks(&self) -> impl Iterator<Item = &Spark> {
        self.pool.iter()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn recycled(&self) -> u64 {
        self.recycled
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.pool.clear();
    }
}
