use crate::constants::*;
use crate::pool::{EntityId, IdAllocator, Pool};
use crate::render::{DrawHint, Layer, RenderInstance};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct Ripple {
    pub id: EntityId,
    pub position: Vec2,
    pub born_at: f64,
}

impl Ripple {
    fn age(&self, now: f64) -> f32 {
        (now - self.born_at).max(0.0) as f32
    }

    pub fn scale_at(&self, now: f64) -> f32 {
        1.0 + self.age(now) * RIPPLE_GROWTH
    }

    pub fn opacity_at(&self, now: f64) -> f32 {
        let life = RIPPLE_LIFETIME_SEC as f32;
        (RIPPLE_OPACITY * (1.0 - self.age(now) / life)).max(0.0)
    }
}

pub struct RippleField {
    pool: Pool<Ripple>,
    ids: IdAllocator,
}

impl RippleField {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: Pool::with_capacity(capacity),
            ids: IdAllocator::new(),
        }
    }

    /// Start a ripple at a viewport position; refused when the pool is full.
    pub fn spawn(&mut self, position: Vec2, now: f64) -> bool {
        if self.pool.is_full() {
            return false;
        }
        let ripple = Ripple {
            id: self.ids.next_id(),
            position,
            born_at: now,
        };
        self.pool.try_push(ripple)
    }

    pub fn step(&mut self, now: f64) {
        self.pool
            .retain_mut(|r| now - r.born_at <= RIPPLE_LIFETIME_SEC);
    }

    pub fn instances(&self, now: f64, out: &mut Vec<RenderInstance>) {
        for r in &self.pool {
            out.push(RenderInstance {
                id: r.id,
                layer: Layer::Ripples,
                hint: DrawHint::Ring,
                position: r.position.extend(0.0),
                offset: Vec2::ZERO,
                rotation: Vec3::ZERO,
                scale: r.scale_at(now),
                opacity: r.opacity_at(now),
                color: CURSOR_GOLD,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}
