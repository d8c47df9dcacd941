use crate::constants::*;
use crate::pool::{EntityId, IdAllocator};
use crate::random::{centered, in_range};
use crate::render::{DrawHint, Layer, RenderInstance};
use crate::signals::Viewport;
use glam::{Vec2, Vec3};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct Raindrop {
    pub id: EntityId,
    pub position: Vec3,
    /// World units per frame.
    pub speed: f32,
    /// Streak length in px.
    pub length: f32,
    pub opacity: f32,
}

pub struct RainField {
    drops: Vec<Raindrop>,
    recycled: u64,
}

/// Number of drops for a rain intensity in [0, 1].
pub fn drop_count(intensity: f32) -> usize {
    (RAIN_MAX_DROPS as f32 * intensity.clamp(0.0, 1.0)).floor() as usize
}

impl RainField {
    pub fn new(intensity: f32, rng: &mut impl Rng) -> Self {
        let mut ids = IdAllocator::new();
        let drops = (0..drop_count(intensity))
            .map(|_| Raindrop {
                id: ids.next_id(),
                position: Vec3::new(
                    centered(rng, RAIN_HALF_WIDTH * 2.0),
                    rng.gen::<f32>() * RAIN_START_HEIGHT,
                    centered(rng, RAIN_HALF_WIDTH * 2.0),
                ),
                speed: in_range(rng, RAIN_FALL_SPEED),
                length: in_range(rng, (10.0, 30.0)),
                opacity: in_range(rng, (0.1, 0.4)),
            })
            .collect();
        Self { drops, recycled: 0 }
    }

    pub fn step(&mut self, rng: &mut impl Rng) {
        for d in &mut self.drops {
            d.position.y -= d.speed;
            d.position += RAIN_DRIFT;

            if d.position.y < RAIN_FLOOR_Y {
                d.position.y = in_range(rng, RAIN_RESPAWN_BAND);
                d.position.x = centered(rng, RAIN_HALF_WIDTH * 2.0);
                d.position.z = centered(rng, RAIN_HALF_WIDTH * 2.0);
                self.recycled += 1;
            }
            if d.position.x > RAIN_HALF_WIDTH {
                d.position.x -= RAIN_HALF_WIDTH * 2.0;
            }
            if d.position.z > RAIN_HALF_WIDTH {
                d.position.z -= RAIN_HALF_WIDTH * 2.0;
            }
        }
    }

    /// Map a world-space drop position onto the viewport. Top of the spawn
    /// band sits at the top edge, the floor at the bottom edge.
    pub fn project(position: Vec3, viewport: Viewport) -> Vec2 {
        let u = (position.x + RAIN_HALF_WIDTH) / (RAIN_HALF_WIDTH * 2.0);
        let span = RAIN_RESPAWN_BAND.1 - RAIN_FLOOR_Y;
        let v = (RAIN_RESPAWN_BAND.1 - position.y) / span;
        Vec2::new(u * viewport.width, v * viewport.height)
    }

    pub fn instances(&self, viewport: Viewport, out: &mut Vec<RenderInstance>) {
        for d in &self.drops {
            let p = Self::project(d.position, viewport);
            // nearer drops (positive z) read slightly brighter
            let depth = ((d.position.z + RAIN_HALF_WIDTH) / (RAIN_HALF_WIDTH * 2.0)).clamp(0.0, 1.0);
            out.push(RenderInstance {
                id: d.id,
                layer: Layer::Rain,
                hint: DrawHint::Line { length: d.length },
                position: Vec3::new(p.x, p.y, d.position.z),
                offset: Vec2::ZERO,
                rotation: Vec3::ZERO,
                scale: 1.0,
                opacity: d.opacity * (0.7 + 0.3 * depth),
                color: RAIN_COLOR,
            });
        }
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn drops_mut(&mut self) -> &mut [Raindrop] {
        &mut self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Total drops sent back to the spawn band since mount.
    pub fn recycled(&self) -> u64 {
        self.recycled
    }

    pub fn clear(&mut self) {
        self.drops.clear();
    }
}
