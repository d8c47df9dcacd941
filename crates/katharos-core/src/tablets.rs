use crate::constants::*;
use crate::pool::{EntityId, IdAllocator};
use crate::random::{centered, in_range};
use crate::render::{DrawHint, Layer, RenderInstance};
use crate::signals::Scrub;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct Tablet {
    pub id: EntityId,
    /// Percent of viewport.
    pub anchor: Vec2,
    /// Resting depth in px, negative is away from the viewer.
    pub depth: f32,
    pub rotation: Vec3,
    pub float_speed: f32,
    pub float_offset: f32,
    pub size: f32,
    pub inscription: &'static str,
}

/// Per-frame pose of one tablet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TabletPose {
    pub float_y: f32,
    pub depth: f32,
    pub rotation: Vec3,
}

pub struct TabletField {
    tablets: Vec<Tablet>,
    time: f32,
    depth_shift: Scrub,
}

impl TabletField {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let mut ids = IdAllocator::new();
        let tablets = (0..count)
            .map(|i| Tablet {
                id: ids.next_id(),
                anchor: Vec2::new(in_range(rng, TABLET_X_RANGE), in_range(rng, TABLET_Y_RANGE)),
                depth: in_range(rng, TABLET_DEPTH_RANGE),
                rotation: Vec3::new(centered(rng, 20.0), centered(rng, 30.0), centered(rng, 10.0)),
                float_speed: in_range(rng, TABLET_FLOAT_SPEED),
                float_offset: rng.gen::<f32>() * TAU,
                size: in_range(rng, TABLET_SIZE),
                inscription: TABLET_INSCRIPTIONS[i % TABLET_INSCRIPTIONS.len()],
            })
            .collect();
        Self {
            tablets,
            time: 0.0,
            depth_shift: Scrub::new(0.0, TABLET_SCRUB_SECONDS),
        }
    }

    /// Advance the float clock. A non-positive `dt` falls back to the fixed
    /// 60 fps step.
    pub fn step(&mut self, dt: f32, scroll_progress: f32) {
        let dt = if dt > 0.0 { dt } else { TABLET_TIME_STEP };
        self.time += dt;
        self.depth_shift
            .set_target(scroll_progress.clamp(0.0, 1.0) * TABLET_SCROLL_DEPTH);
        self.depth_shift.step(dt);
    }

    pub fn pose(&self, tablet: &Tablet) -> TabletPose {
        let float_y = (self.time * tablet.float_speed + tablet.float_offset).sin() * TABLET_FLOAT_AMPLITUDE;
        let wobble = (self.time * TABLET_WOBBLE_RATE + tablet.float_offset).sin() * TABLET_WOBBLE_AMPLITUDE;
        TabletPose {
            float_y,
            depth: tablet.depth + self.depth_shift.value(),
            rotation: tablet.rotation + Vec3::new(0.0, wobble, 0.0),
        }
    }

    pub fn instances(&self, out: &mut Vec<RenderInstance>) {
        for t in &self.tablets {
            let pose = self.pose(t);
            out.push(RenderInstance {
                id: t.id,
                layer: Layer::Tablets,
                hint: DrawHint::Plane {
                    inscription: t.inscription,
                },
                position: Vec3::new(t.anchor.x, t.anchor.y, pose.depth),
                offset: Vec2::new(0.0, pose.float_y),
                rotation: pose.rotation,
                scale: t.size,
                opacity: 1.0,
                color: [80.0 / 255.0, 75.0 / 255.0, 70.0 / 255.0, 0.9],
            });
        }
    }

    pub fn tablets(&self) -> &[Tablet] {
        &self.tablets
    }

    pub fn depth_shift(&self) -> f32 {
        self.depth_shift.value()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn len(&self) -> usize {
        self.tablets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tablets.is_empty()
    }

    pub fn clear(&mut self) {
        self.tablets.clear();
    }
}
