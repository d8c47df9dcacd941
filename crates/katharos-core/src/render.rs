use crate::pool::EntityId;
use glam::{Vec2, Vec3};

/// Outcome of trying to load an external asset, fixed once per entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved<A> {
    Loaded(A),
    Fallback,
}

impl<A: Copy> Resolved<A> {
    pub fn loaded(&self) -> Option<A> {
        match self {
            Resolved::Loaded(a) => Some(*a),
            Resolved::Fallback => None,
        }
    }
}

/// Asset that may still be loading. Spawns made before it settles use the
/// procedural fallback and keep it for their whole life.
#[derive(Clone, Copy, Debug)]
pub enum AssetSlot<A> {
    Pending,
    Ready(Resolved<A>),
}

impl<A> Default for AssetSlot<A> {
    fn default() -> Self {
        AssetSlot::Pending
    }
}

impl<A: Copy> AssetSlot<A> {
    pub fn settle(&mut self, outcome: Resolved<A>) {
        *self = AssetSlot::Ready(outcome);
    }

    pub fn resolve(&self) -> Resolved<A> {
        match self {
            AssetSlot::Ready(r) => *r,
            AssetSlot::Pending => Resolved::Fallback,
        }
    }
}

/// Handle into the front-end's sprite table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Tablets,
    Embers,
    Rain,
    Relics,
    Ripples,
    Sparks,
    Flash,
    Cursor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawHint {
    /// Falling stone: sprite if one loaded, otherwise a procedural block.
    Cube(Resolved<SpriteId>),
    /// Tablet face carrying an inscription.
    Plane { inscription: &'static str },
    /// Rain streak of the given length.
    Line { length: f32 },
    /// Full-viewport brightness wash.
    Flash,
    Ring,
    Dot,
    /// Soft radial glow.
    Glow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderInstance {
    pub id: EntityId,
    pub layer: Layer,
    pub hint: DrawHint,
    pub position: Vec3,
    /// Pixel offset applied after `position` has been placed.
    pub offset: Vec2,
    /// Degrees, per axis.
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
    pub color: [f32; 4],
}

/// Format an RGBA color as a CSS `rgba()` string.
pub fn css_rgba(color: [f32; 4], alpha_mul: f32) -> String {
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.3})",
        to_u8(color[0]),
        to_u8(color[1]),
        to_u8(color[2]),
        (color[3] * alpha_mul).clamp(0.0, 1.0)
    )
}
