use crate::constants::*;
use crate::pool::EntityId;
use crate::render::{DrawHint, Layer, RenderInstance};
use crate::signals::PointerSignal;
use glam::{Vec2, Vec3};

/// Tags that always count as interactive.
pub const INTERACTIVE_TAGS: [&str; 5] = ["a", "button", "input", "textarea", "select"];
/// `role` values that count as interactive.
pub const INTERACTIVE_ROLES: [&str; 2] = ["button", "link"];
/// Attribute that flags any element as interactive.
pub const INTERACTIVE_FLAG: &str = "data-interactive";
const MAX_ANCESTOR_DEPTH: usize = 32;

/// Minimal view of a DOM node for hover classification.
pub trait HoverTarget: Sized {
    fn tag_name(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn parent(&self) -> Option<Self>;
}

pub fn is_interactive_element<T: HoverTarget>(el: &T) -> bool {
    let tag = el.tag_name().to_ascii_lowercase();
    if INTERACTIVE_TAGS.contains(&tag.as_str()) {
        return true;
    }
    if let Some(role) = el.attribute("role") {
        if INTERACTIVE_ROLES.contains(&role.trim().to_ascii_lowercase().as_str()) {
            return true;
        }
    }
    el.attribute(INTERACTIVE_FLAG).is_some()
}

/// True if `target` or any ancestor is interactive.
pub fn is_interactive<T: HoverTarget>(target: T) -> bool {
    let mut node = Some(target);
    let mut depth = 0;
    while let Some(el) = node {
        if is_interactive_element(&el) {
            return true;
        }
        depth += 1;
        if depth >= MAX_ANCESTOR_DEPTH {
            break;
        }
        node = el.parent();
    }
    false
}

#[derive(Clone, Debug)]
pub struct CursorFollower {
    target: Vec2,
    dot: Vec2,
    ring: Vec2,
    smoothing: f32,
    hovering: bool,
    visible: bool,
    enabled: bool,
}

impl CursorFollower {
    pub fn new(smoothing: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            dot: Vec2::ZERO,
            ring: Vec2::ZERO,
            smoothing: smoothing.clamp(f32::EPSILON, 1.0 - f32::EPSILON),
            hovering: false,
            visible: false,
            enabled: true,
        }
    }

    pub fn on_pointer(&mut self, signal: PointerSignal) {
        if !self.enabled {
            return;
        }
        match signal {
            PointerSignal::Move(p) => {
                self.target = p;
                self.dot = p;
                self.visible = true;
            }
            PointerSignal::Enter => self.visible = true,
            PointerSignal::Leave => self.visible = false,
        }
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Coarse (touch) pointers switch the whole controller off.
    pub fn set_coarse_pointer(&mut self, coarse: bool) {
        if coarse && self.enabled {
            log::info!("[cursor] coarse pointer; custom cursor disabled");
        }
        self.enabled = !coarse;
        if coarse {
            self.visible = false;
            self.hovering = false;
        }
    }

    /// One animation frame of ring smoothing.
    pub fn step(&mut self) {
        if !self.enabled {
            return;
        }
        self.ring += (self.target - self.ring) * self.smoothing;
    }

    pub fn ring_size(&self) -> f32 {
        if self.hovering {
            CURSOR_RING_SIZE_HOVER
        } else {
            CURSOR_RING_SIZE
        }
    }

    pub fn dot_size(&self) -> f32 {
        if self.hovering {
            CURSOR_DOT_SIZE_HOVER
        } else {
            CURSOR_DOT_SIZE
        }
    }

    pub fn instances(&self, out: &mut Vec<RenderInstance>) {
        if !self.enabled {
            return;
        }
        let opacity = if self.visible { 1.0 } else { 0.0 };
        out.push(RenderInstance {
            id: EntityId(0),
            layer: Layer::Cursor,
            hint: DrawHint::Ring,
            position: self.ring.extend(0.0),
            offset: Vec2::ZERO,
            rotation: Vec3::ZERO,
            scale: self.ring_size(),
            opacity,
            color: CURSOR_GOLD,
        });
        out.push(RenderInstance {
            id: EntityId(1),
            layer: Layer::Cursor,
            hint: DrawHint::Dot,
            position: self.dot.extend(0.0),
            offset: Vec2::ZERO,
            rotation: Vec3::ZERO,
            scale: self.dot_size(),
            opacity,
            color: [CURSOR_GOLD[0], CURSOR_GOLD[1], CURSOR_GOLD[2], 1.0],
        });
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn dot(&self) -> Vec2 {
        self.dot
    }

    pub fn ring(&self) -> Vec2 {
        self.ring
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
