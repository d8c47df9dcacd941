use glam::Vec2;

/// What a key press asks the page to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMute,
    CloseModal,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "m" | "M" => Some(KeyAction::ToggleMute),
        "Escape" => Some(KeyAction::CloseModal),
        _ => None,
    }
}

/// Share of an element's height inside `[0, viewport_h)`, from its
/// bounding-rect `top` and `height`.
pub fn visible_fraction(top: f32, height: f32, viewport_h: f32) -> f32 {
    if height <= 0.0 || viewport_h <= 0.0 {
        return 0.0;
    }
    let shown = (top + height).min(viewport_h) - top.max(0.0);
    (shown / height).clamp(0.0, 1.0)
}

/// Seconds between two animation callbacks, clamped to `[0, max]`.
#[inline]
pub fn clamp_dt(dt_sec: f32, max: f32) -> f32 {
    if dt_sec.is_finite() {
        dt_sec.clamp(0.0, max)
    } else {
        0.0
    }
}

/// CSS transform placing a square element of `size` px centered on `pos`.
pub fn centered_transform(pos: Vec2, size: f32) -> String {
    let half = size * 0.5;
    format!(
        "translate3d({:.2}px, {:.2}px, 0)",
        pos.x - half,
        pos.y - half
    )
}

/// CSS transform for a tablet: float offset and depth, then rotation (deg).
pub fn tablet_transform(float_y: f32, depth: f32, rotation: glam::Vec3) -> String {
    format!(
        "translate3d(0, {:.2}px, {:.2}px) rotateX({:.2}deg) rotateY({:.2}deg) rotateZ({:.2}deg)",
        float_y, depth, rotation.x, rotation.y, rotation.z
    )
}
