use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Everything an effect may read during one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameSignals {
    /// Monotonic seconds since the scene was mounted.
    pub now: f64,
    /// Seconds since the previous frame; zero on the first frame.
    pub dt: f32,
    pub scroll_y: f32,
    /// 0 at the top of the document, 1 at the bottom.
    pub scroll_progress: f32,
    pub viewport: Viewport,
}

/// Scroll progress over the scrollable height, clamped to [0, 1].
pub fn scroll_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Exponential approach toward a target with a time constant, so a value is
/// scrubbed toward the target instead of snapping to it.
#[derive(Clone, Copy, Debug)]
pub struct Scrub {
    value: f32,
    target: f32,
    tau_sec: f32,
}

impl Scrub {
    pub fn new(initial: f32, tau_sec: f32) -> Self {
        Self {
            value: initial,
            target: initial,
            tau_sec: tau_sec.max(1e-3),
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn step(&mut self, dt_sec: f32) -> f32 {
        let alpha = 1.0 - (-dt_sec.max(0.0) / self.tau_sec).exp();
        self.value += (self.target - self.value) * alpha;
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }
}

/// Pointer sample in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerSignal {
    Move(Vec2),
    Enter,
    Leave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 3000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(9000.0, 3000.0, 1000.0), 1.0);
        // page shorter than the viewport
        assert_eq!(scroll_progress(50.0, 500.0, 1000.0), 0.0);
    }

    #[test]
    fn scrub_approaches_without_overshoot() {
        let mut s = Scrub::new(0.0, 0.5);
        s.set_target(10.0);
        let mut last = 0.0;
        for _ in 0..120 {
            let v = s.step(1.0 / 60.0);
            assert!(v > last && v < 10.0);
            last = v;
        }
    }
}
