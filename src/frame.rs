use crate::audio::WebAudio;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::input::{clamp_dt, visible_fraction};
use crate::render::{DomLayers, Painter};
use instant::Instant;
use katharos_core::{scroll_progress, FrameSignals, Scene, SharedAudio, CHATTER_VISIBLE_RATIO};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub window: web::Window,
    pub document: web::Document,
    pub scene: Rc<RefCell<Scene>>,
    pub audio: Rc<RefCell<SharedAudio<WebAudio>>>,
    pub painter: Rc<RefCell<Painter>>,
    pub layers: Rc<RefCell<DomLayers>>,
    /// Debate section, if this page has one; chatter plays while it shows.
    pub chatter_section: Option<web::Element>,
    pub mounted_at: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = clamp_dt((now - self.last_instant).as_secs_f32(), MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let viewport = dom::viewport(&self.window);
        let scroll_y = dom::scroll_y(&self.window);
        let signals = FrameSignals {
            now: (now - self.mounted_at).as_secs_f64(),
            dt: dt_sec,
            scroll_y,
            scroll_progress: scroll_progress(
                scroll_y,
                dom::document_height(&self.document),
                viewport.height,
            ),
            viewport,
        };

        let mut scene = self.scene.borrow_mut();
        if let Some(section) = &self.chatter_section {
            let rect = section.get_bounding_client_rect();
            let shown = visible_fraction(rect.top() as f32, rect.height() as f32, viewport.height);
            scene.set_chatter_visible(shown >= CHATTER_VISIBLE_RATIO);
        }
        let hovering = scene.cursor().is_hovering();
        let out = scene.frame(&signals);
        if let Some(strike) = out.strike {
            log::debug!(
                "[lightning] strike t={:.2}s thunder at {:.2}s",
                strike.at,
                strike.thunder_at
            );
        }
        if !out.audio.is_empty() {
            self.audio.borrow_mut().play_all(out.audio);
        }
        self.painter.borrow_mut().paint(out.instances, viewport);
        self.layers
            .borrow_mut()
            .update(&self.document, out.instances, out.flash_opacity, hovering);
    }
}

/// Cancels the animation loop when asked. The loop also stops by itself once
/// the cancel flag is seen.
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    cancelled: Rc<Cell<bool>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // breaks the closure's self-reference
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    let cancelled = Rc::new(Cell::new(false));

    let tick_clone = tick.clone();
    let raf_id_tick = raf_id.clone();
    let cancelled_tick = cancelled.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_id_tick.set(None);
        if cancelled_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        raf_id_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    raf_id.set(request_frame(&tick));

    LoopHandle {
        raf_id,
        cancelled,
        tick,
    }
}
