#![cfg(target_arch = "wasm32")]
use crate::audio::WebAudio;
use crate::constants::*;
use crate::dom::Listener;
use instant::Instant;
use katharos_core::{
    EffectsConfig, FxError, Resolved, Scene, SharedAudio, SpriteId, SubscriberList,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod audio;
mod batch;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod modal;
mod render;

static STARTED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// Everything the page effects hold on to. Dropping it tears the page back
/// down: listeners detached, frame loop cancelled, nodes removed, audio closed.
struct Mounted {
    document: web::Document,
    scene: Rc<RefCell<Scene>>,
    audio: Rc<RefCell<SharedAudio<WebAudio>>>,
    painter: Rc<RefCell<render::Painter>>,
    layers: Rc<RefCell<render::DomLayers>>,
    listeners: Vec<Listener>,
    frame_loop: frame::LoopHandle,
    owns_canvas: bool,
}

impl Mounted {
    fn teardown(&mut self) {
        if !self.scene.borrow().is_mounted() {
            return;
        }
        self.listeners.clear();
        self.frame_loop.cancel();
        self.scene.borrow_mut().unmount();
        {
            let painter = self.painter.borrow();
            painter.clear();
            if self.owns_canvas {
                painter.canvas().remove();
            }
        }
        self.layers.borrow_mut().remove();
        self.audio.borrow_mut().close();
        if let Some(body) = self.document.body() {
            _ = body.class_list().remove_1(CURSOR_ACTIVE_CLASS);
        }
        log::info!("[scene] page effects removed");
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

/// The page may ship its own canvas; otherwise a fixed full-viewport one is added.
fn effects_canvas(document: &web::Document) -> anyhow::Result<(web::HtmlCanvasElement, bool)> {
    if let Some(canvas) = dom::element_by_id::<web::HtmlCanvasElement>(document, EFFECTS_CANVAS_ID) {
        return Ok((canvas, false));
    }
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(EFFECTS_CANVAS_ID);
    _ = canvas.set_attribute(
        "style",
        &format!(
            "position:fixed;inset:0;width:100vw;height:100vh;pointer-events:none;z-index:{}",
            Z_EFFECTS_CANVAS
        ),
    );
    _ = canvas.set_attribute("aria-hidden", "true");
    document
        .body()
        .ok_or(FxError::MissingElement("body"))?
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok((canvas, true))
}

fn apply_pointer_kind(
    window: &web::Window,
    document: &web::Document,
    scene: &Rc<RefCell<Scene>>,
    layers: &Rc<RefCell<render::DomLayers>>,
) {
    let coarse = dom::matches_media(window, COARSE_POINTER_QUERY);
    scene.borrow_mut().set_coarse_pointer(coarse);
    if coarse {
        layers.borrow().hide_cursor();
    }
    if let Some(body) = document.body() {
        let cl = body.class_list();
        _ = if coarse {
            cl.remove_1(CURSOR_ACTIVE_CLASS)
        } else {
            cl.add_1(CURSOR_ACTIVE_CLASS)
        };
    }
}

fn wire_resize(
    window: &web::Window,
    document: &web::Document,
    scene: &Rc<RefCell<Scene>>,
    painter: &Rc<RefCell<render::Painter>>,
    layers: &Rc<RefCell<render::DomLayers>>,
) -> Option<Listener> {
    let window_resize = window.clone();
    let document_resize = document.clone();
    let scene = scene.clone();
    let painter = painter.clone();
    let layers = layers.clone();
    Listener::passive(window, "resize", move |_ev| {
        painter.borrow_mut().resize();
        apply_pointer_kind(&window_resize, &document_resize, &scene, &layers);
    })
}

fn load_relic_sprite(scene: Rc<RefCell<Scene>>, painter: Rc<RefCell<render::Painter>>) {
    spawn_local(async move {
        let outcome = match web::HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(RELIC_SPRITE_URL);
                match JsFuture::from(img.decode()).await {
                    Ok(_) => {
                        painter.borrow_mut().set_sprite(img);
                        Resolved::Loaded(SpriteId(0))
                    }
                    Err(e) => {
                        log::warn!("[relics] sprite unavailable ({:?}); using blocks", e);
                        Resolved::Fallback
                    }
                }
            }
            Err(_) => Resolved::Fallback,
        };
        scene.borrow_mut().settle_relic_sprite(outcome);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("katharos-web starting");
    try_mount();
    Ok(())
}

/// Detach every effect from the page. Safe to call repeatedly.
#[wasm_bindgen]
pub fn unmount() {
    let taken = MOUNTED.with(|m| m.borrow_mut().take());
    drop(taken);
    STARTED.store(false, Ordering::SeqCst);
}

/// Mount again after [`unmount`], e.g. on client-side navigation back.
#[wasm_bindgen]
pub fn mount() {
    try_mount();
}

fn try_mount() {
    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
        STARTED.store(false, Ordering::SeqCst);
    }
}

fn init() -> anyhow::Result<()> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let scene = Scene::mount(EffectsConfig::default(), random_seed())?;
    let scene = Rc::new(RefCell::new(scene));
    scene
        .borrow_mut()
        .set_scroll_origin(dom::scroll_y(&window));

    let audio_seed = random_seed();
    let audio = Rc::new(RefCell::new(SharedAudio::new(move || {
        WebAudio::open(audio_seed)
    })));

    let (canvas, owns_canvas) = effects_canvas(&document)?;
    let painter = match render::Painter::new(canvas.clone()) {
        Ok(p) => Rc::new(RefCell::new(p)),
        Err(e) => {
            if owns_canvas {
                canvas.remove();
            }
            return Err(e);
        }
    };
    let layers = Rc::new(RefCell::new(render::DomLayers::mount(&document)));
    load_relic_sprite(scene.clone(), painter.clone());
    apply_pointer_kind(&window, &document, &scene, &layers);

    let wiring = events::pointer::InputWiring {
        window: window.clone(),
        document: document.clone(),
        scene: scene.clone(),
        audio: audio.clone(),
    };
    let mut listeners = events::pointer::wire_input_handlers(&wiring);
    listeners.extend(wire_resize(&window, &document, &scene, &painter, &layers));
    listeners.extend(events::keyboard::wire_global_keydown(
        document.clone(),
        scene.clone(),
        audio.clone(),
    ));
    {
        let doc_mute = document.clone();
        let scene_mute = scene.clone();
        let audio_mute = audio.clone();
        listeners.extend(dom::add_click_listener(&document, MUTE_BUTTON_ID, move || {
            events::keyboard::toggle_mute(&doc_mute, &scene_mute, &audio_mute)
        }));
    }
    events::keyboard::sync_mute_button(&document, scene.borrow().is_muted());
    let subscribers = Rc::new(RefCell::new(SubscriberList::new()));
    listeners.extend(modal::wire(&document, subscribers));
    log::info!("[scene] {} listeners attached", listeners.len());

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        window: window.clone(),
        document: document.clone(),
        scene: scene.clone(),
        audio: audio.clone(),
        painter: painter.clone(),
        layers: layers.clone(),
        chatter_section: document
            .query_selector(CHATTER_SECTION_SELECTOR)
            .ok()
            .flatten(),
        mounted_at: now,
        last_instant: now,
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    let mounted = Mounted {
        document,
        scene,
        audio,
        painter,
        layers,
        listeners,
        frame_loop,
        owns_canvas,
    };
    let previous = MOUNTED.with(|m| m.borrow_mut().replace(mounted));
    drop(previous);
    Ok(())
}
