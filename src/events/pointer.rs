use crate::audio::WebAudio;
use crate::dom::{self, Listener};
use crate::events::keyboard;
use glam::Vec2;
use katharos_core::{is_interactive, HoverTarget, PointerSignal, Scene, SharedAudio};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM element seen through the hover classification trait.
struct ElementNode(web::Element);

impl HoverTarget for ElementNode {
    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(ElementNode)
    }
}

#[derive(Clone)]
pub struct InputWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub scene: Rc<RefCell<Scene>>,
    pub audio: Rc<RefCell<SharedAudio<WebAudio>>>,
}

pub fn wire_input_handlers(w: &InputWiring) -> Vec<Listener> {
    let mut listeners = Vec::new();
    listeners.extend(wire_pointermove(w));
    listeners.extend(wire_pointerover(w));
    listeners.extend(wire_enter_leave(w));
    listeners.extend(wire_click(w));
    listeners.extend(wire_scroll(w));
    listeners.extend(wire_touchstart(w));
    listeners
}

/// First gesture starts the soundscape; the audio context has to be opened
/// (or resumed) inside the same handler. A click on the mute button lands
/// here after its own handler, so the button is re-synced once audio runs.
pub fn gesture(w: &InputWiring) {
    if !w.scene.borrow_mut().on_gesture() {
        return;
    }
    match w.audio.borrow_mut().ensure_open() {
        Ok(backend) => backend.resume(),
        Err(e) => log::warn!("[audio] {}", e),
    }
    keyboard::sync_mute_button(&w.document, w.scene.borrow().is_muted());
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn wire_pointermove(w: &InputWiring) -> Option<Listener> {
    let scene = w.scene.clone();
    Listener::passive(&w.document, "pointermove", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            scene
                .borrow_mut()
                .on_pointer(PointerSignal::Move(client_pos(ev)));
        }
    })
}

fn wire_pointerover(w: &InputWiring) -> Option<Listener> {
    let scene = w.scene.clone();
    Listener::passive(&w.document, "pointerover", move |ev: web::Event| {
        let hovering = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|el| is_interactive(ElementNode(el)))
            .unwrap_or(false);
        scene.borrow_mut().on_hover(hovering);
    })
}

fn wire_enter_leave(w: &InputWiring) -> Vec<Listener> {
    let Some(root) = w.document.document_element() else {
        return Vec::new();
    };
    let scene_enter = w.scene.clone();
    let scene_leave = w.scene.clone();
    [
        Listener::new(&root, "mouseenter", move |_ev| {
            scene_enter.borrow_mut().on_pointer(PointerSignal::Enter)
        }),
        Listener::new(&root, "mouseleave", move |_ev| {
            scene_leave.borrow_mut().on_pointer(PointerSignal::Leave)
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn wire_click(w: &InputWiring) -> Option<Listener> {
    let wiring = w.clone();
    Listener::new(&w.window, "click", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            wiring.scene.borrow_mut().on_click(client_pos(ev));
        }
        gesture(&wiring);
    })
}

fn wire_scroll(w: &InputWiring) -> Option<Listener> {
    let wiring = w.clone();
    Listener::passive(&w.window, "scroll", move |_ev| {
        let spawned = wiring
            .scene
            .borrow_mut()
            .on_scroll(dom::scroll_y(&wiring.window));
        if spawned > 0 {
            log::debug!("[relics] spawned {}", spawned);
        }
        gesture(&wiring);
    })
}

fn wire_touchstart(w: &InputWiring) -> Option<Listener> {
    let wiring = w.clone();
    Listener::passive(&w.window, "touchstart", move |_ev| gesture(&wiring))
}
