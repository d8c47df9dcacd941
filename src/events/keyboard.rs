use crate::audio::WebAudio;
use crate::dom::Listener;
use crate::input::{key_action, KeyAction};
use crate::modal;
use katharos_core::{Scene, SharedAudio};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flip ambient mute and reflect it on the mute button, if the page has one.
pub fn toggle_mute(
    document: &web::Document,
    scene: &Rc<RefCell<Scene>>,
    audio: &Rc<RefCell<SharedAudio<WebAudio>>>,
) {
    let muted = scene.borrow_mut().toggle_mute();
    if !muted {
        if let Ok(backend) = audio.borrow_mut().ensure_open() {
            backend.resume();
        }
    }
    sync_mute_button(document, muted);
}

/// Mirror the scene's mute state onto the mute button, if the page has one.
pub fn sync_mute_button(document: &web::Document, muted: bool) {
    if let Some(btn) = document.get_element_by_id(crate::constants::MUTE_BUTTON_ID) {
        _ = btn.set_attribute("aria-pressed", if muted { "true" } else { "false" });
    }
}

pub fn wire_global_keydown(
    document: web::Document,
    scene: Rc<RefCell<Scene>>,
    audio: Rc<RefCell<SharedAudio<WebAudio>>>,
) -> Option<Listener> {
    let target = document.clone();
    Listener::new(&target, "keydown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        // typing into the waitlist form must not toggle audio
        if let Some(t) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) {
            let tag = t.tag_name().to_ascii_lowercase();
            if tag == "input" || tag == "textarea" {
                if key_action(&ev.key()) == Some(KeyAction::CloseModal) {
                    modal::hide(&document);
                }
                return;
            }
        }
        match key_action(&ev.key()) {
            Some(KeyAction::ToggleMute) => toggle_mute(&document, &scene, &audio),
            Some(KeyAction::CloseModal) => modal::hide(&document),
            None => {}
        }
    })
}
