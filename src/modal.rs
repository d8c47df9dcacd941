use crate::constants::*;
use crate::dom::{self, Listener, Timeout};
use katharos_core::{SubmitOutcome, SubscriberList};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(MODAL_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        _ = el.set_attribute("aria-hidden", "false");
    }
    if let Some(input) = dom::element_by_id::<web::HtmlInputElement>(document, MODAL_EMAIL_ID) {
        _ = input.focus();
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(MODAL_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("aria-hidden", "true");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(MODAL_ID)
        .map(|el| el.class_list().contains(HIDDEN_CLASS))
        .unwrap_or(true)
}

fn show_outcome(document: &web::Document, outcome: SubmitOutcome) {
    let Some(el) = document.get_element_by_id(MODAL_MESSAGE_ID) else {
        return;
    };
    el.set_text_content(Some(outcome.message()));
    let cl = el.class_list();
    _ = cl.remove_2("success", "error");
    _ = cl.add_1(if outcome.success() { "success" } else { "error" });
}

/// Close the modal and clear the email field and the outcome message.
fn reset(document: &web::Document) {
    hide(document);
    if let Some(input) = dom::element_by_id::<web::HtmlInputElement>(document, MODAL_EMAIL_ID) {
        input.set_value("");
    }
    if let Some(el) = document.get_element_by_id(MODAL_MESSAGE_ID) {
        el.set_text_content(None);
        _ = el.class_list().remove_2("success", "error");
    }
}

/// Open/close buttons and the submit handler for the waitlist form.
pub fn wire(document: &web::Document, subscribers: Rc<RefCell<SubscriberList>>) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let doc_open = document.clone();
    listeners.extend(dom::add_click_listener(document, MODAL_OPEN_ID, move || {
        show(&doc_open)
    }));
    let doc_close = document.clone();
    listeners.extend(dom::add_click_listener(document, MODAL_CLOSE_ID, move || {
        hide(&doc_close)
    }));

    if let Some(form) = document.get_element_by_id(MODAL_FORM_ID) {
        let doc_submit = document.clone();
        // a resubmit restarts the countdown; dropping the listener cancels it
        let pending_reset: RefCell<Option<Timeout>> = RefCell::new(None);
        listeners.extend(Listener::new(&form, "submit", move |ev: web::Event| {
            ev.prevent_default();
            let Some(input) =
                dom::element_by_id::<web::HtmlInputElement>(&doc_submit, MODAL_EMAIL_ID)
            else {
                return;
            };
            let outcome = subscribers.borrow_mut().submit(&input.value());
            if outcome == SubmitOutcome::Subscribed {
                input.set_value("");
            }
            show_outcome(&doc_submit, outcome);
            let doc_reset = doc_submit.clone();
            *pending_reset.borrow_mut() = Timeout::new(MODAL_RESET_MS, move || reset(&doc_reset));
        }));
    }
    // backdrop click closes
    if let Some(backdrop) = document.get_element_by_id(MODAL_ID) {
        let doc_backdrop = document.clone();
        listeners.extend(Listener::new(&backdrop, "click", move |ev: web::Event| {
            let on_backdrop = match (ev.target(), ev.current_target()) {
                (Some(t), Some(c)) => t
                    .unchecked_ref::<web::Node>()
                    .is_same_node(Some(c.unchecked_ref::<web::Node>())),
                _ => false,
            };
            if on_backdrop && !is_hidden(&doc_backdrop) {
                hide(&doc_backdrop);
            }
        }));
    }
    listeners
}
