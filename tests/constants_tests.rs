// Sanity checks on the page-facing constants.

#![allow(dead_code)]

mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn overlays_stack_in_paint_order() {
    assert!(Z_TABLETS < Z_EFFECTS_CANVAS);
    assert!(Z_EFFECTS_CANVAS < Z_FLASH);
    assert!(Z_FLASH < Z_CURSOR);
}

#[test]
fn element_ids_are_distinct_and_non_empty() {
    let ids = [
        EFFECTS_CANVAS_ID,
        TABLET_LAYER_ID,
        FLASH_OVERLAY_ID,
        CURSOR_DOT_ID,
        CURSOR_RING_ID,
        MUTE_BUTTON_ID,
        MODAL_ID,
        MODAL_OPEN_ID,
        MODAL_CLOSE_ID,
        MODAL_FORM_ID,
        MODAL_EMAIL_ID,
        MODAL_MESSAGE_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '), "id {a:?} has whitespace");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn paint_values_are_usable() {
    assert!(RAIN_STROKE_WIDTH > 0.0);
    assert!(RIPPLE_STROKE_WIDTH > 0.0);
    assert!(RIPPLE_BASE_RADIUS > 0.0);
    assert!(TABLET_PERSPECTIVE_PX > 0.0);
    assert!((0.0..=1.0).contains(&RELIC_EDGE_ALPHA));
    assert!(FLASH_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
    assert!(RAIN_OPACITY_BUCKETS >= 4);
    assert!(EMBER_GLOW_SPREAD >= 1.0);
}

#[test]
fn submitted_modal_resets_after_three_seconds() {
    assert_eq!(MODAL_RESET_MS, 3000);
    assert!(CHATTER_SECTION_SELECTOR.starts_with('.'));
}

#[test]
fn coarse_query_is_a_media_feature() {
    assert!(COARSE_POINTER_QUERY.starts_with('(') && COARSE_POINTER_QUERY.ends_with(')'));
    assert!(COARSE_POINTER_QUERY.contains("pointer"));
}

#[test]
fn core_tuning_matches_the_landing_page() {
    assert_eq!(katharos_core::MAX_RELICS, 10);
    assert_eq!(katharos_core::SPAWN_THRESHOLD, 15.0);
    assert_eq!(katharos_core::THUNDER_LOWPASS_HZ, 200.0);
    assert!(katharos_core::LIGHTNING_INTERVAL_SEC.0 < katharos_core::LIGHTNING_INTERVAL_SEC.1);
}
