// Host-side tests for click ripples.

use glam::Vec2;
use katharos_core::{RippleField, MAX_RIPPLES, RIPPLE_LIFETIME_SEC};

#[test]
fn ripple_grows_and_fades_then_expires() {
    let mut field = RippleField::new(MAX_RIPPLES);
    assert!(field.spawn(Vec2::new(10.0, 20.0), 1.0));
    let mut out = Vec::new();
    field.instances(1.0, &mut out);
    assert_eq!(out[0].scale, 1.0);
    assert!((out[0].opacity - 0.8).abs() < 1e-6);

    out.clear();
    field.step(1.5);
    field.instances(1.5, &mut out);
    assert!((out[0].scale - 3.5).abs() < 1e-5);
    assert!(out[0].opacity < 0.8);

    field.step(1.0 + RIPPLE_LIFETIME_SEC + 0.01);
    assert!(field.is_empty());
}

#[test]
fn pool_refuses_beyond_capacity() {
    let mut field = RippleField::new(3);
    for _ in 0..3 {
        assert!(field.spawn(Vec2::ZERO, 0.0));
    }
    assert!(!field.spawn(Vec2::ZERO, 0.0));
    assert_eq!(field.len(), 3);
}
