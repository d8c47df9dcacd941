// Host-side tests for hover sparks around the cursor.

use glam::Vec2;
use katharos_core::{Layer, SparkField, SPARK_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field() -> SparkField {
    SparkField::new(SPARK_COUNT, &mut StdRng::seed_from_u64(11))
}

#[test]
fn idle_sparks_draw_nothing_and_stay_put() {
    let mut sparks = field();
    sparks.step();
    let mut out = Vec::new();
    sparks.instances(&mut out);
    assert!(out.is_empty());
    assert!(sparks.sparks().all(|s| s.offset == Vec2::ZERO));
}

#[test]
fn sparks_rise_and_recycle_inside_the_radius() {
    let mut sparks = field();
    assert!(sparks.sparks().all(|s| s.velocity.y <= 0.0));
    let anchor = Vec2::new(300.0, 400.0);
    sparks.set_active(true, anchor);

    let mut out = Vec::new();
    sparks.instances(&mut out);
    assert_eq!(out.len(), SPARK_COUNT);
    assert!(out
        .iter()
        .all(|i| i.layer == Layer::Sparks && i.position.truncate() == anchor && i.opacity == 1.0));

    for _ in 0..600 {
        sparks.step();
        assert!(sparks
            .sparks()
            .all(|s| s.offset.length() <= SparkField::radius_px()));
    }
    assert!(sparks.recycled() > 0);
}

#[test]
fn reactivation_restarts_at_the_anchor() {
    let mut sparks = field();
    sparks.set_active(true, Vec2::ZERO);
    for _ in 0..5 {
        sparks.step();
    }
    sparks.set_active(false, Vec2::ZERO);
    assert!(!sparks.is_active());
    sparks.set_active(true, Vec2::new(10.0, 10.0));
    assert_eq!(sparks.anchor(), Vec2::new(10.0, 10.0));
    assert!(sparks.sparks().all(|s| s.offset == Vec2::ZERO));
}
