// Host-side tests for the floating tablets.

use katharos_core::{
    DrawHint, TabletField, TABLET_COUNT, TABLET_FLOAT_AMPLITUDE, TABLET_INSCRIPTIONS,
    TABLET_SCROLL_DEPTH, TABLET_TIME_STEP,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field() -> TabletField {
    TabletField::new(TABLET_COUNT, &mut StdRng::seed_from_u64(21))
}

#[test]
fn creates_fixed_set_with_inscriptions() {
    let f = field();
    assert_eq!(f.len(), TABLET_COUNT);
    for (i, t) in f.tablets().iter().enumerate() {
        assert_eq!(t.inscription, TABLET_INSCRIPTIONS[i % TABLET_INSCRIPTIONS.len()]);
    }
    let mut out = Vec::new();
    f.instances(&mut out);
    assert_eq!(out.len(), TABLET_COUNT);
    assert!(out.iter().all(|i| matches!(i.hint, DrawHint::Plane { .. })));
}

#[test]
fn zero_dt_falls_back_to_fixed_step() {
    let mut f = field();
    f.step(0.0, 0.0);
    assert!((f.time() - TABLET_TIME_STEP).abs() < 1e-6);
}

#[test]
fn float_stays_within_amplitude() {
    let mut f = field();
    for _ in 0..2000 {
        f.step(1.0 / 60.0, 0.0);
        for t in f.tablets() {
            assert!(f.pose(t).float_y.abs() <= TABLET_FLOAT_AMPLITUDE + 1e-4);
        }
    }
}

#[test]
fn scroll_scrubs_depth_instead_of_snapping() {
    let mut f = field();
    f.step(1.0 / 60.0, 1.0);
    let first = f.depth_shift();
    assert!(first > 0.0 && first < TABLET_SCROLL_DEPTH * 0.1);
    let mut last = first;
    for _ in 0..600 {
        f.step(1.0 / 60.0, 1.0);
        assert!(f.depth_shift() >= last);
        last = f.depth_shift();
    }
    assert!((last - TABLET_SCROLL_DEPTH).abs() < 1.0);
}
