// Host-side tests for the recycling rain field.

use katharos_core::{
    drop_count, RainField, Viewport, RAIN_FLOOR_Y, RAIN_HALF_WIDTH, RAIN_MAX_DROPS,
    RAIN_RESPAWN_BAND,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn drop_count_scales_with_intensity() {
    assert_eq!(drop_count(0.0), 0);
    assert_eq!(drop_count(0.5), RAIN_MAX_DROPS / 2);
    assert_eq!(drop_count(1.0), RAIN_MAX_DROPS);
    assert_eq!(drop_count(3.0), RAIN_MAX_DROPS);
}

#[test]
fn drop_below_floor_is_recycled_into_band() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut rain = RainField::new(0.1, &mut rng);
    let count = rain.len();
    rain.drops_mut()[0].position.y = RAIN_FLOOR_Y - 0.5;
    rain.step(&mut rng);
    let y = rain.drops()[0].position.y;
    assert!(
        y >= RAIN_RESPAWN_BAND.0 && y < RAIN_RESPAWN_BAND.1,
        "respawned at {}",
        y
    );
    assert_eq!(rain.len(), count);
    assert!(rain.recycled() >= 1);
}

#[test]
fn drops_are_never_removed_over_long_runs() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut rain = RainField::new(0.2, &mut rng);
    let count = rain.len();
    for _ in 0..2000 {
        rain.step(&mut rng);
        assert_eq!(rain.len(), count);
    }
    assert!(rain.recycled() > 0);
    for d in rain.drops() {
        assert!(d.position.y >= RAIN_FLOOR_Y);
        assert!(d.position.x <= RAIN_HALF_WIDTH);
        assert!(d.position.z <= RAIN_HALF_WIDTH);
    }
}

#[test]
fn ids_stay_stable_through_recycling() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut rain = RainField::new(0.05, &mut rng);
    let before: Vec<_> = rain.drops().iter().map(|d| d.id).collect();
    for _ in 0..500 {
        rain.step(&mut rng);
    }
    let after: Vec<_> = rain.drops().iter().map(|d| d.id).collect();
    assert_eq!(before, after);
}

#[test]
fn projection_maps_band_top_and_floor_to_viewport_edges() {
    let vp = Viewport {
        width: 1000.0,
        height: 500.0,
    };
    let top = RainField::project(glam::Vec3::new(-RAIN_HALF_WIDTH, RAIN_RESPAWN_BAND.1, 0.0), vp);
    assert!(top.x.abs() < 1e-3 && top.y.abs() < 1e-3);
    let floor = RainField::project(glam::Vec3::new(RAIN_HALF_WIDTH, RAIN_FLOOR_Y, 0.0), vp);
    assert!((floor.x - 1000.0).abs() < 1e-3);
    assert!((floor.y - 500.0).abs() < 1e-3);
}
