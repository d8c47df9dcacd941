// Host-side tests for opacity batching of rain streaks.

mod batch {
    include!("../src/batch.rs");
}

use batch::*;

fn streak(x: f32) -> Streak {
    Streak {
        x,
        y0: 0.0,
        y1: 20.0,
    }
}

#[test]
fn opacity_falls_into_upper_edge_bands() {
    assert_eq!(opacity_bucket(0.0, 16), None);
    assert_eq!(opacity_bucket(-0.2, 16), None);
    assert_eq!(opacity_bucket(f32::NAN, 16), None);
    assert_eq!(opacity_bucket(0.01, 16), Some(0));
    assert_eq!(opacity_bucket(1.0 / 16.0, 16), Some(0));
    assert_eq!(opacity_bucket(0.5, 16), Some(7));
    assert_eq!(opacity_bucket(1.0, 16), Some(15));
    assert_eq!(opacity_bucket(3.0, 16), Some(15));
    assert_eq!(opacity_bucket(0.5, 0), None);

    // drawn opacity never drops below the real one, by at most one band
    for i in 1..=100 {
        let o = i as f32 / 100.0;
        let b = opacity_bucket(o, 16).expect("visible");
        let drawn = bucket_opacity(b, 16);
        assert!(drawn >= o - 1e-6 && drawn - o < 1.0 / 16.0 + 1e-6);
    }
}

#[test]
fn rain_frame_collapses_into_few_paths() {
    let mut batches = StreakBatches::new(16);
    for i in 0..400 {
        // rain sits between 0.1 and 0.4 opacity
        let opacity = 0.1 + (i % 30) as f32 * 0.01;
        assert!(batches.push(opacity, streak(i as f32)));
    }
    assert!(!batches.push(0.0, streak(-1.0)));
    assert_eq!(batches.len(), 400);

    let paths: Vec<_> = batches.batches().collect();
    assert!(paths.len() <= 6, "{} paths", paths.len());
    assert_eq!(paths.iter().map(|(_, s)| s.len()).sum::<usize>(), 400);
    assert!(paths.windows(2).all(|w| w[0].0 < w[1].0));

    batches.clear();
    assert!(batches.is_empty());
    assert_eq!(batches.bucket_count(), 16);
    assert_eq!(batches.batches().count(), 0);
}
