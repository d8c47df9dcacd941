use rand::Rng;

/// Uniform sample in `[lo, hi)`; returns `lo` for an empty range instead of
/// panicking like `gen_range` would.
#[inline]
pub fn in_range(rng: &mut impl Rng, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

#[inline]
pub fn in_range_f64(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

/// Uniform sample in `[-span / 2, span / 2)`.
#[inline]
pub fn centered(rng: &mut impl Rng, span: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * span
}
