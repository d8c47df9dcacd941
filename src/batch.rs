/// Vertical streak from `(x, y0)` to `(x, y1)` in CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Streak {
    pub x: f32,
    pub y0: f32,
    pub y1: f32,
}

/// Bucket index for `opacity` with `buckets` equal bands over `(0, 1]`.
/// Invisible drops get no bucket.
#[inline]
pub fn opacity_bucket(opacity: f32, buckets: usize) -> Option<usize> {
    if !(opacity > 0.0) || buckets == 0 {
        return None;
    }
    let b = (opacity.min(1.0) * buckets as f32).ceil() as usize;
    Some(b.clamp(1, buckets) - 1)
}

/// Opacity every drop in bucket `b` is drawn with: the band's upper edge.
#[inline]
pub fn bucket_opacity(b: usize, buckets: usize) -> f32 {
    (b + 1) as f32 / buckets.max(1) as f32
}

/// Streaks grouped by quantised opacity so a frame strokes one path per
/// band instead of one per drop.
pub struct StreakBatches {
    buckets: Vec<Vec<Streak>>,
}

impl StreakBatches {
    pub fn new(buckets: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); buckets.max(1)],
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Empties every bucket, keeping allocations for the next frame.
    pub fn clear(&mut self) {
        for b in &mut self.buckets {
            b.clear();
        }
    }

    pub fn push(&mut self, opacity: f32, streak: Streak) -> bool {
        match opacity_bucket(opacity, self.buckets.len()) {
            Some(b) => {
                self.buckets[b].push(streak);
                true
            }
            None => false,
        }
    }

    /// Non-empty buckets, faintest first.
    pub fn batches(&self) -> impl Iterator<Item = (usize, &[Streak])> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(i, b)| (i, b.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}
