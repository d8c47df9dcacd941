use crate::random::in_range_f64;
use rand::Rng;

/// Next-eligible-time scheduler polled from the frame loop. Each firing
/// re-arms one jittered interval later.
#[derive(Clone, Debug)]
pub struct Cadence {
    interval: (f64, f64),
    next_at: f64,
    last_fired: Option<f64>,
    fired: u64,
    cancelled: bool,
}

impl Cadence {
    /// First firing one jittered interval after `start`.
    pub fn new(interval: (f64, f64), start: f64, rng: &mut impl Rng) -> Self {
        Self::starting_at(interval, start + in_range_f64(rng, interval))
    }

    /// First firing at exactly `first_at`.
    pub fn starting_at(interval: (f64, f64), first_at: f64) -> Self {
        Self {
            interval,
            next_at: first_at,
            last_fired: None,
            fired: 0,
            cancelled: false,
        }
    }

    /// Returns `true` at most once per eligible window.
    pub fn poll(&mut self, now: f64, rng: &mut impl Rng) -> bool {
        if self.cancelled || now < self.next_at {
            return false;
        }
        self.last_fired = Some(now);
        self.fired += 1;
        self.next_at = now + in_range_f64(rng, self.interval);
        true
    }

    /// Push the next firing to `at`, overriding the jittered interval.
    pub fn defer_until(&mut self, at: f64) {
        self.next_at = at;
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Re-arm after a cancel; the next firing is one jittered interval away.
    pub fn resume(&mut self, now: f64, rng: &mut impl Rng) {
        self.cancelled = false;
        self.next_at = now + in_range_f64(rng, self.interval);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn next_at(&self) -> f64 {
        self.next_at
    }

    pub fn last_fired(&self) -> Option<f64> {
        self.last_fired
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn min_interval(&self) -> f64 {
        self.interval.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fires_once_per_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = Cadence::starting_at((1.0, 2.0), 0.5);
        assert!(!c.poll(0.4, &mut rng));
        assert!(c.poll(0.5, &mut rng));
        assert!(!c.poll(0.6, &mut rng));
        assert!(c.next_at() >= 1.5 && c.next_at() <= 2.5);
        assert_eq!(c.fired(), 1);
    }

    #[test]
    fn cancelled_never_fires() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut c = Cadence::starting_at((1.0, 1.0), 0.0);
        c.cancel();
        assert!(!c.poll(100.0, &mut rng));
        c.resume(100.0, &mut rng);
        assert!(!c.poll(100.5, &mut rng));
        assert!(c.poll(101.0, &mut rng));
    }
}
