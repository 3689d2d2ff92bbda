//! Obstacle spawn scheduling

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Countdown to the next obstacle. Each interval is `base ± jitter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds until the next spawn
    pub countdown: f32,
    pub base: f32,
    pub jitter: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            countdown: tuning.spawn_interval,
            base: tuning.spawn_interval,
            jitter: tuning.spawn_jitter,
        }
    }

    /// Draw a fresh interval in [base - jitter, base + jitter]
    pub fn next_interval<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.jitter <= 0.0 {
            return self.base;
        }
        self.base + rng.random_range(-self.jitter..=self.jitter)
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.countdown = self.next_interval(rng);
    }

    /// Advance the countdown. Returns true when one obstacle is due; the
    /// countdown is then re-armed with a new random interval.
    pub fn tick<R: Rng>(&mut self, dt: f32, rng: &mut R) -> bool {
        self.countdown -= dt;
        if self.countdown <= 0.0 {
            self.reset(rng);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fires_once_at_zero() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = Spawner::new(&Tuning::default());
        spawner.countdown = 0.0;
        assert!(spawner.tick(0.0, &mut rng));
        assert!(spawner.countdown >= 0.8 && spawner.countdown <= 1.2);
        assert!(!spawner.tick(0.0, &mut rng));
    }

    #[test]
    fn test_no_jitter_is_exact() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning {
            spawn_interval: 0.6,
            spawn_jitter: 0.0,
            ..Default::default()
        };
        let mut spawner = Spawner::new(&tuning);
        spawner.reset(&mut rng);
        assert_eq!(spawner.countdown, 0.6);
    }

    #[test]
    fn test_counts_down_over_frames() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut spawner = Spawner::new(&Tuning::default());
        spawner.countdown = 0.51;
        let mut fired = 0;
        for _ in 0..30 {
            if spawner.tick(1.0 / 60.0, &mut rng) {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);
        for _ in 0..2 {
            if spawner.tick(1.0 / 60.0, &mut rng) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn interval_within_jitter_bounds(
                seed in 0u64..10_000,
                base in 0.2f32..3.0,
                frac in 0.0f32..0.9,
            ) {
                let jitter = base * frac;
                let spawner = Spawner { countdown: 0.0, base, jitter };
                let mut rng = Pcg32::seed_from_u64(seed);
                for _ in 0..20 {
                    let i = spawner.next_interval(&mut rng);
                    prop_assert!(i >= base - jitter - 1e-5 && i <= base + jitter + 1e-5);
                }
            }
        }
    }
}
