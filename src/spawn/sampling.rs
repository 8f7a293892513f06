use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::Deserialize;

/// Rejection attempts before a wave gives up on finding an unused spawn point.
pub const MAX_SPAWN_POINT_RETRIES: usize = 32;

/// Which spawn point indices random selection may produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPointRange {
    /// `[0, n - 1)`: the last point is never chosen. A single-point arena still yields index 0.
    ExcludeLast,
    /// `[0, n)`.
    All,
}

impl Default for SpawnPointRange {
    fn default() -> Self {
        Self::ExcludeLast
    }
}

impl SpawnPointRange {
    /// Number of leading spawn points random selection can reach.
    pub fn selectable(self, point_count: usize) -> usize {
        match self {
            Self::ExcludeLast => point_count.saturating_sub(1).max(1).min(point_count),
            Self::All => point_count,
        }
    }

    /// Pick a single point with no repeat tracking.
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R, point_count: usize) -> Option<usize> {
        let selectable = self.selectable(point_count);
        if selectable == 0 {
            return None;
        }
        Some(rng.gen_range(0..selectable))
    }
}

/// Per-wave spawn point picker that avoids reusing a point within one wave.
#[derive(Debug, Default)]
pub struct SpawnPointSampler {
    range: SpawnPointRange,
    used: FxHashSet<usize>,
}

impl SpawnPointSampler {
    pub fn new(range: SpawnPointRange) -> Self {
        Self{
            range,
            used: FxHashSet::default(),
        }
    }

    pub fn range(&self) -> SpawnPointRange {
        self.range
    }

    pub fn begin_wave(&mut self) {
        self.used.clear();
    }

    /// Pick a point not yet used this wave. Rejection sampling runs for a
    /// bounded number of tries, then the remaining unused points are drawn
    /// from directly. A repeat is returned only once every reachable point
    /// is taken.
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R, point_count: usize) -> Option<usize> {
        let selectable = self.range.selectable(point_count);
        if selectable == 0 {
            return None;
        }

        if self.used.len() < selectable {
            for _ in 0..MAX_SPAWN_POINT_RETRIES {
                let candidate = rng.gen_range(0..selectable);
                if self.used.insert(candidate) {
                    return Some(candidate);
                }
            }
            let unused: Vec<usize> = (0..selectable).filter(|i| !self.used.contains(i)).collect();
            if let Some(&candidate) = unused.choose(rng) {
                self.used.insert(candidate);
                return Some(candidate);
            }
        }

        let fallback = rng.gen_range(0..selectable);
        log::debug!("no unused spawn point left this wave, reusing point {}", fallback);
        Some(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn exclusive_range_never_reaches_the_last_point() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..500 {
            let index = SpawnPointRange::ExcludeLast.pick(&mut rng, 4).unwrap();
            assert!(index < 3);
        }
        assert_eq!(SpawnPointRange::ExcludeLast.selectable(1), 1);
        assert_eq!(SpawnPointRange::ExcludeLast.selectable(0), 0);
        assert_eq!(SpawnPointRange::All.selectable(4), 4);
    }

    #[test]
    fn full_range_reaches_every_point() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[SpawnPointRange::All.pick(&mut rng, 4).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn wave_picks_are_distinct_while_points_remain() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut sampler = SpawnPointSampler::new(SpawnPointRange::All);
        for _ in 0..50 {
            sampler.begin_wave();
            let mut picks: Vec<_> = (0..6).map(|_| sampler.pick(&mut rng, 6).unwrap()).collect();
            picks.sort_unstable();
            assert_eq!(picks, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn large_waves_stay_distinct_after_rejections_run_out() {
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut sampler = SpawnPointSampler::new(SpawnPointRange::ExcludeLast);
            sampler.begin_wave();
            let mut picks: Vec<_> = (0..39).map(|_| sampler.pick(&mut rng, 40).unwrap()).collect();
            picks.sort_unstable();
            assert_eq!(picks, (0..39).collect::<Vec<_>>(), "seed {}", seed);
        }
    }

    #[test]
    fn repeats_only_after_every_point_is_used() {
        let mut rng = SmallRng::seed_from_u64(13);
        let mut sampler = SpawnPointSampler::new(SpawnPointRange::All);
        sampler.begin_wave();
        let mut picks: Vec<_> = (0..3).map(|_| sampler.pick(&mut rng, 3).unwrap()).collect();
        picks.sort_unstable();
        assert_eq!(picks, vec![0, 1, 2]);
        assert!(sampler.pick(&mut rng, 3).unwrap() < 3);
    }

    #[test]
    fn single_point_terminates_with_a_repeat() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut sampler = SpawnPointSampler::new(SpawnPointRange::ExcludeLast);
        sampler.begin_wave();
        for _ in 0..10 {
            assert_eq!(sampler.pick(&mut rng, 1), Some(0));
        }
    }

    #[test]
    fn no_points_yields_nothing() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut sampler = SpawnPointSampler::new(SpawnPointRange::All);
        assert_eq!(sampler.pick(&mut rng, 0), None);
    }
}
