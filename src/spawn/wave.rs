use cgmath::Point3;
use rand::Rng;
use serde::Deserialize;

use super::sampling::{SpawnPointRange, SpawnPointSampler};

/// How the per-wave alien count is clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    /// Clamp by overwriting `aliens_per_spawn`; the reduced value sticks for
    /// every later wave. The second clamp subtracts the remaining total
    /// instead of capping at it.
    Destructive,
    /// Clamp a per-wave copy and leave the configured count untouched.
    PerWave,
}

impl Default for ClampMode {
    fn default() -> Self {
        Self::Destructive
    }
}

/// Alien counters guarded by the alien pool lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlienCounters {
    pub aliens_on_screen: u32,
    pub total_aliens_remaining: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSettings {
    pub max_on_screen: u32,
    pub aliens_per_spawn: u32,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    pub clamp_mode: ClampMode,
    pub spawn_point_range: SpawnPointRange,
}

pub struct WaveSpawner {
    spawn_points: Vec<Point3<f32>>,
    max_on_screen: u32,
    aliens_per_spawn: u32,
    min_spawn_interval: f32,
    max_spawn_interval: f32,
    clamp_mode: ClampMode,
    sampler: SpawnPointSampler,
    elapsed: f32,
    interval: f32,
    spawning: bool,
}

impl WaveSpawner {
    /// The first wave is due on the first tick with a positive delta.
    pub fn new(spawn_points: Vec<Point3<f32>>, settings: WaveSettings) -> Self {
        Self{
            spawn_points,
            max_on_screen: settings.max_on_screen,
            aliens_per_spawn: settings.aliens_per_spawn,
            min_spawn_interval: settings.min_spawn_interval,
            max_spawn_interval: settings.max_spawn_interval,
            clamp_mode: settings.clamp_mode,
            sampler: SpawnPointSampler::new(settings.spawn_point_range),
            elapsed: 0.0,
            interval: 0.0,
            spawning: true,
        }
    }

    pub fn aliens_per_spawn(&self) -> u32 {
        self.aliens_per_spawn
    }

    pub fn set_spawning(&mut self, spawning: bool) {
        self.spawning = spawning;
    }

    pub fn spawn_point(&self, index: usize) -> Option<Point3<f32>> {
        self.spawn_points.get(index).copied()
    }

    /// Seconds until the next wave is due.
    pub fn time_until_wave(&self) -> f32 {
        (self.interval - self.elapsed).max(0.0)
    }

    /// Accumulate frame time. On expiry the timer is re-armed with a fresh
    /// interval from `[min, max]` and `true` is returned.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = 0.0;
            self.interval = rng.gen_range(self.min_spawn_interval..=self.max_spawn_interval);
            true
        } else {
            false
        }
    }

    /// How many spawn attempts this wave makes, applying the clamp policy.
    /// Zero when spawning is off or every remaining alien is already on screen.
    pub fn wave_size(&mut self, counters: &AlienCounters) -> u32 {
        if !self.spawning
            || self.aliens_per_spawn == 0
            || counters.aliens_on_screen >= counters.total_aliens_remaining
        {
            return 0;
        }

        let point_count = self.spawn_points.len();
        match self.clamp_mode {
            ClampMode::Destructive => {
                let point_cap = (point_count as u32).saturating_sub(1);
                if self.aliens_per_spawn > point_cap {
                    log::debug!("aliens per spawn clamped from {} to {}", self.aliens_per_spawn, point_cap);
                    self.aliens_per_spawn = point_cap;
                }
                if self.aliens_per_spawn > counters.total_aliens_remaining {
                    self.aliens_per_spawn -= counters.total_aliens_remaining;
                }
                self.aliens_per_spawn
            }
            ClampMode::PerWave => {
                let point_cap = self.sampler.range().selectable(point_count) as u32;
                let unspawned = counters.total_aliens_remaining - counters.aliens_on_screen;
                self.aliens_per_spawn.min(point_cap).min(unspawned)
            }
        }
    }

    /// Run one wave against the counters: for every spawn attempt that fits
    /// under `max_on_screen`, count the alien as on screen and pick a spawn
    /// point for it. Returns the chosen spawn point indices.
    pub fn plan_wave<R: Rng + ?Sized>(&mut self, counters: &mut AlienCounters, rng: &mut R) -> Vec<usize> {
        let attempts = self.wave_size(counters);
        let mut points = Vec::with_capacity(attempts as usize);
        self.sampler.begin_wave();
        for _ in 0..attempts {
            if counters.aliens_on_screen >= self.max_on_screen {
                continue;
            }
            let Some(point) = self.sampler.pick(rng, self.spawn_points.len()) else {
                break;
            };
            counters.aliens_on_screen += 1;
            points.push(point);
        }
        points
    }
}
