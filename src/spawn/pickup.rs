use rand::Rng;

/// Width of the window the spawn threshold is drawn from, ending at `max_spawn_time`.
const THRESHOLD_WINDOW: f32 = 3.0;

/// Single-slot timer for the upgrade pickup.
pub struct PickupSpawner {
    max_spawn_time: f32,
    threshold: f32,
    elapsed: f32,
    rearm_on_consume: bool,
}

impl PickupSpawner {
    pub fn new<R: Rng + ?Sized>(max_spawn_time: f32, rearm_on_consume: bool, rng: &mut R) -> Self {
        let mut spawner = Self{
            max_spawn_time,
            threshold: 0.0,
            elapsed: 0.0,
            rearm_on_consume,
        };
        spawner.draw_threshold(rng);
        spawner
    }

    fn draw_threshold<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let low = self.max_spawn_time - THRESHOLD_WINDOW;
        let high = self.max_spawn_time;
        self.threshold = rng.gen_range(low.min(high)..=high).abs();
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Accumulate frame time; `true` when a pickup should appear, given
    /// whether one is already out.
    pub fn tick(&mut self, dt: f32, upgrade_spawned: bool) -> bool {
        self.elapsed += dt;
        self.elapsed > self.threshold && !upgrade_spawned
    }

    pub fn on_spawned(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn on_consumed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.elapsed = 0.0;
        if self.rearm_on_consume {
            self.draw_threshold(rng);
        }
    }
}
