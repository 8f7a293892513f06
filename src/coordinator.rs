mod events;
mod ticks;

pub use events::*;
pub use ticks::*;

use std::sync::Arc;

use cgmath::Point3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::ArenaConfig;
use crate::entity::*;
use crate::error::ConfigError;
use crate::spawn::{AlienCounters, PickupSpawner, SpawnPointRange, WaveSpawner};
use crate::sync::{lock, Mutex};
use crate::util::look_at_yaw;

//o------------ Pool State ---------------o

/// Everything guarded by the alien pool lock.
struct AlienPool {
    pool: Pool<AlienEntity>,
    counters: AlienCounters,
    cleared: bool,
    rng: SmallRng,
}

/// Everything guarded by the pickup pool lock.
struct PickupPool {
    pool: Pool<PickupEntity>,
    spawned_upgrade: bool,
    spawner: PickupSpawner,
    rng: SmallRng,
}

/// Only touched by `update`.
struct Scheduler {
    waves: WaveSpawner,
    rng: SmallRng,
}

//o------------ Coordinator ---------------o

/// Owns both entity pools and both spawners.
///
/// `update` is driven once per frame; the collision entry points
/// (`on_alien_killed`, `on_pickup_collected`, `release_alien`) may be called
/// from any thread. Lock order is scheduler, then a single pool lock; no
/// path holds both pool locks. Alien events are sent while the alien pool
/// lock is held, so each slot's appear and die events arrive in order.
pub struct Coordinator {
    aliens: Mutex<AlienPool>,
    pickups: Mutex<PickupPool>,
    scheduler: Mutex<Scheduler>,
    spawn_points: Vec<Point3<f32>>,
    pickup_range: SpawnPointRange,
    total_aliens: u32,
    inbox: (crossbeam_channel::Sender<CollisionEvent>, crossbeam_channel::Receiver<CollisionEvent>),
    notifier: Arc<dyn Notifier>,
}

impl Coordinator {
    pub fn new(config: &ArenaConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut master = SmallRng::seed_from_u64(seed);
        let spawn_points = config.spawn_positions();

        let alien_pool: Pool<AlienEntity> = Pool::new(config.alien_pool_size, config.alien_template())?;
        let pickup_pool: Pool<PickupEntity> = Pool::new(config.pickup_pool_size, config.upgrade_effect())?;

        let mut waves = WaveSpawner::new(spawn_points.clone(), config.wave_settings());
        waves.set_spawning(config.spawning);
        let spawner = PickupSpawner::new(config.upgrade_max_spawn_time, config.rearm_upgrade_on_consume, &mut master);

        log::info!(
            "arena ready: {} spawn points, {} aliens to defeat, pools {}/{} (seed {})",
            spawn_points.len(),
            config.total_aliens,
            config.alien_pool_size,
            config.pickup_pool_size,
            seed,
        );

        Ok(Self{
            aliens: Mutex::new(AlienPool{
                pool: alien_pool,
                counters: AlienCounters{
                    aliens_on_screen: 0,
                    total_aliens_remaining: config.total_aliens,
                },
                cleared: false,
                rng: SmallRng::seed_from_u64(master.gen()),
            }),
            pickups: Mutex::new(PickupPool{
                pool: pickup_pool,
                spawned_upgrade: false,
                spawner,
                rng: SmallRng::seed_from_u64(master.gen()),
            }),
            scheduler: Mutex::new(Scheduler{
                waves,
                rng: SmallRng::seed_from_u64(master.gen()),
            }),
            spawn_points,
            pickup_range: config.spawn_point_range,
            total_aliens: config.total_aliens,
            inbox: crossbeam_channel::unbounded(),
            notifier,
        })
    }

    /// Sender for message-based delivery of collision events; drained at the
    /// start of every `update`.
    pub fn collision_sender(&self) -> crossbeam_channel::Sender<CollisionEvent> {
        self.inbox.0.clone()
    }

    /// One simulation frame. `player_position` is read fresh every frame.
    pub fn update(&self, dt: f32, player_position: Point3<f32>) {
        profiling::scope!("Coordinator::update");
        self.drain_inbox();
        self.tick_aliens(dt, player_position);
        self.spawn_wave(dt, player_position);
        self.spawn_pickup(dt);
    }

    fn drain_inbox(&self) {
        while let Ok(event) = self.inbox.1.try_recv() {
            match event {
                CollisionEvent::AlienHit(index) => {
                    self.on_alien_killed(index);
                }
                CollisionEvent::PickupTouched(index) => {
                    self.on_pickup_collected(index);
                }
                CollisionEvent::AlienRemnantExpired(index) => {
                    self.release_alien(index);
                }
            }
        }
    }

    fn tick_aliens(&self, dt: f32, player_position: Point3<f32>) {
        let mut aliens = lock(&self.aliens);
        let expired: Vec<SlotIndex> = aliens
            .pool
            .iter_active_mut()
            .filter_map(|(index, alien)| alien.tick(dt, player_position).then_some(index))
            .collect();
        for index in expired {
            aliens.pool.release(index);
            log::debug!("alien #{} returned to pool", index);
        }
        // an arena configured with no aliens is cleared on its first frame
        self.check_cleared(&mut aliens);
    }

    fn spawn_wave(&self, dt: f32, player_position: Point3<f32>) {
        let mut scheduler = lock(&self.scheduler);
        let Scheduler { waves, rng } = &mut *scheduler;
        if !waves.tick(dt, rng) {
            return;
        }

        let mut aliens = lock(&self.aliens);
        let state = &mut *aliens;
        if state.cleared {
            waves.set_spawning(false);
        }
        let planned = waves.plan_wave(&mut state.counters, rng);
        for point in planned {
            let Some(position) = waves.spawn_point(point) else {
                state.counters.aliens_on_screen -= 1;
                continue;
            };
            let index = match state.pool.acquire() {
                Ok(index) => index,
                Err(err) => {
                    log::warn!("skipping spawn: {}", err);
                    state.counters.aliens_on_screen -= 1;
                    continue;
                }
            };
            if let Some(alien) = state.pool.get_mut(index) {
                alien.place(position, look_at_yaw(position, player_position));
            }
            log::debug!("alien #{} spawned", index);
            // still under the pool lock so a kill cannot report the alien before it appears
            self.notifier.notify(GameEvent::AlienAppeared(index));
        }
    }

    fn spawn_pickup(&self, dt: f32) {
        let spawned = {
            let mut pickups = lock(&self.pickups);
            let state = &mut *pickups;
            if !state.spawner.tick(dt, state.spawned_upgrade) {
                return;
            }
            let Some(position) = self
                .pickup_range
                .pick(&mut state.rng, self.spawn_points.len())
                .and_then(|point| self.spawn_points.get(point).copied())
            else {
                return;
            };
            match state.pool.acquire() {
                Ok(index) => {
                    state.spawned_upgrade = true;
                    state.spawner.on_spawned();
                    if let Some(pickup) = state.pool.get_mut(index) {
                        pickup.position = position;
                    }
                    index
                }
                Err(err) => {
                    log::warn!("skipping pickup spawn: {}", err);
                    return;
                }
            }
        };
        log::debug!("pickup #{} spawned", spawned);
        self.notifier.notify(GameEvent::PickupAppeared(spawned));
    }

    //o------------ Collision Entry Points ---------------o

    /// Lethal hit on an alien. Returns `true` when this call killed it; stale
    /// indices and repeated hits are no-ops.
    pub fn on_alien_killed(&self, index: SlotIndex) -> bool {
        let mut aliens = lock(&self.aliens);
        let AlienPool { pool, counters, rng, .. } = &mut *aliens;
        if pool.state_of(index) != Some(SlotState::Active) {
            log::warn!("ignoring hit on inactive alien #{}", index);
            return false;
        }
        let Some(alien) = pool.get_mut(index) else {
            return false;
        };
        if !alien.kill(rng) {
            log::debug!("alien #{} already dying", index);
            return false;
        }
        counters.aliens_on_screen = counters.aliens_on_screen.saturating_sub(1);
        counters.total_aliens_remaining = counters.total_aliens_remaining.saturating_sub(1);
        self.notifier.notify(GameEvent::AlienDied(index));
        self.check_cleared(&mut aliens);
        true
    }

    /// Emit `ArenaCleared` the first time no aliens remain.
    fn check_cleared(&self, aliens: &mut AlienPool) {
        if aliens.counters.total_aliens_remaining == 0 && !aliens.cleared {
            aliens.cleared = true;
            log::info!("all {} aliens defeated", self.total_aliens);
            self.notifier.notify(GameEvent::ArenaCleared);
        }
    }

    /// Return a dying alien to its pool once its remnant is gone. Only a
    /// dying alien can be released.
    pub fn release_alien(&self, index: SlotIndex) -> bool {
        let mut aliens = lock(&self.aliens);
        match aliens.pool.get(index).map(|alien| alien.lifecycle()) {
            Some(AlienLifecycle::Dying) => aliens.pool.release(index),
            Some(lifecycle) => {
                log::debug!("not releasing alien #{} in state {:?}", index, lifecycle);
                false
            }
            None => {
                log::warn!("release of unknown alien #{}", index);
                false
            }
        }
    }

    /// The player touched a pickup. Returns the upgrade to apply, or `None`
    /// for a stale index.
    pub fn on_pickup_collected(&self, index: SlotIndex) -> Option<UpgradeEffect> {
        let effect = {
            let mut pickups = lock(&self.pickups);
            let PickupPool { pool, spawned_upgrade, spawner, rng } = &mut *pickups;
            if pool.state_of(index) != Some(SlotState::Active) {
                log::warn!("ignoring collection of inactive pickup #{}", index);
                return None;
            }
            let effect = pool.get(index)?.effect;
            pool.release(index);
            *spawned_upgrade = false;
            spawner.on_consumed(rng);
            effect
        };
        self.notifier.notify(GameEvent::PickupCollected(index));
        Some(effect)
    }

    //o------------ Queries ---------------o

    pub fn counters(&self) -> AlienCounters {
        lock(&self.aliens).counters
    }

    pub fn is_cleared(&self) -> bool {
        lock(&self.aliens).cleared
    }

    pub fn aliens_per_spawn(&self) -> u32 {
        lock(&self.scheduler).waves.aliens_per_spawn()
    }

    pub fn set_spawning(&self, spawning: bool) {
        lock(&self.scheduler).waves.set_spawning(spawning);
    }

    pub fn alien_pool_len(&self) -> usize {
        lock(&self.aliens).pool.len()
    }

    pub fn active_aliens(&self) -> usize {
        lock(&self.aliens).pool.active_count()
    }

    pub fn alien(&self, index: SlotIndex) -> Option<AlienEntity> {
        lock(&self.aliens).pool.get(index).cloned()
    }

    pub fn alien_slot_state(&self, index: SlotIndex) -> Option<SlotState> {
        lock(&self.aliens).pool.state_of(index)
    }

    pub fn upgrade_spawned(&self) -> bool {
        lock(&self.pickups).spawned_upgrade
    }

    pub fn pickup(&self, index: SlotIndex) -> Option<PickupEntity> {
        lock(&self.pickups).pool.get(index).cloned()
    }

    pub fn active_pickups(&self) -> usize {
        lock(&self.pickups).pool.active_count()
    }
}
