use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use arena_horde::{ArenaConfig, CollisionEvent, Coordinator, FixedStepRunner, LogNotifier};
use cgmath::Point3;
use rand::Rng;

const STEP: Duration = Duration::from_micros(16_667);
const MAX_TICKS: u64 = 60 * 120;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ArenaConfig::load(&path).with_context(|| format!("loading arena config {}", path))?,
        None => ArenaConfig::default(),
    };
    let pool_size = config.alien_pool_size as u32;
    let coordinator = Arc::new(Coordinator::new(&config, Arc::new(LogNotifier))?);
    let runner = FixedStepRunner::new(STEP);
    let stop = runner.stop_handle();

    // stands in for the physics layer: random hits, the odd stale index, and
    // touching whatever pickup slot 0 holds
    let collisions = {
        let coordinator = coordinator.clone();
        let stop = stop.clone();
        let sender = coordinator.collision_sender();
        std::thread::Builder::new()
            .name("simulated collision thread".into())
            .spawn(move || {
                let mut rng = rand::thread_rng();
                while !stop.load(Ordering::Relaxed) {
                    std::thread::sleep(Duration::from_millis(rng.gen_range(20..120)));
                    let index = rng.gen_range(0..pool_size + 4);
                    if rng.gen_bool(0.5) {
                        coordinator.on_alien_killed(index);
                    } else {
                        let _ = sender.send(CollisionEvent::AlienHit(index));
                    }
                    if rng.gen_bool(0.02) {
                        if let Some(effect) = coordinator.on_pickup_collected(0) {
                            log::info!("gun upgraded: {:?}", effect);
                        }
                    }
                }
            })
            .context("spawning collision thread")?
    };

    let start = Instant::now();
    let ticks = runner.run(&coordinator, || {
        let t = start.elapsed().as_secs_f32() * 0.3;
        Point3::new(t.cos() * 6.0, 0.0, t.sin() * 6.0)
    }, Some(MAX_TICKS)).context("fixed step runner")?;

    stop.store(true, Ordering::Relaxed);
    if collisions.join().is_err() {
        log::warn!("collision thread panicked");
    }

    let counters = coordinator.counters();
    log::info!(
        "{} ticks, {} aliens remaining, {} on screen, alien pool grew to {}",
        ticks,
        counters.total_aliens_remaining,
        counters.aliens_on_screen,
        coordinator.alien_pool_len(),
    );
    Ok(())
}
