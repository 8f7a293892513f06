use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use arena_horde::{AlienLifecycle, ArenaConfig, ChannelNotifier, ClampMode, Coordinator, GameEvent, SlotState};
use cgmath::Point3;

fn arena(total_aliens: u32) -> ArenaConfig {
    ArenaConfig{
        spawn_points: (0..12).map(|i| [i as f32, 0.0, 20.0]).collect(),
        alien_pool_size: 4,
        min_spawn_interval: 0.0,
        max_spawn_interval: 0.0,
        aliens_per_spawn: 6,
        max_aliens_on_screen: 16,
        total_aliens,
        clamp_mode: ClampMode::PerWave,
        upgrade_max_spawn_time: 1000.0,
        head_destruct_time: 0.05,
        seed: Some(99),
        ..ArenaConfig::default()
    }
}

fn origin() -> Point3<f32> {
    Point3::new(0.0, 0.0, 0.0)
}

#[test]
fn simultaneous_hits_on_one_alien_count_once() {
    let (notifier, events) = ChannelNotifier::new();
    let coordinator = Arc::new(Coordinator::new(&arena(50), Arc::new(notifier)).unwrap());
    coordinator.update(0.016, origin());
    coordinator.set_spawning(false);
    let before = coordinator.counters();

    let barrier = Arc::new(Barrier::new(8));
    let successes = Arc::new(AtomicU32::new(0));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let coordinator = coordinator.clone();
            let barrier = barrier.clone();
            let successes = successes.clone();
            thread::spawn(move || {
                barrier.wait();
                if coordinator.on_alien_killed(3) {
                    successes.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(successes.load(Ordering::Relaxed), 1);
    let after = coordinator.counters();
    assert_eq!(after.aliens_on_screen, before.aliens_on_screen - 1);
    assert_eq!(after.total_aliens_remaining, before.total_aliens_remaining - 1);
    let died = events.try_iter().filter(|e| *e == GameEvent::AlienDied(3)).count();
    assert_eq!(died, 1);
}

#[test]
fn kills_racing_the_update_tick_keep_counters_consistent() {
    const TOTAL: u32 = 120;
    let (notifier, events) = ChannelNotifier::new();
    let coordinator = Arc::new(Coordinator::new(&arena(TOTAL), Arc::new(notifier)).unwrap());
    let done = Arc::new(AtomicBool::new(false));
    let kills = Arc::new(AtomicU32::new(0));

    let killers: Vec<_> = (0..4u32)
        .map(|worker| {
            let coordinator = coordinator.clone();
            let done = done.clone();
            let kills = kills.clone();
            thread::spawn(move || {
                let mut index = worker;
                while !done.load(Ordering::Relaxed) {
                    if coordinator.on_alien_killed(index % 24) {
                        kills.fetch_add(1, Ordering::Relaxed);
                    }
                    index = index.wrapping_add(7);
                    thread::yield_now();
                }
            })
        })
        .collect();

    for _ in 0..20_000 {
        coordinator.update(0.016, origin());
        let counters = coordinator.counters();
        assert!(counters.aliens_on_screen <= 16);
        assert!(counters.aliens_on_screen <= counters.total_aliens_remaining);
        if coordinator.is_cleared() {
            break;
        }
    }
    done.store(true, Ordering::Relaxed);
    for killer in killers {
        killer.join().unwrap();
    }

    let counters = coordinator.counters();
    let kills = kills.load(Ordering::Relaxed);
    assert_eq!(counters.total_aliens_remaining, TOTAL - kills);

    let alive = (0..coordinator.alien_pool_len() as u32)
        .filter_map(|index| coordinator.alien(index))
        .filter(|alien| alien.lifecycle() == AlienLifecycle::Alive)
        .count() as u32;
    assert_eq!(counters.aliens_on_screen, alive);

    for index in 0..coordinator.alien_pool_len() as u32 {
        let alien = coordinator.alien(index).unwrap();
        let active = coordinator.alien_slot_state(index) == Some(SlotState::Active);
        assert_eq!(active, alien.lifecycle() != AlienLifecycle::Pooled);
    }

    let events: Vec<_> = events.try_iter().collect();
    let died = events.iter().filter(|e| matches!(e, GameEvent::AlienDied(_))).count() as u32;
    assert_eq!(died, kills);

    // every slot alternates appear, die, appear, ...
    let mut on_screen = HashSet::new();
    for event in &events {
        match event {
            GameEvent::AlienAppeared(index) => assert!(on_screen.insert(*index), "alien #{} appeared twice", index),
            GameEvent::AlienDied(index) => assert!(on_screen.remove(index), "alien #{} died without appearing", index),
            _ => {}
        }
    }
    if counters.total_aliens_remaining == 0 {
        assert_eq!(events.iter().filter(|e| **e == GameEvent::ArenaCleared).count(), 1);
    }
}
