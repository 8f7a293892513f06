use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cgmath::Point3;

use super::Coordinator;

pub(crate) struct FixedStepSignal;

fn fixed_time_step_notify(
    step: Duration,
    stop: Arc<AtomicBool>,
    signal_snd: crossbeam_channel::Sender<FixedStepSignal>,
) {
    profiling::register_thread!("fixed time step notify thread");
    while !stop.load(Ordering::Relaxed) {
        spin_sleep::sleep(step);
        profiling::scope!("fixed step notify");
        if signal_snd.len() < 2 {
            let _ = signal_snd.try_send(FixedStepSignal);
        }
    }
}

/// Drives a [`Coordinator`] at a fixed time step without a window or engine
/// around it.
pub struct FixedStepRunner {
    step: Duration,
    stop: Arc<AtomicBool>,
}

impl FixedStepRunner {
    pub fn new(step: Duration) -> Self {
        Self{
            step,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends `run` at the next tick when set.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    /// Tick `coordinator` until stopped, the arena is cleared, or `max_ticks`
    /// have run. `player_position` is queried once per tick. Returns the
    /// number of ticks run.
    pub fn run<P>(&self, coordinator: &Coordinator, mut player_position: P, max_ticks: Option<u64>) -> std::io::Result<u64>
    where
        P: FnMut() -> Point3<f32>,
    {
        let (signal_snd, signal_rcv) = crossbeam_channel::bounded(2);
        let step = self.step;
        let stop = self.stop.clone();
        let notify_thread = std::thread::Builder::new()
            .name("fixed time step notify thread".into())
            .spawn(move || fixed_time_step_notify(step, stop, signal_snd))?;

        let dt = self.step.as_secs_f32();
        let mut ticks = 0u64;
        while !self.stop.load(Ordering::Relaxed) {
            if max_ticks.map_or(false, |max| ticks >= max) {
                break;
            }
            if signal_rcv.recv().is_err() {
                break;
            }
            profiling::scope!("fixed tick");
            coordinator.update(dt, player_position());
            ticks += 1;
            if coordinator.is_cleared() {
                log::info!("arena cleared after {} ticks", ticks);
                break;
            }
        }

        self.stop.store(true, Ordering::Relaxed);
        if notify_thread.join().is_err() {
            log::warn!("fixed step notify thread panicked");
        }
        log::info!("ended fixed loop");
        Ok(ticks)
    }
}
