#![macro_use]

pub use async_std::sync::{Mutex, MutexGuard};

/// Spin until `$expression` yields `Some(guard)`.
///
/// Pool locks are held only for a state transition, so callers on the
/// simulation path spin on `try_lock` instead of parking.
#[allow(unused)]
macro_rules! spin_on {
    ($expression:expr) => {
        loop {
            if let Some(guard) = $expression {
                break guard
            }
            std::hint::spin_loop();
        }
    };
}

/// Take a pool lock from synchronous code.
pub fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    spin_on!(mutex.try_lock())
}
