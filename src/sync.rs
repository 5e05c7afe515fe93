//! # Synchronization Utilities
//!
//! Mutex handling for the shared state in confprint: the global counter
//! registry, in-memory sinks and the logger's timestamp memory.
//!
//! ## Poison Handling
//!
//! A mutex is poisoned when a thread panics while holding it. Every piece of
//! state guarded here is a plain value (a pair of counters, a list of
//! captured lines, the last printed timestamp) that stays meaningful after
//! a panic, so production code recovers the guard instead of failing the
//! print call. Debug builds log a warning on recovery.
//!
//! | Scenario | Function |
//! |----------|----------|
//! | Production code | [`lock_recover`] |
//! | Need context | [`lock_recover_debug`] |
//! | Test code | `.lock().unwrap()` |
//!
//! ```rust
//! use std::sync::Mutex;
//! use confprint::sync::lock_recover;
//!
//! let data = Mutex::new(vec![1, 2, 3]);
//! let guard = lock_recover(&data);
//! assert_eq!(guard.len(), 3);
//! ```

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// # Panics
///
/// This function never panics. It always recovers from poison.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Lock a mutex, logging a warning with `context` on poison recovery in
/// debug builds.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use confprint::sync::lock_recover_debug;
///
/// let mutex = Mutex::new("hello");
/// let guard = lock_recover_debug(&mutex, "my_function");
/// assert_eq!(*guard, "hello");
/// ```
#[inline]
pub fn lock_recover_debug<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        #[cfg(debug_assertions)]
        log::warn!("mutex poison recovered at: {context}");
        #[cfg(not(debug_assertions))]
        let _ = context;
        e.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_recover_normal_operation() {
        let mutex = Mutex::new(42);
        let guard = lock_recover(&mutex);
        assert_eq!(*guard, 42);
    }

    #[test]
    fn test_lock_recover_after_poison() {
        let mutex = Mutex::new(42);

        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = mutex.lock().unwrap();
            panic!("intentional panic to poison mutex");
        }));

        assert!(mutex.lock().is_err(), "Mutex should be poisoned");
        let guard = lock_recover(&mutex);
        assert_eq!(*guard, 42);
    }

    #[test]
    fn test_lock_recover_keeps_mutation_before_panic() {
        let mutex = Mutex::new(vec![1, 2]);
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut guard = mutex.lock().unwrap();
            guard.push(3);
            panic!("poison after mutation");
        }));
        assert_eq!(*lock_recover(&mutex), vec![1, 2, 3]);
    }

    #[test]
    fn test_lock_recover_debug_after_poison() {
        let mutex = Mutex::new(99);

        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = mutex.lock().unwrap();
            panic!("intentional panic");
        }));

        let guard = lock_recover_debug(&mutex, "test_poison_debug");
        assert_eq!(*guard, 99);
    }

    #[test]
    fn test_concurrent_access_after_poison() {
        let mutex = Arc::new(Mutex::new(0_u64));

        let poisoner = Arc::clone(&mutex);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison from thread");
        })
        .join();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let mutex = Arc::clone(&mutex);
                thread::spawn(move || {
                    *lock_recover(&mutex) += 1;
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(*lock_recover(&mutex), 8);
    }
}
