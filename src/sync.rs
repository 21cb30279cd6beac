//! Lock helpers for shared metadata records
//!
//! - `RwLockExt` recovers poisoned locks. Metadata records are plain data, so
//!   a panic while a guard was held cannot leave them half-updated in a way
//!   later readers care about.
//! - `LockScope` tracks which records the current thread has locked, so that
//!   re-entering a record from inside its own closure panics instead of
//!   blocking forever.

use std::cell::RefCell;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Extension trait for RwLock with poison recovery
pub(crate) trait RwLockExt<T> {
    /// Acquire a read lock, recovering from poison errors
    fn read_recovered(&self) -> RwLockReadGuard<'_, T>;

    /// Acquire a write lock, recovering from poison errors
    fn write_recovered(&self) -> RwLockWriteGuard<'_, T>;
}

impl<T> RwLockExt<T> for RwLock<T> {
    fn read_recovered(&self) -> RwLockReadGuard<'_, T> {
        match self.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Metadata lock was poisoned (read), recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_recovered(&self) -> RwLockWriteGuard<'_, T> {
        match self.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Metadata lock was poisoned (write), recovering");
                poisoned.into_inner()
            }
        }
    }
}

thread_local! {
    /// Addresses of the locks the current thread holds
    static HELD: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a lock as held by the current thread until dropped.
///
/// Create it before acquiring the lock and drop it after the guard.
pub(crate) struct LockScope {
    addr: usize,
}

impl LockScope {
    /// Enter the scope of the lock at `addr`.
    ///
    /// # Panics
    ///
    /// Panics if the current thread already holds that lock. `std` locks are
    /// not re-entrant, so acquiring it again would never return.
    pub(crate) fn enter(addr: usize) -> Self {
        HELD.with(|held| {
            let mut held = held.borrow_mut();
            if held.contains(&addr) {
                drop(held);
                panic!(
                    "metadata record accessed from inside its own `with`/`with_mut` closure; \
                     this would deadlock. Read what you need before the closure, or use the \
                     record passed to it"
                );
            }
            held.push(addr);
        });
        Self { addr }
    }
}

impl Drop for LockScope {
    fn drop(&mut self) {
        HELD.with(|held| {
            let mut held = held.borrow_mut();
            if let Some(pos) = held.iter().rposition(|addr| *addr == self.addr) {
                held.remove(pos);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_recovers_after_panic() {
        let lock = Arc::new(RwLock::new(1));
        let lock_clone = Arc::clone(&lock);

        let _ = thread::spawn(move || {
            let _guard = lock_clone.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(lock.is_poisoned());
        *lock.write_recovered() += 1;
        assert_eq!(*lock.read_recovered(), 2);
    }

    #[test]
    fn test_scope_allows_distinct_locks() {
        let _a = LockScope::enter(1);
        let _b = LockScope::enter(2);
    }

    #[test]
    fn test_scope_is_released_on_drop() {
        drop(LockScope::enter(7));
        let _again = LockScope::enter(7);
    }

    #[test]
    #[should_panic(expected = "would deadlock")]
    fn test_scope_rejects_reentry() {
        let _outer = LockScope::enter(3);
        let _inner = LockScope::enter(3);
    }

    #[test]
    fn test_scope_is_per_thread() {
        let _held = LockScope::enter(11);
        thread::spawn(|| {
            let _other = LockScope::enter(11);
        })
        .join()
        .unwrap();
    }
}
