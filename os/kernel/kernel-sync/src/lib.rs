//! # Kernel synchronization primitives
//!
//! A small set of locks for guarding state that is reachable from several
//! execution contexts at once (e.g. attribute handlers invoked by independent
//! readers and writers).
//!
//! The central type is [`Mutex<T, R>`], a value guarded by a raw lock `R`.
//! Besides the blocking [`Mutex::lock`] it offers
//! [`Mutex::lock_interruptible`], which gives up waiting as soon as the
//! calling [`Task`] has a signal pending and reports [`Interrupted`] instead
//! of acquiring the lock.
//!
//! ```
//! use kernel_sync::{SpinMutex, Task};
//!
//! let level = SpinMutex::new(0_i32);
//! let task = Task::new("reader");
//!
//! *level.lock_interruptible(&task).unwrap() = 2;
//! assert_eq!(*level.lock(), 2);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod mutex;
mod raw_spin;
mod task;

pub use mutex::{Mutex, MutexGuard};
pub use raw_spin::RawSpin;
pub use task::Task;

pub type SpinMutex<T> = Mutex<T, RawSpin>;

impl<T> SpinMutex<T> {
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self::from_raw(RawSpin::new(), value)
    }
}

/// A lock acquisition was abandoned because the waiting task got a signal.
///
/// The caller is expected to back out without touching the guarded state and
/// let the operation be restarted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("interrupted while waiting for lock")]
pub struct Interrupted;

pub trait RawLock {
    fn raw_lock(&self);
    fn raw_try_lock(&self) -> bool;

    /// Called between failed acquisition attempts of an interruptible wait.
    #[inline]
    fn raw_relax(&self) {
        core::hint::spin_loop();
    }
}

pub trait RawUnlock {
    unsafe fn raw_unlock(&self);
}
