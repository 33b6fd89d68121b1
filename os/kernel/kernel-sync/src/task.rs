use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// The execution context on whose behalf an operation runs.
///
/// A task only carries what lock waiters need to know about it: its name for
/// diagnostics and whether a signal is pending. A pending signal makes every
/// interruptible wait of that task fail with [`Interrupted`](crate::Interrupted)
/// until [`clear_signal`](Self::clear_signal) is called.
pub struct Task {
    name: &'static str,
    signal_pending: AtomicBool,
}

impl Task {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            signal_pending: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Marks a signal as pending; wakes up interruptible waits.
    #[inline]
    pub fn raise_signal(&self) {
        self.signal_pending.store(true, Ordering::Release);
    }

    #[inline]
    pub fn clear_signal(&self) {
        self.signal_pending.store(false, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn signal_pending(&self) -> bool {
        self.signal_pending.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("signal_pending", &self.signal_pending())
            .finish()
    }
}
