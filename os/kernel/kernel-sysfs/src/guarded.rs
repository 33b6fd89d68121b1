use crate::SysfsError;
use kernel_sync::{MutexGuard, RawSpin, SpinMutex, Task};

/// State of one logical group of attributes, behind its own lock.
///
/// Attributes that share a `GuardedValue` exclude each other; attributes of
/// different groups never wait on each other. Acquisition is interruptible:
/// a signal delivered to the waiting [`Task`] turns into
/// [`SysfsError::Interrupted`] without the value being read or written.
#[derive(Debug)]
pub struct GuardedValue<T> {
    inner: SpinMutex<T>,
}

impl<T: Default> Default for GuardedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> GuardedValue<T> {
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            inner: SpinMutex::new(value),
        }
    }

    /// # Errors
    /// [`SysfsError::Interrupted`] if `task` is signalled while waiting.
    pub fn lock(&self, task: &Task) -> Result<MutexGuard<'_, T, RawSpin>, SysfsError> {
        Ok(self.inner.lock_interruptible(task)?)
    }

    /// Uninterruptible access, for set-up and inspection outside handlers.
    #[must_use]
    pub fn lock_uninterruptible(&self) -> MutexGuard<'_, T, RawSpin> {
        self.inner.lock()
    }

    #[must_use]
    pub const fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }
}
