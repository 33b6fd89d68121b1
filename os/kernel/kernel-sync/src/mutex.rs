use crate::{Interrupted, RawLock, RawUnlock, Task};
use core::cell::UnsafeCell;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

/// A value of type `T` guarded by the raw lock `R`.
///
/// All access to the value goes through a [`MutexGuard`]; the lock is
/// released when the guard is dropped, on every exit path.
pub struct Mutex<T, R> {
    raw: R,
    cell: UnsafeCell<T>,
    _no_send_sync: PhantomData<*mut ()>, // !Send/!Sync by default; we implement below
}

unsafe impl<T: Send, R: Sync> Sync for Mutex<T, R> {}
unsafe impl<T: Send, R: Send> Send for Mutex<T, R> {}

impl<T, R> Mutex<T, R> {
    #[must_use]
    pub const fn from_raw(raw: R, value: T) -> Self {
        Self {
            raw,
            cell: UnsafeCell::new(value),
            _no_send_sync: PhantomData,
        }
    }

    #[inline]
    pub const fn get_mut(&mut self) -> &mut T {
        self.cell.get_mut()
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        self.cell.into_inner()
    }
}

impl<T: Default, R: Default> Default for Mutex<T, R> {
    fn default() -> Self {
        Self::from_raw(R::default(), T::default())
    }
}

pub struct MutexGuard<'a, T, R>
where
    R: RawUnlock,
{
    m: &'a Mutex<T, R>,
}

impl<T, R> Deref for MutexGuard<'_, T, R>
where
    R: RawUnlock,
{
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.m.cell.get() }
    }
}

impl<T, R> DerefMut for MutexGuard<'_, T, R>
where
    R: RawUnlock,
{
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.m.cell.get() }
    }
}

impl<T, R> Drop for MutexGuard<'_, T, R>
where
    R: RawUnlock,
{
    fn drop(&mut self) {
        unsafe { self.m.raw.raw_unlock() }
    }
}

impl<T, R> fmt::Debug for MutexGuard<'_, T, R>
where
    T: fmt::Debug,
    R: RawUnlock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T, R> Mutex<T, R>
where
    R: RawLock + RawUnlock,
{
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, T, R> {
        self.raw.raw_lock();
        MutexGuard { m: self }
    }

    #[inline]
    #[must_use]
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T, R>> {
        if self.raw.raw_try_lock() {
            Some(MutexGuard { m: self })
        } else {
            None
        }
    }

    /// Acquires the lock unless `task` gets a signal while waiting.
    ///
    /// An uncontended lock is taken right away. Only when the lock is held
    /// elsewhere does the task start waiting, and from then on the pending
    /// signal state is checked between attempts. A pending signal ends the
    /// wait with [`Interrupted`]; the guarded value is never touched in that
    /// case.
    ///
    /// # Errors
    /// [`Interrupted`] if `task` has a signal pending while the lock is
    /// contended.
    pub fn lock_interruptible(&self, task: &Task) -> Result<MutexGuard<'_, T, R>, Interrupted> {
        loop {
            if self.raw.raw_try_lock() {
                return Ok(MutexGuard { m: self });
            }
            if task.signal_pending() {
                return Err(Interrupted);
            }
            self.raw.raw_relax();
        }
    }

    /// Closure convenience, built on the guard.
    #[inline]
    pub fn with_lock<U>(&self, f: impl FnOnce(&mut T) -> U) -> U {
        let mut g = self.lock();
        f(&mut g)
    }
}

impl<T, R> fmt::Debug for Mutex<T, R>
where
    T: fmt::Debug,
    R: RawLock + RawUnlock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_lock() {
            Some(g) => f.debug_struct("Mutex").field("value", &*g).finish(),
            None => f.debug_struct("Mutex").field("value", &"<locked>").finish(),
        }
    }
}
