use crate::{Host, ModuleError};
use alloc::vec::Vec;
use core::mem::ManuallyDrop;
use kernel_sync::Task;
use kernel_sysfs::{Namespace, SysfsError};
use log::info;

/// Type-erased read/write access to a module's attributes.
pub trait AttributeView {
    /// Directory the attributes live in.
    fn dir_name(&self) -> &str;

    /// # Errors
    /// See [`Namespace::show`].
    fn read(&self, task: &Task, name: &str) -> Result<Vec<u8>, SysfsError>;

    /// # Errors
    /// See [`Namespace::store`].
    fn write(&self, task: &Task, name: &str, input: &[u8]) -> Result<usize, SysfsError>;
}

impl<C> AttributeView for Namespace<C> {
    fn dir_name(&self) -> &str {
        self.name()
    }

    fn read(&self, task: &Task, name: &str) -> Result<Vec<u8>, SysfsError> {
        self.show(task, name)
    }

    fn write(&self, task: &Task, name: &str, input: &[u8]) -> Result<usize, SysfsError> {
        self.store(task, name, input)
    }
}

/// A loadable unit of kernel functionality.
pub trait KernelModule: Sized {
    const NAME: &'static str;

    /// Brings the module up. On error, everything set up so far must already
    /// be released.
    ///
    /// # Errors
    /// The reason activation failed.
    fn init(host: &Host) -> Result<Self, ModuleError>;

    /// Shuts the module down; the default just drops it.
    fn exit(self, host: &Host) {
        let _ = host;
        drop(self);
    }

    /// The module's attributes, if it exposes any.
    fn attributes(&self) -> Option<&dyn AttributeView> {
        None
    }
}

/// A loaded module; unloads on drop.
pub struct ModuleHandle<'h, M: KernelModule> {
    host: &'h Host,
    module: ManuallyDrop<M>,
}

impl<'h, M: KernelModule> ModuleHandle<'h, M> {
    pub(crate) const fn new(host: &'h Host, module: M) -> Self {
        Self {
            host,
            module: ManuallyDrop::new(module),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        M::NAME
    }

    #[must_use]
    pub fn module(&self) -> &M {
        &self.module
    }

    /// # Errors
    /// [`SysfsError::NotFound`] if the module has no attributes or none named
    /// `name`, otherwise the attribute's error.
    pub fn read(&self, task: &Task, name: &str) -> Result<Vec<u8>, SysfsError> {
        self.module
            .attributes()
            .ok_or(SysfsError::NotFound)?
            .read(task, name)
    }

    /// # Errors
    /// As [`read`](Self::read).
    pub fn write(&self, task: &Task, name: &str, input: &[u8]) -> Result<usize, SysfsError> {
        self.module
            .attributes()
            .ok_or(SysfsError::NotFound)?
            .write(task, name, input)
    }

    pub fn unload(self) {
        drop(self);
    }
}

impl<M: KernelModule> Drop for ModuleHandle<'_, M> {
    fn drop(&mut self) {
        // SAFETY: `module` is taken exactly once, here.
        let module = unsafe { ManuallyDrop::take(&mut self.module) };
        module.exit(self.host);
        info!("{} removed", M::NAME);
    }
}

impl<M: KernelModule> core::fmt::Debug for ModuleHandle<'_, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("name", &M::NAME)
            .finish_non_exhaustive()
    }
}
