use crate::{HostConfig, KernelModule, ModuleError, ModuleHandle};
use alloc::sync::Arc;
use kernel_alloc::{FreeListHeap, Kmalloc};
use kernel_info::memory::LowmemLayout;
use kernel_sysfs::{PseudoFs, SysfsError, SysfsRoot};
use log::{info, warn};

/// The environment modules are loaded into.
pub struct Host {
    config: HostConfig,
    sysfs: Arc<SysfsRoot>,
    kmalloc: Kmalloc<FreeListHeap>,
}

impl Host {
    /// # Errors
    /// [`ModuleError::HeapUnavailable`] if the heap cannot be reserved.
    pub fn new(config: HostConfig) -> Result<Self, ModuleError> {
        let heap =
            FreeListHeap::new(config.heap_size).ok_or(ModuleError::HeapUnavailable(config.heap_size))?;
        Ok(Self {
            config,
            sysfs: Arc::new(SysfsRoot::new()),
            kmalloc: Kmalloc::new(heap),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    #[must_use]
    pub const fn layout(&self) -> &LowmemLayout {
        &self.config.layout
    }

    #[must_use]
    pub const fn kmalloc(&self) -> &Kmalloc<FreeListHeap> {
        &self.kmalloc
    }

    /// The attribute filesystem, for listing.
    #[must_use]
    pub fn sysfs(&self) -> &SysfsRoot {
        &self.sysfs
    }

    /// The attribute filesystem, for module `init`.
    ///
    /// # Errors
    /// [`SysfsError::Unsupported`] when the host runs without one; `module`
    /// names the requester in the log.
    pub fn require_sysfs(&self, module: &str) -> Result<Arc<dyn PseudoFs>, SysfsError> {
        if !self.config.sysfs_enabled {
            warn!("{module}: sysfs unsupported! Aborting ...");
            return Err(SysfsError::Unsupported);
        }
        Ok(self.sysfs.clone())
    }

    /// Activates module `M`.
    ///
    /// # Errors
    /// Whatever `M::init` reports; the module is not loaded in that case.
    pub fn load<M: KernelModule>(&self) -> Result<ModuleHandle<'_, M>, ModuleError> {
        match M::init(self) {
            Ok(module) => {
                info!("{} initialized", M::NAME);
                Ok(ModuleHandle::new(self, module))
            }
            Err(e) => {
                warn!("{}: init failed ({}): {e}", M::NAME, e.errno());
                Err(e)
            }
        }
    }
}

impl core::fmt::Debug for Host {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Host")
            .field("config", &self.config)
            .field("dirs", &self.sysfs.list_dirs())
            .finish_non_exhaustive()
    }
}
