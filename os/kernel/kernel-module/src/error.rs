use kernel_alloc::ProbeError;
use kernel_sysfs::SysfsError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    #[error(transparent)]
    Sysfs(#[from] SysfsError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
    /// The host could not reserve its heap.
    #[error("failed to reserve {0} bytes of host heap")]
    HeapUnavailable(usize),
}

impl ModuleError {
    /// The (negative) errno a failing module `init` would return.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            Self::Sysfs(e) => e.errno(),
            Self::Probe(ProbeError::Exhausted { .. }) | Self::HeapUnavailable(_) => {
                SysfsError::ResourceUnavailable.errno()
            }
            Self::Probe(ProbeError::InvalidStep) => SysfsError::InvalidArgument.errno(),
        }
    }
}
