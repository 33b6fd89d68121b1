use kernel_alloc::DEFAULT_PROBE_STEP;
use kernel_info::memory::LowmemLayout;

/// Backing memory of the host heap; larger than the biggest request the
/// allocator front-end accepts, so the front-end's cap is what callers hit.
pub const DEFAULT_HEAP_SIZE: usize = 8 * 1024 * 1024;

/// Runtime switches of a [`Host`](crate::Host).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Whether the attribute filesystem is available at all.
    pub sysfs_enabled: bool,
    /// Size increment of the allocation probe.
    pub probe_step: usize,
    /// Bytes of backing memory for the host heap.
    pub heap_size: usize,
    pub layout: LowmemLayout,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            sysfs_enabled: true,
            probe_step: DEFAULT_PROBE_STEP,
            heap_size: DEFAULT_HEAP_SIZE,
            layout: LowmemLayout::default(),
        }
    }
}
