//! # Memory Layout

use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};

/// Start of the direct map of physical memory.
#[cfg(target_pointer_width = "64")]
pub const PAGE_OFFSET: u64 = 0xffff_8880_0000_0000;

/// Amount of physical memory covered by the direct map.
#[cfg(target_pointer_width = "64")]
pub const LOWMEM_SIZE: u64 = 4 * 1024 * 1024 * 1024; // 4 GiB

/// Start of the direct map of physical memory.
#[cfg(target_pointer_width = "32")]
pub const PAGE_OFFSET: u64 = 0xc000_0000;

/// Amount of physical memory covered by the direct map.
#[cfg(target_pointer_width = "32")]
pub const LOWMEM_SIZE: u64 = 896 * 1024 * 1024; // 896 MiB

/// First virtual address past the direct map.
pub const HIGH_MEMORY: u64 = PAGE_OFFSET + LOWMEM_SIZE;

const _: () = {
    assert!(PAGE_OFFSET.is_multiple_of(4096));
    assert!(LOWMEM_SIZE.is_multiple_of(4096));
    assert!(HIGH_MEMORY > PAGE_OFFSET);
};

/// Runtime view of the direct-mapped region.
///
/// Defaults to [`PAGE_OFFSET`] and [`LOWMEM_SIZE`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LowmemLayout {
    page_offset: VirtualAddress,
    lowmem_size: u64,
}

impl Default for LowmemLayout {
    fn default() -> Self {
        Self::new(PAGE_OFFSET, LOWMEM_SIZE)
    }
}

impl LowmemLayout {
    /// # Panics
    /// If `page_offset + lowmem_size` overflows the address space.
    #[must_use]
    pub const fn new(page_offset: u64, lowmem_size: u64) -> Self {
        assert!(
            page_offset.checked_add(lowmem_size).is_some(),
            "direct map exceeds the address space"
        );
        Self {
            page_offset: VirtualAddress::new(page_offset),
            lowmem_size,
        }
    }

    #[must_use]
    pub const fn page_offset(&self) -> VirtualAddress {
        self.page_offset
    }

    #[must_use]
    pub const fn lowmem_size(&self) -> u64 {
        self.lowmem_size
    }

    /// First virtual address past the direct map.
    #[must_use]
    pub const fn high_memory(&self) -> VirtualAddress {
        VirtualAddress::new(self.page_offset.as_u64() + self.lowmem_size)
    }

    /// Physical address backing a direct-mapped `va`, without range checks.
    ///
    /// Addresses below `PAGE_OFFSET` wrap, as the raw arithmetic does.
    #[must_use]
    pub const fn virt_to_phys(&self, va: VirtualAddress) -> PhysicalAddress {
        PhysicalAddress::new(va.as_u64().wrapping_sub(self.page_offset.as_u64()))
    }

    /// Direct-map virtual address of `pa`, without range checks.
    #[must_use]
    pub const fn phys_to_virt(&self, pa: PhysicalAddress) -> VirtualAddress {
        VirtualAddress::new(pa.as_u64().wrapping_add(self.page_offset.as_u64()))
    }
}
