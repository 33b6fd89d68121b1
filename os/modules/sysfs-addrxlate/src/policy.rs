use kernel_info::memory::LowmemLayout;
use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};

/// Decides which addresses may be translated through the direct map.
pub trait LowmemPolicy: Send + Sync {
    fn virt_valid(&self, layout: &LowmemLayout, va: VirtualAddress) -> bool;

    fn phys_valid(&self, layout: &LowmemLayout, pa: PhysicalAddress) -> bool;
}

/// Exact bounds: `PAGE_OFFSET <= va < high_memory` and
/// `pa < LOWMEM_SIZE`.
///
/// ```rust
/// # use kernel_info::memory::LowmemLayout;
/// # use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};
/// # use sysfs_addrxlate::{LowmemPolicy, StrictLowmem};
/// let layout = LowmemLayout::new(0xc000_0000, 0x3800_0000);
/// assert!(StrictLowmem.virt_valid(&layout, VirtualAddress::new(0xc000_0000)));
/// assert!(!StrictLowmem.virt_valid(&layout, VirtualAddress::new(0xf800_0000)));
/// assert!(!StrictLowmem.phys_valid(&layout, PhysicalAddress::new(0x3800_0000)));
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct StrictLowmem;

impl LowmemPolicy for StrictLowmem {
    fn virt_valid(&self, layout: &LowmemLayout, va: VirtualAddress) -> bool {
        layout.page_offset() <= va && va < layout.high_memory()
    }

    fn phys_valid(&self, layout: &LowmemLayout, pa: PhysicalAddress) -> bool {
        pa.as_u64() < layout.lowmem_size()
    }
}

/// The loose checks of architectures without a dedicated validity helper:
/// the upper virtual bound is inclusive and a physical address only has to
/// stay at or below `PAGE_OFFSET`.
#[derive(Debug, Default, Copy, Clone)]
pub struct LegacyLowmem;

impl LowmemPolicy for LegacyLowmem {
    fn virt_valid(&self, layout: &LowmemLayout, va: VirtualAddress) -> bool {
        layout.page_offset() <= va && va <= layout.high_memory()
    }

    fn phys_valid(&self, layout: &LowmemLayout, pa: PhysicalAddress) -> bool {
        pa.as_u64() <= layout.page_offset().as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: LowmemLayout = LowmemLayout::new(0xc000_0000, 0x3800_0000);

    #[test]
    fn bounds_differ_at_the_edges() {
        let high = VirtualAddress::new(0xf800_0000);
        assert!(!StrictLowmem.virt_valid(&LAYOUT, high));
        assert!(LegacyLowmem.virt_valid(&LAYOUT, high));

        let below = VirtualAddress::new(0xbfff_ffff);
        assert!(!StrictLowmem.virt_valid(&LAYOUT, below));
        assert!(!LegacyLowmem.virt_valid(&LAYOUT, below));

        let pa = PhysicalAddress::new(0x4000_0000);
        assert!(!StrictLowmem.phys_valid(&LAYOUT, pa));
        assert!(LegacyLowmem.phys_valid(&LAYOUT, pa));
        assert!(!LegacyLowmem.phys_valid(&LAYOUT, PhysicalAddress::new(0xc000_0001)));
    }
}
