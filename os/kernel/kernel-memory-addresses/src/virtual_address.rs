use crate::{HexAddress, MemoryAddress};
use core::fmt;

/// Kernel virtual memory address.
///
/// Carries the *kind* of address at the type level; it does not validate that
/// the address is mapped or canonical. Whether a virtual address may be
/// translated is decided by the direct-map layout that owns it.
///
/// ```rust
/// # use kernel_memory_addresses::*;
/// let va = VirtualAddress::new(0xFFFF_8880_0010_0000);
/// assert_eq!(va.checked_sub(0xFFFF_8880_0000_0000), Some(0x10_0000));
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VirtualAddress(MemoryAddress);

impl VirtualAddress {
    #[inline]
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(MemoryAddress::new(v))
    }

    #[inline]
    #[must_use]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(MemoryAddress::from_ptr(ptr))
    }

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0)
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0.as_u64()
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> MemoryAddress {
        self.0
    }

    /// Distance from `base` down to this address, if it lies at or above it.
    #[inline]
    #[must_use]
    pub const fn checked_sub(self, base: u64) -> Option<u64> {
        self.as_u64().checked_sub(base)
    }

    /// Fixed-width hex rendering, see [`HexAddress`].
    #[inline]
    #[must_use]
    pub const fn hex(self) -> HexAddress {
        HexAddress::new(self.as_u64())
    }
}

impl fmt::Debug for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA(0x{:016X})", self.as_u64())
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.as_u64())
    }
}

impl From<u64> for VirtualAddress {
    #[inline]
    fn from(v: u64) -> Self {
        Self::new(v)
    }
}
