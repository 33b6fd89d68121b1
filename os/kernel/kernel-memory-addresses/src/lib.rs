//! # Virtual and Physical Memory Address Types
//!
//! Strongly typed wrappers for raw kernel addresses, used by the address
//! translation attributes and the direct-map layout description.
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`MemoryAddress`] | A raw 64-bit address, either physical or virtual. |
//! | [`VirtualAddress`] | A kernel virtual address (e.g. inside the direct map). |
//! | [`PhysicalAddress`] | A physical RAM address. |
//!
//! The wrappers are zero-cost around `u64` and exist so that a virtual value
//! can never be handed to code expecting a physical one (or vice versa)
//! without an explicit translation step.
//!
//! ## Hex rendering
//!
//! Addresses are shown to user space as `0x` followed by a zero-padded hex
//! number whose width matches the native word size of the build target
//! ([`ADDR_HEX_DIGITS`]): 16 digits on 64-bit targets, 8 on 32-bit ones.
//!
//! ```rust
//! # use kernel_memory_addresses::*;
//! let pa = PhysicalAddress::new(0x1234);
//! # #[cfg(target_pointer_width = "64")]
//! assert_eq!(pa.hex().to_string(), "0x0000000000001234");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

mod hex;
mod memory_address;
mod physical_address;
mod virtual_address;

pub use hex::{ADDR_HEX_DIGITS, HexAddress};
pub use memory_address::MemoryAddress;
pub use physical_address::PhysicalAddress;
pub use virtual_address::VirtualAddress;
