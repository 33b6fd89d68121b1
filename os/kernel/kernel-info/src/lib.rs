//! # Kernel Memory Layout Configuration
//!
//! Compile-time description of the kernel's direct-mapped ("lowmem") region
//! and a small runtime value type, [`LowmemLayout`](memory::LowmemLayout),
//! that carries the same information to code that must be testable against
//! other layouts.
//!
//! ```text
//! Virtual Address Space (64-bit):
//!
//! PAGE_OFFSET           ├─────────────────────────────────┤ 0xffff_8880_0000_0000
//!                       │   Direct map of physical RAM    │
//!                       │   va = PAGE_OFFSET + pa         │
//! HIGH_MEMORY           ├─────────────────────────────────┤ PAGE_OFFSET + LOWMEM_SIZE
//!                       │   vmalloc, modules, kernel text │
//! ```
//!
//! On 32-bit targets the classic 3G/1G split applies: the direct map starts at
//! `0xC000_0000` and covers at most 896 MiB.
//!
//! Every direct-mapped virtual address translates to a physical one by
//! subtracting `PAGE_OFFSET`; the reverse holds for physical addresses below
//! `LOWMEM_SIZE`.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod memory;
