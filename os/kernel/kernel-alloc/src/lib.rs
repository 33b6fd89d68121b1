//! # Kernel Memory Allocation Front-End and Allocation Probe
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            AllocationProbe                  │
//! │  size = 0, step, 2·step, … until failure    │
//! └──────────────────┬──────────────────────────┘
//!                    │ kmalloc / kfree
//! ┌──────────────────▼──────────────────────────┐
//! │                 Kmalloc<A>                  │
//! │  • zero-size token for 0-byte requests      │
//! │  • refuses requests above max size          │
//! └──────────────────┬──────────────────────────┘
//!                    │ GlobalAlloc
//! ┌──────────────────▼──────────────────────────┐
//! │  FreeListHeap  (or any GlobalAlloc backend) │
//! │  • first-fit, address-ordered, coalescing   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! * [`Kmalloc`] models the general-purpose kernel allocator interface on top
//!   of any [`GlobalAlloc`](core::alloc::GlobalAlloc) backend.
//! * [`FreeListHeap`] is a bounded heap with a fixed amount of backing
//!   memory, useful to observe exhaustion deterministically.
//! * [`AllocationProbe`] asks the allocator for progressively larger blocks
//!   until a request fails and reports where that boundary lies.

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

mod free_list;
mod kmalloc;
mod probe;

pub use free_list::FreeListHeap;
pub use kmalloc::{KMALLOC_MAX_SIZE, KMALLOC_MIN_ALIGN, Kmalloc, KmallocBlock, ZERO_SIZE_PTR};
pub use probe::{AllocationProbe, DEFAULT_PROBE_STEP, ProbeError, ProbeSample};
