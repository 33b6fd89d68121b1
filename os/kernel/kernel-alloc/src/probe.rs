//! # Allocation limit probe
//!
//! Finds the largest request size the allocator serves by asking for blocks
//! of size `0`, `step`, `2·step`, … and releasing each one right away. The
//! first request that fails ends the probe; that failure is the result, not
//! an anomaly.

use crate::Kmalloc;
use core::alloc::GlobalAlloc;
use core::convert::Infallible;
use kernel_memory_addresses::VirtualAddress;
use log::{error, info};

/// Default growth per iteration.
pub const DEFAULT_PROBE_STEP: usize = 200_000;

/// One successful allocation observed by the probe.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProbeSample {
    pub size: usize,
    pub addr: VirtualAddress,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The allocator refused a request of `size` bytes.
    #[error("allocation of {size} bytes failed")]
    Exhausted { size: usize },
    /// A zero step would request the same size forever.
    #[error("probe step must be non-zero")]
    InvalidStep,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AllocationProbe {
    step: usize,
}

impl Default for AllocationProbe {
    fn default() -> Self {
        Self {
            step: DEFAULT_PROBE_STEP,
        }
    }
}

impl AllocationProbe {
    /// # Errors
    /// [`ProbeError::InvalidStep`] for a zero `step`.
    pub const fn new(step: usize) -> Result<Self, ProbeError> {
        if step == 0 {
            return Err(ProbeError::InvalidStep);
        }
        Ok(Self { step })
    }

    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Runs the probe to its end.
    ///
    /// Every successful allocation is logged and passed to `on_success`
    /// before it is released. The probe only ends through its error value: a
    /// request that fails, or a next size that no longer fits in `usize`.
    ///
    /// # Errors
    /// Always [`ProbeError::Exhausted`] with the first size that could not be
    /// allocated.
    pub fn run<A: GlobalAlloc>(
        &self,
        kmalloc: &Kmalloc<A>,
        mut on_success: impl FnMut(ProbeSample),
    ) -> Result<Infallible, ProbeError> {
        let mut size = 0_usize;
        loop {
            let Some(block) = kmalloc.kmalloc(size) else {
                error!("kmalloc fail, size2alloc={size}");
                return Err(ProbeError::Exhausted { size });
            };
            let sample = ProbeSample {
                size,
                addr: block.addr(),
            };
            info!("kmalloc({size:7}) = {:#x}", sample.addr.as_u64());
            kmalloc.kfree(block);
            on_success(sample);

            size = match size.checked_add(self.step) {
                Some(next) => next,
                None => {
                    error!("kmalloc fail, size2alloc overflows after {size}");
                    return Err(ProbeError::Exhausted { size: usize::MAX });
                }
            };
        }
    }
}
