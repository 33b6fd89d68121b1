//! # Largest kmalloc
//!
//! A diagnostic module whose activation runs an [`AllocationProbe`] against
//! the host allocator with the configured step. The probe ends at the first
//! allocation failure, so activation always fails with an out-of-memory
//! error and nothing stays loaded; the useful output is the log.

#![cfg_attr(not(any(test, doctest)), no_std)]

use kernel_alloc::{AllocationProbe, ProbeSample};
use kernel_module::{Host, KernelModule, ModuleError};
use log::info;

#[derive(Debug)]
pub struct SlabMaxsize;

impl SlabMaxsize {
    /// Runs the probe and hands every successful allocation to `on_success`.
    ///
    /// # Errors
    /// Always; [`ModuleError::Probe`] with the first size that failed, or
    /// with the reason the configured step is unusable.
    pub fn probe(host: &Host, on_success: impl FnMut(ProbeSample)) -> Result<Self, ModuleError> {
        let probe = AllocationProbe::new(host.config().probe_step)?;
        let Err(e) = probe.run(host.kmalloc(), on_success);
        Err(e.into())
    }
}

impl KernelModule for SlabMaxsize {
    const NAME: &'static str = "slab3_maxsize";

    fn init(host: &Host) -> Result<Self, ModuleError> {
        info!("{}: inserted", Self::NAME);
        Self::probe(host, |_| {})
    }
}
