//! # Address translation over sysfs
//!
//! Two read/write attributes under `llkd_sysfs_addrxlate`:
//!
//! * `kva2pa`: write a kernel virtual address from the direct map, read back
//!   the physical address behind it;
//! * `pa2kva`: write a physical address, read back its direct-map virtual
//!   address.
//!
//! Both accept decimal, octal (`0…`) or hex (`0x…`) text of at most
//! [`ADDR_MAXLEN`] bytes and show `0x` plus a zero-padded hex word and a
//! newline. Each attribute has its own lock.
//!
//! Which addresses are translatable is decided by a [`LowmemPolicy`];
//! [`StrictLowmem`] is the default.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod policy;
mod xlate;

pub use policy::{LegacyLowmem, LowmemPolicy, StrictLowmem};

use kernel_info::memory::LowmemLayout;
use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};
use kernel_module::{AttributeView, Host, KernelModule, ModuleError};
use kernel_sysfs::{Attribute, FileMode, GuardedValue, Namespace};
use xlate::{Kva2Pa, Pa2Kva};

pub const DEVICE_NAME: &str = "llkd_sysfs_addrxlate";

pub const KVA2PA: &str = "kva2pa";
pub const PA2KVA: &str = "pa2kva";

/// Input limit and output buffer size of both attributes.
pub const ADDR_MAXLEN: usize = 20;

#[derive(Debug)]
pub struct Context<P> {
    layout: LowmemLayout,
    policy: P,
    kva2pa: GuardedValue<PhysicalAddress>,
    pa2kva: GuardedValue<VirtualAddress>,
}

impl<P> Context<P> {
    #[must_use]
    pub const fn layout(&self) -> &LowmemLayout {
        &self.layout
    }
}

#[derive(Debug)]
pub struct SysfsAddrxlate<P = StrictLowmem> {
    ns: Namespace<Context<P>>,
}

impl<P> SysfsAddrxlate<P> {
    #[must_use]
    pub const fn namespace(&self) -> &Namespace<Context<P>> {
        &self.ns
    }
}

impl<P> KernelModule for SysfsAddrxlate<P>
where
    P: LowmemPolicy + Default + 'static,
{
    const NAME: &'static str = "sysfs_addrxlate";

    fn init(host: &Host) -> Result<Self, ModuleError> {
        let fs = host.require_sysfs(Self::NAME)?;
        let ctx = Context {
            layout: *host.layout(),
            policy: P::default(),
            kva2pa: GuardedValue::new(PhysicalAddress::zero()),
            pa2kva: GuardedValue::new(VirtualAddress::zero()),
        };

        let ns = Namespace::register(fs, DEVICE_NAME, ctx)?
            .add_endpoint(Attribute::read_write(KVA2PA, FileMode::RW, ADDR_MAXLEN, Kva2Pa)?)?
            .add_endpoint(Attribute::read_write(PA2KVA, FileMode::RW, ADDR_MAXLEN, Pa2Kva)?)?;
        Ok(Self { ns })
    }

    fn attributes(&self) -> Option<&dyn AttributeView> {
        Some(&self.ns)
    }
}
