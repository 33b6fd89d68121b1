use crate::{ADDR_MAXLEN, Context, KVA2PA, LowmemPolicy, PA2KVA};
use core::fmt::Write;
use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};
use kernel_sync::Task;
use kernel_sysfs::{Show, ShowBuffer, Store, SysfsError, check_input_len, parse_integer};
use log::{debug, info, warn};

pub struct Kva2Pa;
pub struct Pa2Kva;

/// Parses a native machine word written to `attr`.
fn parse_addr(attr: &str, input: &[u8]) -> Result<u64, SysfsError> {
    check_input_len(input, ADDR_MAXLEN)?;
    let word = parse_integer::<usize>(input).inspect_err(|_| {
        warn!("{attr}: cannot parse address \"{}\"", input.escape_ascii());
    })?;
    Ok(word as u64)
}

impl<P: LowmemPolicy> Show<Context<P>> for Kva2Pa {
    fn show(&self, ctx: &Context<P>, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError> {
        let pa = ctx.kva2pa.lock(task)?;
        debug!("show: {KVA2PA}={pa:?}");
        writeln!(buf, "{}", pa.hex())?;
        Ok(())
    }
}

impl<P: LowmemPolicy> Store<Context<P>> for Kva2Pa {
    fn store(&self, ctx: &Context<P>, task: &Task, input: &[u8]) -> Result<usize, SysfsError> {
        let mut slot = ctx.kva2pa.lock(task)?;
        let kva = VirtualAddress::new(parse_addr(KVA2PA, input)?);

        if !ctx.policy.virt_valid(&ctx.layout, kva) {
            info!(
                "invalid virtual address ({}), must be a valid linear addr within the kernel lowmem region",
                kva.hex()
            );
            return Err(SysfsError::InvalidState);
        }

        let pa = ctx.layout.virt_to_phys(kva);
        *slot = pa;
        debug!("kva {} = pa {}", kva.hex(), pa.hex());
        #[cfg(feature = "manual-xlate")]
        info!(
            "manually: kva {} = pa {}",
            kva.hex(),
            PhysicalAddress::new(kva.as_u64().wrapping_sub(ctx.layout.page_offset().as_u64())).hex()
        );
        Ok(input.len())
    }
}

impl<P: LowmemPolicy> Show<Context<P>> for Pa2Kva {
    fn show(&self, ctx: &Context<P>, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError> {
        let kva = ctx.pa2kva.lock(task)?;
        debug!("show: {PA2KVA}={kva:?}");
        writeln!(buf, "{}", kva.hex())?;
        Ok(())
    }
}

impl<P: LowmemPolicy> Store<Context<P>> for Pa2Kva {
    fn store(&self, ctx: &Context<P>, task: &Task, input: &[u8]) -> Result<usize, SysfsError> {
        let mut slot = ctx.pa2kva.lock(task)?;
        let pa = PhysicalAddress::new(parse_addr(PA2KVA, input)?);

        if !ctx.policy.phys_valid(&ctx.layout, pa) {
            info!("invalid physical address ({})?", pa.hex());
            return Err(SysfsError::InvalidState);
        }

        let kva = ctx.layout.phys_to_virt(pa);
        *slot = kva;
        debug!("pa {} = kva {}", pa.hex(), kva.hex());
        #[cfg(feature = "manual-xlate")]
        info!(
            "manually: pa {} = kva {}",
            pa.hex(),
            VirtualAddress::new(pa.as_u64().wrapping_add(ctx.layout.page_offset().as_u64())).hex()
        );
        Ok(input.len())
    }
}
