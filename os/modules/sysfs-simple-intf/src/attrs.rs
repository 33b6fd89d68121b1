use crate::{Context, DEBUG_LEVEL, DEBUG_LEVEL_RULE};
use core::fmt::Write;
use kernel_sync::Task;
use kernel_sysfs::{Show, ShowBuffer, Store, SysfsError};
use log::{debug, warn};

pub struct DebugLevel;
pub struct PageOffset;
pub struct Pressure;

impl Show<Context> for DebugLevel {
    fn show(&self, ctx: &Context, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError> {
        let state = ctx.state.lock(task)?;
        debug!("show: {DEBUG_LEVEL}={}", state.debug_level);
        writeln!(buf, "{}", state.debug_level)?;
        Ok(())
    }
}

impl Store<Context> for DebugLevel {
    fn store(&self, ctx: &Context, task: &Task, input: &[u8]) -> Result<usize, SysfsError> {
        let mut state = ctx.state.lock(task)?;
        debug!(
            "store: count={}, buffer contents: \"{}\"",
            input.len(),
            input.escape_ascii()
        );
        let value = DEBUG_LEVEL_RULE.decode(input).inspect_err(|e| {
            warn!("store: {DEBUG_LEVEL}: cannot parse input ({})", e.errno());
        })?;
        DEBUG_LEVEL_RULE.commit(DEBUG_LEVEL, &mut state.debug_level, value)?;
        Ok(input.len())
    }
}

impl Show<Context> for PageOffset {
    fn show(&self, ctx: &Context, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError> {
        let _state = ctx.state.lock(task)?;
        let page_offset = ctx.layout.page_offset().as_u64();
        debug!("show: PAGE_OFFSET={page_offset:#x}");
        write!(buf, "{page_offset:#x}")?;
        Ok(())
    }
}

impl Show<Context> for Pressure {
    fn show(&self, ctx: &Context, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError> {
        let state = ctx.state.lock(task)?;
        debug!("show: pressure={}", state.pressure);
        write!(buf, "{}", state.pressure)?;
        Ok(())
    }
}
