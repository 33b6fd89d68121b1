//! # Simple sysfs interface
//!
//! Publishes three attributes under the `llkd_sysfs_simple_intf_device`
//! directory:
//!
//! | File | Mode | Read | Write |
//! |------|------|------|-------|
//! | `debug_level` | `0644` | decimal value and newline | integer in `0..=2`, 1 to 12 bytes |
//! | `page_offset` | `0444` | `0x` and the direct-map base in hex | n/a |
//! | `pressure` | `0440` | decimal value | n/a |
//!
//! All three share a single lock.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod attrs;

use attrs::{DebugLevel, PageOffset, Pressure};
use kernel_info::memory::LowmemLayout;
use kernel_module::{AttributeView, Host, KernelModule, ModuleError};
use kernel_sysfs::{Attribute, FileMode, GuardedValue, Namespace, ValidationRule};

/// Directory the attributes are created in.
pub const DEVICE_NAME: &str = "llkd_sysfs_simple_intf_device";

pub const DEBUG_LEVEL: &str = "debug_level";
pub const PAGE_OFFSET: &str = "page_offset";
pub const PRESSURE: &str = "pressure";

/// Output buffer size of every attribute.
pub const SHOW_LIMIT: usize = 25;

pub const DEBUG_LEVEL_RULE: ValidationRule<i32> = ValidationRule::new(0, 2, 12);

/// `pressure` right after activation.
pub const INITIAL_PRESSURE: u32 = 25;

#[derive(Debug, Default)]
pub struct State {
    pub debug_level: i32,
    pub pressure: u32,
}

#[derive(Debug)]
pub struct Context {
    state: GuardedValue<State>,
    layout: LowmemLayout,
}

impl Context {
    #[must_use]
    pub const fn state(&self) -> &GuardedValue<State> {
        &self.state
    }
}

#[derive(Debug)]
pub struct SysfsSimpleIntf {
    ns: Namespace<Context>,
}

impl SysfsSimpleIntf {
    #[must_use]
    pub const fn namespace(&self) -> &Namespace<Context> {
        &self.ns
    }
}

impl KernelModule for SysfsSimpleIntf {
    const NAME: &'static str = "sysfs_simple_intf";

    fn init(host: &Host) -> Result<Self, ModuleError> {
        let fs = host.require_sysfs(Self::NAME)?;
        let ctx = Context {
            state: GuardedValue::new(State {
                debug_level: 0,
                pressure: INITIAL_PRESSURE,
            }),
            layout: *host.layout(),
        };

        let ns = Namespace::register(fs, DEVICE_NAME, ctx)?
            .add_endpoint(Attribute::read_write(DEBUG_LEVEL, FileMode::RW, SHOW_LIMIT, DebugLevel)?)?
            .add_endpoint(Attribute::read_only(PAGE_OFFSET, FileMode::RO, SHOW_LIMIT, PageOffset)?)?
            .add_endpoint(Attribute::read_only(
                PRESSURE,
                FileMode::RO_GROUP,
                SHOW_LIMIT,
                Pressure,
            )?)?;
        Ok(Self { ns })
    }

    fn attributes(&self) -> Option<&dyn AttributeView> {
        Some(&self.ns)
    }
}
