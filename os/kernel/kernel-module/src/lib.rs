//! # Module Lifecycle
//!
//! A [`Host`] plays the part of the running kernel: it owns the attribute
//! filesystem, the allocator front-end and the runtime configuration. A
//! [`KernelModule`] is activated against a host with [`Host::load`] and stays
//! alive as long as the returned [`ModuleHandle`].
//!
//! Activation is all-or-nothing: a module whose `init` fails leaves no
//! directories or files behind. Deactivation cannot fail.
//!
//! ```rust
//! use kernel_module::{Host, HostConfig, KernelModule, ModuleError};
//!
//! struct Hello;
//!
//! impl KernelModule for Hello {
//!     const NAME: &'static str = "hello";
//!
//!     fn init(_host: &Host) -> Result<Self, ModuleError> {
//!         Ok(Hello)
//!     }
//! }
//!
//! let host = Host::new(HostConfig::default())?;
//! let handle = host.load::<Hello>()?;
//! assert_eq!(handle.name(), "hello");
//! handle.unload();
//! # Ok::<(), ModuleError>(())
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

mod config;
mod error;
mod host;
mod module;

pub use config::{DEFAULT_HEAP_SIZE, HostConfig};
pub use error::ModuleError;
pub use host::Host;
pub use module::{AttributeView, KernelModule, ModuleHandle};
