//! # Attribute-backed pseudo-filesystem interface
//!
//! This crate binds named, permissioned "files" to typed kernel state. A
//! user-space read of such a file turns into a *show* call that formats the
//! guarded value into a small bounded buffer; a write turns into a *store*
//! call that parses the text, validates it and only then commits it.
//!
//! ## Building blocks
//!
//! | Type | Role |
//! |------|------|
//! | [`Attribute`] | One named endpoint: mode bits, output limit and its handler. |
//! | [`Show`] / [`Store`] | Capability traits implemented per endpoint. A read-only attribute only ever holds a [`Show`] handler. |
//! | [`GuardedValue`] | State shared by a group of endpoints, behind an interruptible lock. |
//! | [`ValidationRule`] | Input length limit and permitted value range for numeric stores. |
//! | [`ShowBuffer`] | Bounded output buffer handed to show handlers. |
//! | [`Namespace`] | The directory of attributes of one module, registered all-or-nothing. |
//! | [`PseudoFs`] / [`SysfsRoot`] | Where directories and files become visible. |
//!
//! ## Lifecycle
//!
//! ```text
//! Namespace::register ──► add_endpoint(a) ──► add_endpoint(b) ──► … live …
//!        │                      │ error             │ error
//!        ▼                      ▼                   ▼
//!   (nothing created)    remove dir          remove a, remove dir
//!
//! teardown / drop: remove endpoints last-to-first, then the directory
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::fmt::Write;
//! use std::sync::Arc;
//! use kernel_sync::Task;
//! use kernel_sysfs::*;
//!
//! struct Level(GuardedValue<i32>);
//!
//! struct LevelAttr;
//!
//! const RULE: ValidationRule<i32> = ValidationRule::new(0, 2, 12);
//!
//! impl Show<Level> for LevelAttr {
//!     fn show(&self, ctx: &Level, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError> {
//!         let v = ctx.0.lock(task)?;
//!         writeln!(buf, "{}", *v)?;
//!         Ok(())
//!     }
//! }
//!
//! impl Store<Level> for LevelAttr {
//!     fn store(&self, ctx: &Level, task: &Task, input: &[u8]) -> Result<usize, SysfsError> {
//!         let mut v = ctx.0.lock(task)?;
//!         let new = RULE.decode(input)?;
//!         RULE.commit("level", &mut v, new)?;
//!         Ok(input.len())
//!     }
//! }
//!
//! let fs = Arc::new(SysfsRoot::new());
//! let ns = Namespace::register(fs.clone(), "demo", Level(GuardedValue::new(0)))?
//!     .add_endpoint(Attribute::read_write("level", FileMode::RW, 25, LevelAttr)?)?;
//!
//! let task = Task::new("sh");
//! assert_eq!(ns.store(&task, "level", b"2\n")?, 2);
//! assert_eq!(ns.show(&task, "level")?, b"2\n");
//! assert_eq!(ns.store(&task, "level", b"7"), Err(SysfsError::InvalidState));
//! assert_eq!(ns.show(&task, "level")?, b"2\n");
//!
//! ns.teardown();
//! assert!(!fs.contains_dir("demo"));
//! # Ok::<(), SysfsError>(())
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

mod attribute;
mod codec;
mod error;
mod fs;
mod guarded;
mod mode;
mod namespace;

pub use attribute::{Access, Attribute, Show, Store};
pub use codec::{KernelInt, ShowBuffer, ValidationRule, check_input_len, parse_integer};
pub use error::SysfsError;
pub use fs::{DirEntry, PseudoFs, SysfsRoot};
pub use guarded::GuardedValue;
pub use mode::FileMode;
pub use namespace::Namespace;
