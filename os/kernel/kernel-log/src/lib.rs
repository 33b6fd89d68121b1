//! # Kernel Message Log
//!
//! A [`log::Log`] implementation for the module host. Records are rendered as
//!
//! ```text
//! [LEVEL] target: message
//! ```
//!
//! and handed to a [`LogSink`]. Two sinks are provided:
//!
//! * [`RingSink`]: a bounded in-memory buffer that keeps the most recent lines,
//!   in the spirit of the kernel message ring read by `dmesg`;
//! * [`StderrSink`] (feature `std`): writes each line to standard error.
//!
//! ```rust
//! use kernel_log::{KmsgLogger, RingSink};
//! use log::LevelFilter;
//!
//! let ring: &'static RingSink = Box::leak(Box::new(RingSink::new(128)));
//! let logger = KmsgLogger::new(LevelFilter::Info, ring);
//! // Only one logger can be installed per process.
//! let _ = logger.init();
//! log::info!(target: "demo", "hello");
//! ```

#![cfg_attr(not(any(test, doctest, feature = "std")), no_std)]

extern crate alloc;

mod logger;
mod sink;

pub use logger::KmsgLogger;
#[cfg(feature = "std")]
pub use sink::StderrSink;
pub use sink::{LogSink, RingSink};
