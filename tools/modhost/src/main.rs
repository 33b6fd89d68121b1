//! Loads one kernel module into an in-process host, drives its attribute
//! files and prints the kernel log afterwards.
//!
//! ```text
//! modhost simple-intf ls write debug_level 2 read debug_level
//! modhost --probe-step 100000 slab-maxsize
//! ```

mod ops;

use clap::{Parser, ValueEnum};
use kernel_log::{KmsgLogger, LogSink, RingSink, StderrSink};
use kernel_module::{DEFAULT_HEAP_SIZE, Host, HostConfig};
use log::LevelFilter;
use ops::{parse_ops, session};
use slab_maxsize::SlabMaxsize;
use std::io::{self, Write};
use std::process::ExitCode;
use sysfs_addrxlate::{LegacyLowmem, SysfsAddrxlate};
use sysfs_simple_intf::SysfsSimpleIntf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Module {
    /// debug_level, page_offset and pressure attributes.
    SimpleIntf,
    /// kva2pa and pa2kva attributes.
    Addrxlate,
    /// Largest kmalloc probe; activation always fails.
    SlabMaxsize,
}

/// Kernel module host.
#[derive(Debug, Parser)]
#[command(name = "modhost")]
#[command(about = "Load a module, drive its attribute files, print the kernel log")]
struct Cli {
    /// Module to load.
    #[arg(value_enum)]
    module: Module,

    /// Commands: `ls`, `read NAME`, `write NAME VALUE`.
    #[arg(trailing_var_arg = true)]
    ops: Vec<String>,

    /// Run without an attribute filesystem.
    #[arg(long)]
    no_sysfs: bool,

    /// Allocation probe step in bytes.
    #[arg(long, default_value_t = HostConfig::default().probe_step)]
    probe_step: usize,

    /// Host heap size in bytes.
    #[arg(long, default_value_t = DEFAULT_HEAP_SIZE)]
    heap_size: usize,

    /// Use the loose low-memory checks for address translation.
    #[arg(long)]
    legacy_lowmem: bool,

    /// Most verbose level that is logged.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Log to standard error as it happens instead of printing the log ring
    /// at the end.
    #[arg(long)]
    stderr: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let ring: &'static RingSink = Box::leak(Box::new(RingSink::new(4096)));
    let sink: &'static dyn LogSink = if cli.stderr { &StderrSink } else { ring };
    if let Err(e) = KmsgLogger::new(cli.log_level, sink).init() {
        eprintln!("modhost: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli, ring) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("modhost: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, ring: &RingSink) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();

    let ops = match parse_ops(&cli.ops) {
        Ok(ops) => ops,
        Err(e) => {
            writeln!(out, "modhost: {e}")?;
            return Ok(ExitCode::from(2));
        }
    };

    let config = HostConfig {
        sysfs_enabled: !cli.no_sysfs,
        probe_step: cli.probe_step,
        heap_size: cli.heap_size,
        ..HostConfig::default()
    };
    let host = match Host::new(config) {
        Ok(host) => host,
        Err(e) => {
            writeln!(out, "modhost: {e}")?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let outcome = match (cli.module, cli.legacy_lowmem) {
        (Module::SimpleIntf, _) => session::<SysfsSimpleIntf>(&host, &ops, &mut out)?,
        (Module::Addrxlate, false) => session::<SysfsAddrxlate>(&host, &ops, &mut out)?,
        (Module::Addrxlate, true) => {
            session::<SysfsAddrxlate<LegacyLowmem>>(&host, &ops, &mut out)?
        }
        (Module::SlabMaxsize, _) => session::<SlabMaxsize>(&host, &ops, &mut out)?,
    };

    if !cli.stderr {
        writeln!(out, "--- kernel log ---")?;
        for line in ring.drain() {
            writeln!(out, "{line}")?;
        }
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
