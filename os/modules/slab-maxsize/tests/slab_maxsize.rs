use kernel_alloc::{KMALLOC_MAX_SIZE, ProbeError};
use kernel_log::{KmsgLogger, RingSink};
use kernel_module::{Host, HostConfig, ModuleError};
use log::LevelFilter;
use slab_maxsize::SlabMaxsize;
use std::sync::OnceLock;

fn kmsg() -> &'static RingSink {
    static RING: OnceLock<&'static RingSink> = OnceLock::new();
    RING.get_or_init(|| {
        let ring: &'static RingSink = Box::leak(Box::new(RingSink::new(1024)));
        let _ = KmsgLogger::new(LevelFilter::Info, ring).init();
        ring
    })
}

#[test]
fn activation_always_fails_with_out_of_memory() {
    kmsg();
    let host = Host::new(HostConfig::default()).unwrap();
    let err = host.load::<SlabMaxsize>().unwrap_err();

    assert_eq!(err, ModuleError::Probe(ProbeError::Exhausted { size: 4_200_000 }));
    assert_eq!(err.errno(), -12);
    assert!(kmsg().contains("slab3_maxsize: inserted"));
    assert!(kmsg().contains("kmalloc(      0) = 0x10"));
    assert!(kmsg().contains("kmalloc fail, size2alloc=4200000"));
    assert_eq!(host.kmalloc().backend().free_bytes(), host.config().heap_size);
}

#[test]
fn sizes_grow_by_the_configured_step() {
    let host = Host::new(HostConfig::default()).unwrap();
    let mut sizes = Vec::new();
    let err = SlabMaxsize::probe(&host, |s| sizes.push(s.size)).unwrap_err();

    let expected: Vec<_> = (0..=KMALLOC_MAX_SIZE).step_by(200_000).collect();
    assert_eq!(sizes, expected);
    assert_eq!(sizes.len(), 21);
    assert!(matches!(err, ModuleError::Probe(ProbeError::Exhausted { size }) if size == 4_200_000));
}

#[test]
fn a_small_heap_ends_the_probe_earlier() {
    let host = Host::new(HostConfig {
        heap_size: 1024 * 1024,
        probe_step: 300_000,
        ..HostConfig::default()
    })
    .unwrap();
    let mut last = None;
    let err = SlabMaxsize::probe(&host, |s| last = Some(s.size)).unwrap_err();
    assert_eq!(last, Some(900_000));
    assert_eq!(err, ModuleError::Probe(ProbeError::Exhausted { size: 1_200_000 }));
}

#[test]
fn zero_step_is_refused() {
    let host = Host::new(HostConfig {
        probe_step: 0,
        ..HostConfig::default()
    })
    .unwrap();
    let err = host.load::<SlabMaxsize>().unwrap_err();
    assert_eq!(err, ModuleError::Probe(ProbeError::InvalidStep));
    assert_eq!(err.errno(), -22);
}
