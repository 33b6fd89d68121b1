use kernel_alloc::{AllocationProbe, FreeListHeap, KMALLOC_MAX_SIZE, Kmalloc, ProbeError};
use std::alloc::System;

#[test]
fn default_step_walks_up_to_the_kmalloc_cap() {
    let kmalloc = Kmalloc::new(System);
    let probe = AllocationProbe::new(200_000).unwrap();

    let mut sizes = Vec::new();
    let err = probe.run(&kmalloc, |s| sizes.push(s.size)).unwrap_err();

    let expected: Vec<usize> = (0..)
        .map(|i| i * 200_000)
        .take_while(|s| *s <= KMALLOC_MAX_SIZE)
        .collect();
    assert_eq!(sizes, expected);
    assert_eq!(sizes[..3], [0, 200_000, 400_000]);
    assert!(sizes.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(
        err,
        ProbeError::Exhausted {
            size: expected.last().unwrap() + 200_000
        }
    );
}

#[test]
fn blocks_are_released_before_the_next_request() {
    // The heap only ever holds a single block of the largest size, so any
    // retained block would make the probe fail early.
    let kmalloc = Kmalloc::with_max_size(FreeListHeap::new(64 * 1024).unwrap(), usize::MAX);
    let probe = AllocationProbe::new(4096).unwrap();

    let mut count = 0;
    let err = probe.run(&kmalloc, |_| count += 1).unwrap_err();

    assert_eq!(err, ProbeError::Exhausted { size: 17 * 4096 });
    // 0, 4K, …, 64K
    assert_eq!(count, 17);
    assert_eq!(kmalloc.backend().free_bytes(), 64 * 1024);
}

#[test]
fn zero_step_is_rejected() {
    assert_eq!(AllocationProbe::new(0), Err(ProbeError::InvalidStep));
}

#[test]
fn size_zero_reports_the_zero_size_token() {
    let kmalloc = Kmalloc::with_max_size(System, 10);
    let probe = AllocationProbe::new(100).unwrap();
    let mut samples = Vec::new();
    let _ = probe.run(&kmalloc, |s| samples.push(s));
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].size, 0);
    assert_eq!(samples[0].addr.as_u64(), 16);
}
