use core::alloc::{GlobalAlloc, Layout};
use core::fmt;
use core::ptr::NonNull;
use kernel_memory_addresses::VirtualAddress;

/// Largest request the general-purpose allocator serves (order-10 pages).
pub const KMALLOC_MAX_SIZE: usize = 4 * 1024 * 1024;

/// Minimum alignment of every block handed out.
pub const KMALLOC_MIN_ALIGN: usize = 8;

/// Address returned for zero-sized requests.
///
/// It is non-null so that callers can tell "nothing requested" from
/// "allocation failed", and it must never be dereferenced.
pub const ZERO_SIZE_PTR: usize = 16;

/// A block obtained from [`Kmalloc::kmalloc`].
///
/// The block remembers its size so that it can be released without the
/// caller restating the layout.
#[must_use = "blocks must be released with Kmalloc::kfree"]
pub struct KmallocBlock {
    ptr: NonNull<u8>,
    size: usize,
}

impl KmallocBlock {
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn addr(&self) -> VirtualAddress {
        VirtualAddress::from_ptr(self.ptr.as_ptr())
    }

    #[must_use]
    pub const fn is_zero_size(&self) -> bool {
        self.size == 0
    }
}

impl fmt::Debug for KmallocBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KmallocBlock")
            .field("addr", &self.addr())
            .field("size", &self.size)
            .finish()
    }
}

/// The general-purpose kernel allocation interface over a [`GlobalAlloc`]
/// backend.
///
/// * `kmalloc(0)` succeeds with the [`ZERO_SIZE_PTR`] token and never touches
///   the backend.
/// * Requests above the configured maximum fail without touching the backend.
/// * Everything else is forwarded with [`KMALLOC_MIN_ALIGN`] alignment.
pub struct Kmalloc<A> {
    backend: A,
    max_size: usize,
}

impl<A> Kmalloc<A> {
    /// Allocator front-end with the default [`KMALLOC_MAX_SIZE`] cap.
    #[must_use]
    pub const fn new(backend: A) -> Self {
        Self::with_max_size(backend, KMALLOC_MAX_SIZE)
    }

    #[must_use]
    pub const fn with_max_size(backend: A, max_size: usize) -> Self {
        Self { backend, max_size }
    }

    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    #[must_use]
    pub const fn backend(&self) -> &A {
        &self.backend
    }
}

impl<A: GlobalAlloc> Kmalloc<A> {
    /// Returns `None` when the request cannot be served.
    #[must_use]
    pub fn kmalloc(&self, size: usize) -> Option<KmallocBlock> {
        if size == 0 {
            return Some(KmallocBlock {
                ptr: NonNull::new(core::ptr::without_provenance_mut(ZERO_SIZE_PTR))?,
                size: 0,
            });
        }
        if size > self.max_size {
            return None;
        }
        let layout = Layout::from_size_align(size, KMALLOC_MIN_ALIGN).ok()?;
        let ptr = NonNull::new(unsafe { self.backend.alloc(layout) })?;
        Some(KmallocBlock { ptr, size })
    }

    pub fn kfree(&self, block: KmallocBlock) {
        if block.is_zero_size() {
            return;
        }
        // Layout was valid when the block was handed out.
        if let Ok(layout) = Layout::from_size_align(block.size, KMALLOC_MIN_ALIGN) {
            unsafe { self.backend.dealloc(block.ptr.as_ptr(), layout) }
        }
    }
}
