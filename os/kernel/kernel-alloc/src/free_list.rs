use alloc::alloc::{alloc, dealloc};
use alloc::vec::Vec;
use core::alloc::{GlobalAlloc, Layout};
use core::ptr::{NonNull, null_mut};
use kernel_sync::SpinMutex;

/// Alignment of the backing region and minimum alignment of every block.
const HEAP_ALIGN: usize = 16;

/// A free range of the heap, as byte offsets from the heap base.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct FreeBlock {
    offset: usize,
    len: usize,
}

impl FreeBlock {
    const fn end(self) -> usize {
        self.offset + self.len
    }
}

/// Free ranges kept sorted by offset and never adjacent to each other.
#[derive(Debug)]
struct FreeList {
    blocks: Vec<FreeBlock>,
}

impl FreeList {
    /// First fit: carve `size` bytes aligned to `align` out of the first block
    /// that can hold them, returning the offset of the allocation.
    ///
    /// `base` is the address of offset 0; it is needed because alignment is a
    /// property of the absolute address.
    fn take(&mut self, base: usize, size: usize, align: usize) -> Option<usize> {
        let (index, block, start) = self.blocks.iter().enumerate().find_map(|(i, b)| {
            let addr = base.checked_add(b.offset)?;
            let aligned = addr.checked_next_multiple_of(align)?;
            let start = aligned - base;
            let end = start.checked_add(size)?;
            (end <= b.end()).then_some((i, *b, start))
        })?;

        // Split into up to two remainders around the allocation.
        self.blocks.remove(index);
        let mut at = index;
        if start > block.offset {
            self.blocks.insert(
                at,
                FreeBlock {
                    offset: block.offset,
                    len: start - block.offset,
                },
            );
            at += 1;
        }
        let end = start + size;
        if end < block.end() {
            self.blocks.insert(
                at,
                FreeBlock {
                    offset: end,
                    len: block.end() - end,
                },
            );
        }
        Some(start)
    }

    /// Return `[offset, offset + len)` to the list, merging with neighbors.
    fn give_back(&mut self, offset: usize, len: usize) {
        let at = self.blocks.partition_point(|b| b.offset < offset);
        debug_assert!(
            at == 0 || self.blocks[at - 1].end() <= offset,
            "double free or overlap"
        );
        self.blocks.insert(at, FreeBlock { offset, len });

        // merge with successor
        if at + 1 < self.blocks.len() && self.blocks[at].end() == self.blocks[at + 1].offset {
            self.blocks[at].len += self.blocks[at + 1].len;
            self.blocks.remove(at + 1);
        }
        // merge with predecessor
        if at > 0 && self.blocks[at - 1].end() == self.blocks[at].offset {
            self.blocks[at - 1].len += self.blocks[at].len;
            self.blocks.remove(at);
        }
    }
}

/// A bounded, first-fit, split-and-coalesce heap over a fixed region.
///
/// The free list is kept in address order so that neighbors are coalesced on
/// release. Bookkeeping lives outside the managed region, so every byte of
/// the region is available to callers.
///
/// The heap itself allocates its bookkeeping from the global allocator and
/// therefore cannot serve as the `#[global_allocator]`.
///
/// ```rust
/// use core::alloc::{GlobalAlloc, Layout};
/// use kernel_alloc::FreeListHeap;
///
/// let heap = FreeListHeap::new(4096).unwrap();
/// let layout = Layout::from_size_align(1024, 8).unwrap();
/// let p = unsafe { heap.alloc(layout) };
/// assert!(!p.is_null());
/// assert_eq!(heap.free_bytes(), 3072);
/// unsafe { heap.dealloc(p, layout) };
/// assert_eq!(heap.largest_free_block(), 4096);
/// ```
pub struct FreeListHeap {
    base: NonNull<u8>,
    capacity: usize,
    free: SpinMutex<FreeList>,
}

// Safety: the region is owned by the heap; the free list is only touched under its lock.
unsafe impl Send for FreeListHeap {}
unsafe impl Sync for FreeListHeap {}

impl FreeListHeap {
    /// Reserves `capacity` bytes of backing memory.
    ///
    /// Returns `None` for a zero capacity or if the backing memory cannot be
    /// obtained.
    #[must_use]
    pub fn new(capacity: usize) -> Option<Self> {
        let layout = Self::region_layout(capacity)?;
        let base = NonNull::new(unsafe { alloc(layout) })?;
        Some(Self {
            base,
            capacity,
            free: SpinMutex::new(FreeList {
                blocks: alloc::vec![FreeBlock {
                    offset: 0,
                    len: capacity,
                }],
            }),
        })
    }

    fn region_layout(capacity: usize) -> Option<Layout> {
        if capacity == 0 {
            return None;
        }
        Layout::from_size_align(capacity, HEAP_ALIGN).ok()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn free_bytes(&self) -> usize {
        self.free.with_lock(|fl| fl.blocks.iter().map(|b| b.len).sum())
    }

    #[must_use]
    pub fn largest_free_block(&self) -> usize {
        self.free
            .with_lock(|fl| fl.blocks.iter().map(|b| b.len).max().unwrap_or(0))
    }

    fn block_size(layout: Layout) -> usize {
        layout.size().max(1)
    }
}

unsafe impl GlobalAlloc for FreeListHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let size = Self::block_size(layout);
        let align = layout.align().max(HEAP_ALIGN);
        let base = self.base.as_ptr();
        self.free
            .with_lock(|fl| fl.take(base.addr(), size, align))
            .map_or(null_mut(), |offset| base.wrapping_add(offset))
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if ptr.is_null() {
            return;
        }
        let offset = ptr.addr() - self.base.as_ptr().addr();
        debug_assert!(offset < self.capacity, "pointer not owned by this heap");
        let size = Self::block_size(layout);
        self.free.with_lock(|fl| fl.give_back(offset, size));
    }
}

impl Drop for FreeListHeap {
    fn drop(&mut self) {
        if let Some(layout) = Self::region_layout(self.capacity) {
            unsafe { dealloc(self.base.as_ptr(), layout) }
        }
    }
}
