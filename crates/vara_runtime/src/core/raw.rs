//! Owned raw byte storage backing buffers.

use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::ptr::NonNull;

/// A fixed-size, zero-initialized allocation of raw bytes.
///
/// `ptr` points to a continuous buffer of `byte_length` bytes. The pointer
/// is `None` when the buffer is empty or when the storage has been released
/// ahead of drop; every accessor treats that state as an empty slice.
#[derive(Debug)]
pub struct RawData {
    ptr: Option<NonNull<u8>>,
    byte_length: usize,
}

impl RawData {
    /// Allocate `byte_length` zeroed bytes, or `None` when the allocator
    /// refuses the request.
    pub fn zeroed(byte_length: usize) -> Option<Self> {
        if byte_length == 0 {
            return Some(Self {
                ptr: None,
                byte_length: 0,
            });
        }
        let layout = Layout::from_size_align(byte_length, 1).ok()?;
        // SAFETY: Size of allocation is non-zero.
        let ptr = NonNull::new(unsafe { alloc_zeroed(layout) })?;
        Some(Self {
            ptr: Some(ptr),
            byte_length,
        })
    }

    #[inline]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    pub fn as_slice(&self) -> &[u8] {
        if let Some(ptr) = self.ptr {
            // SAFETY: The pointer is non-null and covers byte_length
            // initialized bytes until release() takes it.
            unsafe { std::slice::from_raw_parts(ptr.as_ptr(), self.byte_length) }
        } else {
            &[]
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        if let Some(ptr) = self.ptr {
            // SAFETY: The pointer is non-null and covers byte_length
            // initialized bytes until release() takes it.
            unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), self.byte_length) }
        } else {
            &mut []
        }
    }

    /// Hand the allocation back. Safe to call more than once; later calls
    /// and the eventual drop are no-ops.
    pub fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: The pointer came from alloc_zeroed with this exact
            // layout and has not been freed, because take() just cleared it.
            unsafe { dealloc(ptr.as_ptr(), Layout::from_size_align_unchecked(self.byte_length, 1)) }
        }
    }

    /// True when a non-empty allocation has already been handed back.
    pub fn is_released(&self) -> bool {
        self.ptr.is_none() && self.byte_length > 0
    }
}

impl Drop for RawData {
    fn drop(&mut self) {
        self.release();
    }
}
