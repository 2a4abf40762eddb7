//! Memory handed to the host.
//!
//! The host releases everything it receives from `ts3plugin_initMenus` by
//! passing the pointer back to `ts3plugin_freeMemory` without saying what it
//! points to, so allocations go through the C allocator and each live address
//! is tracked. Releasing an unknown or already released pointer is a no-op.

use std::collections::HashSet;
use std::os::raw::c_void;
use std::ptr::NonNull;

#[derive(Default)]
pub struct HostAllocations {
    live: HashSet<usize>,
}

impl HostAllocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroed block of `size` bytes, or `None` if the allocator fails.
    pub fn alloc_zeroed(&mut self, size: usize) -> Option<NonNull<c_void>> {
        let ptr = NonNull::new(unsafe { libc::calloc(1, size.max(1)) })?;
        self.live.insert(ptr.as_ptr() as usize);
        Some(ptr)
    }

    /// Zeroed storage for `len` values of `T`.
    pub fn alloc_array<T>(&mut self, len: usize) -> Option<NonNull<T>> {
        let size = std::mem::size_of::<T>().checked_mul(len)?;
        self.alloc_zeroed(size).map(NonNull::cast)
    }

    /// Release `ptr` if this tracker handed it out. Returns whether it did.
    pub fn release(&mut self, ptr: *mut c_void) -> bool {
        if ptr.is_null() || !self.live.remove(&(ptr as usize)) {
            return false;
        }
        unsafe { libc::free(ptr) };
        true
    }

    /// Release everything still outstanding. Returns how many blocks that was.
    pub fn release_all(&mut self) -> usize {
        let n = self.live.len();
        for addr in self.live.drain() {
            unsafe { libc::free(addr as *mut c_void) };
        }
        n
    }

    pub fn live(&self) -> usize {
        self.live.len()
    }
}

impl Drop for HostAllocations {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_exactly_once() {
        let mut allocs = HostAllocations::new();
        let p = allocs.alloc_zeroed(16).unwrap().as_ptr();
        assert_eq!(allocs.live(), 1);
        assert!(allocs.release(p));
        assert!(!allocs.release(p));
        assert_eq!(allocs.live(), 0);
    }

    #[test]
    fn foreign_and_null_pointers_are_ignored() {
        let mut allocs = HostAllocations::new();
        let mut local = 0u32;
        assert!(!allocs.release(std::ptr::null_mut()));
        assert!(!allocs.release((&mut local as *mut u32).cast()));
    }

    #[test]
    fn arrays_are_zeroed() {
        let mut allocs = HostAllocations::new();
        let arr = allocs.alloc_array::<*mut u8>(4).unwrap();
        let slice = unsafe { std::slice::from_raw_parts(arr.as_ptr(), 4) };
        assert!(slice.iter().all(|p| p.is_null()));
        assert_eq!(allocs.release_all(), 1);
        assert_eq!(allocs.release_all(), 0);
    }
}
