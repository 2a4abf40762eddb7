//! Conversions between host buffers and Rust values.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Copy a C string into an owned `CString`. `None` for null.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub unsafe fn copy_c_string(ptr: *const c_char) -> Option<CString> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_owned())
}

/// Read a host buffer filled up to its first NUL (or its end).
pub fn buf_to_string(buf: &[c_char]) -> String {
    let bytes: Vec<u8> = buf.iter().take_while(|&&c| c != 0).map(|&c| c as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Copy `s` into a fixed buffer, truncating on a char boundary so the result
/// stays valid UTF-8, and NUL terminate it.
pub fn copy_into_buf(dst: &mut [c_char], s: &str) {
    let Some(max) = dst.len().checked_sub(1) else {
        return;
    };
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    for (d, &b) in dst.iter_mut().zip(&s.as_bytes()[..end]) {
        *d = b as c_char;
    }
    dst[end] = 0;
}

/// Copy a zero-terminated id list handed out by the host.
///
/// # Safety
/// `ptr` must be null or point to a sequence of `T` ending in a zero value.
pub unsafe fn read_terminated<T: Copy + Default + PartialEq>(ptr: *const T) -> Vec<T> {
    let mut out = Vec::new();
    if ptr.is_null() {
        return out;
    }
    let zero = T::default();
    let mut i = 0;
    loop {
        let v = *ptr.add(i);
        if v == zero {
            break;
        }
        out.push(v);
        i += 1;
    }
    out
}
