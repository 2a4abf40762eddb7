use std::os::raw::{c_char, c_void};
use std::ptr;

use anyhow::{anyhow, Result};
use ma_actions::MenuEntry;

use crate::alloc::HostAllocations;
use crate::ffi::{
    abi::{PluginMenuItem, PLUGIN_MENU_BUFSZ},
    safety::copy_into_buf,
};

/// Pointers written back to the host from `ts3plugin_initMenus`.
pub struct MenuHandoff {
    /// Null-terminated array of descriptors.
    pub items: *mut *mut PluginMenuItem,
    /// Null when no icon is configured.
    pub icon: *mut c_char,
}

/// Allocate the descriptor array, one descriptor per entry, and the optional
/// icon string. Nothing stays allocated on failure.
pub fn build(allocs: &mut HostAllocations, entries: &[MenuEntry], icon: Option<&str>) -> Result<MenuHandoff> {
    let mut taken: Vec<*mut c_void> = Vec::with_capacity(entries.len() + 2);
    let result = build_inner(allocs, entries, icon, &mut taken);
    if result.is_err() {
        for p in taken {
            allocs.release(p);
        }
    }
    result
}

fn build_inner(
    allocs: &mut HostAllocations,
    entries: &[MenuEntry],
    icon: Option<&str>,
    taken: &mut Vec<*mut c_void>,
) -> Result<MenuHandoff> {
    let items = allocs
        .alloc_array::<*mut PluginMenuItem>(entries.len() + 1)
        .ok_or_else(|| anyhow!("allocating menu array"))?
        .as_ptr();
    taken.push(items.cast());

    for (i, entry) in entries.iter().enumerate() {
        let item = allocs
            .alloc_array::<PluginMenuItem>(1)
            .ok_or_else(|| anyhow!("allocating menu item {}", entry.id))?
            .as_ptr();
        taken.push(item.cast());
        unsafe {
            let it = &mut *item;
            it.kind = entry.kind.as_raw();
            it.id = entry.id.0;
            copy_into_buf(&mut it.text, entry.text);
            it.icon[0] = 0;
            *items.add(i) = item;
        }
    }
    // terminator slot is already null from the zeroed allocation

    let icon = match icon {
        Some(path) => {
            let buf = allocs
                .alloc_array::<c_char>(PLUGIN_MENU_BUFSZ)
                .ok_or_else(|| anyhow!("allocating menu icon"))?
                .as_ptr();
            taken.push(buf.cast());
            copy_into_buf(unsafe { std::slice::from_raw_parts_mut(buf, PLUGIN_MENU_BUFSZ) }, path);
            buf
        }
        None => ptr::null_mut(),
    };

    Ok(MenuHandoff { items, icon })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::safety::buf_to_string;
    use ma_actions::MENU;

    #[test]
    fn builds_full_tree_with_terminator() {
        let mut allocs = HostAllocations::new();
        let out = build(&mut allocs, MENU, None).unwrap();
        assert!(out.icon.is_null());
        assert_eq!(allocs.live(), MENU.len() + 1);

        let items = unsafe { std::slice::from_raw_parts(out.items, MENU.len() + 1) };
        assert!(items[MENU.len()].is_null());
        for (entry, &item) in MENU.iter().zip(items) {
            let item = unsafe { &*item };
            assert_eq!(item.id, entry.id.0);
            assert_eq!(item.kind, entry.kind.as_raw());
            assert_eq!(buf_to_string(&item.text), entry.text);
            assert_eq!(item.icon[0], 0);
        }
    }

    #[test]
    fn icon_is_copied() {
        let mut allocs = HostAllocations::new();
        let out = build(&mut allocs, &MENU[..2], Some("mass.png")).unwrap();
        let icon = unsafe { std::slice::from_raw_parts(out.icon, PLUGIN_MENU_BUFSZ) };
        assert_eq!(buf_to_string(icon), "mass.png");
        assert_eq!(allocs.live(), 4);
        assert!(allocs.release(out.icon.cast()));
        assert!(allocs.release(out.items.cast()));
        assert_eq!(allocs.live(), 2);
    }
}
