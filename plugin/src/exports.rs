//! Symbols the host looks up when it loads the library.

#![allow(non_snake_case)]

use std::os::raw::{c_char, c_int, c_void};

use ma_actions::{ConnectionId, MenuEvent, MenuId, MenuKind};
use tracing::{debug, error};

use crate::{
    ffi::{
        abi::{PluginMenuItem, Ts3Functions, PLUGIN_API_VERSION, PLUGIN_OFFERS_NO_CONFIGURE},
        guard::{guard, guard_void},
        safety::copy_c_string,
    },
    state::{self, STATE},
};

pub const PLUGIN_NAME: &std::ffi::CStr = c"Keyinator's MassActions";
pub const PLUGIN_VERSION: &std::ffi::CStr = c"1.3";
pub const PLUGIN_AUTHOR: &std::ffi::CStr = c"Keyinator";
pub const PLUGIN_DESCRIPTION: &std::ffi::CStr = c"This plugin offers a variety of mass-actions to execute";

#[no_mangle]
pub extern "C" fn ts3plugin_name() -> *const c_char {
    PLUGIN_NAME.as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_version() -> *const c_char {
    PLUGIN_VERSION.as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_apiVersion() -> c_int {
    PLUGIN_API_VERSION
}

#[no_mangle]
pub extern "C" fn ts3plugin_author() -> *const c_char {
    PLUGIN_AUTHOR.as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_description() -> *const c_char {
    PLUGIN_DESCRIPTION.as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_setFunctionPointers(funcs: Ts3Functions) {
    guard_void("setFunctionPointers", || STATE.lock().set_functions(funcs));
}

/// 0 on success, 1 on failure (the host unloads the plugin again).
#[no_mangle]
pub extern "C" fn ts3plugin_init() -> c_int {
    guard("init", 1, || match state::init() {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "init failed");
            1
        }
    })
}

#[no_mangle]
pub extern "C" fn ts3plugin_shutdown() {
    guard_void("shutdown", || STATE.lock().shutdown());
}

#[no_mangle]
pub extern "C" fn ts3plugin_offersConfigure() -> c_int {
    PLUGIN_OFFERS_NO_CONFIGURE
}

#[no_mangle]
pub extern "C" fn ts3plugin_configure(_handle: *mut c_void, _parent: *mut c_void) {
    debug!("configure requested, plugin has no settings window");
}

/// # Safety
/// `id` must be null or a NUL-terminated string. It is copied; the host
/// invalidates the buffer after this call.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_registerPluginID(id: *const c_char) {
    guard_void("registerPluginID", || {
        if let Some(id) = unsafe { copy_c_string(id) } {
            state::register_plugin_id(id);
        }
    });
}

/// # Safety
/// `data` must be null or a pointer previously returned to the host by this
/// plugin. Unknown pointers are ignored.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_freeMemory(data: *mut c_void) {
    guard_void("freeMemory", || STATE.lock().free(data));
}

#[no_mangle]
pub extern "C" fn ts3plugin_requestAutoload() -> c_int {
    0
}

/// # Safety
/// Both out-pointers must be null or valid for a single pointer write.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_initMenus(menu_items: *mut *mut *mut PluginMenuItem, menu_icon: *mut *mut c_char) {
    guard_void("initMenus", || {
        if menu_items.is_null() {
            return;
        }
        unsafe { *menu_items = std::ptr::null_mut() };
        if !menu_icon.is_null() {
            unsafe { *menu_icon = std::ptr::null_mut() };
        }

        match state::init_menus() {
            Ok(handoff) => {
                unsafe { *menu_items = handoff.items };
                if menu_icon.is_null() {
                    STATE.lock().free(handoff.icon.cast());
                } else {
                    unsafe { *menu_icon = handoff.icon };
                }
            }
            Err(e) => error!(error = %e, "building menus failed"),
        }
    });
}

#[no_mangle]
pub extern "C" fn ts3plugin_onMenuItemEvent(
    server_connection_handler_id: u64,
    kind: c_int,
    menu_item_id: c_int,
    selected_item_id: u64,
) {
    guard_void("onMenuItemEvent", || {
        debug!(
            conn = server_connection_handler_id,
            kind,
            menu = menu_item_id,
            selected = selected_item_id,
            "menu item event"
        );
        let Some(kind) = MenuKind::from_raw(kind) else {
            return;
        };
        let ev = MenuEvent {
            connection: ConnectionId(server_connection_handler_id),
            kind,
            menu: MenuId(menu_item_id),
            selected: selected_item_id,
        };
        state::on_menu_event(ev);
    });
}
