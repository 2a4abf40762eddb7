use std::collections::HashMap;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::ptr;

use mass_actions::{
    ffi::safety::{buf_to_string, copy_into_buf},
    state::STATE,
    PluginMenuItem, Ts3Functions,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

const ERROR_OK: c_uint = 0;
const ERROR_CLIENT_INVALID_ID: c_uint = 0x0200;
const PLUGIN_ID: &CStr = c"test_plugin";

#[derive(Default)]
struct Fake {
    me: u16,
    clients: Vec<(u16, u64)>,
    channels: Vec<u64>,
    requests: Vec<String>,
    menus: HashMap<i32, bool>,
    lists_out: usize,
    config_dir: String,
    plugin_path_ids: Vec<String>,
    foreign_calls: usize,
    /// Call back into the plugin from inside host functions.
    reenter: bool,
}

static FAKE: Lazy<Mutex<Fake>> = Lazy::new(|| Mutex::new(Fake::default()));
/// The plugin state is process-global, so tests touching it run one at a time.
static SERIAL: Mutex<()> = parking_lot::const_mutex(());

fn with_fake<R>(f: impl FnOnce(&mut Fake) -> R) -> R {
    f(&mut FAKE.lock())
}

unsafe fn hand_out<T: Copy>(values: &[T]) -> *mut T {
    let p = libc::calloc(values.len() + 1, std::mem::size_of::<T>()) as *mut T;
    for (i, v) in values.iter().enumerate() {
        *p.add(i) = *v;
    }
    FAKE.lock().lists_out += 1;
    p
}

unsafe extern "C" fn free_memory(p: *mut c_void) -> c_uint {
    libc::free(p);
    FAKE.lock().lists_out -= 1;
    ERROR_OK
}

/// Stands in for host entries the plugin has no business calling.
unsafe extern "C" fn foreign() {
    FAKE.lock().foreign_calls += 1;
}

unsafe fn maybe_reenter() {
    if FAKE.lock().reenter {
        mass_actions::ts3plugin_freeMemory(ptr::null_mut());
    }
}

unsafe extern "C" fn get_client_id(_sch: u64, out: *mut u16) -> c_uint {
    maybe_reenter();
    *out = FAKE.lock().me;
    ERROR_OK
}

unsafe extern "C" fn get_client_list(_sch: u64, out: *mut *mut u16) -> c_uint {
    let ids: Vec<u16> = FAKE.lock().clients.iter().map(|c| c.0).collect();
    *out = hand_out(&ids);
    ERROR_OK
}

unsafe extern "C" fn get_channel_of_client(_sch: u64, client: u16, out: *mut u64) -> c_uint {
    match FAKE.lock().clients.iter().find(|c| c.0 == client) {
        Some(c) => {
            *out = c.1;
            ERROR_OK
        }
        None => ERROR_CLIENT_INVALID_ID,
    }
}

unsafe extern "C" fn get_channel_list(_sch: u64, out: *mut *mut u64) -> c_uint {
    let channels = FAKE.lock().channels.clone();
    *out = hand_out(&channels);
    ERROR_OK
}

unsafe extern "C" fn get_channel_client_list(_sch: u64, channel: u64, out: *mut *mut u16) -> c_uint {
    let ids: Vec<u16> = FAKE.lock().clients.iter().filter(|c| c.1 == channel).map(|c| c.0).collect();
    *out = hand_out(&ids);
    ERROR_OK
}

fn record(line: String) -> c_uint {
    FAKE.lock().requests.push(line);
    ERROR_OK
}

unsafe extern "C" fn request_client_move(_sch: u64, client: u16, channel: u64, _pw: *const c_char, _rc: *const c_char) -> c_uint {
    record(format!("move {client} {channel}"))
}

unsafe extern "C" fn kick_from_channel(_sch: u64, client: u16, reason: *const c_char, _rc: *const c_char) -> c_uint {
    record(format!("kick_channel {client} {}", CStr::from_ptr(reason).to_string_lossy()))
}

unsafe extern "C" fn kick_from_server(_sch: u64, client: u16, reason: *const c_char, _rc: *const c_char) -> c_uint {
    record(format!("kick_server {client} {}", CStr::from_ptr(reason).to_string_lossy()))
}

unsafe extern "C" fn set_is_talker(_sch: u64, client: u16, talker: c_int, _rc: *const c_char) -> c_uint {
    record(format!("talker {client} {talker}"))
}

unsafe extern "C" fn channel_delete(_sch: u64, channel: u64, force: c_int, _rc: *const c_char) -> c_uint {
    record(format!("delete {channel} {force}"))
}

unsafe extern "C" fn get_config_path(buf: *mut c_char, len: usize) {
    let dir = FAKE.lock().config_dir.clone();
    copy_into_buf(std::slice::from_raw_parts_mut(buf, len), &dir);
}

unsafe extern "C" fn get_plugin_path(buf: *mut c_char, len: usize, id: *const c_char) {
    let id = if id.is_null() { "<null>".to_string() } else { CStr::from_ptr(id).to_string_lossy().into_owned() };
    FAKE.lock().plugin_path_ids.push(id);
    copy_into_buf(std::slice::from_raw_parts_mut(buf, len), "/opt/host/plugins/");
}

unsafe extern "C" fn set_plugin_menu_enabled(id: *const c_char, menu: c_int, enabled: c_int) {
    maybe_reenter();
    if CStr::from_ptr(id) == PLUGIN_ID {
        FAKE.lock().menus.insert(menu, enabled != 0);
    }
}

fn table() -> Ts3Functions {
    Ts3Functions {
        free_memory: Some(free_memory),
        get_client_id: Some(get_client_id),
        get_client_list: Some(get_client_list),
        get_channel_of_client: Some(get_channel_of_client),
        get_channel_list: Some(get_channel_list),
        get_channel_client_list: Some(get_channel_client_list),
        request_client_move: Some(request_client_move),
        request_client_kick_from_channel: Some(kick_from_channel),
        request_client_kick_from_server: Some(kick_from_server),
        request_client_set_is_talker: Some(set_is_talker),
        request_channel_delete: Some(channel_delete),
        get_config_path: Some(get_config_path),
        get_plugin_path: Some(get_plugin_path),
        set_plugin_menu_enabled: Some(set_plugin_menu_enabled),
        ..Ts3Functions::default()
    }
}

/// me = 2 in channel 5 with 1 and 3; 4 sits in channel 6.
fn reset_fake(config_dir: &str) {
    with_fake(|f| {
        *f = Fake {
            me: 2,
            clients: vec![(1, 5), (2, 5), (3, 5), (4, 6)],
            channels: vec![5, 6, 7],
            config_dir: config_dir.to_string(),
            ..Fake::default()
        }
    });
}

/// Load, init and register like the host does. Returns the init code.
fn load() -> c_int {
    mass_actions::ts3plugin_setFunctionPointers(table());
    let code = mass_actions::ts3plugin_init();
    unsafe { mass_actions::ts3plugin_registerPluginID(PLUGIN_ID.as_ptr()) };
    code
}

fn init_menus() -> (Vec<*mut PluginMenuItem>, *mut PluginMenuItem, *mut c_char) {
    let mut items: *mut *mut PluginMenuItem = ptr::null_mut();
    let mut icon: *mut c_char = ptr::null_mut();
    unsafe { mass_actions::ts3plugin_initMenus(&mut items, &mut icon) };
    assert!(!items.is_null());
    let mut out = Vec::new();
    unsafe {
        let mut i = 0;
        while !(*items.add(i)).is_null() {
            out.push(*items.add(i));
            i += 1;
        }
    }
    (out, items.cast(), icon)
}

fn release_menus(items: &[*mut PluginMenuItem], array: *mut PluginMenuItem, icon: *mut c_char) {
    unsafe {
        for &item in items {
            mass_actions::ts3plugin_freeMemory(item.cast());
        }
        mass_actions::ts3plugin_freeMemory(array.cast());
        mass_actions::ts3plugin_freeMemory(icon.cast());
    }
}

fn requests() -> Vec<String> {
    with_fake(|f| std::mem::take(&mut f.requests))
}

#[test]
fn metadata() {
    unsafe {
        assert_eq!(CStr::from_ptr(mass_actions::ts3plugin_name()), c"Keyinator's MassActions");
        assert_eq!(CStr::from_ptr(mass_actions::ts3plugin_version()), c"1.3");
        assert_eq!(CStr::from_ptr(mass_actions::ts3plugin_author()), c"Keyinator");
    }
    assert_eq!(mass_actions::ts3plugin_apiVersion(), 22);
    assert_eq!(mass_actions::ts3plugin_offersConfigure(), 0);
    assert_eq!(mass_actions::ts3plugin_requestAutoload(), 0);
}

#[test]
fn init_fails_without_function_table() {
    let _serial = SERIAL.lock();
    mass_actions::ts3plugin_setFunctionPointers(Ts3Functions::default());
    assert_eq!(mass_actions::ts3plugin_init(), 1);
    mass_actions::ts3plugin_shutdown();
}

#[test]
fn menus_and_actions_through_the_c_interface() {
    let _serial = SERIAL.lock();
    reset_fake("");
    assert_eq!(load(), 0);

    // the plugin path is looked up once the id is known
    with_fake(|f| assert_eq!(f.plugin_path_ids, vec!["test_plugin".to_string()]));

    let (items, array, icon) = init_menus();
    assert_eq!(items.len(), 42);
    assert!(icon.is_null());
    let first = unsafe { &*items[0] };
    assert_eq!((first.kind, first.id, buf_to_string(&first.text)), (0, 0, "[MOVING]".to_string()));
    with_fake(|f| {
        assert_eq!(f.menus.get(&20), Some(&true));
        for id in 21..=23 {
            assert_eq!(f.menus.get(&id), Some(&false), "menu {id}");
        }
    });

    release_menus(&items, array, icon);
    assert_eq!(STATE.lock().live_allocations(), 0);
    // a second release of the same block is ignored
    unsafe { mass_actions::ts3plugin_freeMemory(array.cast()) };
    assert_eq!(STATE.lock().live_allocations(), 0);

    // global: kick everyone in own channel from the server, actor last
    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 9, 0);
    assert_eq!(requests(), vec!["kick_server 1 ", "kick_server 3 ", "kick_server 2 "]);

    // channel menu on channel 6: move its clients to own channel
    mass_actions::ts3plugin_onMenuItemEvent(1, 1, 29, 6);
    assert_eq!(requests(), vec!["move 4 5"]);

    // talk power for own channel
    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 18, 0);
    assert_eq!(requests(), vec!["talker 1 0", "talker 3 0", "talker 2 0"]);

    // delete refused until armed
    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 22, 0);
    assert!(requests().is_empty());
    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 20, 0);
    with_fake(|f| {
        assert_eq!(f.menus.get(&20), Some(&false));
        assert_eq!(f.menus.get(&22), Some(&true));
    });
    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 23, 0);
    assert_eq!(requests(), vec!["delete 5 0", "delete 6 0", "delete 7 0"]);

    // every host list was handed back
    assert_eq!(with_fake(|f| f.lists_out), 0);

    // unknown menu type and id
    mass_actions::ts3plugin_onMenuItemEvent(1, 9, 1, 0);
    mass_actions::ts3plugin_onMenuItemEvent(1, 2, 42, 1);
    assert!(requests().is_empty());

    mass_actions::ts3plugin_shutdown();
    assert!(STATE.lock().plugin_id().is_none());
    assert!(!STATE.lock().is_initialized());
}

#[test]
fn repeated_cycles_do_not_leak() {
    let _serial = SERIAL.lock();
    reset_fake("");
    for _ in 0..3 {
        assert_eq!(load(), 0);
        let (items, _, _) = init_menus();
        assert_eq!(STATE.lock().live_allocations(), items.len() + 1);
        // host never gave the memory back
        mass_actions::ts3plugin_shutdown();
        assert_eq!(STATE.lock().live_allocations(), 0);
    }
    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 13, 0);
    assert!(requests().is_empty());
}

#[test]
fn config_file_is_applied() {
    let _serial = SERIAL.lock();
    let dir = std::env::temp_dir().join(format!("ma-plugin-config-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("plugins")).unwrap();
    std::fs::write(
        dir.join("plugins").join("mass_actions.json"),
        r#"{"kick_reason":"cleanup","start_armed":true,"menu_icon":"mass.png"}"#,
    )
    .unwrap();
    reset_fake(&format!("{}/", dir.display()));

    assert_eq!(load(), 0);
    let (items, array, icon) = init_menus();
    assert!(!icon.is_null());
    let icon_text = unsafe { CStr::from_ptr(icon) };
    assert_eq!(icon_text, c"mass.png");
    with_fake(|f| assert_eq!(f.menus.get(&22), Some(&true)));

    mass_actions::ts3plugin_onMenuItemEvent(1, 1, 34, 6);
    assert_eq!(requests(), vec!["kick_channel 4 cleanup"]);

    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 22, 0);
    assert_eq!(requests(), vec!["delete 5 1", "delete 6 1", "delete 7 1"]);

    release_menus(&items, array, icon);
    mass_actions::ts3plugin_shutdown();
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn only_bound_host_entries_are_called() {
    let _serial = SERIAL.lock();
    reset_fake("");
    let mut funcs = table();
    funcs.get_client_lib_version = Some(foreign);
    funcs.get_client_lib_version_number = Some(foreign);
    funcs.spawn_new_server_connection_handler = Some(foreign);
    funcs.get_error_message = Some(foreign);
    funcs.log_message = Some(foreign);
    funcs.request_client_variables = Some(foreign);
    funcs.get_app_path = Some(foreign);
    mass_actions::ts3plugin_setFunctionPointers(funcs);
    assert_eq!(mass_actions::ts3plugin_init(), 0);
    unsafe { mass_actions::ts3plugin_registerPluginID(PLUGIN_ID.as_ptr()) };

    let (items, array, icon) = init_menus();
    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 13, 0);
    assert_eq!(requests(), vec!["kick_channel 1 ", "kick_channel 3 ", "kick_channel 4 ", "kick_channel 2 "]);
    assert_eq!(with_fake(|f| f.foreign_calls), 0);

    release_menus(&items, array, icon);
    mass_actions::ts3plugin_shutdown();
}

#[test]
fn host_may_call_back_into_the_plugin() {
    let _serial = SERIAL.lock();
    reset_fake("");
    with_fake(|f| f.reenter = true);
    assert_eq!(load(), 0);

    let (items, array, icon) = init_menus();
    with_fake(|f| assert_eq!(f.menus.get(&20), Some(&true)));

    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 17, 0);
    assert_eq!(requests(), vec!["talker 1 1", "talker 3 1", "talker 2 1"]);
    // the dispatcher is back in place for the next event
    mass_actions::ts3plugin_onMenuItemEvent(1, 0, 20, 0);
    with_fake(|f| assert_eq!(f.menus.get(&22), Some(&true)));
    assert!(STATE.lock().is_initialized());

    release_menus(&items, array, icon);
    mass_actions::ts3plugin_shutdown();
}
