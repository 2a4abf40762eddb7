//! C layout of everything exchanged with the host.

use std::os::raw::{c_char, c_int, c_uint, c_void};

/// Plugin API major version the host must match.
pub const PLUGIN_API_VERSION: c_int = 22;

/// Size of the text and icon buffers in [`PluginMenuItem`].
pub const PLUGIN_MENU_BUFSZ: usize = 128;

pub const PATH_BUFSIZE: usize = 512;

pub const PLUGIN_OFFERS_NO_CONFIGURE: c_int = 0;

/// One menu descriptor. Allocated by the plugin, owned by the host until it
/// hands the pointer back through `ts3plugin_freeMemory`.
#[repr(C)]
pub struct PluginMenuItem {
    pub kind: c_int,
    pub id: c_int,
    pub text: [c_char; PLUGIN_MENU_BUFSZ],
    pub icon: [c_char; PLUGIN_MENU_BUFSZ],
}

pub type AnyId = u16;

/// A host function the plugin never calls. Pointer sized, so it only holds
/// its place in [`Ts3Functions`].
pub type Slot = Option<unsafe extern "C" fn()>;

/// Host function table, passed by value to `ts3plugin_setFunctionPointers`.
///
/// Field order is the host header's for API version 22. Every entry is one
/// function pointer, so entry `n` sits at byte offset `n * size_of::<usize>()`.
/// Entries the plugin calls carry their real signature; a null entry makes
/// the call fail with `ERROR_NOT_IMPLEMENTED`.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct Ts3Functions {
    pub get_client_lib_version: Slot,
    pub get_client_lib_version_number: Slot,
    pub spawn_new_server_connection_handler: Slot,
    pub destroy_server_connection_handler: Slot,

    pub get_error_message: Slot,
    pub free_memory: Option<unsafe extern "C" fn(pointer: *mut c_void) -> c_uint>,
    pub log_message: Slot,

    // sound
    pub get_playback_device_list: Slot,
    pub get_playback_mode_list: Slot,
    pub get_capture_device_list: Slot,
    pub get_capture_mode_list: Slot,
    pub get_default_playback_device: Slot,
    pub get_default_playback_mode: Slot,
    pub get_default_capture_device: Slot,
    pub get_default_capture_mode: Slot,
    pub open_playback_device: Slot,
    pub open_capture_device: Slot,
    pub get_current_playback_device_name: Slot,
    pub get_current_playback_mode: Slot,
    pub get_current_capture_device_name: Slot,
    pub get_current_capture_mode: Slot,
    pub initiate_graceful_playback_shutdown: Slot,
    pub close_playback_device: Slot,
    pub close_capture_device: Slot,
    pub activate_capture_device: Slot,
    pub play_wave_file_handle: Slot,
    pub pause_wave_file_handle: Slot,
    pub close_wave_file_handle: Slot,
    pub play_wave_file: Slot,
    pub register_custom_device: Slot,
    pub unregister_custom_device: Slot,
    pub process_custom_capture_data: Slot,
    pub acquire_custom_playback_data: Slot,
    pub get_pre_processor_info_value_float: Slot,
    pub get_pre_processor_config_value: Slot,
    pub set_pre_processor_config_value: Slot,
    pub get_encode_config_value: Slot,
    pub get_playback_config_value_as_float: Slot,
    pub set_playback_config_value: Slot,
    pub set_client_volume_modifier: Slot,
    pub start_voice_recording: Slot,
    pub stop_voice_recording: Slot,
    pub systemset_3d_listener_attributes: Slot,
    pub set_3d_wave_attributes: Slot,
    pub systemset_3d_settings: Slot,
    pub channelset_3d_attributes: Slot,

    // server interaction
    pub start_connection: Slot,
    pub stop_connection: Slot,
    pub request_client_move: Option<
        unsafe extern "C" fn(
            sch_id: u64,
            client_id: AnyId,
            new_channel_id: u64,
            password: *const c_char,
            return_code: *const c_char,
        ) -> c_uint,
    >,
    pub request_client_variables: Slot,
    pub request_client_kick_from_channel: Option<
        unsafe extern "C" fn(sch_id: u64, client_id: AnyId, reason: *const c_char, return_code: *const c_char) -> c_uint,
    >,
    pub request_client_kick_from_server: Option<
        unsafe extern "C" fn(sch_id: u64, client_id: AnyId, reason: *const c_char, return_code: *const c_char) -> c_uint,
    >,
    pub request_channel_delete: Option<
        unsafe extern "C" fn(sch_id: u64, channel_id: u64, force: c_int, return_code: *const c_char) -> c_uint,
    >,
    pub request_channel_move: Slot,
    pub request_send_private_text_msg: Slot,
    pub request_send_channel_text_msg: Slot,
    pub request_send_server_text_msg: Slot,
    pub request_connection_info: Slot,
    pub request_client_set_whisper_list: Slot,
    pub request_channel_subscribe: Slot,
    pub request_channel_subscribe_all: Slot,
    pub request_channel_unsubscribe: Slot,
    pub request_channel_unsubscribe_all: Slot,
    pub request_channel_description: Slot,
    pub request_mute_clients: Slot,
    pub request_unmute_clients: Slot,
    pub request_client_poke: Slot,
    pub request_client_ids: Slot,
    pub client_chat_closed: Slot,
    pub client_chat_composing: Slot,
    pub request_server_temporary_password_add: Slot,
    pub request_server_temporary_password_del: Slot,
    pub request_server_temporary_password_list: Slot,

    // client info
    pub get_client_id: Option<unsafe extern "C" fn(sch_id: u64, result: *mut AnyId) -> c_uint>,
    pub get_client_self_variable_as_int: Slot,
    pub get_client_self_variable_as_string: Slot,
    pub set_client_self_variable_as_int: Slot,
    pub set_client_self_variable_as_string: Slot,
    pub flush_client_self_updates: Slot,
    pub get_client_variable_as_int: Slot,
    pub get_client_variable_as_uint64: Slot,
    pub get_client_variable_as_string: Slot,
    pub get_client_list: Option<unsafe extern "C" fn(sch_id: u64, result: *mut *mut AnyId) -> c_uint>,
    pub get_channel_of_client:
        Option<unsafe extern "C" fn(sch_id: u64, client_id: AnyId, result: *mut u64) -> c_uint>,

    // channel info
    pub get_channel_variable_as_int: Slot,
    pub get_channel_variable_as_uint64: Slot,
    pub get_channel_variable_as_string: Slot,
    pub get_channel_id_from_channel_names: Slot,
    pub set_channel_variable_as_int: Slot,
    pub set_channel_variable_as_uint64: Slot,
    pub set_channel_variable_as_string: Slot,
    pub flush_channel_updates: Slot,
    pub flush_channel_creation: Slot,
    pub get_channel_list: Option<unsafe extern "C" fn(sch_id: u64, result: *mut *mut u64) -> c_uint>,
    pub get_channel_client_list:
        Option<unsafe extern "C" fn(sch_id: u64, channel_id: u64, result: *mut *mut AnyId) -> c_uint>,
    pub get_parent_channel_of_channel: Slot,

    // server and connection info
    pub get_server_connection_handler_list: Slot,
    pub get_server_variable_as_int: Slot,
    pub get_server_variable_as_uint64: Slot,
    pub get_server_variable_as_string: Slot,
    pub request_server_variables: Slot,
    pub get_connection_status: Slot,
    pub get_connection_variable_as_uint64: Slot,
    pub get_connection_variable_as_double: Slot,
    pub get_connection_variable_as_string: Slot,
    pub clean_up_connection_info: Slot,

    // client requests
    pub request_client_dbid_from_uid: Slot,
    pub request_client_name_from_uid: Slot,
    pub request_client_name_from_dbid: Slot,
    pub request_client_edit_description: Slot,
    pub request_client_set_is_talker: Option<
        unsafe extern "C" fn(sch_id: u64, client_id: AnyId, is_talker: c_int, return_code: *const c_char) -> c_uint,
    >,
    pub request_is_talker: Slot,
    pub request_send_client_query_command: Slot,

    // file transfer
    pub get_transfer_file_name: Slot,
    pub get_transfer_file_path: Slot,
    pub get_transfer_file_size: Slot,
    pub get_transfer_file_size_done: Slot,
    pub is_transfer_sender: Slot,
    pub get_transfer_status: Slot,
    pub get_current_transfer_speed: Slot,
    pub get_average_transfer_speed: Slot,
    pub get_transfer_run_time: Slot,
    pub send_file: Slot,
    pub request_file: Slot,
    pub halt_transfer: Slot,
    pub request_file_list: Slot,
    pub request_file_info: Slot,
    pub request_delete_file: Slot,
    pub request_create_directory: Slot,
    pub request_rename_file: Slot,

    // offline messages
    pub request_message_add: Slot,
    pub request_message_del: Slot,
    pub request_message_get: Slot,
    pub request_message_list: Slot,
    pub request_message_update_flag: Slot,

    pub verify_server_password: Slot,
    pub verify_channel_password: Slot,

    // bans and complaints
    pub ban_client: Slot,
    pub ban_add: Slot,
    pub ban_client_dbid: Slot,
    pub ban_del: Slot,
    pub ban_del_all: Slot,
    pub request_ban_list: Slot,
    pub request_complain_add: Slot,
    pub request_complain_del: Slot,
    pub request_complain_del_all: Slot,
    pub request_complain_list: Slot,

    // permissions
    pub request_server_group_list: Slot,
    pub request_server_group_add: Slot,
    pub request_server_group_del: Slot,
    pub request_server_group_add_client: Slot,
    pub request_server_group_del_client: Slot,
    pub request_server_groups_by_client_id: Slot,
    pub request_server_group_add_perm: Slot,
    pub request_server_group_del_perm: Slot,
    pub request_server_group_perm_list: Slot,
    pub request_server_group_client_list: Slot,
    pub request_channel_group_list: Slot,
    pub request_channel_group_add: Slot,
    pub request_channel_group_del: Slot,
    pub request_channel_group_add_perm: Slot,
    pub request_channel_group_del_perm: Slot,
    pub request_channel_group_perm_list: Slot,
    pub request_set_client_channel_group: Slot,
    pub request_channel_add_perm: Slot,
    pub request_channel_del_perm: Slot,
    pub request_channel_perm_list: Slot,
    pub request_client_add_perm: Slot,
    pub request_client_del_perm: Slot,
    pub request_client_perm_list: Slot,
    pub request_channel_client_add_perm: Slot,
    pub request_channel_client_del_perm: Slot,
    pub request_channel_client_perm_list: Slot,
    pub privilege_key_use: Slot,
    pub request_permission_list: Slot,
    pub request_permission_overview: Slot,

    pub client_property_string_to_flag: Slot,
    pub channel_property_string_to_flag: Slot,
    pub server_property_string_to_flag: Slot,

    // client application
    pub get_app_path: Slot,
    pub get_resources_path: Slot,
    pub get_config_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize)>,
    pub get_plugin_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize, plugin_id: *const c_char)>,
    pub get_current_server_connection_handler_id: Slot,
    pub print_message: Slot,
    pub print_message_to_current_tab: Slot,
    pub urls_to_bb: Slot,
    pub send_plugin_command: Slot,
    pub get_directories: Slot,
    pub get_server_connect_info: Slot,
    pub get_channel_connect_info: Slot,
    pub create_return_code: Slot,
    pub request_info_update: Slot,
    pub get_server_version: Slot,
    pub is_whispering: Slot,
    pub is_receiving_whisper: Slot,
    pub get_avatar: Slot,
    pub set_plugin_menu_enabled:
        Option<unsafe extern "C" fn(plugin_id: *const c_char, menu_id: c_int, enabled: c_int)>,
    pub show_hotkey_setup: Slot,
    pub request_hotkey_input_dialog: Slot,
    pub get_hotkey_from_keyword: Slot,
    pub get_client_display_name: Slot,
    pub get_bookmark_list: Slot,
    pub get_profile_list: Slot,
    pub gui_connect: Slot,
    pub gui_connect_bookmark: Slot,
    pub create_bookmark: Slot,
    pub get_permission_id_by_name: Slot,
    pub get_client_needed_permission: Slot,
    pub notify_key_event: Slot,
}
