use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::ptr;

use ma_actions::{
    errors::ERROR_NOT_IMPLEMENTED, ActionError, ActionResult, ChannelId, ClientId, ConnectionId, Host,
    HostRequest, MenuId,
};
use tracing::warn;

use crate::ffi::{
    abi::{AnyId, Ts3Functions},
    safety::read_terminated,
};

/// [`Host`] backed by the function table the host passed to
/// `ts3plugin_setFunctionPointers`.
pub struct Ts3Host<'a> {
    funcs: &'a Ts3Functions,
    plugin_id: Option<&'a CStr>,
}

fn bound<F>(f: Option<F>, call: &'static str) -> ActionResult<F> {
    f.ok_or(ActionError::Host { call, code: ERROR_NOT_IMPLEMENTED })
}

impl<'a> Ts3Host<'a> {
    pub fn new(funcs: &'a Ts3Functions, plugin_id: Option<&'a CStr>) -> Self {
        Self { funcs, plugin_id }
    }

    /// Copy a host-allocated, zero-terminated list and give the buffer back.
    fn take_list<T: Copy + Default + PartialEq>(&self, list: *mut T) -> Vec<T> {
        let out = unsafe { read_terminated(list) };
        self.release(list.cast());
        out
    }

    fn release(&self, ptr: *mut c_void) {
        if ptr.is_null() {
            return;
        }
        match self.funcs.free_memory {
            Some(free) => {
                let code = unsafe { free(ptr) };
                if let Err(e) = ActionError::check("freeMemory", code) {
                    warn!(error = %e, "host refused to release list");
                }
            }
            None => warn!("no freeMemory in host table, leaking list"),
        }
    }
}

impl Host for Ts3Host<'_> {
    fn own_client_id(&self, conn: ConnectionId) -> ActionResult<ClientId> {
        let f = bound(self.funcs.get_client_id, "getClientID")?;
        let mut id: AnyId = 0;
        ActionError::check("getClientID", unsafe { f(conn.0, &mut id) })?;
        Ok(ClientId(id))
    }

    fn channel_of_client(&self, conn: ConnectionId, client: ClientId) -> ActionResult<ChannelId> {
        let f = bound(self.funcs.get_channel_of_client, "getChannelOfClient")?;
        let mut channel = 0u64;
        ActionError::check("getChannelOfClient", unsafe { f(conn.0, client.0, &mut channel) })?;
        Ok(ChannelId(channel))
    }

    fn client_list(&self, conn: ConnectionId) -> ActionResult<Vec<ClientId>> {
        let f = bound(self.funcs.get_client_list, "getClientList")?;
        let mut list: *mut AnyId = ptr::null_mut();
        ActionError::check("getClientList", unsafe { f(conn.0, &mut list) })?;
        Ok(self.take_list(list).into_iter().map(ClientId).collect())
    }

    fn channel_list(&self, conn: ConnectionId) -> ActionResult<Vec<ChannelId>> {
        let f = bound(self.funcs.get_channel_list, "getChannelList")?;
        let mut list: *mut u64 = ptr::null_mut();
        ActionError::check("getChannelList", unsafe { f(conn.0, &mut list) })?;
        Ok(self.take_list(list).into_iter().map(ChannelId).collect())
    }

    fn channel_client_list(&self, conn: ConnectionId, channel: ChannelId) -> ActionResult<Vec<ClientId>> {
        let f = bound(self.funcs.get_channel_client_list, "getChannelClientList")?;
        let mut list: *mut AnyId = ptr::null_mut();
        ActionError::check("getChannelClientList", unsafe { f(conn.0, channel.0, &mut list) })?;
        Ok(self.take_list(list).into_iter().map(ClientId).collect())
    }

    fn submit(&self, conn: ConnectionId, request: &HostRequest, reason: &str) -> ActionResult<()> {
        let no_return_code = ptr::null();
        let code = match *request {
            HostRequest::Move { client, channel } => {
                let f = bound(self.funcs.request_client_move, "requestClientMove")?;
                unsafe { f(conn.0, client.0, channel.0, c"".as_ptr(), no_return_code) }
            }
            HostRequest::KickFromChannel { client } => {
                let f = bound(self.funcs.request_client_kick_from_channel, "requestClientKickFromChannel")?;
                let reason = CString::new(reason).map_err(|_| ActionError::InvalidArgument("NUL in kick reason"))?;
                unsafe { f(conn.0, client.0, reason.as_ptr(), no_return_code) }
            }
            HostRequest::KickFromServer { client } => {
                let f = bound(self.funcs.request_client_kick_from_server, "requestClientKickFromServer")?;
                let reason = CString::new(reason).map_err(|_| ActionError::InvalidArgument("NUL in kick reason"))?;
                unsafe { f(conn.0, client.0, reason.as_ptr(), no_return_code) }
            }
            HostRequest::SetTalker { client, talker } => {
                let f = bound(self.funcs.request_client_set_is_talker, "requestClientSetIsTalker")?;
                unsafe { f(conn.0, client.0, talker.into(), no_return_code) }
            }
            HostRequest::DeleteChannel { channel, force } => {
                let f = bound(self.funcs.request_channel_delete, "requestChannelDelete")?;
                unsafe { f(conn.0, channel.0, force.into(), no_return_code) }
            }
        };
        ActionError::check(request.as_str(), code)
    }

    fn set_menu_enabled(&self, menu: MenuId, enabled: bool) -> ActionResult<()> {
        let f = bound(self.funcs.set_plugin_menu_enabled, "setPluginMenuEnabled")?;
        let id = self.plugin_id.ok_or(ActionError::InvalidArgument("plugin id not registered"))?;
        unsafe { f(id.as_ptr(), menu.0, enabled.into()) };
        Ok(())
    }
}
