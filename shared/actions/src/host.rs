use serde::{Deserialize, Serialize};

use crate::{
    errors::ActionResult,
    ids::{ChannelId, ClientId, ConnectionId, MenuId},
};

/// One fire-and-forget request forwarded to the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum HostRequest {
    Move { client: ClientId, channel: ChannelId },
    KickFromChannel { client: ClientId },
    KickFromServer { client: ClientId },
    SetTalker { client: ClientId, talker: bool },
    DeleteChannel { channel: ChannelId, force: bool },
}

impl HostRequest {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostRequest::Move { .. } => "move",
            HostRequest::KickFromChannel { .. } => "kick_from_channel",
            HostRequest::KickFromServer { .. } => "kick_from_server",
            HostRequest::SetTalker { .. } => "set_talker",
            HostRequest::DeleteChannel { .. } => "delete_channel",
        }
    }

    pub fn client(&self) -> Option<ClientId> {
        match self {
            HostRequest::Move { client, .. }
            | HostRequest::KickFromChannel { client }
            | HostRequest::KickFromServer { client }
            | HostRequest::SetTalker { client, .. } => Some(*client),
            HostRequest::DeleteChannel { .. } => None,
        }
    }
}

/// The slice of the host API the bulk actions need.
///
/// Lists are snapshots: implementations copy whatever the host hands out and
/// release the host buffer before returning.
pub trait Host {
    fn own_client_id(&self, conn: ConnectionId) -> ActionResult<ClientId>;

    fn channel_of_client(&self, conn: ConnectionId, client: ClientId) -> ActionResult<ChannelId>;

    fn client_list(&self, conn: ConnectionId) -> ActionResult<Vec<ClientId>>;

    fn channel_list(&self, conn: ConnectionId) -> ActionResult<Vec<ChannelId>>;

    fn channel_client_list(&self, conn: ConnectionId, channel: ChannelId) -> ActionResult<Vec<ClientId>>;

    /// `reason` is passed through for kicks and ignored otherwise.
    fn submit(&self, conn: ConnectionId, request: &HostRequest, reason: &str) -> ActionResult<()>;

    fn set_menu_enabled(&self, menu: MenuId, enabled: bool) -> ActionResult<()>;
}
