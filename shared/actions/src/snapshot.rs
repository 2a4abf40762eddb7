//! In-memory host backed by a server snapshot.
//!
//! Used for dry runs (`massctl plan`) and as the test double for everything
//! that talks to [`Host`].

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashSet},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{
        ActionError, ActionResult, ERROR_CHANNEL_INVALID_ID, ERROR_CLIENT_INVALID_ID, ERROR_NOT_IMPLEMENTED,
        ERROR_PERMISSIONS,
    },
    host::{Host, HostRequest},
    ids::{ChannelId, ClientId, ConnectionId, MenuId},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEntry {
    pub id: ClientId,
    pub channel: ChannelId,
}

/// What the host would report for one server connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSnapshot {
    pub me: ClientId,
    pub clients: Vec<ClientEntry>,
    #[serde(default)]
    pub channels: Vec<ChannelId>,
}

impl ServerSnapshot {
    pub fn build(me: u16, clients: &[(u16, u64)], channels: &[u64]) -> Self {
        Self {
            me: ClientId(me),
            clients: clients
                .iter()
                .map(|&(id, channel)| ClientEntry { id: ClientId(id), channel: ChannelId(channel) })
                .collect(),
            channels: channels.iter().copied().map(ChannelId).collect(),
        }
    }

    /// Listed channels plus any channel a client sits in, in first-seen order.
    pub fn all_channels(&self) -> Vec<ChannelId> {
        let mut seen = HashSet::new();
        self.channels
            .iter()
            .copied()
            .chain(self.clients.iter().map(|c| c.channel))
            .filter(|ch| seen.insert(*ch))
            .collect()
    }
}

pub struct SnapshotHost {
    snapshot: ServerSnapshot,
    issued: RefCell<Vec<HostRequest>>,
    menus: RefCell<BTreeMap<MenuId, bool>>,
    rejected: HashSet<HostRequest>,
    fail_lists: bool,
    fail_menus: bool,
}

impl SnapshotHost {
    pub fn new(snapshot: ServerSnapshot) -> Self {
        Self {
            snapshot,
            issued: RefCell::new(Vec::new()),
            menus: RefCell::new(BTreeMap::new()),
            rejected: HashSet::new(),
            fail_lists: false,
            fail_menus: false,
        }
    }

    /// Answer `request` with a permission error instead of accepting it.
    pub fn reject(mut self, request: HostRequest) -> Self {
        self.rejected.insert(request);
        self
    }

    pub fn failing_lists(mut self) -> Self {
        self.fail_lists = true;
        self
    }

    /// Answer every menu enablement change with an error.
    pub fn failing_menus(mut self) -> Self {
        self.fail_menus = true;
        self
    }

    pub fn snapshot(&self) -> &ServerSnapshot {
        &self.snapshot
    }

    /// Every request submitted so far, accepted or not, in order.
    pub fn issued(&self) -> Vec<HostRequest> {
        self.issued.borrow().clone()
    }

    pub fn menu_enabled(&self, menu: MenuId) -> Option<bool> {
        self.menus.borrow().get(&menu).copied()
    }

    fn list_guard(&self, call: &'static str) -> ActionResult<()> {
        if self.fail_lists {
            return Err(ActionError::Host { call, code: ERROR_PERMISSIONS });
        }
        Ok(())
    }
}

impl Host for SnapshotHost {
    fn own_client_id(&self, _conn: ConnectionId) -> ActionResult<ClientId> {
        Ok(self.snapshot.me)
    }

    fn channel_of_client(&self, _conn: ConnectionId, client: ClientId) -> ActionResult<ChannelId> {
        self.snapshot
            .clients
            .iter()
            .find(|c| c.id == client)
            .map(|c| c.channel)
            .ok_or(ActionError::Host { call: "getChannelOfClient", code: ERROR_CLIENT_INVALID_ID })
    }

    fn client_list(&self, _conn: ConnectionId) -> ActionResult<Vec<ClientId>> {
        self.list_guard("getClientList")?;
        Ok(self.snapshot.clients.iter().map(|c| c.id).collect())
    }

    fn channel_list(&self, _conn: ConnectionId) -> ActionResult<Vec<ChannelId>> {
        self.list_guard("getChannelList")?;
        Ok(self.snapshot.all_channels())
    }

    fn channel_client_list(&self, _conn: ConnectionId, channel: ChannelId) -> ActionResult<Vec<ClientId>> {
        self.list_guard("getChannelClientList")?;
        if !self.snapshot.all_channels().contains(&channel) {
            return Err(ActionError::Host { call: "getChannelClientList", code: ERROR_CHANNEL_INVALID_ID });
        }
        Ok(self.snapshot.clients.iter().filter(|c| c.channel == channel).map(|c| c.id).collect())
    }

    fn submit(&self, _conn: ConnectionId, request: &HostRequest, _reason: &str) -> ActionResult<()> {
        self.issued.borrow_mut().push(request.clone());
        if self.rejected.contains(request) {
            return Err(ActionError::Host { call: request.as_str(), code: ERROR_PERMISSIONS });
        }
        Ok(())
    }

    fn set_menu_enabled(&self, menu: MenuId, enabled: bool) -> ActionResult<()> {
        if self.fail_menus {
            return Err(ActionError::Host { call: "setPluginMenuEnabled", code: ERROR_NOT_IMPLEMENTED });
        }
        self.menus.borrow_mut().insert(menu, enabled);
        Ok(())
    }
}
