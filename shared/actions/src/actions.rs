use std::collections::HashSet;

use tracing::debug;

use crate::{
    errors::{ActionError, ActionResult},
    host::{Host, HostRequest},
    ids::{ChannelId, ClientId, ConnectionId},
};

/// Which host list an action walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    AllClients,
    /// Clients of the channel the context menu was opened on.
    SelectedChannelClients,
    OwnChannelClients,
    AllChannels,
}

/// Per-client predicate, evaluated against the host's view of channel membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Any,
    InOwnChannel,
    NotInOwnChannel,
    NotInSelectedChannel,
}

/// Whether the acting client may be one of the targets. When it is, its
/// request always goes out after everyone else's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelfPolicy {
    Include,
    Exclude,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    MoveToOwnChannel,
    MoveToSelected,
    KickFromChannel,
    KickFromServer,
    SetTalker(bool),
    DeleteChannel { force: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulkAction {
    pub source: Source,
    pub filter: Filter,
    pub actor: SelfPolicy,
    pub request: RequestKind,
}

/// Values resolved once per invocation.
struct PlanContext {
    conn: ConnectionId,
    me: ClientId,
    own_channel: Option<ChannelId>,
    selected: ChannelId,
}

impl BulkAction {
    /// Destructive actions only run while the session is armed.
    pub fn is_destructive(&self) -> bool {
        matches!(self.request, RequestKind::DeleteChannel { .. })
    }

    fn needs_own_channel(&self) -> bool {
        matches!(self.source, Source::OwnChannelClients)
            || matches!(self.filter, Filter::InOwnChannel | Filter::NotInOwnChannel)
            || matches!(self.request, RequestKind::MoveToOwnChannel)
    }

    /// Fetch the relevant host list, filter it and return the requests to issue,
    /// in issue order. Nothing is sent to the host here.
    pub fn plan<H: Host + ?Sized>(
        &self,
        host: &H,
        conn: ConnectionId,
        selected: u64,
    ) -> ActionResult<Vec<HostRequest>> {
        if self.source == Source::AllChannels {
            return host
                .channel_list(conn)?
                .into_iter()
                .map(|channel| self.channel_request(channel))
                .collect();
        }

        let me = host.own_client_id(conn)?;
        let own_channel = if self.needs_own_channel() {
            Some(host.channel_of_client(conn, me)?)
        } else {
            None
        };
        let ctx = PlanContext { conn, me, own_channel, selected: ChannelId(selected) };

        let clients = match self.source {
            Source::AllClients => host.client_list(conn)?,
            Source::SelectedChannelClients => host.channel_client_list(conn, ctx.selected)?,
            Source::OwnChannelClients => {
                let own = ctx.own_channel.ok_or(ActionError::InvalidArgument("own channel unresolved"))?;
                host.channel_client_list(conn, own)?
            }
            Source::AllChannels => return Err(ActionError::InvalidArgument("channel source in client plan")),
        };

        let mut seen = HashSet::with_capacity(clients.len());
        let mut targets = Vec::with_capacity(clients.len());
        let mut actor_targeted = false;

        for client in clients {
            if !seen.insert(client) {
                continue;
            }
            if client == me && self.actor == SelfPolicy::Exclude {
                continue;
            }
            if !self.matches(host, &ctx, client) {
                continue;
            }
            if client == me {
                actor_targeted = true;
            } else {
                targets.push(client);
            }
        }
        if actor_targeted {
            targets.push(me);
        }

        targets.into_iter().map(|client| self.client_request(&ctx, client)).collect()
    }

    fn matches<H: Host + ?Sized>(&self, host: &H, ctx: &PlanContext, client: ClientId) -> bool {
        let wanted = match self.filter {
            Filter::Any => return true,
            Filter::InOwnChannel | Filter::NotInOwnChannel => ctx.own_channel,
            Filter::NotInSelectedChannel => Some(ctx.selected),
        };
        let channel = match host.channel_of_client(ctx.conn, client) {
            Ok(ch) => ch,
            Err(e) => {
                // usually a client that left between the list fetch and now
                debug!(client = %client, error = %e, "skipping client without channel");
                return false;
            }
        };
        let same = Some(channel) == wanted;
        match self.filter {
            Filter::InOwnChannel => same,
            _ => !same,
        }
    }

    fn client_request(&self, ctx: &PlanContext, client: ClientId) -> ActionResult<HostRequest> {
        Ok(match self.request {
            RequestKind::MoveToOwnChannel => HostRequest::Move {
                client,
                channel: ctx.own_channel.ok_or(ActionError::InvalidArgument("own channel unresolved"))?,
            },
            RequestKind::MoveToSelected => HostRequest::Move { client, channel: ctx.selected },
            RequestKind::KickFromChannel => HostRequest::KickFromChannel { client },
            RequestKind::KickFromServer => HostRequest::KickFromServer { client },
            RequestKind::SetTalker(talker) => HostRequest::SetTalker { client, talker },
            RequestKind::DeleteChannel { .. } => {
                return Err(ActionError::InvalidArgument("channel request for a client"))
            }
        })
    }

    fn channel_request(&self, channel: ChannelId) -> ActionResult<HostRequest> {
        match self.request {
            RequestKind::DeleteChannel { force } => Ok(HostRequest::DeleteChannel { channel, force }),
            _ => Err(ActionError::InvalidArgument("client request for a channel")),
        }
    }
}
