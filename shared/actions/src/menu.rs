use serde::{Deserialize, Serialize};

use crate::{
    actions::{BulkAction, Filter, RequestKind, SelfPolicy, Source},
    ids::MenuId,
};

/// Where a menu entry is shown. Values match the host's `PluginMenuType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuKind {
    Global = 0,
    Channel = 1,
    Client = 2,
}

impl MenuKind {
    pub fn from_raw(raw: i32) -> Option<Self> {
        Some(match raw {
            0 => MenuKind::Global,
            1 => MenuKind::Channel,
            2 => MenuKind::Client,
            _ => return None,
        })
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuKind::Global => "global",
            MenuKind::Channel => "channel",
            MenuKind::Client => "client",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Section header or separator; selecting it does nothing.
    Label,
    /// Enable the destructive entries for this session.
    Arm,
    Disarm,
    Bulk(BulkAction),
}

#[derive(Clone, Copy, Debug)]
pub struct MenuEntry {
    pub kind: MenuKind,
    pub id: MenuId,
    pub text: &'static str,
    pub command: Command,
}

const fn label(kind: MenuKind, id: i32, text: &'static str) -> MenuEntry {
    MenuEntry { kind, id: MenuId(id), text, command: Command::Label }
}

const fn bulk(
    kind: MenuKind,
    id: i32,
    text: &'static str,
    source: Source,
    filter: Filter,
    actor: SelfPolicy,
    request: RequestKind,
) -> MenuEntry {
    MenuEntry {
        kind,
        id: MenuId(id),
        text,
        command: Command::Bulk(BulkAction { source, filter, actor, request }),
    }
}

use self::MenuKind::{Channel as CH, Global as GL};
use crate::actions::SelfPolicy::{Exclude, Include};

/// The whole menu tree, in registration order.
pub static MENU: &[MenuEntry] = &[
    label(GL, 0, "[MOVING]"),
    bulk(GL, 1, "Move all clients into own channel", Source::AllClients, Filter::NotInOwnChannel, Include, RequestKind::MoveToOwnChannel),
    label(GL, 24, ""),
    label(GL, 2, "[KICKING]"),
    label(GL, 3, "=[clients in channel]"),
    label(GL, 4, "==[from channel]"),
    bulk(GL, 5, "everyone (but you)", Source::AllClients, Filter::InOwnChannel, Exclude, RequestKind::KickFromChannel),
    bulk(GL, 6, "everyone", Source::AllClients, Filter::InOwnChannel, Include, RequestKind::KickFromChannel),
    label(GL, 7, "==[from server]"),
    bulk(GL, 8, "everyone (but you)", Source::AllClients, Filter::InOwnChannel, Exclude, RequestKind::KickFromServer),
    bulk(GL, 9, "everyone", Source::AllClients, Filter::InOwnChannel, Include, RequestKind::KickFromServer),
    label(GL, 10, "=[clients in server]"),
    label(GL, 11, "==[from channel]"),
    bulk(GL, 12, "everyone (but you)", Source::AllClients, Filter::Any, Exclude, RequestKind::KickFromChannel),
    bulk(GL, 13, "everyone", Source::AllClients, Filter::Any, Include, RequestKind::KickFromChannel),
    label(GL, 14, "==[from server]"),
    bulk(GL, 15, "everyone (but you)", Source::AllClients, Filter::Any, Exclude, RequestKind::KickFromServer),
    bulk(GL, 16, "everyone", Source::AllClients, Filter::Any, Include, RequestKind::KickFromServer),
    label(GL, 25, ""),
    label(GL, 27, "[TALKPOWER]"),
    bulk(GL, 17, "Give everyone talkpower", Source::AllClients, Filter::InOwnChannel, Include, RequestKind::SetTalker(true)),
    bulk(GL, 18, "Take everyones talkpower", Source::AllClients, Filter::InOwnChannel, Include, RequestKind::SetTalker(false)),
    label(GL, 26, ""),
    label(GL, 19, "[MISC]"),
    MenuEntry { kind: GL, id: MenuId::ACTIVATE, text: "ACTIVATE FOR THIS SESSION", command: Command::Arm },
    MenuEntry { kind: GL, id: MenuId::DEACTIVATE, text: "DEACTIVATE FOR THIS SESSION", command: Command::Disarm },
    bulk(GL, 22, "Delete every channel", Source::AllChannels, Filter::Any, Include, RequestKind::DeleteChannel { force: true }),
    bulk(GL, 23, "Delete every empty channel", Source::AllChannels, Filter::Any, Include, RequestKind::DeleteChannel { force: false }),
    label(CH, 28, "[MOVING]"),
    label(CH, 38, "=[from this channel]"),
    bulk(CH, 29, "to your channel", Source::SelectedChannelClients, Filter::Any, Include, RequestKind::MoveToOwnChannel),
    label(CH, 39, "=[to this channel]"),
    bulk(CH, 40, "your channel", Source::OwnChannelClients, Filter::Any, Include, RequestKind::MoveToSelected),
    bulk(CH, 41, "whole server", Source::AllClients, Filter::NotInSelectedChannel, Include, RequestKind::MoveToSelected),
    label(CH, 30, ""),
    label(CH, 31, "[KICKING]"),
    label(CH, 32, "=[from channel]"),
    bulk(CH, 33, "everyone (but you)", Source::SelectedChannelClients, Filter::Any, Exclude, RequestKind::KickFromChannel),
    bulk(CH, 34, "everyone", Source::SelectedChannelClients, Filter::Any, Include, RequestKind::KickFromChannel),
    label(CH, 35, "=[from server]"),
    bulk(CH, 36, "everyone (but you)", Source::SelectedChannelClients, Filter::Any, Exclude, RequestKind::KickFromServer),
    bulk(CH, 37, "everyone", Source::SelectedChannelClients, Filter::Any, Include, RequestKind::KickFromServer),
];

pub fn find(kind: MenuKind, id: MenuId) -> Option<&'static MenuEntry> {
    MENU.iter().find(|e| e.kind == kind && e.id == id)
}
