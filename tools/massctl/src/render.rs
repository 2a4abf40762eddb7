use std::fmt::Write;

use ma_actions::{BulkAction, Command, Filter, MenuKind, RequestKind, SelfPolicy, Source, MENU};

pub fn describe(cmd: &Command) -> String {
    match cmd {
        Command::Label => String::new(),
        Command::Arm => "enable delete entries".to_string(),
        Command::Disarm => "disable delete entries".to_string(),
        Command::Bulk(action) => describe_bulk(action),
    }
}

fn describe_bulk(a: &BulkAction) -> String {
    let request = match a.request {
        RequestKind::MoveToOwnChannel => "move to your channel".to_string(),
        RequestKind::MoveToSelected => "move to this channel".to_string(),
        RequestKind::KickFromChannel => "kick from channel".to_string(),
        RequestKind::KickFromServer => "kick from server".to_string(),
        RequestKind::SetTalker(on) => format!("set talker {}", if on { "on" } else { "off" }),
        RequestKind::DeleteChannel { force } => format!("delete{}", if force { " (forced)" } else { "" }),
    };
    let source = match a.source {
        Source::AllClients => "all clients",
        Source::SelectedChannelClients => "clients of this channel",
        Source::OwnChannelClients => "clients of your channel",
        Source::AllChannels => "all channels",
    };
    let filter = match a.filter {
        Filter::Any => "",
        Filter::InOwnChannel => " in your channel",
        Filter::NotInOwnChannel => " outside your channel",
        Filter::NotInSelectedChannel => " outside this channel",
    };
    let actor = match (a.source, a.actor) {
        (Source::AllChannels, _) => "",
        (_, SelfPolicy::Exclude) => ", not you",
        (_, SelfPolicy::Include) => "",
    };
    format!("{request}: {source}{filter}{actor}")
}

pub fn menu_tree(only: Option<MenuKind>) -> String {
    let mut out = String::new();
    let mut current = None;
    for entry in MENU.iter().filter(|e| only.map_or(true, |k| k == e.kind)) {
        if current != Some(entry.kind) {
            current = Some(entry.kind);
            let _ = writeln!(out, "# {}", entry.kind.as_str());
        }
        let desc = describe(&entry.command);
        if desc.is_empty() {
            let _ = writeln!(out, "{:>3}  {}", entry.id, entry.text);
        } else {
            let _ = writeln!(out, "{:>3}  {:<36} {}", entry.id, entry.text, desc);
        }
    }
    out
}
