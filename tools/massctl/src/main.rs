use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use ma_actions::{
    menu, ActionError, ConnectionId, Dispatcher, MenuEvent, MenuId, MenuKind, Outcome, PluginConfig,
    ServerSnapshot, SnapshotHost,
};

mod render;

#[derive(Parser, Debug)]
#[command(name = "massctl", about = "Inspect and dry-run the mass-action menu")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Global,
    Channel,
}

impl From<Kind> for MenuKind {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Global => MenuKind::Global,
            Kind::Channel => MenuKind::Channel,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the menu tree as registered with the host
    Menus {
        /// Only this menu
        #[arg(long, value_enum)]
        kind: Option<Kind>,
    },

    /// Print the requests a menu selection would issue against a snapshot
    Plan {
        /// JSON server snapshot: {"me": 2, "clients": [{"id": 1, "channel": 5}], "channels": [5]}
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long, value_enum, default_value = "global")]
        kind: Kind,

        /// Numeric menu id
        #[arg(long)]
        menu: i32,

        /// Channel id the context menu was opened on
        #[arg(long, default_value_t = 0)]
        selected: u64,

        /// Treat the session as activated (allows the delete entries)
        #[arg(long, default_value_t = false)]
        armed: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.cmd {
        Cmd::Menus { kind } => {
            print!("{}", render::menu_tree(kind.map(MenuKind::from)));
            Ok(())
        }
        Cmd::Plan { snapshot, kind, menu, selected, armed } => plan(&snapshot, kind.into(), MenuId(menu), selected, armed),
    }
}

fn plan(path: &Path, kind: MenuKind, id: MenuId, selected: u64, armed: bool) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot: ServerSnapshot = serde_json::from_str(&raw).context("parsing snapshot")?;

    let entry = menu::find(kind, id).ok_or(ActionError::UnknownMenu { kind, id })?;
    info!(menu = %id, text = entry.text, clients = snapshot.clients.len(), "planning");

    let host = SnapshotHost::new(snapshot);
    let cfg = PluginConfig { start_armed: armed, ..PluginConfig::default() };
    let mut dispatcher = Dispatcher::new(&cfg);
    let ev = MenuEvent { connection: ConnectionId(1), kind, menu: id, selected };

    match dispatcher.handle(&host, &ev) {
        Ok(Outcome::Executed(_)) => {
            for request in host.issued() {
                println!("{}", serde_json::to_string(&request)?);
            }
            Ok(())
        }
        Ok(outcome) => {
            info!(?outcome, "nothing to send");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
