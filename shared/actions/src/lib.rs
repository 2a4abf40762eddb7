pub mod actions;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod host;
pub mod ids;
pub mod menu;
pub mod metrics;
pub mod session;
pub mod snapshot;

pub use actions::{BulkAction, Filter, RequestKind, SelfPolicy, Source};
pub use config::PluginConfig;
pub use dispatch::{ActionReport, Dispatcher, MenuEvent, Outcome};
pub use errors::{ActionError, ActionResult};
pub use host::{Host, HostRequest};
pub use ids::{ChannelId, ClientId, ConnectionId, MenuId};
pub use menu::{Command, MenuEntry, MenuKind, MENU};
pub use metrics::ActionMetrics;
pub use session::Session;
pub use snapshot::{ClientEntry, ServerSnapshot, SnapshotHost};
