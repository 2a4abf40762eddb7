use tracing::{debug, info, warn};

use crate::{
    config::PluginConfig,
    errors::{ActionError, ActionResult},
    host::{Host, HostRequest},
    ids::{ConnectionId, MenuId},
    menu::{self, Command, MenuKind},
    metrics::ActionMetrics,
    session::Session,
};

/// One menu selection as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEvent {
    pub connection: ConnectionId,
    pub kind: MenuKind,
    pub menu: MenuId,
    /// Channel id for channel menus, client id for client menus, zero otherwise.
    pub selected: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Requests submitted to the host.
    pub issued: usize,
    /// Submitted requests the host rejected.
    pub failed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Armed(bool),
    Executed(ActionReport),
}

pub struct Dispatcher {
    session: Session,
    reason: String,
    metrics: ActionMetrics,
}

impl Dispatcher {
    pub fn new(cfg: &PluginConfig) -> Self {
        Self {
            session: Session::new(cfg.start_armed),
            reason: cfg.kick_reason.clone(),
            metrics: ActionMetrics::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Publish the initial menu enablement.
    pub fn init_menus<H: Host + ?Sized>(&self, host: &H) -> ActionResult<()> {
        self.session.publish(host)
    }

    pub fn handle<H: Host + ?Sized>(&mut self, host: &H, ev: &MenuEvent) -> ActionResult<Outcome> {
        let Some(entry) = menu::find(ev.kind, ev.menu) else {
            debug!(kind = ev.kind.as_str(), menu = %ev.menu, "unhandled menu event");
            return Ok(Outcome::Ignored);
        };

        match entry.command {
            Command::Label => Ok(Outcome::Ignored),
            Command::Arm | Command::Disarm => {
                let armed = entry.command == Command::Arm;
                let next = Session::new(armed);
                next.publish(host)?;
                self.session = next;
                info!(armed, "destructive actions toggled for this session");
                Ok(Outcome::Armed(armed))
            }
            Command::Bulk(action) => {
                if action.is_destructive() && !self.session.is_armed() {
                    warn!(menu = %ev.menu, "refusing destructive action while not armed");
                    self.metrics.action_refused("not_armed");
                    return Err(ActionError::NotArmed(entry.text));
                }
                let requests = action.plan(host, ev.connection, ev.selected)?;
                debug!(menu = %ev.menu, text = entry.text, targets = requests.len(), "running bulk action");
                Ok(Outcome::Executed(self.execute(host, ev.connection, &requests)))
            }
        }
    }

    /// Submit every request in order. A rejected request is logged and counted
    /// but does not stop the rest.
    pub fn execute<H: Host + ?Sized>(
        &self,
        host: &H,
        conn: ConnectionId,
        requests: &[HostRequest],
    ) -> ActionReport {
        let mut report = ActionReport::default();
        for request in requests {
            report.issued += 1;
            self.metrics.request_issued(request.as_str());
            if let Err(e) = host.submit(conn, request, &self.reason) {
                report.failed += 1;
                self.metrics.request_failed(request.as_str());
                warn!(conn = %conn, ?request, error = %e, "host rejected request");
            }
        }
        report
    }
}
