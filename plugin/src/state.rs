use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::path::PathBuf;

use anyhow::{bail, Result};
use ma_actions::{Dispatcher, MenuEvent, Outcome, PluginConfig, Session, MENU};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    alloc::HostAllocations,
    ffi::{
        abi::{Ts3Functions, PATH_BUFSIZE},
        safety::buf_to_string,
    },
    host::Ts3Host,
    logging,
    menus::{self, MenuHandoff},
};

/// Everything the plugin keeps between host callbacks.
///
/// The lock around it is never held while calling into the host: callers copy
/// a [`HostContext`] out, release the lock and only then call.
#[derive(Default)]
pub struct PluginState {
    funcs: Ts3Functions,
    plugin_id: Option<CString>,
    dispatcher: Option<Dispatcher>,
    config: PluginConfig,
    allocations: HostAllocations,
    /// Bumped on every init and shutdown so a dispatcher lent out across a
    /// host call is not put back into a later lifecycle.
    generation: u64,
}

pub static STATE: Lazy<Mutex<PluginState>> = Lazy::new(|| Mutex::new(PluginState::default()));

/// What a host call needs, copied out of [`STATE`].
pub struct HostContext {
    funcs: Ts3Functions,
    plugin_id: Option<CString>,
}

impl HostContext {
    pub fn host(&self) -> Ts3Host<'_> {
        Ts3Host::new(&self.funcs, self.plugin_id.as_deref())
    }

    fn config_dir(&self) -> Option<PathBuf> {
        let f = self.funcs.get_config_path?;
        let mut buf = [0 as c_char; PATH_BUFSIZE];
        unsafe { f(buf.as_mut_ptr(), PATH_BUFSIZE) };
        non_empty(&buf)
    }

    fn plugin_dir(&self) -> Option<PathBuf> {
        let f = self.funcs.get_plugin_path?;
        let id = self.plugin_id.as_deref()?;
        let mut buf = [0 as c_char; PATH_BUFSIZE];
        unsafe { f(buf.as_mut_ptr(), PATH_BUFSIZE, id.as_ptr()) };
        non_empty(&buf)
    }
}

fn non_empty(buf: &[c_char]) -> Option<PathBuf> {
    let path = buf_to_string(buf);
    (!path.is_empty()).then(|| PathBuf::from(path))
}

impl PluginState {
    pub fn set_functions(&mut self, funcs: Ts3Functions) {
        self.funcs = funcs;
    }

    pub fn plugin_id(&self) -> Option<&CStr> {
        self.plugin_id.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.dispatcher.is_some()
    }

    pub fn live_allocations(&self) -> usize {
        self.allocations.live()
    }

    pub fn host_context(&self) -> HostContext {
        HostContext { funcs: self.funcs, plugin_id: self.plugin_id.clone() }
    }

    pub fn shutdown(&mut self) {
        self.generation += 1;
        self.dispatcher = None;
        self.plugin_id = None;
        self.config = PluginConfig::default();
        let leftover = self.allocations.release_all();
        if leftover > 0 {
            warn!(leftover, "host did not release all menu memory");
        }
        info!("shutdown");
    }

    pub fn free(&mut self, ptr: *mut c_void) {
        if !ptr.is_null() && !self.allocations.release(ptr) {
            warn!(?ptr, "host released memory the plugin does not own");
        }
    }
}

/// Load the config through the host and install a fresh dispatcher.
pub fn init() -> Result<()> {
    let ctx = {
        let state = STATE.lock();
        if state.funcs.free_memory.is_none() {
            bail!("host function table not set");
        }
        state.host_context()
    };

    let config_dir = ctx.config_dir();
    let (cfg, cfg_err) = match config_dir.as_ref() {
        Some(dir) => match PluginConfig::load(&dir.join("plugins").join(PluginConfig::FILE_NAME)) {
            Ok(found) => (found.unwrap_or_default(), None),
            Err(e) => (PluginConfig::default(), Some(e)),
        },
        None => (PluginConfig::default(), None),
    };

    logging::init(&cfg.log_filter);
    if let Some(e) = cfg_err {
        warn!(error = %e, "ignoring plugin config, using defaults");
    }
    info!(config_path = ?config_dir, armed = cfg.start_armed, "init");

    let mut state = STATE.lock();
    state.generation += 1;
    state.dispatcher = Some(Dispatcher::new(&cfg));
    state.config = cfg;
    Ok(())
}

/// The host registers the id after `init`, so the plugin path is resolved here.
pub fn register_plugin_id(id: CString) {
    let ctx = {
        let mut state = STATE.lock();
        state.plugin_id = Some(id);
        state.host_context()
    };
    let id = ctx.plugin_id.as_deref().map(CStr::to_string_lossy).unwrap_or_default();
    info!(%id, plugin_path = ?ctx.plugin_dir(), "registered plugin id");
}

pub fn init_menus() -> Result<MenuHandoff> {
    let (handoff, session, ctx) = {
        let mut state = STATE.lock();
        let icon = state.config.menu_icon.clone();
        let handoff = menus::build(&mut state.allocations, MENU, icon.as_deref())?;
        let session = state.dispatcher.as_ref().map(|d| *d.session());
        (handoff, session, state.host_context())
    };
    debug!(items = MENU.len(), "menus handed to host");

    match session {
        Some(session) => publish_initial(&ctx, session),
        None => warn!("menus requested before init"),
    }
    Ok(handoff)
}

fn publish_initial(ctx: &HostContext, session: Session) {
    if let Err(e) = session.publish(&ctx.host()) {
        warn!(error = %e, "could not set initial menu state");
    }
}

/// Run one menu selection. The dispatcher is taken out of [`STATE`] for the
/// duration of the host calls and put back afterwards.
pub fn on_menu_event(ev: MenuEvent) {
    let (mut dispatcher, ctx, generation) = {
        let mut state = STATE.lock();
        let Some(dispatcher) = state.dispatcher.take() else {
            warn!(menu = %ev.menu, "menu event before init or while another is running");
            return;
        };
        (dispatcher, state.host_context(), state.generation)
    };

    let result = dispatcher.handle(&ctx.host(), &ev);

    {
        let mut state = STATE.lock();
        if state.generation == generation && state.dispatcher.is_none() {
            state.dispatcher = Some(dispatcher);
        }
    }

    match result {
        Ok(Outcome::Executed(report)) => {
            info!(menu = %ev.menu, issued = report.issued, failed = report.failed, "bulk action done")
        }
        Ok(outcome) => debug!(menu = %ev.menu, ?outcome, "menu event handled"),
        Err(e) => warn!(menu = %ev.menu, error = %e, "menu action failed"),
    }
}
