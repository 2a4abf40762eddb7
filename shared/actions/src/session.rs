use crate::{errors::ActionResult, host::Host, ids::MenuId};

/// "Activated for this session" state gating the destructive menu entries.
///
/// Exactly one of the activate/deactivate pair is enabled at any time, and the
/// delete entries follow the deactivate entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    armed: bool,
}

impl Session {
    pub const GUARDED: [MenuId; 3] = [MenuId::DEACTIVATE, MenuId::DELETE_ALL_CHANNELS, MenuId::DELETE_EMPTY_CHANNELS];

    pub fn new(armed: bool) -> Self {
        Self { armed }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Full enablement state for every menu entry the session controls.
    pub fn enablement(&self) -> [(MenuId, bool); 4] {
        let [deactivate, delete_all, delete_empty] = Self::GUARDED;
        [
            (deactivate, self.armed),
            (delete_all, self.armed),
            (delete_empty, self.armed),
            (MenuId::ACTIVATE, !self.armed),
        ]
    }

    /// Push the current state to the host. The host applies it the next time a
    /// menu is shown.
    pub fn publish<H: Host + ?Sized>(&self, host: &H) -> ActionResult<()> {
        for (menu, enabled) in self.enablement() {
            host.set_menu_enabled(menu, enabled)?;
        }
        Ok(())
    }
}
