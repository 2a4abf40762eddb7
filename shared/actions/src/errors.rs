use thiserror::Error;

pub type ActionResult<T> = Result<T, ActionError>;

/// Host error codes the plugin names explicitly.
pub const ERROR_OK: u32 = 0x0000;
pub const ERROR_NOT_IMPLEMENTED: u32 = 0x0002;
pub const ERROR_CLIENT_INVALID_ID: u32 = 0x0200;
pub const ERROR_CHANNEL_INVALID_ID: u32 = 0x0300;
pub const ERROR_PERMISSIONS: u32 = 0x0a08;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("host call {call} failed with code {code:#06x}")]
    Host { call: &'static str, code: u32 },

    #[error("not armed: {0}")]
    NotArmed(&'static str),

    #[error("unknown menu item {kind:?}/{id}")]
    UnknownMenu { kind: crate::menu::MenuKind, id: crate::ids::MenuId },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("config: {0}")]
    Config(String),
}

impl ActionError {
    /// Map a host return code to `Ok(())` or a `Host` error.
    pub fn check(call: &'static str, code: u32) -> ActionResult<()> {
        if code == ERROR_OK {
            Ok(())
        } else {
            Err(ActionError::Host { call, code })
        }
    }
}
