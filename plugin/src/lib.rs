//! Bulk move/kick/talk-power actions for the voice client, loaded by the host
//! as a shared library.

pub mod alloc;
pub mod exports;
pub mod ffi;
pub mod host;
pub mod logging;
pub mod menus;
pub mod state;

pub use exports::*;
pub use ffi::abi::{PluginMenuItem, Ts3Functions};
