use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ActionError, ActionResult};

/// Host limit on kick reasons, in characters.
pub const MAX_REASON_CHARS: usize = 80;
/// Host menu buffers are 128 bytes including the terminator.
pub const MENU_BUFSZ: usize = 128;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,

    /// Reason attached to every kick. Empty by default.
    pub kick_reason: String,

    /// Icon for the plugin submenu, relative to the plugin's resource folder.
    pub menu_icon: Option<String>,

    /// Enable the destructive entries without going through "activate".
    pub start_armed: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            kick_reason: String::new(),
            menu_icon: None,
            start_armed: false,
        }
    }
}

impl PluginConfig {
    pub const FILE_NAME: &'static str = "mass_actions.json";

    pub fn from_json(raw: &str) -> ActionResult<Self> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| ActionError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> ActionResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ActionError::Config(format!("{}: {e}", path.display()))),
        }
    }

    pub fn validate(&self) -> ActionResult<()> {
        if self.kick_reason.chars().count() > MAX_REASON_CHARS {
            return Err(ActionError::InvalidArgument("kick_reason too long"));
        }
        if self.menu_icon.as_ref().is_some_and(|icon| icon.len() >= MENU_BUFSZ) {
            return Err(ActionError::InvalidArgument("menu_icon too long"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PluginConfig::from_json("{}").unwrap(), PluginConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = PluginConfig::from_json(r#"{"kick_reason":"cleanup","start_armed":true}"#).unwrap();
        assert_eq!(cfg.kick_reason, "cleanup");
        assert!(cfg.start_armed);
        assert_eq!(cfg.log_filter, "info");
        assert_eq!(cfg.menu_icon, None);
    }

    #[test]
    fn rejects_long_reason() {
        let raw = format!(r#"{{"kick_reason":"{}"}}"#, "x".repeat(MAX_REASON_CHARS + 1));
        assert_eq!(
            PluginConfig::from_json(&raw),
            Err(ActionError::InvalidArgument("kick_reason too long"))
        );
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(PluginConfig::from_json("{"), Err(ActionError::Config(_))));
    }

    #[test]
    fn missing_file_is_none() {
        let path = std::env::temp_dir().join("ma-actions-missing").join(PluginConfig::FILE_NAME);
        assert_eq!(PluginConfig::load(&path), Ok(None));
    }
}
