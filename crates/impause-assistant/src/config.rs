//! Assistant configuration with sensible defaults.
//!
//! [`AssistantConfig`] holds the settings that do not come from a
//! conversation: the names the instructions use, and an optional capability
//! allow-list. Build it in code with the `with_*` methods, or load it from a
//! JSON file with [`AssistantConfig::load`]. Missing fields take their
//! defaults.
//!
//! ```
//! use impause_assistant::AssistantConfig;
//!
//! let config = AssistantConfig::default()
//!     .with_assistant_name("Penny")
//!     .with_allowed_capabilities(["get_accounts"]);
//! assert_eq!(config.product_name, "Impause");
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

/// Default name the assistant introduces itself with.
pub const DEFAULT_ASSISTANT_NAME: &str = "Impause";

/// Default product name used when describing the app to the agent.
pub const DEFAULT_PRODUCT_NAME: &str = "Impause";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Name the agent introduces itself with. Default: `"Impause"`.
    pub assistant_name: String,
    /// Name of the app the agent is embedded in. Default: `"Impause"`.
    pub product_name: String,
    /// When set, only these capabilities (in default-registry order) are
    /// offered. `None` offers the full default set.
    pub allowed_capabilities: Option<Vec<String>>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            allowed_capabilities: None,
        }
    }
}

impl AssistantConfig {
    pub fn with_assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant_name = name.into();
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Restrict the offered capabilities to `names`.
    pub fn with_allowed_capabilities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_capabilities = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let load_err = |reason: String| ConfigError::ConfigLoad {
            path: path.display().to_string(),
            reason,
        };

        let data = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let config: Self = serde_json::from_str(&data).map_err(|e| load_err(e.to_string()))?;
        debug!("Loaded assistant config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_name_the_coach() {
        let config = AssistantConfig::default();
        assert_eq!(config.assistant_name, "Impause");
        assert_eq!(config.product_name, "Impause");
        assert!(config.allowed_capabilities.is_none());
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "product_name": "Ledgerly" }}"#).unwrap();

        let config = AssistantConfig::load(file.path()).unwrap();
        assert_eq!(config.product_name, "Ledgerly");
        assert_eq!(config.assistant_name, "Impause");
    }

    #[test]
    fn load_reports_path_on_parse_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = AssistantConfig::load(file.path()).unwrap_err();
        match err {
            ConfigError::ConfigLoad { path, .. } => {
                assert_eq!(path, file.path().display().to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssistantConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigLoad { .. }));
    }
}
