//! Configuration management for yang-render
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (yang.toml)
//! - Environment variables (YANG__*)
//!
//! ## Example config file (yang.toml):
//! ```toml
//! [render]
//! xml_declaration = false
//! trailing_newline = true
//!
//! [model]
//! namespace = "http://openconfig.net/yang/interfaces"
//! interfaces = ["xe-0/0/0", "xe-0/0/1"]
//! operation = "merge"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::models::OPENCONFIG_INTERFACES_NS;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YangConfig {
    /// Output settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Bundled model settings
    #[serde(default)]
    pub model: ModelConfig,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Prefix the document with an XML declaration
    #[serde(default)]
    pub xml_declaration: bool,

    /// End the document with a newline
    #[serde(default = "default_true")]
    pub trailing_newline: bool,

    /// Write to this file instead of stdout
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Settings for the bundled interfaces model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Namespace rendered on the module's children
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Interface names to add as list entries
    #[serde(default = "default_interfaces")]
    pub interfaces: Vec<String>,

    /// NETCONF `operation` attribute rendered on every interface entry
    #[serde(default)]
    pub operation: Option<String>,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_namespace() -> String {
    OPENCONFIG_INTERFACES_NS.to_string()
}

fn default_interfaces() -> Vec<String> {
    vec!["xe-0/0/0".to_string()]
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            xml_declaration: false,
            trailing_newline: true,
            output: None,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            interfaces: default_interfaces(),
            operation: None,
        }
    }
}

impl RenderConfig {
    /// Wrap a rendered document according to these settings
    pub fn finish(&self, xml: &str) -> String {
        let mut document = String::new();
        if self.xml_declaration {
            document.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            if self.trailing_newline {
                document.push('\n');
            }
        }
        document.push_str(xml);
        if self.trailing_newline {
            document.push('\n');
        }
        document
    }
}

impl YangConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["yang.toml", ".yang.toml", "config/yang.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "yang-nodes", "yang-render") {
            let xdg_config = config_dir.config_dir().join("yang.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (YANG__*)
        builder = builder.add_source(
            Environment::with_prefix("YANG")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = YangConfig::default();
        assert!(config.render.trailing_newline);
        assert!(!config.render.xml_declaration);
        assert_eq!(config.model.namespace, OPENCONFIG_INTERFACES_NS);
        assert_eq!(config.model.interfaces, vec!["xe-0/0/0"]);
    }

    #[test]
    fn test_serialize_config() {
        let config = YangConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[render]"));
        assert!(toml_str.contains("[model]"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let path = path.to_str().unwrap();

        let mut config = YangConfig::default();
        config.model.interfaces = vec!["et-0/0/0".to_string(), "et-0/0/1".to_string()];
        config.model.operation = Some("replace".to_string());
        config.save(path).unwrap();

        let loaded = YangConfig::load_from(Some(path)).unwrap();
        assert_eq!(loaded.model.interfaces, config.model.interfaces);
        assert_eq!(loaded.model.operation.as_deref(), Some("replace"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[render]\nxml_declaration = true\n").unwrap();

        let loaded = YangConfig::load_from(path.to_str()).unwrap();
        assert!(loaded.render.xml_declaration);
        assert!(loaded.render.trailing_newline);
        assert_eq!(loaded.model.namespace, OPENCONFIG_INTERFACES_NS);
    }

    #[test]
    fn test_finish() {
        let render = RenderConfig {
            xml_declaration: true,
            trailing_newline: false,
            output: None,
        };
        assert_eq!(render.finish("<a></a>"), r#"<?xml version="1.0" encoding="UTF-8"?><a></a>"#);
        assert_eq!(RenderConfig::default().finish("<a></a>"), "<a></a>\n");
    }
}
