use crate::domain::model::{PackageManager, TemplateKind};
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::{validate_package_name, validate_path, validate_range, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "electron-scaffold.toml";

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Optional per-project settings file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub package_manager: Option<PackageManager>,
    pub template: Option<TemplateKind>,
    pub install_timeout_secs: Option<u64>,
    #[serde(default)]
    pub extra_dev_dependencies: Vec<String>,
    pub window: Option<WindowConfig>,
    pub dev_server: Option<DevServerConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevServerConfig {
    pub port: Option<u16>,
    pub build_output: Option<String>,
}

impl TomlConfig {
    /// Loads and parses a TOML settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScaffoldError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads a file the user named explicitly. A missing file is an error.
    pub fn from_required_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ScaffoldError::ConfigError {
                message: format!("config file {} does not exist", path.display()),
            });
        }
        tracing::info!("📁 Loading configuration from {}", path.display());
        Self::from_file(path)
    }

    /// Loads `path` if it exists, otherwise returns the empty config.
    pub fn from_optional_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            tracing::info!("📁 Loading configuration from {}", path.as_ref().display());
            Self::from_file(path)
        } else {
            tracing::debug!("no config file at {}", path.as_ref().display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScaffoldError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn dev_port(&self) -> Option<u16> {
        self.dev_server.as_ref().and_then(|d| d.port)
    }

    pub fn build_output(&self) -> Option<&str> {
        self.dev_server.as_ref().and_then(|d| d.build_output.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(port) = self.dev_port() {
            validate_range("dev_server.port", port, 1, u16::MAX)?;
        }

        if let Some(output) = self.build_output() {
            validate_path("dev_server.build_output", output)?;
        }

        if let Some(window) = &self.window {
            validate_range("window.width", window.width, 200, 10_000)?;
            validate_range("window.height", window.height, 200, 10_000)?;
        }

        if let Some(timeout) = self.install_timeout_secs {
            validate_range("install_timeout_secs", timeout, 1, 24 * 60 * 60)?;
        }

        for package in &self.extra_dev_dependencies {
            validate_package_name("extra_dev_dependencies", package)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
package_manager = "pnpm"
template = "tray"
install_timeout_secs = 300
extra_dev_dependencies = ["electron-builder"]

[window]
width = 1280
height = 800

[dev_server]
port = 5174
build_output = "../out/index.html"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.package_manager, Some(PackageManager::Pnpm));
        assert_eq!(config.template, Some(TemplateKind::Tray));
        assert_eq!(config.dev_port(), Some(5174));
        assert_eq!(config.build_output(), Some("../out/index.html"));
        assert_eq!(config.window, Some(WindowConfig { width: 1280, height: 800 }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SCAFFOLD_TEST_OUTPUT", "../web/index.html");

        let toml_content = r#"
[dev_server]
build_output = "${SCAFFOLD_TEST_OUTPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.build_output(), Some("../web/index.html"));

        std::env::remove_var("SCAFFOLD_TEST_OUTPUT");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[dev_server]\nport = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[window]\nwidth = 10\nheight = 600\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(r#"extra_dev_dependencies = ["--global"]"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_and_values_are_rejected() {
        assert!(TomlConfig::from_toml_str("packagemanager = \"npm\"").is_err());
        assert!(TomlConfig::from_toml_str("package_manager = \"bun\"").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"template = \"basic\"\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.template, Some(TemplateKind::Basic));
    }

    #[test]
    fn test_missing_required_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = TomlConfig::from_required_file(dir.path().join("typo.toml")).unwrap_err();
        assert!(matches!(err, ScaffoldError::ConfigError { .. }));
        assert!(err.to_string().contains("typo.toml"));
    }

    #[test]
    fn test_missing_optional_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = TomlConfig::from_optional_file(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, TomlConfig::default());
    }
}
