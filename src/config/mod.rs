#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::ConfigProvider;
use crate::domain::model::{PackageManager, TemplateKind};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1024, 768);
pub const DEFAULT_INSTALL_TIMEOUT_SECS: u64 = 600;

/// Effective settings: command line flags over the settings file over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_root: PathBuf,
    pub package_manager: PackageManager,
    pub template: TemplateKind,
    pub window_size: (u32, u32),
    pub dev_port: Option<u16>,
    pub build_output: Option<String>,
    pub extra_dev_dependencies: Vec<String>,
    pub install_timeout_secs: u64,
    pub skip_install: bool,
    pub dry_run: bool,
}

impl Settings {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::from_file(project_root, TomlConfig::default())
    }

    pub fn from_file(project_root: impl Into<PathBuf>, file: TomlConfig) -> Self {
        let dev_port = file.dev_port();
        let build_output = file.build_output().map(str::to_string);
        Self {
            project_root: project_root.into(),
            package_manager: file.package_manager.unwrap_or_default(),
            template: file.template.unwrap_or_default(),
            window_size: file
                .window
                .map(|w| (w.width, w.height))
                .unwrap_or(DEFAULT_WINDOW_SIZE),
            dev_port,
            build_output,
            extra_dev_dependencies: file.extra_dev_dependencies,
            install_timeout_secs: file.install_timeout_secs.unwrap_or(DEFAULT_INSTALL_TIMEOUT_SECS),
            skip_install: false,
            dry_run: false,
        }
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig, file: TomlConfig) -> Self {
        let mut settings = Self::from_file(cli.project_root.clone(), file);
        if let Some(pm) = cli.package_manager {
            settings.package_manager = pm;
        }
        if let Some(template) = cli.template {
            settings.template = template;
        }
        settings.skip_install = cli.skip_install;
        settings.dry_run = cli.dry_run;
        settings
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("project_root", &self.project_root.to_string_lossy())
    }
}

impl ConfigProvider for Settings {
    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    fn template(&self) -> TemplateKind {
        self.template
    }

    fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    fn dev_port_override(&self) -> Option<u16> {
        self.dev_port
    }

    fn build_output_override(&self) -> Option<&str> {
        self.build_output.as_deref()
    }

    fn extra_dev_dependencies(&self) -> &[String] {
        &self.extra_dev_dependencies
    }

    fn skip_install(&self) -> bool {
        self.skip_install
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new(".");
        assert_eq!(settings.package_manager, PackageManager::Npm);
        assert_eq!(settings.template, TemplateKind::Basic);
        assert_eq!(settings.window_size, (1024, 768));
        assert_eq!(settings.dev_port_override(), None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_values_apply() {
        let file = TomlConfig::from_toml_str(
            "package_manager = \"yarn\"\n[window]\nwidth = 800\nheight = 600\n[dev_server]\nport = 9000\n",
        )
        .unwrap();
        let settings = Settings::from_file("/tmp/app", file);
        assert_eq!(settings.package_manager, PackageManager::Yarn);
        assert_eq!(settings.window_size, (800, 600));
        assert_eq!(settings.dev_port_override(), Some(9000));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_file() {
        use clap::Parser;

        let file = TomlConfig::from_toml_str("package_manager = \"yarn\"\ntemplate = \"tray\"").unwrap();
        let cli = CliConfig::try_parse_from([
            "electron-scaffold",
            "--package-manager",
            "pnpm",
            "--dry-run",
        ])
        .unwrap();
        let settings = Settings::from_cli(&cli, file);
        assert_eq!(settings.package_manager, PackageManager::Pnpm);
        assert_eq!(settings.template, TemplateKind::Tray);
        assert!(settings.dry_run);
    }
}
