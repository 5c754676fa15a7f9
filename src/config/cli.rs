use crate::config::toml_config::{TomlConfig, DEFAULT_CONFIG_FILE};
use crate::domain::model::{PackageManager, TemplateKind};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "electron-scaffold")]
#[command(about = "Add an Electron shell to an existing frontend project")]
pub struct CliConfig {
    /// Directory containing package.json
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Settings file, relative to the project root unless absolute
    /// [default: electron-scaffold.toml, used only if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub package_manager: Option<PackageManager>,

    #[arg(long, value_enum)]
    pub template: Option<TemplateKind>,

    /// Write files and scripts without installing packages
    #[arg(long)]
    pub skip_install: bool,

    /// Show what would be done without touching the project
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn config_path(&self) -> PathBuf {
        let file = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if file.is_absolute() {
            file
        } else {
            self.project_root.join(file)
        }
    }

    /// The default settings file is optional; one named with `--config` must exist.
    pub fn load_file_config(&self) -> Result<TomlConfig> {
        match self.config {
            Some(_) => TomlConfig::from_required_file(self.config_path()),
            None => TomlConfig::from_optional_file(self.config_path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ScaffoldError;
    use tempfile::TempDir;

    #[test]
    fn test_zero_arguments() {
        let cli = CliConfig::try_parse_from(["electron-scaffold"]).unwrap();
        assert_eq!(cli.project_root, PathBuf::from("."));
        assert_eq!(cli.config_path(), PathBuf::from("./electron-scaffold.toml"));
        assert!(cli.package_manager.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_flags() {
        let cli = CliConfig::try_parse_from([
            "electron-scaffold",
            "--project-root",
            "/tmp/app",
            "--package-manager",
            "yarn",
            "--template",
            "tray",
            "--skip-install",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.package_manager, Some(PackageManager::Yarn));
        assert_eq!(cli.template, Some(TemplateKind::Tray));
        assert!(cli.skip_install);
        assert!(cli.verbose);
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/app/electron-scaffold.toml"));
    }

    #[test]
    fn test_missing_default_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = CliConfig::try_parse_from(["electron-scaffold", "--project-root", root]).unwrap();
        assert_eq!(cli.load_file_config().unwrap(), TomlConfig::default());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = CliConfig::try_parse_from([
            "electron-scaffold",
            "--project-root",
            root,
            "--config",
            "typo.toml",
        ])
        .unwrap();
        let err = cli.load_file_config().unwrap_err();
        assert!(matches!(err, ScaffoldError::ConfigError { .. }));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("custom.toml"), "package_manager = \"pnpm\"\n").unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = CliConfig::try_parse_from([
            "electron-scaffold",
            "--project-root",
            root,
            "-c",
            "custom.toml",
        ])
        .unwrap();
        let config = cli.load_file_config().unwrap();
        assert_eq!(config.package_manager, Some(PackageManager::Pnpm));
    }
}
