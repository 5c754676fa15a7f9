use crate::domain::model::{DependencyKind, PackageManager};
use crate::domain::ports::PackageInstaller;
use crate::utils::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Installs packages by running the package manager with inherited stdio, so
/// its progress output reaches the terminal.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    manager: PackageManager,
    timeout: Duration,
}

impl CommandInstaller {
    pub fn new(manager: PackageManager, timeout_secs: u64) -> Self {
        Self {
            manager,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Package manager arguments, e.g. `install electron --save-dev`.
    pub fn install_args(manager: PackageManager, packages: &[String], kind: DependencyKind) -> Vec<String> {
        let mut args = Vec::with_capacity(packages.len() + 2);
        match manager {
            PackageManager::Npm => {
                args.push("install".to_string());
                args.extend(packages.iter().cloned());
                args.push(match kind {
                    DependencyKind::Dev => "--save-dev".to_string(),
                    DependencyKind::Runtime => "--save".to_string(),
                });
            }
            PackageManager::Pnpm | PackageManager::Yarn => {
                args.push("add".to_string());
                if kind == DependencyKind::Dev {
                    args.push("-D".to_string());
                }
                args.extend(packages.iter().cloned());
            }
        }
        args
    }

    fn executable(&self) -> String {
        // The JS package managers ship as .cmd shims on Windows.
        if cfg!(windows) {
            format!("{}.cmd", self.manager.program())
        } else {
            self.manager.program().to_string()
        }
    }
}

#[async_trait]
impl PackageInstaller for CommandInstaller {
    async fn install(&self, root: &Path, packages: &[String], kind: DependencyKind) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let program = self.executable();
        let args = Self::install_args(self.manager, packages, kind);
        tracing::info!("📦 {} {}", self.manager.program(), args.join(" "));

        let mut cmd = Command::new(&program);
        cmd.current_dir(root)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| ScaffoldError::InstallError {
            message: format!("failed to start `{}`: {}", program, e),
        })?;

        let status = match timeout(self.timeout, child.wait()).await {
            Ok(status) => status.map_err(|e| ScaffoldError::InstallError {
                message: format!("failed waiting for `{}`: {}", program, e),
            })?,
            Err(_) => {
                let _ = child.kill().await;
                return Err(ScaffoldError::InstallError {
                    message: format!(
                        "`{}` did not finish within {}s",
                        program,
                        self.timeout.as_secs()
                    ),
                });
            }
        };

        if status.success() {
            tracing::debug!("{} finished: {}", program, status);
            Ok(())
        } else {
            Err(ScaffoldError::InstallError {
                message: format!("`{} {}` exited with {}", program, args.join(" "), status),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkgs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_npm_args() {
        assert_eq!(
            CommandInstaller::install_args(PackageManager::Npm, &pkgs(&["electron"]), DependencyKind::Dev),
            vec!["install", "electron", "--save-dev"]
        );
        assert_eq!(
            CommandInstaller::install_args(
                PackageManager::Npm,
                &pkgs(&["electron-is-dev"]),
                DependencyKind::Runtime
            ),
            vec!["install", "electron-is-dev", "--save"]
        );
    }

    #[test]
    fn test_pnpm_and_yarn_args() {
        assert_eq!(
            CommandInstaller::install_args(
                PackageManager::Pnpm,
                &pkgs(&["concurrently", "wait-on"]),
                DependencyKind::Dev
            ),
            vec!["add", "-D", "concurrently", "wait-on"]
        );
        assert_eq!(
            CommandInstaller::install_args(PackageManager::Yarn, &pkgs(&["electron-is-dev"]), DependencyKind::Runtime),
            vec!["add", "electron-is-dev"]
        );
    }

    #[tokio::test]
    async fn test_empty_package_list_is_noop() {
        let installer = CommandInstaller::new(PackageManager::Npm, 1);
        let result = installer
            .install(Path::new("/definitely/not/here"), &[], DependencyKind::Dev)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_root_is_install_error() {
        let installer = CommandInstaller::new(PackageManager::Npm, 1);
        let err = installer
            .install(
                Path::new("/definitely/not/here"),
                &pkgs(&["electron"]),
                DependencyKind::Dev,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InstallError { .. }));
    }
}
