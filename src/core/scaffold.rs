use crate::core::detect::build_profile;
use crate::core::manifest::{Manifest, MANIFEST_FILE};
use crate::core::templates::{self, GeneratedFile, TemplateParams, ELECTRON_DIR, MAIN_FILE};
use crate::domain::model::{
    DependencyKind, PackageManager, ProjectProfile, ScaffoldReport, TemplateKind,
};
use crate::domain::ports::{ConfigProvider, PackageInstaller};
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::validate_path;

pub const SCRIPT_START: &str = "electron:start";
pub const SCRIPT_DEV: &str = "electron:dev";

/// What a run will do, computed before anything is installed or written.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub profile: ProjectProfile,
    pub runtime_packages: Vec<String>,
    pub dev_packages: Vec<String>,
    pub files: Vec<GeneratedFile>,
    pub scripts: Vec<(String, String)>,
}

pub struct Scaffolder<I: PackageInstaller, C: ConfigProvider> {
    installer: I,
    config: C,
}

impl<I: PackageInstaller, C: ConfigProvider> Scaffolder<I, C> {
    pub fn new(installer: I, config: C) -> Self {
        Self { installer, config }
    }

    /// Fails unless the project root holds a manifest.
    pub fn check_project_root(&self) -> Result<Manifest> {
        let manifest_path = self.config.project_root().join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(ScaffoldError::ProjectRootError {
                message: format!("{} not found", manifest_path.display()),
            });
        }
        tracing::info!("✅ Found {}", manifest_path.display());
        Manifest::load(&manifest_path)
    }

    pub fn plan(&self, manifest: &Manifest) -> Result<ScaffoldPlan> {
        let profile = build_profile(
            manifest,
            self.config.project_root(),
            self.config.dev_port_override(),
            self.config.build_output_override(),
        );
        validate_path("build_output", &profile.build_output)?;

        let template = self.config.template();

        let mut runtime_packages = vec!["electron-is-dev".to_string()];
        if template == TemplateKind::Tray {
            runtime_packages.push("electron-updater".to_string());
        }

        let mut dev_packages = vec![
            "electron".to_string(),
            "concurrently".to_string(),
            "wait-on".to_string(),
        ];
        dev_packages.extend(self.config.extra_dev_dependencies().iter().cloned());

        let params = TemplateParams::from_profile(&profile, self.config.window_size());
        let files = templates::plan_files(template, &params);
        let scripts = launch_scripts(&profile, self.config.package_manager());

        Ok(ScaffoldPlan {
            profile,
            runtime_packages,
            dev_packages,
            files,
            scripts,
        })
    }

    /// Runs every step in order, stopping at the first failure.
    pub async fn run(&self) -> Result<ScaffoldReport> {
        tracing::info!("🚀 Setting up Electron...");

        let manifest = self.check_project_root()?;
        let plan = self.plan(&manifest)?;
        tracing::info!(
            "Framework: {}, dev server: {}, build output: {}",
            plan.profile.framework,
            plan.profile.dev_url(),
            plan.profile.build_output
        );

        if self.config.dry_run() {
            tracing::info!("🔍 Dry run, nothing will be installed or written");
            let root = self.config.project_root();
            return Ok(ScaffoldReport {
                files_written: plan.files.iter().map(|f| root.join(&f.relative_path)).collect(),
                scripts_added: plan.scripts.iter().map(|(name, _)| name.clone()).collect(),
                packages_installed: plan
                    .dev_packages
                    .iter()
                    .chain(plan.runtime_packages.iter())
                    .cloned()
                    .collect(),
                profile: plan.profile,
                dry_run: true,
            });
        }

        let root = self.config.project_root();
        let mut packages_installed = Vec::new();

        if self.config.skip_install() {
            tracing::info!("⏭️ Skipping dependency installation");
        } else {
            tracing::info!("📦 Installing Electron and dependencies...");
            self.installer
                .install(root, &plan.dev_packages, DependencyKind::Dev)
                .await?;
            self.installer
                .install(root, &plan.runtime_packages, DependencyKind::Runtime)
                .await?;
            packages_installed.extend(plan.dev_packages.iter().cloned());
            packages_installed.extend(plan.runtime_packages.iter().cloned());
            tracing::info!("✅ Dependencies installed");
        }

        let files_written = templates::write_files(root, &plan.files)?;
        tracing::info!("✅ Created Electron sources in {}", root.join(ELECTRON_DIR).display());

        // Reload: the package manager has rewritten the manifest by now.
        let mut manifest = Manifest::load(manifest.path())?;
        let scripts_added = plan.scripts.iter().map(|(name, _)| name.clone()).collect();
        manifest.merge_scripts(plan.scripts);
        manifest.save()?;
        tracing::info!("✅ Added launch scripts to {}", MANIFEST_FILE);

        Ok(ScaffoldReport {
            profile: plan.profile,
            files_written,
            scripts_added,
            packages_installed,
            dry_run: false,
        })
    }
}

/// `electron:start` and `electron:dev` entries for the manifest.
pub fn launch_scripts(profile: &ProjectProfile, package_manager: PackageManager) -> Vec<(String, String)> {
    let entry = format!("./{}/{}", ELECTRON_DIR, MAIN_FILE);
    let start = format!("electron {}", entry);
    let dev = format!(
        "concurrently \"{}\" \"wait-on {} && electron {}\"",
        package_manager.run_script(&profile.dev_script),
        profile.dev_url(),
        entry
    );

    vec![
        (SCRIPT_START.to_string(), start),
        (SCRIPT_DEV.to_string(), dev),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Framework;
    use std::path::PathBuf;

    fn profile(port: u16, script: &str) -> ProjectProfile {
        ProjectProfile {
            root: PathBuf::from("."),
            framework: Framework::Vue,
            dev_port: port,
            dev_script: script.to_string(),
            build_output: "../dist/index.html".to_string(),
        }
    }

    struct NoopInstaller;

    #[async_trait::async_trait]
    impl PackageInstaller for NoopInstaller {
        async fn install(&self, _: &std::path::Path, _: &[String], _: DependencyKind) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_plan_rejects_empty_build_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut settings = crate::config::Settings::new(dir.path());
        settings.build_output = Some(String::new());

        let manifest = Manifest::from_json_str(&dir.path().join(MANIFEST_FILE), "{}").unwrap();
        let err = Scaffolder::new(NoopInstaller, settings).plan(&manifest).unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_launch_scripts_npm() {
        let scripts = launch_scripts(&profile(8080, "serve"), PackageManager::Npm);
        assert_eq!(scripts[0], ("electron:start".to_string(), "electron ./electron/main.js".to_string()));
        assert_eq!(
            scripts[1].1,
            "concurrently \"npm run serve\" \"wait-on http://localhost:8080 && electron ./electron/main.js\""
        );
    }

    #[test]
    fn test_launch_scripts_start_and_pnpm() {
        let scripts = launch_scripts(&profile(3000, "start"), PackageManager::Npm);
        assert!(scripts[1].1.starts_with("concurrently \"npm start\""));

        let scripts = launch_scripts(&profile(5173, "dev"), PackageManager::Pnpm);
        assert!(scripts[1].1.starts_with("concurrently \"pnpm dev\" \"wait-on http://localhost:5173"));
    }
}
