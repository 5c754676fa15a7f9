use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Frontend stack detected from the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Vite,
    Vue,
    React,
    Unknown,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Framework::Vite => "Vite",
            Framework::Vue => "Vue",
            Framework::React => "React",
            Framework::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Command line that runs a manifest script, e.g. `npm run dev`.
    ///
    /// `start` is special-cased for npm since `npm start` is the usual spelling.
    pub fn run_script(&self, script: &str) -> String {
        match (self, script) {
            (PackageManager::Npm, "start") => "npm start".to_string(),
            (PackageManager::Npm, _) => format!("npm run {}", script),
            (pm, _) => format!("{} {}", pm.program(), script),
        }
    }
}

/// Whether a package is needed at runtime or only for development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Runtime,
    Dev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// A single application window.
    #[default]
    Basic,
    /// Splash window, tray menu, F5 reload and auto-update wiring.
    Tray,
}

/// Everything the generation steps need to know about the target project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectProfile {
    pub root: PathBuf,
    pub framework: Framework,
    pub dev_port: u16,
    /// Manifest script that starts the frontend dev server.
    pub dev_script: String,
    /// Built `index.html`, relative to the generated `electron/` directory.
    pub build_output: String,
}

impl ProjectProfile {
    pub fn dev_url(&self) -> String {
        format!("http://localhost:{}", self.dev_port)
    }
}

/// Outcome of a run. For a dry run the lists hold what would have been done.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub profile: ProjectProfile,
    pub files_written: Vec<PathBuf>,
    pub scripts_added: Vec<String>,
    pub packages_installed: Vec<String>,
    pub dry_run: bool,
}
