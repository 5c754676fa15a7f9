use crate::core::manifest::Manifest;
use crate::core::port::{find_vite_config, resolve_dev_port};
use crate::domain::model::{Framework, ProjectProfile};
use std::path::Path;

const VUE_CLI_PORT: u16 = 8080;
const CRA_PORT: u16 = 3000;

pub fn detect_framework(manifest: &Manifest, project_root: &Path) -> Framework {
    let uses_vite = manifest.dependency("vite").is_some()
        || manifest.dev_dependency("vite").is_some()
        || find_vite_config(project_root).is_some();

    if uses_vite {
        Framework::Vite
    } else if manifest.dependency("vue").is_some() {
        Framework::Vue
    } else if manifest.dependency("react").is_some() {
        Framework::React
    } else {
        Framework::Unknown
    }
}

/// Builds the per-framework profile. The Vite config is only consulted for
/// Vite projects.
pub fn build_profile(
    manifest: &Manifest,
    project_root: &Path,
    dev_port_override: Option<u16>,
    build_output_override: Option<&str>,
) -> ProjectProfile {
    let framework = detect_framework(manifest, project_root);

    match framework {
        Framework::Vite => tracing::info!("🔍 Detected Vite project"),
        Framework::Vue => tracing::info!("🔍 Detected Vue CLI project"),
        Framework::React => tracing::info!("🔍 Detected React project"),
        Framework::Unknown => {
            tracing::info!("🔍 No Vite/Vue/React dependency found, using default settings")
        }
    }

    let (detected_port, dev_script, build_output) = match framework {
        Framework::Vite => (
            dev_port_override.unwrap_or_else(|| resolve_dev_port(project_root)),
            "dev",
            "../dist/index.html",
        ),
        Framework::Vue => (VUE_CLI_PORT, "serve", "../dist/index.html"),
        Framework::React | Framework::Unknown => (CRA_PORT, "start", "../build/index.html"),
    };

    ProjectProfile {
        root: project_root.to_path_buf(),
        framework,
        dev_port: dev_port_override.unwrap_or(detected_port),
        dev_script: dev_script.to_string(),
        build_output: build_output_override.unwrap_or(build_output).to_string(),
    }
}
