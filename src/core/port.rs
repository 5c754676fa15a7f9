//! Dev-server port discovery.
//!
//! The Vite config is scraped with two regexes rather than evaluated: it may be
//! TypeScript or an ES module, neither of which this tool can run. The scrape
//! has no lexical awareness, so a declaration inside a comment or string still
//! counts, and a `server` object spread over several lines is not recognized.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Vite's documented dev-server port.
pub const DEFAULT_DEV_PORT: u16 = 5173;

/// Recognized config file names, highest priority first.
pub const VITE_CONFIG_FILES: [&str; 3] = ["vite.config.js", "vite.config.mjs", "vite.config.ts"];

// `server: { port: 8080 }`. Port digits are ASCII only; `\d` would also
// accept other Unicode decimal digits.
static OBJECT_LITERAL_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"server\s*:\s*\{\s*port\s*:\s*([0-9]+)\s*\}").unwrap());

// `server.port = 8080`
static DOTTED_ASSIGNMENT_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"server\.port\s*=\s*([0-9]+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSource {
    NoConfig,
    Unreadable,
    NoMatch,
    ObjectLiteral,
    DottedAssignment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortResolution {
    pub port: u16,
    pub source: PortSource,
    pub config_path: Option<PathBuf>,
}

impl PortResolution {
    fn default_port(source: PortSource, config_path: Option<PathBuf>) -> Self {
        Self {
            port: DEFAULT_DEV_PORT,
            source,
            config_path,
        }
    }
}

/// Returns the first recognized Vite config file present under `project_root`.
pub fn find_vite_config(project_root: &Path) -> Option<PathBuf> {
    VITE_CONFIG_FILES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.exists())
}

/// Port the frontend dev server is expected to listen on. Never fails.
pub fn resolve_dev_port(project_root: &Path) -> u16 {
    resolve_dev_port_detailed(project_root).port
}

pub fn resolve_dev_port_detailed(project_root: &Path) -> PortResolution {
    let Some(config_path) = find_vite_config(project_root) else {
        tracing::info!(
            "🔍 No Vite config found, using default port {}",
            DEFAULT_DEV_PORT
        );
        return PortResolution::default_port(PortSource::NoConfig, None);
    };

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                "⚠️ Failed to read {}: {}, using default port {}",
                config_path.display(),
                e,
                DEFAULT_DEV_PORT
            );
            return PortResolution::default_port(PortSource::Unreadable, Some(config_path));
        }
    };

    match scan_port(&content) {
        Some((port, source)) => {
            tracing::info!(
                "🔍 Found dev-server port {} in {}",
                port,
                config_path.display()
            );
            PortResolution {
                port,
                source,
                config_path: Some(config_path),
            }
        }
        None => {
            tracing::info!(
                "🔍 {} does not declare a port, using default port {}",
                config_path.display(),
                DEFAULT_DEV_PORT
            );
            PortResolution::default_port(PortSource::NoMatch, Some(config_path))
        }
    }
}

/// Scans config text for a port declaration. The object-literal form is tried
/// before the dotted assignment; only the first hit of the winning pattern counts.
pub fn scan_port(content: &str) -> Option<(u16, PortSource)> {
    let (digits, source) = if let Some(caps) = OBJECT_LITERAL_PORT.captures(content) {
        (caps.get(1)?.as_str(), PortSource::ObjectLiteral)
    } else if let Some(caps) = DOTTED_ASSIGNMENT_PORT.captures(content) {
        (caps.get(1)?.as_str(), PortSource::DottedAssignment)
    } else {
        return None;
    };

    match digits.parse::<u16>() {
        Ok(port) if port > 0 => Some((port, source)),
        _ => {
            tracing::warn!("⚠️ Ignoring out-of-range port '{}' in Vite config", digits);
            None
        }
    }
}
