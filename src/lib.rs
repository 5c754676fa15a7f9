pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::Settings;
pub use crate::core::{installer::CommandInstaller, port::resolve_dev_port, scaffold::Scaffolder};
pub use utils::error::{Result, ScaffoldError};
