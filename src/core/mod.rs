pub mod detect;
pub mod installer;
pub mod manifest;
pub mod port;
pub mod scaffold;
pub mod templates;

pub use crate::domain::model::{Framework, PackageManager, ProjectProfile, ScaffoldReport, TemplateKind};
pub use crate::domain::ports::{ConfigProvider, PackageInstaller};
pub use crate::utils::error::Result;
