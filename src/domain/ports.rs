use crate::domain::model::{DependencyKind, PackageManager, TemplateKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn project_root(&self) -> &Path;
    fn package_manager(&self) -> PackageManager;
    fn template(&self) -> TemplateKind;
    fn window_size(&self) -> (u32, u32);
    /// Forces the dev-server port instead of detecting it.
    fn dev_port_override(&self) -> Option<u16>;
    /// Forces the build output path instead of the framework default.
    fn build_output_override(&self) -> Option<&str>;
    fn extra_dev_dependencies(&self) -> &[String];
    fn skip_install(&self) -> bool;
    fn dry_run(&self) -> bool;
}

#[async_trait]
pub trait PackageInstaller: Send + Sync {
    async fn install(&self, root: &Path, packages: &[String], kind: DependencyKind) -> Result<()>;
}
