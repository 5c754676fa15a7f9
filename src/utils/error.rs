use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Project root check failed: {message}")]
    ProjectRootError { message: String },

    #[error("Manifest error in {path}: {message}")]
    ManifestError { path: String, message: String },

    #[error("Dependency installation failed: {message}")]
    InstallError { message: String },

    #[error("Failed to write {path}: {source}")]
    TemplateWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Environment,
    Manifest,
    Install,
    Filesystem,
    Configuration,
}

impl ScaffoldError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScaffoldError::ProjectRootError { .. } => ErrorCategory::Environment,
            ScaffoldError::ManifestError { .. } | ScaffoldError::SerializationError(_) => {
                ErrorCategory::Manifest
            }
            ScaffoldError::InstallError { .. } => ErrorCategory::Install,
            ScaffoldError::TemplateWriteError { .. } | ScaffoldError::IoError(_) => {
                ErrorCategory::Filesystem
            }
            ScaffoldError::ConfigError { .. } | ScaffoldError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScaffoldError::ProjectRootError { .. } => {
                "Run this tool from the project root (a package.json is required)".to_string()
            }
            ScaffoldError::ManifestError { path, .. } => {
                format!("Could not update the project manifest at {}", path)
            }
            ScaffoldError::InstallError { message } => {
                format!("Dependency installation failed: {}", message)
            }
            ScaffoldError::TemplateWriteError { path, .. } => {
                format!("Could not create {}", path)
            }
            ScaffoldError::ConfigError { message } => format!("Invalid configuration: {}", message),
            ScaffoldError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration value for {}: {}", field, reason)
            }
            ScaffoldError::IoError(e) => format!("File system error: {}", e),
            ScaffoldError::SerializationError(e) => format!("JSON error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Environment => "cd into the directory that contains package.json",
            ErrorCategory::Manifest => "Check that package.json is a valid JSON object",
            ErrorCategory::Install => {
                "Check your network and that the package manager is installed, or rerun with --skip-install"
            }
            ErrorCategory::Filesystem => "Check write permissions for the project directory",
            ErrorCategory::Configuration => "Fix the value in electron-scaffold.toml or the command line",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
