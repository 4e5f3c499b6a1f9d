mod config;
mod config_file;
mod error;
mod project;

pub const CONFIG_FILE_NAME: &str = ".versioneer.toml";
pub const DEFAULT_CHANGELOG_PATH: &str = "CHANGELOG.md";
pub const DEFAULT_MAX_INPUT_CHARS: usize = 4000;

pub use config::{ProjectConfig, SummarizerConfig, load_config, parse_config};
pub use error::ProjectError;
pub use project::{Project, discover_project};

pub type Result<T> = std::result::Result<T, ProjectError>;
